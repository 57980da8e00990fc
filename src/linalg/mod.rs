//! Linear algebra module.
//!
//! Contains the Householder reflector kernels and the batched driver that runs them over a block
//! of vectors.
//!
//! # Memory allocation
//! None of the routines in this module allocate. Every input and output lives in caller-owned
//! storage and is described by a strided view ([`ColMut`](crate::ColMut),
//! [`MatMut`](crate::MatMut)), so the kernels can be called from inside an outer parallel loop
//! over thousands of small blocks without contention.
//!
//! # Entity trait
//! The kernels are generic over [`ComplexField`](crate::ComplexField) from `faer-entity`. The
//! magnitude type used for norms and for the Householder factor is the associated
//! [`ComplexField::Real`](crate::ComplexField::Real), so a complex vector still produces a real
//! factor.

pub mod batched;
pub mod householder;
