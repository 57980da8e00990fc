//! `faer-householder` provides the Householder reflector kernels that sit at the bottom of
//! QR-style factorizations of many small matrices.
//!
//! The kernels operate in place on caller-owned strided views ([`ColMut`], [`MatMut`]), never
//! allocate, and are generic over the [`ComplexField`] trait from `faer-entity`, so the same code
//! serves [`f32`], [`f64`] and [`num_complex::Complex`] of either.
//!
//! # Example
//! ```
//! use faer_householder::{col, linalg::householder::make_householder_in_place};
//!
//! let mut head = 3.0f64;
//! let mut tail = [4.0, 0.0];
//!
//! let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
//!
//! assert_eq!(head, 5.0);
//! assert_eq!(tail, [-2.0, 0.0]);
//! assert_eq!(tau, 2.5);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

use equator::{assert, debug_assert};

pub mod col;
pub mod linalg;
pub mod mat;
pub mod utils;

pub use col::{ColMut, ColRef};
pub use mat::MatMut;
pub use reborrow;

pub use faer_entity::{ComplexField, Entity, RealField};

/// Errors that can occur when building a view over caller-supplied storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViewError {
    /// A stride of zero was given for a dimension with more than one element.
    ZeroStride,
    /// The strided extent of the view does not fit in the provided storage.
    OutOfBounds {
        /// Number of elements the view would need to access.
        required: usize,
        /// Number of elements in the provided storage.
        available: usize,
    },
    /// Two distinct entries of the view would refer to the same element of the storage.
    Overlapping,
}

impl core::fmt::Display for ViewError {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for ViewError {}

#[cfg(feature = "perf-warn")]
#[macro_export]
#[doc(hidden)]
macro_rules! __perf_warn {
    ($name: ident) => {{
        #[inline(always)]
        #[allow(non_snake_case)]
        fn $name() -> &'static ::core::sync::atomic::AtomicBool {
            static $name: ::core::sync::atomic::AtomicBool =
                ::core::sync::atomic::AtomicBool::new(false);
            &$name
        }
        ::core::matches!(
            $name().compare_exchange(
                false,
                true,
                ::core::sync::atomic::Ordering::Relaxed,
                ::core::sync::atomic::Ordering::Relaxed,
            ),
            Ok(_)
        )
    }};
}

/// Parallelism strategy that can be passed to the batched routines of the library.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parallelism {
    /// No parallelism.
    ///
    /// The code is executed sequentially on the same thread that calls a function
    /// and passes this argument.
    None,
    /// Rayon parallelism. Only avaialble with the `rayon` feature.
    ///
    /// The code is possibly executed in parallel on the current thread, as well as the currently
    /// active rayon thread pool.
    ///
    /// The contained value represents a hint about the number of threads an implementation should
    /// use, but there is no way to guarantee how many or which threads will be used.
    ///
    /// A value of `0` treated as equivalent to `rayon::current_num_threads()`.
    #[cfg(feature = "rayon")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    Rayon(usize),
}
