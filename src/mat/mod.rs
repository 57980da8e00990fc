//! Strided matrix views.
//!
//! The batched routines take a block of vectors as a [`MatMut`], one vector per column. The
//! view only exists to carry the layout of that block and to hand out disjoint columns.

use core::ptr::NonNull;
use faer_entity::*;

#[repr(C)]
pub(crate) struct MatImpl<E: Entity> {
    pub(crate) ptr: NonNull<E>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
    pub(crate) row_stride: isize,
    pub(crate) col_stride: isize,
}

impl<E: Entity> Copy for MatImpl<E> {}
impl<E: Entity> Clone for MatImpl<E> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

unsafe impl<E: Entity> Sync for MatImpl<E> {}
unsafe impl<E: Entity> Send for MatImpl<E> {}

mod matmut;
pub use matmut::{
    from_column_major_slice_mut, from_raw_parts_mut, from_slice_with_strides_mut, MatMut,
};
