//! Strided column vector views.
//!
//! A column view is a base pointer, a number of rows and a signed row stride, so that the same
//! type can describe a contiguous slice, a column of a column-major matrix, a row of a
//! column-major matrix, or any of these walked backwards.

use core::ptr::NonNull;
use faer_entity::*;

#[repr(C)]
pub(crate) struct VecImpl<E: Entity> {
    pub(crate) ptr: NonNull<E>,
    pub(crate) len: usize,
    pub(crate) stride: isize,
}

impl<E: Entity> Copy for VecImpl<E> {}
impl<E: Entity> Clone for VecImpl<E> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

unsafe impl<E: Entity> Sync for VecImpl<E> {}
unsafe impl<E: Entity> Send for VecImpl<E> {}

mod colref;
pub use colref::{from_raw_parts, from_slice, from_slice_with_stride, ColRef};

mod colmut;
pub use colmut::{from_raw_parts_mut, from_slice_mut, from_slice_with_stride_mut, ColMut};
