use super::*;
use crate::{
    assert, debug_assert,
    utils::{check_fits, strided_extent},
    ViewError,
};
use core::marker::PhantomData;
use reborrow::*;

/// Immutable view over a column vector, similar to an immutable reference to a strided
/// [prim@slice].
///
/// # Note
///
/// Unlike a slice, the row stride may be any value, including negative ones, in which case the
/// view walks the underlying storage backwards.
#[repr(C)]
pub struct ColRef<'a, E: Entity> {
    pub(super) inner: VecImpl<E>,
    pub(super) __marker: PhantomData<&'a E>,
}

impl<E: Entity> Clone for ColRef<'_, E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Entity> Copy for ColRef<'_, E> {}

impl<'short, E: Entity> Reborrow<'short> for ColRef<'_, E> {
    type Target = ColRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        *self
    }
}

impl<'short, E: Entity> ReborrowMut<'short> for ColRef<'_, E> {
    type Target = ColRef<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        *self
    }
}

impl<E: Entity> IntoConst for ColRef<'_, E> {
    type Target = Self;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}

impl<'a, E: Entity> ColRef<'a, E> {
    #[inline]
    pub(crate) unsafe fn __from_raw_parts(ptr: *const E, nrows: usize, row_stride: isize) -> Self {
        Self {
            inner: VecImpl {
                ptr: NonNull::new_unchecked(ptr as *mut E),
                len: nrows,
                stride: row_stride,
            },
            __marker: PhantomData,
        }
    }

    /// Returns the number of rows of the column.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.inner.len
    }

    /// Returns the number of columns of the column. This is always equal to `1`.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        1
    }

    /// Returns a pointer to the first element of the column.
    #[inline(always)]
    pub fn as_ptr(self) -> *const E {
        self.inner.ptr.as_ptr() as *const E
    }

    /// Returns the row stride of the column, specified in number of elements, not in bytes.
    #[inline(always)]
    pub fn row_stride(&self) -> isize {
        self.inner.stride
    }

    /// Returns a raw pointer to the element at the given index.
    #[inline(always)]
    pub fn ptr_at(self, row: usize) -> *const E {
        let offset = (row as isize).wrapping_mul(self.inner.stride);
        self.as_ptr().wrapping_offset(offset)
    }

    /// Returns a raw pointer to the element at the given index, assuming the provided index
    /// is within the size of the vector.
    ///
    /// # Safety
    /// The behavior is undefined if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn ptr_inbounds_at(self, row: usize) -> *const E {
        debug_assert!(row < self.nrows());
        self.as_ptr()
            .offset(crate::utils::unchecked_mul(row, self.inner.stride))
    }

    /// Splits the column vector at the given index into two parts and
    /// returns an array of each subvector, in the following order:
    /// * top.
    /// * bottom.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row <= self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub fn split_at(self, row: usize) -> (Self, Self) {
        assert!(row <= self.nrows());
        let nrows = self.nrows();
        let row_stride = self.row_stride();
        unsafe {
            (
                Self::__from_raw_parts(self.as_ptr(), row, row_stride),
                Self::__from_raw_parts(self.ptr_at(row), nrows - row, row_stride),
            )
        }
    }

    /// Reads the value of the element at the given index.
    ///
    /// # Safety
    /// The behavior is undefined if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn read_unchecked(&self, row: usize) -> E {
        *self.ptr_inbounds_at(row)
    }

    /// Reads the value of the element at the given index, with bound checks.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub fn read(&self, row: usize) -> E {
        assert!(row < self.nrows());
        unsafe { self.read_unchecked(row) }
    }

    /// Returns a view over the `self`, with the rows in reversed order.
    #[inline(always)]
    #[must_use]
    pub fn reverse_rows(self) -> Self {
        let nrows = self.nrows();
        let row_stride = self.row_stride().wrapping_neg();

        let ptr = self.ptr_at(nrows.saturating_sub(1));
        unsafe { Self::__from_raw_parts(ptr, nrows, row_stride) }
    }

    /// Returns an iterator over the elements of the column, from top to bottom.
    #[inline]
    pub fn iter(self) -> impl ExactSizeIterator<Item = E> + DoubleEndedIterator + 'a {
        (0..self.nrows()).map(move |i| unsafe { self.read_unchecked(i) })
    }

    /// Returns the L2 norm of `self`.
    ///
    /// The squared magnitudes are accumulated in index order without rescaling, so that the
    /// result is reproducible across platforms and parallelism settings.
    #[inline]
    pub fn norm_l2(&self) -> E::Real
    where
        E: ComplexField,
    {
        self.iter()
            .fold(E::Real::faer_zero(), |acc, x| acc.faer_add(x.faer_abs2()))
            .faer_sqrt()
    }
}

impl<E: Entity> core::fmt::Debug for ColRef<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Creates a `ColRef` from a pointer to the column vector data, number of rows, and row stride.
///
/// # Safety
/// The behavior is undefined if any of the following conditions are violated:
/// * For each `i < nrows`, `ptr.offset(i * row_stride)` must point to a valid, initialized
///   element of type `E`, and the whole range must belong to a single allocation.
/// * No element in that range may be written to through another pointer or reference for the
///   duration of the lifetime `'a`.
/// * `ptr` must be non null and properly aligned, even when `nrows` is zero.
#[inline(always)]
pub unsafe fn from_raw_parts<'a, E: Entity>(
    ptr: *const E,
    nrows: usize,
    row_stride: isize,
) -> ColRef<'a, E> {
    ColRef::__from_raw_parts(ptr, nrows, row_stride)
}

/// Creates a `ColRef` from a slice view over the column vector data. The result has the same
/// number of rows as the length of the input slice.
#[inline(always)]
pub fn from_slice<E: Entity>(slice: &[E]) -> ColRef<'_, E> {
    unsafe { from_raw_parts(slice.as_ptr(), slice.len(), 1) }
}

/// Creates a `ColRef` with `nrows` elements taken every `row_stride` elements of `slice`.
///
/// With a positive stride, row `0` is `slice[0]`. With a negative stride, row `0` is the last
/// element of `slice` touched by the view, and following rows walk towards the front.
///
/// # Errors
/// - [`ViewError::ZeroStride`] if `row_stride == 0` and `nrows > 1`.
/// - [`ViewError::OutOfBounds`] if the strided extent does not fit in `slice`.
#[inline]
pub fn from_slice_with_stride<E: Entity>(
    slice: &[E],
    nrows: usize,
    row_stride: isize,
) -> Result<ColRef<'_, E>, ViewError> {
    let extent = strided_extent(nrows, row_stride, slice.len())?;
    check_fits(extent.span, slice.len())?;
    unsafe {
        Ok(from_raw_parts(
            slice.as_ptr().wrapping_add(extent.start),
            nrows,
            row_stride,
        ))
    }
}
