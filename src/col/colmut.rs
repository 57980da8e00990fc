use super::*;
use crate::{
    assert, debug_assert,
    utils::{check_fits, strided_extent},
    ViewError,
};
use core::marker::PhantomData;
use reborrow::*;

/// Mutable view over a column vector, similar to a mutable reference to a strided [prim@slice].
///
/// A `ColMut` is the only way to reach the elements it covers for as long as it lives, so two
/// mutable views handed to concurrent calls never alias unless they were built through
/// [`from_raw_parts_mut`] in violation of its safety contract.
///
/// # Move semantics
/// Since `ColMut` mutably borrows data, it cannot be [`Copy`]. This means that if we pass a
/// `ColMut` to a function that takes it by value, it will be moved into that function and can no
/// longer be used later. To reuse a view after passing it by value, reborrow it first with
/// [`ReborrowMut::rb_mut`].
#[repr(C)]
pub struct ColMut<'a, E: Entity> {
    pub(super) inner: VecImpl<E>,
    pub(super) __marker: PhantomData<&'a mut E>,
}

impl<'short, E: Entity> Reborrow<'short> for ColMut<'_, E> {
    type Target = ColRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        ColRef {
            inner: self.inner,
            __marker: PhantomData,
        }
    }
}

impl<'short, E: Entity> ReborrowMut<'short> for ColMut<'_, E> {
    type Target = ColMut<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        ColMut {
            inner: self.inner,
            __marker: PhantomData,
        }
    }
}

impl<'a, E: Entity> IntoConst for ColMut<'a, E> {
    type Target = ColRef<'a, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        ColRef {
            inner: self.inner,
            __marker: PhantomData,
        }
    }
}

impl<'a, E: Entity> ColMut<'a, E> {
    #[inline]
    pub(crate) unsafe fn __from_raw_parts(ptr: *mut E, nrows: usize, row_stride: isize) -> Self {
        Self {
            inner: VecImpl {
                ptr: NonNull::new_unchecked(ptr),
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

    /// Returns a mutable pointer to the first element of the column.
    #[inline(always)]
    pub fn as_ptr_mut(self) -> *mut E {
        self.inner.ptr.as_ptr()
    }

    /// Returns the row stride of the column, specified in number of elements, not in bytes.
    #[inline(always)]
    pub fn row_stride(&self) -> isize {
        self.inner.stride
    }

    /// Returns a raw pointer to the element at the given index.
    #[inline(always)]
    pub fn ptr_at_mut(self, row: usize) -> *mut E {
        let offset = (row as isize).wrapping_mul(self.inner.stride);
        self.as_ptr_mut().wrapping_offset(offset)
    }

    /// Returns a raw pointer to the element at the given index, assuming the provided index
    /// is within the size of the vector.
    ///
    /// # Safety
    /// The behavior is undefined if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn ptr_inbounds_at_mut(self, row: usize) -> *mut E {
        debug_assert!(row < self.nrows());
        let stride = self.inner.stride;
        self.as_ptr_mut()
            .offset(crate::utils::unchecked_mul(row, stride))
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
    pub fn split_at_mut(self, row: usize) -> (Self, Self) {
        assert!(row <= self.nrows());
        let nrows = self.nrows();
        let row_stride = self.row_stride();
        let top = self.inner.ptr.as_ptr();
        unsafe {
            (
                Self::__from_raw_parts(top, row, row_stride),
                Self::__from_raw_parts(self.ptr_at_mut(row), nrows - row, row_stride),
            )
        }
    }

    /// Returns a mutable reference to the element at the given index, with bound checks.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub fn get_mut(self, row: usize) -> &'a mut E {
        assert!(row < self.nrows());
        unsafe { &mut *self.ptr_inbounds_at_mut(row) }
    }

    /// Reads the value of the element at the given index, with bound checks.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub fn read(&self, row: usize) -> E {
        self.rb().read(row)
    }

    /// Writes the value to the element at the given index.
    ///
    /// # Safety
    /// The behavior is undefined if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn write_unchecked(&mut self, row: usize, value: E) {
        *self.rb_mut().ptr_inbounds_at_mut(row) = value;
    }

    /// Writes the value to the element at the given index, with bound checks.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    #[inline(always)]
    #[track_caller]
    pub fn write(&mut self, row: usize, value: E) {
        assert!(row < self.nrows());
        unsafe { self.write_unchecked(row, value) };
    }

    /// Applies `f` to every element of the column, in index order, and stores the result in
    /// place.
    #[inline]
    pub fn for_each_mut(&mut self, mut f: impl FnMut(E) -> E) {
        for i in 0..self.nrows() {
            unsafe {
                let ptr = self.rb_mut().ptr_inbounds_at_mut(i);
                *ptr = f(*ptr);
            }
        }
    }

    /// Returns a view over the `self`, with the rows in reversed order.
    #[inline(always)]
    #[must_use]
    pub fn reverse_rows_mut(self) -> Self {
        let nrows = self.nrows();
        let row_stride = self.row_stride().wrapping_neg();

        let ptr = self.rb().ptr_at(nrows.saturating_sub(1)) as *mut E;
        unsafe { Self::__from_raw_parts(ptr, nrows, row_stride) }
    }

    /// Returns the L2 norm of `self`. See [`ColRef::norm_l2`].
    #[inline]
    pub fn norm_l2(&self) -> E::Real
    where
        E: ComplexField,
    {
        self.rb().norm_l2()
    }
}

impl<E: Entity> core::fmt::Debug for ColMut<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.rb(), f)
    }
}

/// Creates a `ColMut` from a pointer to the column vector data, number of rows, and row stride.
///
/// # Safety
/// The behavior is undefined if any of the following conditions are violated:
/// * For each `i < nrows`, `ptr.offset(i * row_stride)` must point to a valid, initialized
///   element of type `E`, and the whole range must belong to a single allocation.
/// * Distinct indices must refer to distinct elements, which rules out a zero stride when
///   `nrows > 1`.
/// * No element in that range may be accessed through any other pointer or reference for the
///   duration of the lifetime `'a`. In particular, views handed to concurrent calls must cover
///   disjoint elements.
/// * `ptr` must be non null and properly aligned, even when `nrows` is zero.
#[inline(always)]
pub unsafe fn from_raw_parts_mut<'a, E: Entity>(
    ptr: *mut E,
    nrows: usize,
    row_stride: isize,
) -> ColMut<'a, E> {
    ColMut::__from_raw_parts(ptr, nrows, row_stride)
}

/// Creates a `ColMut` from a mutable slice view over the column vector data. The result has the
/// same number of rows as the length of the input slice.
#[inline(always)]
pub fn from_slice_mut<E: Entity>(slice: &mut [E]) -> ColMut<'_, E> {
    unsafe { from_raw_parts_mut(slice.as_mut_ptr(), slice.len(), 1) }
}

/// Creates a `ColMut` with `nrows` elements taken every `row_stride` elements of `slice`.
///
/// The layout rules are the same as for [`from_slice_with_stride`](super::from_slice_with_stride).
///
/// # Errors
/// - [`ViewError::ZeroStride`] if `row_stride == 0` and `nrows > 1`.
/// - [`ViewError::OutOfBounds`] if the strided extent does not fit in `slice`.
#[inline]
pub fn from_slice_with_stride_mut<E: Entity>(
    slice: &mut [E],
    nrows: usize,
    row_stride: isize,
) -> Result<ColMut<'_, E>, ViewError> {
    let extent = strided_extent(nrows, row_stride, slice.len())?;
    check_fits(extent.span, slice.len())?;
    unsafe {
        Ok(from_raw_parts_mut(
            slice.as_mut_ptr().wrapping_add(extent.start),
            nrows,
            row_stride,
        ))
    }
}
