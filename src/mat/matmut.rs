use super::*;
use crate::{
    assert,
    col::ColMut,
    utils::{check_fits, strided_extent},
    ViewError,
};
use core::marker::PhantomData;
use reborrow::*;

/// Mutable view over a matrix, similar to a mutable reference to a 2D strided [prim@slice].
///
/// # Move semantics
/// Since `MatMut` mutably borrows data, it cannot be [`Copy`]. Methods that split the view, like
/// [`MatMut::col_mut`] or [`MatMut::split_at_col_mut`], consume it. To keep using a view after
/// such a call, reborrow it first with [`ReborrowMut::rb_mut`].
#[repr(C)]
pub struct MatMut<'a, E: Entity> {
    pub(super) inner: MatImpl<E>,
    pub(super) __marker: PhantomData<&'a mut E>,
}

impl<'short, E: Entity> ReborrowMut<'short> for MatMut<'_, E> {
    type Target = MatMut<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        MatMut {
            inner: self.inner,
            __marker: PhantomData,
        }
    }
}

impl<'a, E: Entity> MatMut<'a, E> {
    #[inline]
    pub(crate) unsafe fn __from_raw_parts(
        ptr: *mut E,
        nrows: usize,
        ncols: usize,
        row_stride: isize,
        col_stride: isize,
    ) -> Self {
        Self {
            inner: MatImpl {
                ptr: NonNull::new_unchecked(ptr),
                nrows,
                ncols,
                row_stride,
                col_stride,
            },
            __marker: PhantomData,
        }
    }

    /// Returns the number of rows of the matrix.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.inner.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.inner.ncols
    }

    /// Returns the row stride of the matrix, specified in number of elements, not in bytes.
    #[inline(always)]
    pub fn row_stride(&self) -> isize {
        self.inner.row_stride
    }

    /// Returns the column stride of the matrix, specified in number of elements, not in bytes.
    #[inline(always)]
    pub fn col_stride(&self) -> isize {
        self.inner.col_stride
    }

    /// Returns a mutable pointer to the matrix data.
    #[inline(always)]
    pub fn as_ptr_mut(self) -> *mut E {
        self.inner.ptr.as_ptr()
    }

    #[inline(always)]
    fn ptr_at_impl(inner: MatImpl<E>, row: usize, col: usize) -> *mut E {
        let offset = ((row as isize).wrapping_mul(inner.row_stride))
            .wrapping_add((col as isize).wrapping_mul(inner.col_stride));
        inner.ptr.as_ptr().wrapping_offset(offset)
    }

    /// Returns a raw pointer to the element at the given indices.
    #[inline(always)]
    pub fn ptr_at_mut(self, row: usize, col: usize) -> *mut E {
        Self::ptr_at_impl(self.inner, row, col)
    }

    /// Reads the value of the element at the given indices, with bound checks.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn read(&self, row: usize, col: usize) -> E {
        assert!(all(row < self.nrows(), col < self.ncols()));
        unsafe { Self::ptr_at_impl(self.inner, row, col).read() }
    }

    /// Writes the value to the element at the given indices, with bound checks.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        assert!(all(row < self.nrows(), col < self.ncols()));
        unsafe { *self.rb_mut().ptr_at_mut(row, col) = value };
    }

    /// Returns a view over the column at the given index.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `col < self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn col_mut(self, col: usize) -> ColMut<'a, E> {
        assert!(col < self.ncols());
        let nrows = self.nrows();
        let row_stride = self.row_stride();
        unsafe { crate::col::from_raw_parts_mut(self.ptr_at_mut(0, col), nrows, row_stride) }
    }

    /// Splits the matrix vertically at the given column into two parts and returns an array of
    /// each submatrix, in the following order:
    /// * left.
    /// * right.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `col <= self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn split_at_col_mut(self, col: usize) -> (Self, Self) {
        assert!(col <= self.ncols());
        let MatImpl {
            nrows,
            ncols,
            row_stride,
            col_stride,
            ..
        } = self.inner;
        let left = self.inner.ptr.as_ptr();
        unsafe {
            (
                Self::__from_raw_parts(left, nrows, col, row_stride, col_stride),
                Self::__from_raw_parts(
                    self.ptr_at_mut(0, col),
                    nrows,
                    ncols - col,
                    row_stride,
                    col_stride,
                ),
            )
        }
    }

    /// Returns an iterator over the columns of the matrix, from left to right.
    #[inline]
    pub fn col_iter_mut(self) -> impl ExactSizeIterator<Item = ColMut<'a, E>> {
        let ncols = self.ncols();
        let inner = self.inner;
        (0..ncols).map(move |j| {
            MatMut {
                inner,
                __marker: PhantomData,
            }
            .col_mut(j)
        })
    }
}

impl<E: Entity> core::fmt::Debug for MatMut<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct Row<'a, 'b, E: Entity>(&'a MatMut<'b, E>, usize);
        impl<E: Entity> core::fmt::Debug for Row<'_, '_, E> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_list()
                    .entries((0..self.0.ncols()).map(|j| self.0.read(self.1, j)))
                    .finish()
            }
        }
        f.debug_list()
            .entries((0..self.nrows()).map(|i| Row(self, i)))
            .finish()
    }
}

/// Creates a `MatMut` from a pointer to the matrix data, dimensions, and strides.
///
/// # Safety
/// The behavior is undefined if any of the following conditions are violated:
/// * For each `i < nrows` and `j < ncols`, `ptr.offset(i * row_stride + j * col_stride)` must
///   point to a valid, initialized element of type `E`, and the whole range must belong to a
///   single allocation.
/// * Distinct index pairs must refer to distinct elements.
/// * No element in that range may be accessed through any other pointer or reference for the
///   duration of the lifetime `'a`.
/// * `ptr` must be non null and properly aligned, even when the matrix is empty.
#[inline(always)]
pub unsafe fn from_raw_parts_mut<'a, E: Entity>(
    ptr: *mut E,
    nrows: usize,
    ncols: usize,
    row_stride: isize,
    col_stride: isize,
) -> MatMut<'a, E> {
    MatMut::__from_raw_parts(ptr, nrows, ncols, row_stride, col_stride)
}

/// Creates a `MatMut` from a mutable slice holding the matrix in column-major order.
///
/// # Panics
/// The function panics if any of the following conditions are violated:
/// * `nrows * ncols == slice.len()`
#[inline(always)]
#[track_caller]
pub fn from_column_major_slice_mut<E: Entity>(
    slice: &mut [E],
    nrows: usize,
    ncols: usize,
) -> MatMut<'_, E> {
    assert!(Some(slice.len()) == nrows.checked_mul(ncols));
    unsafe {
        from_raw_parts_mut(
            slice.as_mut_ptr(),
            nrows,
            ncols,
            1,
            nrows.max(1) as isize,
        )
    }
}

/// Creates a `MatMut` over `slice`, where entry `(i, j)` lives at
/// `start + i * row_stride + j * col_stride`.
///
/// Negative strides are allowed, in which case `start` is chosen so that the view covers the
/// lowest addresses it can inside `slice`, as for
/// [`col::from_slice_with_stride`](crate::col::from_slice_with_stride).
///
/// # Errors
/// - [`ViewError::ZeroStride`] if a dimension with more than one element has a zero stride.
/// - [`ViewError::OutOfBounds`] if the strided extent does not fit in `slice`.
/// - [`ViewError::Overlapping`] if the strides do not keep the columns apart (neither
///   `|col_stride| >= nrows * |row_stride|` nor `|row_stride| >= ncols * |col_stride|`).
#[inline]
pub fn from_slice_with_strides_mut<E: Entity>(
    slice: &mut [E],
    nrows: usize,
    ncols: usize,
    row_stride: isize,
    col_stride: isize,
) -> Result<MatMut<'_, E>, ViewError> {
    if nrows == 0 || ncols == 0 {
        return Ok(unsafe {
            from_raw_parts_mut(slice.as_mut_ptr(), nrows, ncols, row_stride, col_stride)
        });
    }

    let rows = strided_extent(nrows, row_stride, slice.len())?;
    let cols = strided_extent(ncols, col_stride, slice.len())?;

    if nrows > 1 && ncols > 1 {
        let rs = row_stride.unsigned_abs();
        let cs = col_stride.unsigned_abs();
        let cols_apart = nrows.checked_mul(rs).map_or(false, |extent| cs >= extent);
        let rows_apart = ncols.checked_mul(cs).map_or(false, |extent| rs >= extent);
        if !(cols_apart || rows_apart) {
            return Err(ViewError::Overlapping);
        }
    }

    let required = (rows.span - 1)
        .checked_add(cols.span)
        .filter(|&required| required <= isize::MAX as usize)
        .ok_or(ViewError::OutOfBounds {
            required: usize::MAX,
            available: slice.len(),
        })?;
    check_fits(required, slice.len())?;

    unsafe {
        Ok(from_raw_parts_mut(
            slice.as_mut_ptr().wrapping_add(rows.start + cols.start),
            nrows,
            ncols,
            row_stride,
            col_stride,
        ))
    }
}
