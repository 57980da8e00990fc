use crate::ViewError;

/// Thread spawning utilities.
pub mod thread;

#[inline(always)]
pub(crate) unsafe fn unchecked_mul(a: usize, b: isize) -> isize {
    let (prod, overflow) = (a as isize).overflowing_mul(b);
    if overflow {
        core::hint::unreachable_unchecked();
    }
    prod
}

/// Layout of one strided dimension inside a slice: where index `0` lives, and how many slots
/// the dimension spans.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Extent {
    pub(crate) start: usize,
    pub(crate) span: usize,
}

/// Computes the extent of `len` elements separated by `stride`, inside a slice of length
/// `available`.
///
/// With a negative stride, index `0` is the last slot touched, so that the view walks the storage
/// backwards.
#[inline]
pub(crate) fn strided_extent(
    len: usize,
    stride: isize,
    available: usize,
) -> Result<Extent, ViewError> {
    if len > 1 && stride == 0 {
        return Err(ViewError::ZeroStride);
    }
    if len == 0 {
        return Ok(Extent { start: 0, span: 0 });
    }

    let last = (len - 1)
        .checked_mul(stride.unsigned_abs())
        .filter(|&last| last <= isize::MAX as usize)
        .ok_or(ViewError::OutOfBounds {
            required: usize::MAX,
            available,
        })?;

    Ok(Extent {
        start: if stride < 0 { last } else { 0 },
        span: last + 1,
    })
}

/// Checks that an extent fits in a slice of length `available`.
#[inline]
pub(crate) fn check_fits(required: usize, available: usize) -> Result<(), ViewError> {
    if required > available {
        Err(ViewError::OutOfBounds {
            required,
            available,
        })
    } else {
        Ok(())
    }
}
