//! Batched construction of Householder reflectors.
//!
//! A batch is a block of vectors stored as the columns of a [`MatMut`]. Every column is reflected
//! independently, so the batch can be spread over a thread pool: the block is split recursively
//! into disjoint groups of columns, each group running the sequential kernel on its own columns.
//! The result does not depend on the parallelism setting.
//!
//! # Example
//! ```
//! use faer_householder::{linalg::batched::make_householder_batch_in_place, mat, Parallelism};
//!
//! // two vectors of length 3, one per column
//! let mut batch = [3.0, 4.0, 0.0, 1.0, 0.0, 0.0f64];
//! let mut taus = [0.0; 2];
//!
//! make_householder_batch_in_place(
//!     mat::from_column_major_slice_mut(&mut batch, 3, 2),
//!     &mut taus,
//!     Parallelism::None,
//! );
//!
//! assert_eq!(batch, [5.0, -2.0, 0.0, -1.0, 0.0, 0.0]);
//! assert_eq!(taus, [2.5, 0.5]);
//! ```

use crate::{
    assert,
    linalg::householder::make_householder_in_place,
    mat::MatMut,
    utils::thread::{join_raw, parallelism_degree},
    Parallelism,
};
use faer_entity::*;
use reborrow::*;

/// Batches with at most this many columns are not split further.
const SEQUENTIAL_BLOCKSIZE: usize = 16;

/// Computes one Householder reflector per column of `matrix`.
///
/// Column `j` holds the vector $[\chi_1; x_2]$, with $\chi_1$ in row `0`. On output, row `0`
/// holds $\alpha$, the remaining rows hold the essential part of the reflector, and `taus[j]`
/// holds its factor, exactly as if
/// [`make_householder_in_place`](crate::linalg::householder::make_householder_in_place) had been
/// called on each column in turn.
///
/// # Panics
/// - Panics if `taus.len() != matrix.ncols()`.
/// - Panics if `matrix.nrows() == 0` while `matrix.ncols() > 0`.
#[track_caller]
pub fn make_householder_batch_in_place<E: ComplexField>(
    matrix: MatMut<'_, E>,
    taus: &mut [E::Real],
    parallelism: Parallelism,
) {
    assert!(all(
        taus.len() == matrix.ncols(),
        matrix.ncols() == 0 || matrix.nrows() > 0,
    ));

    #[cfg(feature = "perf-warn")]
    if let Some(warning) = layout_warning(&matrix) {
        if crate::__perf_warn!(HOUSEHOLDER_BATCH_WARN) {
            log::warn!(target: "faer_perf", "{warning}");
        }
    }

    make_householder_batch_impl(matrix, taus, parallelism);
}

#[cfg(feature = "perf-warn")]
fn layout_warning<E: Entity>(matrix: &MatMut<'_, E>) -> Option<&'static str> {
    if matrix.ncols() == 0 || matrix.nrows() <= 1 || matrix.row_stride().unsigned_abs() == 1 {
        None
    } else if matrix.col_stride().unsigned_abs() == 1 {
        Some("Batched Householder prefers column-major matrix. Found row-major matrix.")
    } else {
        Some("Batched Householder prefers column-major matrix. Found matrix with generic strides.")
    }
}

fn make_householder_batch_impl<E: ComplexField>(
    mut matrix: MatMut<'_, E>,
    taus: &mut [E::Real],
    parallelism: Parallelism,
) {
    let n = matrix.ncols();

    if n <= SEQUENTIAL_BLOCKSIZE || parallelism_degree(parallelism) == 1 {
        for (j, tau) in taus.iter_mut().enumerate() {
            let (head, tail) = matrix.rb_mut().col_mut(j).split_at_mut(1);
            *tau = make_householder_in_place(head.get_mut(0), tail);
        }
        return;
    }

    let mid = n / 2;
    let (left, right) = matrix.split_at_col_mut(mid);
    let (taus_left, taus_right) = taus.split_at_mut(mid);
    join_raw(
        |parallelism| make_householder_batch_impl(left, taus_left, parallelism),
        |parallelism| make_householder_batch_impl(right, taus_right, parallelism),
        parallelism,
    );
}
