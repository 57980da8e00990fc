//! Householder reflections.
//!
//! A Householder reflection is linear transformation that describes a reflection about a
//! hyperplane that crosses the origin of the space.
//!
//! Given a vector $x = [\chi_1; x_2]$, the reflector computed here is written as
//! $$H = I - \frac{vv^H}{\tau},$$
//! with $v = [1; u_2]$ and a real-valued $\tau$, such that $Hx = \alpha e_0$. $H$ is Hermitian and
//! unitary, so applying it twice restores the original vector.
//!
//! The vector $u_2$ is called the essential part of the reflector. It is stored in place of $x_2$,
//! while $\alpha$ is stored in place of $\chi_1$.

use crate::{
    assert,
    col::{self, ColMut, ColRef},
    mat::MatMut,
    ViewError,
};
use faer_entity::*;
use reborrow::*;

/// Returns the unit scalar whose phase is used for $\alpha$.
///
/// Values on the real axis, which includes every value of a real type, use `1` when the real part
/// is positive and `-1` otherwise. Other values use $\chi_1 / |\chi_1|$.
#[inline(always)]
fn reflector_sign<E: ComplexField>(head: E, head_norm: E::Real) -> E {
    let zero = E::Real::faer_zero();
    if head.faer_imag() == zero {
        if head.faer_real() > zero {
            E::faer_one()
        } else {
            E::faer_one().faer_neg()
        }
    } else {
        head.faer_scale_real(head_norm.faer_inv())
    }
}

/// Computes the Householder reflection $I - \frac{v v^H}{\tau}$ such that when multiplied by
/// $x = [\chi_1; x_2]$ from the left, the result is $\alpha e_0$, and returns $\tau$.
///
/// $\chi_1$ is read from `head`, which is then overwritten with $\alpha$. $x_2$ is read from `tail`,
/// which is then overwritten with the essential part $u_2$ of $v = [1; u_2]$.
///
/// $\alpha$ takes the sign (or phase, for complex values) of $\chi_1$, and $|\alpha| = \|x\|_2$.
/// The returned $\tau$ is at least `0.5`.
///
/// If $x_2$ is zero, which includes the case of an empty `tail`, no reflection is needed:
/// `head` is negated, `tail` is left untouched, and `0.5` is returned. The implied reflector
/// $I - 2e_0e_0^H$ is consistent with the negated head.
///
/// NaN and infinite inputs are not checked for, and propagate to the outputs.
///
/// # Example
/// ```
/// use faer_householder::{col, linalg::householder::make_householder_in_place};
///
/// let mut head = 3.0f64;
/// let mut tail = [4.0, 0.0];
///
/// let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
///
/// assert_eq!((head, tail, tau), (5.0, [-2.0, 0.0], 2.5));
/// ```
#[inline]
pub fn make_householder_in_place<E: ComplexField>(
    head: &mut E,
    mut tail: ColMut<'_, E>,
) -> E::Real {
    let one_half = E::Real::faer_from_f64(0.5);

    let tail_norm = tail.norm_l2();
    if tail_norm == E::Real::faer_zero() {
        *head = head.faer_neg();
        return one_half;
    }

    let head_norm = head.faer_abs();
    let norm = (tail_norm.faer_mul(tail_norm))
        .faer_add(head_norm.faer_mul(head_norm))
        .faer_sqrt();

    let alpha = reflector_sign(*head, head_norm).faer_scale_real(norm);

    let head_minus_alpha = head.faer_sub(alpha);
    let head_minus_alpha_inv = head_minus_alpha.faer_inv();
    tail.for_each_mut(|x| x.faer_mul(head_minus_alpha_inv));

    let ratio = tail_norm.faer_div(head_minus_alpha.faer_abs());
    let tau = one_half.faer_add(one_half.faer_mul(ratio.faer_mul(ratio)));

    *head = alpha;
    tau
}

/// Same as [`make_householder_in_place`], with the tail given as raw storage: `tail_len` elements
/// of `tail`, `tail_stride` elements apart.
///
/// The layout rules are those of [`col::from_slice_with_stride_mut`]. In particular a negative
/// stride walks `tail` backwards.
///
/// # Errors
/// Returns a [`ViewError`] if the layout is invalid, in which case neither `head` nor `tail` is
/// modified.
///
/// # Example
/// ```
/// use faer_householder::linalg::householder::try_make_householder_in_place;
///
/// // the tail is the first row of a column-major 2x3 matrix
/// let mut head = 3.0f64;
/// let mut storage = [4.0, 7.0, 0.0, 7.0, 0.0, 7.0];
///
/// let tau = try_make_householder_in_place(&mut head, &mut storage, 3, 2).unwrap();
///
/// assert_eq!((head, tau), (5.0, 2.5));
/// assert_eq!(storage, [-2.0, 7.0, 0.0, 7.0, 0.0, 7.0]);
/// ```
#[inline]
pub fn try_make_householder_in_place<E: ComplexField>(
    head: &mut E,
    tail: &mut [E],
    tail_len: usize,
    tail_stride: isize,
) -> Result<E::Real, ViewError> {
    let tail = col::from_slice_with_stride_mut(tail, tail_len, tail_stride)?;
    Ok(make_householder_in_place(head, tail))
}

/// Computes the product of the Householder reflection $I - \frac{v v^H}{\tau}$ with `target`,
/// and stores the result in `target`.
///
/// $v = [1; u_2]$, where $u_2$ is `essential`, as produced by [`make_householder_in_place`].
///
/// # Panics
/// Panics if `target.nrows() != essential.nrows() + 1`.
#[track_caller]
pub fn apply_householder_on_the_left_in_place<E: ComplexField>(
    essential: ColRef<'_, E>,
    tau: E::Real,
    target: ColMut<'_, E>,
) {
    assert!(target.nrows() == essential.nrows() + 1);

    let (mut target_head, mut target_tail) = target.split_at_mut(1);

    let dot = essential.iter().enumerate().fold(target_head.read(0), |acc, (i, u)| {
        acc.faer_add(u.faer_conj().faer_mul(target_tail.read(i)))
    });
    let k = dot.faer_scale_real(tau.faer_inv()).faer_neg();

    target_head.write(0, target_head.read(0).faer_add(k));
    for (i, u) in essential.iter().enumerate() {
        let x = target_tail.read(i);
        target_tail.write(i, x.faer_add(k.faer_mul(u)));
    }
}

/// Computes the product of the Householder reflection $I - \frac{v v^H}{\tau}$ with every column
/// of `matrix`, and stores the result in `matrix`.
///
/// # Panics
/// Panics if `matrix.nrows() != essential.nrows() + 1`.
#[track_caller]
pub fn apply_householder_on_the_left_to_cols_in_place<E: ComplexField>(
    essential: ColRef<'_, E>,
    tau: E::Real,
    matrix: MatMut<'_, E>,
) {
    assert!(matrix.nrows() == essential.nrows() + 1);
    for target in matrix.col_iter_mut() {
        apply_householder_on_the_left_in_place(essential.rb(), tau, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use crate::mat;
    use assert_approx_eq::assert_approx_eq;
    use num_complex::Complex;
    use rand::prelude::*;
    use std::cell::RefCell;

    type C = Complex<f64>;

    thread_local! {
        static RNG: RefCell<StdRng> = RefCell::new(StdRng::seed_from_u64(0));
    }

    // magnitudes are kept away from zero so that the reflector stays well conditioned
    fn random_f64() -> f64 {
        RNG.with(|rng| {
            let mut rng = rng.borrow_mut();
            let x: f64 = rng.gen_range(0.5..1.5);
            if rng.gen() {
                x
            } else {
                -x
            }
        })
    }

    fn random_c64() -> C {
        C::new(random_f64(), random_f64())
    }

    fn apply_to_vec<E: ComplexField>(essential: &[E], tau: E::Real, x: &[E]) -> Vec<E> {
        let mut y = x.to_vec();
        apply_householder_on_the_left_in_place(
            col::from_slice(essential),
            tau,
            col::from_slice_mut(&mut y),
        );
        y
    }

    fn norm<E: ComplexField>(x: &[E]) -> E::Real {
        col::from_slice(x).norm_l2()
    }

    fn assert_close<E: ComplexField<Real = f64>>(a: E, b: E) {
        std::assert!(a.faer_sub(b).faer_abs() < 1e-10, "{a:?} != {b:?}");
    }

    #[test]
    fn worked_example() {
        let mut head = 3.0f64;
        let mut tail = [4.0, 0.0];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head == 5.0, tail == [-2.0, 0.0], tau == 2.5));

        let mut head = 3.0f32;
        let mut tail = [4.0f32, 0.0];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head == 5.0, tail == [-2.0, 0.0], tau == 2.5));

        let y = apply_to_vec(&tail, tau, &[3.0, 4.0, 0.0]);
        assert!(y == vec![5.0, 0.0, 0.0]);
    }

    #[test]
    fn negative_head_takes_negative_alpha() {
        let mut head = -3.0f64;
        let mut tail = [4.0];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        // denom = -3 - (-5) = 2
        assert!(all(head == -5.0, tail == [2.0], tau == 2.5));
    }

    #[test]
    fn zero_head_takes_negative_alpha() {
        let mut head = 0.0f64;
        let mut tail = [3.0, 4.0];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head == -5.0, tau == 1.0));
        assert_approx_eq!(tail[0], 0.6, 1e-15);
        assert_approx_eq!(tail[1], 0.8, 1e-15);
    }

    #[test]
    fn degenerate_tail() {
        let mut head = 2.0f64;
        let mut empty: [f64; 0] = [];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut empty));
        assert!(all(head == -2.0, tau == 0.5));

        let mut head = -1.5f64;
        let mut tail = [0.0, -0.0, 0.0];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head == 1.5, tau == 0.5));
        assert!(tail.map(f64::is_sign_negative) == [false, true, false]);

        let mut head = 0.0f64;
        let mut tail = [0.0];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head == 0.0, head.is_sign_negative(), tau == 0.5));

        // the implied reflector flips the head, matching the in-place negation
        let y = apply_to_vec(&tail, tau, &[-7.0, 0.0]);
        assert!(y == vec![7.0, 0.0]);

        let mut head = C::new(1.0, -2.0);
        let mut tail = [C::new(0.0, 0.0); 2];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head == C::new(-1.0, 2.0), tau == 0.5));
    }

    #[test]
    fn norm_equality_and_tau_bound() {
        for m in 1..10 {
            let x: Vec<f64> = (0..m + 1).map(|_| random_f64()).collect();
            let mut head = x[0];
            let mut tail = x[1..].to_vec();

            let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));

            assert_approx_eq!(head.abs(), norm(&x), 1e-12);
            assert!(head.signum() == x[0].signum());
            assert!(tau >= 0.5);
            // tau is half the squared norm of v = [1; u2]
            assert_approx_eq!(tau, 0.5 * (1.0 + norm(&tail).powi(2)), 1e-9 * tau);
        }
    }

    #[test]
    fn zeroing_property_real() {
        for m in 0..10 {
            let x: Vec<f64> = (0..m + 1).map(|_| random_f64()).collect();
            let mut head = x[0];
            let mut tail = x[1..].to_vec();

            let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
            let y = apply_to_vec(&tail, tau, &x);

            assert_approx_eq!(y[0], head, 1e-10);
            for &yi in &y[1..] {
                assert_approx_eq!(yi, 0.0, 1e-10);
            }
        }
    }

    #[test]
    fn zeroing_property_complex() {
        for m in 0..10 {
            let x: Vec<C> = (0..m + 1).map(|_| random_c64()).collect();
            let mut head = x[0];
            let mut tail = x[1..].to_vec();

            let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
            let y = apply_to_vec(&tail, tau, &x);

            assert_approx_eq!(head.faer_abs(), norm(&x), 1e-12);
            assert!(tau >= 0.5);
            assert_close(y[0], head);
            for &yi in &y[1..] {
                assert_close(yi, C::new(0.0, 0.0));
            }
        }
    }

    #[test]
    fn complex_phase() {
        let mut head = C::new(0.0, 3.0);
        let mut tail = [C::new(4.0, 0.0)];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));

        assert_close(head, C::new(0.0, 5.0));
        assert_close(tail[0], C::new(0.0, 2.0));
        assert_approx_eq!(tau, 2.5, 1e-12);
    }

    #[test]
    fn complex_on_real_axis_matches_real() {
        let mut head = C::new(3.0, 0.0);
        let mut tail = [C::new(4.0, 0.0), C::new(0.0, 0.0)];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head == C::new(5.0, 0.0), tau == 2.5));
        assert_close(tail[0], C::new(-2.0, 0.0));
        assert_close(tail[1], C::new(0.0, 0.0));

        let mut head = C::new(-3.0, 0.0);
        let mut tail = [C::new(0.0, 4.0)];
        make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(head == C::new(-5.0, 0.0));
    }

    #[test]
    fn reflector_is_unitary_and_involutive() {
        for m in 1..8 {
            let x: Vec<C> = (0..m + 1).map(|_| random_c64()).collect();
            let mut head = x[0];
            let mut tail = x[1..].to_vec();
            let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));

            for _ in 0..4 {
                let e: Vec<C> = (0..m + 1).map(|_| random_c64()).collect();
                let he = apply_to_vec(&tail, tau, &e);
                assert_approx_eq!(norm(&he), norm(&e), 1e-10);

                let hhe = apply_to_vec(&tail, tau, &he);
                for (a, b) in hhe.into_iter().zip(e) {
                    assert_close(a, b);
                }
            }
        }
    }

    #[test]
    fn strided_tails_match_contiguous() {
        let x: Vec<f64> = (0..5).map(|_| random_f64()).collect();

        let mut head = x[0];
        let mut tail = x[1..].to_vec();
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));

        // tail stored as a row of a column-major 3x4 matrix
        let mut storage = vec![9.0; 12];
        for (i, &xi) in x[1..].iter().enumerate() {
            storage[3 * i + 1] = xi;
        }
        let mut strided_head = x[0];
        let strided_tau =
            try_make_householder_in_place(&mut strided_head, &mut storage[1..], 4, 3).unwrap();
        assert!(all(strided_head == head, strided_tau == tau));
        for i in 0..4 {
            assert!(storage[3 * i + 1] == tail[i]);
        }
        assert!(storage.iter().filter(|&&v| v == 9.0).count() == 8);

        // tail stored backwards
        let mut storage: Vec<f64> = x[1..].iter().rev().copied().collect();
        let mut reversed_head = x[0];
        let reversed_tau =
            try_make_householder_in_place(&mut reversed_head, &mut storage, 4, -1).unwrap();
        storage.reverse();
        assert!(all(reversed_head == head, reversed_tau == tau, storage == tail));
    }

    #[test]
    fn invalid_layouts_leave_buffers_untouched() {
        let mut head = 1.0f64;
        let mut storage = [2.0, 3.0, 4.0];

        let err = try_make_householder_in_place(&mut head, &mut storage, 2, 0).unwrap_err();
        assert!(err == ViewError::ZeroStride);

        let err = try_make_householder_in_place(&mut head, &mut storage, 2, -3).unwrap_err();
        assert!(
            err == ViewError::OutOfBounds {
                required: 4,
                available: 3,
            }
        );

        assert!(all(head == 1.0, storage == [2.0, 3.0, 4.0]));
    }

    #[test]
    fn non_finite_values_propagate() {
        let mut head = f64::NAN;
        let mut tail = [1.0, 2.0];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head.is_nan(), tail[0].is_nan(), tail[1].is_nan(), tau.is_nan()));

        let mut head = 1.0f64;
        let mut tail = [f64::INFINITY];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head == f64::INFINITY, tail[0].is_nan(), tau.is_nan()));

        let mut head = 1.0f64;
        let mut tail = [f64::NAN];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));
        assert!(all(head.is_nan(), tau.is_nan()));
    }

    #[test]
    fn apply_to_block_columns() {
        let x = [1.0, 2.0, 2.0f64];
        let mut head = x[0];
        let mut tail = [x[1], x[2]];
        let tau = make_householder_in_place(&mut head, col::from_slice_mut(&mut tail));

        // first column is x itself, the others are arbitrary
        let mut block = vec![
            x[0], x[1], x[2], //
            0.5, -1.0, 3.0, //
            2.0, 0.0, -2.0,
        ];
        let orig = block.clone();
        apply_householder_on_the_left_to_cols_in_place(
            col::from_slice(&tail),
            tau,
            mat::from_column_major_slice_mut(&mut block, 3, 3),
        );

        assert_approx_eq!(block[0], head, 1e-12);
        assert_approx_eq!(block[1], 0.0, 1e-12);
        assert_approx_eq!(block[2], 0.0, 1e-12);
        for j in 1..3 {
            let expected = apply_to_vec(&tail, tau, &orig[3 * j..3 * j + 3]);
            assert!(&block[3 * j..3 * j + 3] == &expected[..]);
        }
    }

    #[test]
    #[should_panic]
    fn apply_rejects_mismatched_target() {
        let essential = [0.5f64, 0.5];
        let mut target = [1.0f64, 2.0];
        apply_householder_on_the_left_in_place(
            col::from_slice(&essential),
            1.0,
            col::from_slice_mut(&mut target),
        );
    }
}
