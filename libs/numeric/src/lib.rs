//! Hybrid Newton/bisection root finder.
//!
//! The stable-pool invariant (`cosmoarb-amm::stable`) is monotone but has
//! slopes near zero where Newton's method diverges; bisection guarantees
//! convergence given a bracketing interval but converges linearly rather
//! than quadratically. [`calc_zero`] tries Newton first and only pays for a
//! bisection bracket — which can require two expensive square roots to
//! construct the geometric-mean lower bound — when Newton actually fails.

use cosmoarb_decimal::{Decimal, Precision};
use thiserror::Error;

/// Default Newton iteration cap.
pub const NEWTON_MAX_ITER: u32 = 80;
/// Default bisection iteration cap.
pub const BISECT_MAX_ITER: u32 = 150;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RootFinderError {
    #[error("slope is zero at x = {0}")]
    SlopeZero(String),
    #[error("newton method did not converge within {0} iterations")]
    NewtonMaxIterations(u32),
    #[error("bisection endpoints do not bracket a root: f(a) and f(b) have the same sign")]
    SameSignEndpoints,
    #[error("bisection did not converge within {0} iterations")]
    BisectMaxIterations(u32),
    #[error("no bisection lower bound supplied (neither eager nor lazy)")]
    NoBisectBounds,
}

/// `calc_zero`'s bisection lower bound: either known up front, or expensive
/// enough (e.g. two square roots for a geometric mean) that it should only
/// be computed when Newton has already failed.
pub enum LowerBound<'a> {
    Eager(Decimal),
    Lazy(Box<dyn Fn() -> Decimal + 'a>),
}

impl<'a> LowerBound<'a> {
    fn resolve(self) -> Decimal {
        match self {
            LowerBound::Eager(v) => v,
            LowerBound::Lazy(thunk) => thunk(),
        }
    }
}

/// The fixed tolerance `calc_zero` uses for both Newton and bisection.
pub fn calc_zero_epsilon() -> Decimal {
    // 1e-16, independent of the caller's precision context.
    Decimal::from_str_exact("0.0000000000000001").expect("literal epsilon always parses")
}

/// `x <- x - f(x)/df(x)` until successive iterates are within `epsilon`, or
/// `max_iter` is exhausted.
pub fn newton(
    f: &dyn Fn(&Decimal) -> Decimal,
    df: &dyn Fn(&Decimal) -> Decimal,
    x0: Decimal,
    epsilon: &Decimal,
    max_iter: u32,
    precision: Precision,
) -> Result<Decimal, RootFinderError> {
    let mut x = x0;
    for _ in 0..max_iter {
        let dfx = df(&x);
        if dfx.is_zero() {
            return Err(RootFinderError::SlopeZero(x.to_decimal_string()));
        }
        let fx = f(&x);
        let delta = fx
            .div(&dfx, precision)
            .map_err(|_| RootFinderError::SlopeZero(x.to_decimal_string()))?;
        let next = x.sub(&delta);
        let diff = next.sub(&x).abs();
        x = next;
        if diff.cmp(epsilon) != std::cmp::Ordering::Greater {
            return Ok(x);
        }
    }
    Err(RootFinderError::NewtonMaxIterations(max_iter))
}

/// Repeatedly halves `[a, b]`, requiring `f(a)*f(b) <= 0` up front, until the
/// step size shrinks below `epsilon` or `max_iter` is exhausted.
pub fn bisect(
    f: &dyn Fn(&Decimal) -> Decimal,
    a: Decimal,
    b: Decimal,
    epsilon: &Decimal,
    max_iter: u32,
    precision: Precision,
) -> Result<Decimal, RootFinderError> {
    let fa = f(&a);
    let fb = f(&b);
    if fa.is_zero() {
        return Ok(a);
    }
    if fb.is_zero() {
        return Ok(b);
    }
    if fa.mul(&fb).cmp(&Decimal::zero()) == std::cmp::Ordering::Greater {
        return Err(RootFinderError::SameSignEndpoints);
    }

    let mut lower = a;
    let mut step = b.sub(&lower);
    let two = Decimal::from_i64(2);
    for _ in 0..max_iter {
        step = step
            .div(&two, precision)
            .map_err(|_| RootFinderError::SameSignEndpoints)?;
        let mid = lower.add(&step);
        let f_lower = f(&lower);
        let f_mid = f(&mid);
        if f_lower.mul(&f_mid).cmp(&Decimal::zero()) != std::cmp::Ordering::Less {
            lower = mid;
        }
        if step.abs().cmp(epsilon) != std::cmp::Ordering::Greater {
            return Ok(lower);
        }
    }
    Err(RootFinderError::BisectMaxIterations(max_iter))
}

/// Attempts Newton from `x0`; falls back to bisection over `[lower, upper]`
/// on any Newton failure, or when `ignore_negative` is set and Newton's
/// result is negative. `lower_bound` is resolved only if bisection actually
/// runs, so an expensive lazy bound never computes on the Newton-succeeds
/// path.
#[allow(clippy::too_many_arguments)]
pub fn calc_zero(
    f: &dyn Fn(&Decimal) -> Decimal,
    df: &dyn Fn(&Decimal) -> Decimal,
    x0: Decimal,
    upper: Decimal,
    ignore_negative: bool,
    lower_bound: Option<LowerBound<'_>>,
    precision: Precision,
) -> Result<Decimal, RootFinderError> {
    let epsilon = calc_zero_epsilon();
    let newton_result = newton(f, df, x0, &epsilon, NEWTON_MAX_ITER, precision);
    let accept = match &newton_result {
        Ok(root) => !ignore_negative || !root.is_negative(),
        Err(_) => false,
    };
    if accept {
        return newton_result;
    }

    let lower = match lower_bound {
        Some(bound) => bound.resolve(),
        None => return Err(RootFinderError::NoBisectBounds),
    };
    bisect(f, lower, upper, &epsilon, BISECT_MAX_ITER, precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newton_finds_sqrt_of_two() {
        let f = |x: &Decimal| x.mul(x).sub(&Decimal::from_i64(2));
        let df = |x: &Decimal| Decimal::from_i64(2).mul(x);
        let epsilon = Decimal::from_str_exact("0.0000000001").unwrap();
        let root = newton(&f, &df, Decimal::from_i64(1), &epsilon, 80, Precision::new(30)).unwrap();
        let diff = root.mul(&root).sub(&Decimal::from_i64(2)).abs();
        assert!(diff.cmp(&epsilon) != std::cmp::Ordering::Greater);
    }

    #[test]
    fn newton_reports_slope_zero_at_critical_point() {
        let f = |x: &Decimal| x.mul(x);
        let df = |_x: &Decimal| Decimal::zero();
        let epsilon = calc_zero_epsilon();
        let result = newton(&f, &df, Decimal::zero(), &epsilon, 80, Precision::default());
        assert_eq!(result, Err(RootFinderError::SlopeZero("0".to_string())));
    }

    #[test]
    fn newton_reports_max_iterations_when_it_never_settles() {
        // Oscillates forever: f(x) = x^3 - 2x + 2 from x0 = 0 is a classic
        // Newton-divergence example.
        let f = |x: &Decimal| {
            x.mul(x).mul(x).sub(&Decimal::from_i64(2).mul(x)).add(&Decimal::from_i64(2))
        };
        let df = |x: &Decimal| {
            Decimal::from_i64(3).mul(x).mul(x).sub(&Decimal::from_i64(2))
        };
        let epsilon = Decimal::from_str_exact("0.00000000000001").unwrap();
        let result = newton(&f, &df, Decimal::zero(), &epsilon, 10, Precision::new(20));
        assert!(matches!(result, Err(RootFinderError::NewtonMaxIterations(10))));
    }

    #[test]
    fn bisect_finds_root_of_linear_function() {
        // f(x) = x - 1 has a root at x = 1, bracketed by [0, 2].
        let f = |x: &Decimal| x.sub(&Decimal::one());
        let epsilon = Decimal::from_str_exact("0.0000000001").unwrap();
        let root = bisect(&f, Decimal::zero(), Decimal::from_i64(2), &epsilon, 150, Precision::new(30)).unwrap();
        let diff = root.sub(&Decimal::one()).abs();
        assert!(diff.cmp(&epsilon) != std::cmp::Ordering::Greater);
    }

    #[test]
    fn bisect_rejects_same_sign_endpoints() {
        let f = |_x: &Decimal| Decimal::one();
        let epsilon = calc_zero_epsilon();
        let result = bisect(&f, Decimal::zero(), Decimal::one(), &epsilon, 150, Precision::default());
        assert_eq!(result, Err(RootFinderError::SameSignEndpoints));
    }

    #[test]
    fn bisect_returns_exact_endpoint_zero() {
        let f = |x: &Decimal| x.clone();
        let epsilon = calc_zero_epsilon();
        let root = bisect(&f, Decimal::zero(), Decimal::one(), &epsilon, 150, Precision::default()).unwrap();
        assert_eq!(root, Decimal::zero());
    }

    #[test]
    fn calc_zero_falls_back_to_bisect_on_slope_zero() {
        // f(x) = x^2 - 4 at x0 = 0 has df(0) = 0; Newton fails immediately,
        // bisect over [0, 10] should still find x = 2.
        let f = |x: &Decimal| x.mul(x).sub(&Decimal::from_i64(4));
        let df = |x: &Decimal| Decimal::from_i64(2).mul(x);
        let root = calc_zero(
            &f,
            &df,
            Decimal::zero(),
            Decimal::from_i64(10),
            true,
            Some(LowerBound::Eager(Decimal::zero())),
            Precision::new(30),
        )
        .unwrap();
        let diff = root.sub(&Decimal::from_i64(2)).abs();
        assert!(diff.cmp(&Decimal::from_str_exact("0.0000000001").unwrap()) != std::cmp::Ordering::Greater);
    }

    #[test]
    fn calc_zero_lazy_bound_not_evaluated_when_newton_succeeds() {
        use std::cell::Cell;
        let evaluated = Cell::new(false);
        let f = |x: &Decimal| x.sub(&Decimal::from_i64(3));
        let df = |_x: &Decimal| Decimal::one();
        let lower = LowerBound::Lazy(Box::new(|| {
            evaluated.set(true);
            Decimal::zero()
        }));
        let root = calc_zero(
            &f,
            &df,
            Decimal::zero(),
            Decimal::from_i64(10),
            false,
            Some(lower),
            Precision::new(30),
        )
        .unwrap();
        assert_eq!(root, Decimal::from_i64(3));
        assert!(!evaluated.get());
    }

    #[test]
    fn calc_zero_errors_without_any_bound_on_newton_failure() {
        let f = |x: &Decimal| x.mul(x);
        let df = |_x: &Decimal| Decimal::zero();
        let result = calc_zero(
            &f,
            &df,
            Decimal::zero(),
            Decimal::from_i64(10),
            false,
            None,
            Precision::new(30),
        );
        assert_eq!(result, Err(RootFinderError::NoBisectBounds));
    }
}
