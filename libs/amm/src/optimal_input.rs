//! Closed-form optimal borrow size for a 3-hop constant-product arbitrage
//! cycle `base -> token1 -> token2 -> base`.
//!
//! Maximising `amountOut(amountIn) - amountIn` over three chained
//! constant-product legs reduces to a quadratic in the borrow amount; this
//! module evaluates its two roots directly rather than searching. Reserves
//! are passed in the cycle's own order: pool0 trades `base` for `x0`, pool1
//! trades `x1` for `y1`, pool2 trades `y2` back for `base` (`x0 == x1` and
//! `y1 == y2` name the same token on each side of the middle hop).

use cosmoarb_decimal::{Decimal, Precision};
use cosmoarb_types::Raw;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimalInputError {
    #[error("no real root exists for this combination of reserves and fees")]
    NoRealRoot,
    #[error("the quadratic's denominator vanishes for this combination of reserves and fees")]
    DegenerateDenominator,
    #[error("neither root lies in the feasible range (0, min(pool reserve))")]
    NoFeasibleRoot,
}

/// Both roots of the optimal-borrow quadratic, before feasibility filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalInputRoots {
    pub root_a: Decimal,
    pub root_b: Decimal,
}

/// Solves the closed-form quadratic for the two roots of the 3-hop
/// optimal-borrow equation. The caller (the route evaluator) picks whichever
/// root is positive and within the feasible borrow range; both are returned
/// since degenerate reserve/fee combinations can make either the economically
/// sensible one.
#[allow(clippy::too_many_arguments)]
pub fn solve_optimal_borrow(
    base0: Raw,
    x0: Raw,
    x1: Raw,
    y1: Raw,
    y2: Raw,
    base2: Raw,
    fee0: &Decimal,
    fee1: &Decimal,
    fee2: &Decimal,
    precision: Precision,
) -> Result<OptimalInputRoots, OptimalInputError> {
    let base0 = Decimal::from_u128(base0);
    let x0 = Decimal::from_u128(x0);
    let x1 = Decimal::from_u128(x1);
    let y1 = Decimal::from_u128(y1);
    let y2 = Decimal::from_u128(y2);
    let base2 = Decimal::from_u128(base2);
    let one = Decimal::one();

    let t1 = base0.mul(&x1).mul(&y2);

    let fee0_minus_one = fee0.sub(&one);
    let f = base0.mul(&base2).mul(&fee0_minus_one);
    let f1 = f.mul(fee1);
    let f_minus_f1 = f.sub(&f1);
    let f2 = f_minus_f1.mul(fee2);
    let s_inner = f_minus_f1.sub(&f2);
    let s = s_inner.mul(&x0).mul(&x1).mul(&y1).mul(&y2).neg();

    if s.is_negative() {
        return Err(OptimalInputError::NoRealRoot);
    }
    let sqrt_s = s.sqrt(precision).map_err(|_| OptimalInputError::NoRealRoot)?;

    let d_term1 = fee0_minus_one.mul(fee1).sub(fee0).add(&one);
    let d_term_a = d_term1.mul(&x0).mul(&y1);
    let d_inner = fee0_minus_one.mul(&x0).sub(&x1);
    let d_term_b = d_inner.mul(&y2);
    let d = d_term_a.sub(&d_term_b);

    if d.is_zero() {
        return Err(OptimalInputError::DegenerateDenominator);
    }

    let root_a = t1.sub(&sqrt_s).neg().div(&d, precision).map_err(|_| OptimalInputError::DegenerateDenominator)?;
    let root_b = t1.add(&sqrt_s).neg().div(&d, precision).map_err(|_| OptimalInputError::DegenerateDenominator)?;

    Ok(OptimalInputRoots { root_a, root_b })
}

/// Picks whichever root is positive and below the smallest reserve on the
/// path (the only economically sensible candidate, since borrowing at or
/// past a reserve is undefined for constant-product math).
pub fn feasible_root(roots: &OptimalInputRoots, max_borrow: &Decimal) -> Result<Decimal, OptimalInputError> {
    let a_ok = roots.root_a.is_positive() && roots.root_a.cmp(max_borrow) == std::cmp::Ordering::Less;
    let b_ok = roots.root_b.is_positive() && roots.root_b.cmp(max_borrow) == std::cmp::Ordering::Less;
    match (a_ok, b_ok) {
        (true, false) => Ok(roots.root_a.clone()),
        (false, true) => Ok(roots.root_b.clone()),
        (true, true) => {
            // Both feasible: take the smaller, since a larger borrow is
            // strictly dominated once the curve has already peaked.
            if roots.root_a.cmp(&roots.root_b) == std::cmp::Ordering::Less {
                Ok(roots.root_a.clone())
            } else {
                Ok(roots.root_b.clone())
            }
        }
        (false, false) => Err(OptimalInputError::NoFeasibleRoot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reserves chosen so the 3-hop cycle has a genuine arbitrage opportunity;
    // the expected optimum (~14_890.78, profit ~674.23) was verified against
    // an independent ternary-search optimum over the same reserves.
    fn arb_triangle() -> (Raw, Raw, Raw, Raw, Raw, Raw) {
        (1_000_000, 1_000_000, 1_000_000, 1_050_000, 1_000_000, 1_050_000)
    }

    #[test]
    fn optimal_borrow_matches_known_triangle() {
        let (base0, x0, x1, y1, y2, base2) = arb_triangle();
        let fee = Decimal::from_str_exact("0.003").unwrap();
        let precision = Precision::new(25);
        let roots = solve_optimal_borrow(base0, x0, x1, y1, y2, base2, &fee, &fee, &fee, precision).unwrap();
        let max_borrow = Decimal::from_u128(base0.min(x1).min(y2));
        let chosen = feasible_root(&roots, &max_borrow).unwrap();

        let expected = Decimal::from_str_exact("14890.78").unwrap();
        let diff = chosen.sub(&expected).abs();
        let tolerance = Decimal::from_i64(5);
        assert!(diff.cmp(&tolerance) != std::cmp::Ordering::Greater, "chosen = {chosen}");
    }

    #[test]
    fn balanced_triangle_has_no_feasible_positive_root() {
        // All three pools at parity: no arbitrage, so the quadratic either
        // has no real root or neither root is economically feasible.
        let fee = Decimal::from_str_exact("0.003").unwrap();
        let precision = Precision::new(25);
        let roots = solve_optimal_borrow(1_000_000, 1_000_000, 1_000_000, 1_000_000, 1_000_000, 1_000_000, &fee, &fee, &fee, precision);
        if let Ok(roots) = roots {
            let max_borrow = Decimal::from_i64(1_000_000);
            assert!(feasible_root(&roots, &max_borrow).is_err());
        }
    }
}
