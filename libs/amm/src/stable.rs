//! Stable-swap invariant solver.
//!
//! The curve is parameterised by `(alpha, gamma1, gamma2, priceRatio)` and
//! satisfies
//!
//! ```text
//! F(u, v) = alpha * (4*u*v)^gamma * (u + v - 1) + u*v - 1/4 = 0
//! ```
//!
//! where `u = x/d`, `v = p*y/d`, `d` is the pool's invariant, `p` is
//! `priceRatio`, and `gamma` switches between `gamma1` (when `u <= v`) and
//! `gamma2` (otherwise). The construction step solves for `d` given the
//! pool's actual reserves `(x, y)`; a swap re-solves the same equation for
//! one side holding the other and `d` fixed.
//!
//! Differentiating `F` symbolically in terms of its own already-computed
//! coefficient term `C = alpha*(4*u*v)^gamma` avoids recomputing the power:
//!
//! ```text
//! dF/du = gamma*C*(u+v-1)/u + C + v
//! dF/dv = gamma*C*(u+v-1)/v + C + u
//! ```
//!
//! and, since `u = x/d`, `v = p*y/d` are both inversely proportional to `d`,
//!
//! ```text
//! dF/dd = -(1/d) * (u*dF/du + v*dF/dv)
//! ```

use cosmoarb_decimal::{Decimal, Precision};
use cosmoarb_numeric::{calc_zero, LowerBound, RootFinderError};
use cosmoarb_types::Raw;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StableSwapError {
    #[error("trade size {0} does not exceed the pool's minimum trade size")]
    TradeTooSmall(Raw),
    #[error("price impact {impact} exceeds the pool's limit {limit}")]
    PriceImpactExceeded { impact: String, limit: String },
    #[error("invariant solver did not converge: {0}")]
    Nonconvergent(String),
    #[error("price ratio is unavailable or non-positive")]
    OracleUnavailable,
}

impl From<RootFinderError> for StableSwapError {
    fn from(e: RootFinderError) -> Self {
        StableSwapError::Nonconvergent(e.to_string())
    }
}

fn one_quarter() -> Decimal {
    Decimal::from_str_exact("0.25").expect("literal always parses")
}

/// `alpha * (4*u*v)^gamma`, the term `F` shares between its value and both
/// partial derivatives.
fn coeff(alpha: &Decimal, u: &Decimal, v: &Decimal, gamma_exp: i64, precision: Precision) -> Result<Decimal, StableSwapError> {
    let four_uv = Decimal::from_i64(4).mul(u).mul(v);
    let powered = four_uv
        .pow(gamma_exp, precision)
        .map_err(|e| StableSwapError::Nonconvergent(e.to_string()))?;
    Ok(alpha.mul(&powered))
}

fn gamma_exponent(u: &Decimal, v: &Decimal, gamma1: &Decimal, gamma2: &Decimal) -> Result<i64, StableSwapError> {
    let gamma = if u.cmp(v) != std::cmp::Ordering::Greater { gamma1 } else { gamma2 };
    gamma
        .to_i64_truncated()
        .ok_or_else(|| StableSwapError::Nonconvergent(format!("gamma {gamma} is not an integer")))
}

fn invariant_value(alpha: &Decimal, gamma1: &Decimal, gamma2: &Decimal, u: &Decimal, v: &Decimal, precision: Precision) -> Result<Decimal, StableSwapError> {
    let gamma_exp = gamma_exponent(u, v, gamma1, gamma2)?;
    let c = coeff(alpha, u, v, gamma_exp, precision)?;
    let sum_minus_one = u.add(v).sub(&Decimal::one());
    Ok(c.mul(&sum_minus_one).add(&u.mul(v)).sub(&one_quarter()))
}

/// `(dF/du, dF/dv)` at a point, reusing the already-computed coefficient.
fn partials(alpha: &Decimal, gamma1: &Decimal, gamma2: &Decimal, u: &Decimal, v: &Decimal, precision: Precision) -> Result<(Decimal, Decimal), StableSwapError> {
    let gamma_exp = gamma_exponent(u, v, gamma1, gamma2)?;
    let gamma_dec = Decimal::from_i64(gamma_exp);
    let c = coeff(alpha, u, v, gamma_exp, precision)?;
    let sum_minus_one = u.add(v).sub(&Decimal::one());
    let gamma_c_sum = gamma_dec.mul(&c).mul(&sum_minus_one);

    let du = gamma_c_sum
        .div(u, precision)
        .map_err(|_| StableSwapError::Nonconvergent("du degenerate at u=0".to_string()))?
        .add(&c)
        .add(v);
    let dv = gamma_c_sum
        .div(v, precision)
        .map_err(|_| StableSwapError::Nonconvergent("dv degenerate at v=0".to_string()))?
        .add(&c)
        .add(u);
    Ok((du, dv))
}

/// `negTangent(u, v) = (dF/du / dF/dv) / p`, the token0 price implied by the
/// invariant at `(u, v)`. Token1's price is its reciprocal.
fn neg_tangent(alpha: &Decimal, gamma1: &Decimal, gamma2: &Decimal, u: &Decimal, v: &Decimal, price_ratio: &Decimal, precision: Precision) -> Result<Decimal, StableSwapError> {
    let (du, dv) = partials(alpha, gamma1, gamma2, u, v, precision)?;
    let ratio = du.div(&dv, precision).map_err(|_| StableSwapError::Nonconvergent("dF/dv is zero".to_string()))?;
    ratio.div(price_ratio, precision).map_err(|_| StableSwapError::OracleUnavailable)
}

fn price_impact_pct(current_price: &Decimal, final_price: &Decimal, precision: Precision) -> Result<Decimal, StableSwapError> {
    let ratio = final_price
        .div(current_price, precision)
        .map_err(|_| StableSwapError::Nonconvergent("current price is zero".to_string()))?;
    Ok(ratio.sub(&Decimal::one()).mul(&Decimal::from_i64(100)))
}

/// A stable pool's curve state, with its invariant `d` solved once at
/// construction and held fixed across swap simulations.
#[derive(Debug, Clone)]
pub struct StablePool {
    pub pool0: Decimal,
    pub pool1: Decimal,
    decimals0: u8,
    decimals1: u8,
    pub price_ratio: Decimal,
    pub alpha: Decimal,
    pub gamma1: Decimal,
    pub gamma2: Decimal,
    pub min_trade_size_0_for_1: Decimal,
    pub min_trade_size_1_for_0: Decimal,
    pub price_impact_limit: Decimal,
    pub lp_fee: Decimal,
    pub dao_fee: Decimal,
    precision: Precision,
    invariant: Decimal,
}

/// The result of simulating a stable-pool swap.
#[derive(Debug, Clone, PartialEq)]
pub struct StableSwapOutcome {
    pub net_output: Decimal,
    pub gross_output: Decimal,
    pub lp_fee_amount: Decimal,
    pub dao_fee_amount: Decimal,
    pub new_pool0: Decimal,
    pub new_pool1: Decimal,
    pub price_impact: Decimal,
}

impl StablePool {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool0: Decimal,
        pool1: Decimal,
        decimals0: u8,
        decimals1: u8,
        price_ratio: Decimal,
        alpha: Decimal,
        gamma1: Decimal,
        gamma2: Decimal,
        min_trade_size_0_for_1: Decimal,
        min_trade_size_1_for_0: Decimal,
        price_impact_limit: Decimal,
        lp_fee: Decimal,
        dao_fee: Decimal,
        precision: Precision,
    ) -> Result<Self, StableSwapError> {
        if !price_ratio.is_positive() {
            return Err(StableSwapError::OracleUnavailable);
        }
        let py = price_ratio.mul(&pool1);
        let invariant = Self::solve_invariant(&pool0, &py, &alpha, &gamma1, &gamma2, precision)?;
        Ok(Self {
            pool0,
            pool1,
            decimals0,
            decimals1,
            price_ratio,
            alpha,
            gamma1,
            gamma2,
            min_trade_size_0_for_1,
            min_trade_size_1_for_0,
            price_impact_limit,
            lp_fee,
            dao_fee,
            precision,
            invariant,
        })
    }

    pub fn invariant(&self) -> &Decimal {
        &self.invariant
    }

    fn solve_invariant(x: &Decimal, py: &Decimal, alpha: &Decimal, gamma1: &Decimal, gamma2: &Decimal, precision: Precision) -> Result<Decimal, StableSwapError> {
        let tvl = x.add(py);
        let one = Decimal::one();

        let f = {
            let x = x.clone();
            let py = py.clone();
            let alpha = alpha.clone();
            let gamma1 = gamma1.clone();
            let gamma2 = gamma2.clone();
            move |d: &Decimal| -> Decimal {
                let u = x.div(d, precision).unwrap_or_else(|_| Decimal::zero());
                let v = py.div(d, precision).unwrap_or_else(|_| Decimal::zero());
                invariant_value(&alpha, &gamma1, &gamma2, &u, &v, precision).unwrap_or_else(|_| Decimal::zero())
            }
        };

        let df = {
            let x = x.clone();
            let py = py.clone();
            let alpha = alpha.clone();
            let gamma1 = gamma1.clone();
            let gamma2 = gamma2.clone();
            move |d: &Decimal| -> Decimal {
                let u = x.div(d, precision).unwrap_or_else(|_| Decimal::zero());
                let v = py.div(d, precision).unwrap_or_else(|_| Decimal::zero());
                let (du, dv) = match partials(&alpha, &gamma1, &gamma2, &u, &v, precision) {
                    Ok(p) => p,
                    Err(_) => return Decimal::zero(),
                };
                if d.is_zero() {
                    return Decimal::zero();
                }
                let weighted = u.mul(&du).add(&v.mul(&dv));
                weighted.div(d, precision).unwrap_or_else(|_| Decimal::zero()).neg()
            }
        };

        let lower_bound = if x.cmp(&one) == std::cmp::Ordering::Greater && py.cmp(&one) == std::cmp::Ordering::Greater {
            let x = x.clone();
            let py = py.clone();
            Some(LowerBound::Lazy(Box::new(move || {
                x.mul(&py)
                    .sqrt(precision)
                    .map(|root| Decimal::from_i64(2).mul(&root))
                    .unwrap_or_else(|_| Decimal::zero())
            })))
        } else {
            Some(LowerBound::Eager(Decimal::zero()))
        };

        calc_zero(&f, &df, tvl.clone(), tvl, true, lower_bound, precision).map_err(StableSwapError::from)
    }

    /// Solves `F(x'/d, v) = 0` for `v = py'/d` holding `x'` and `d` fixed,
    /// returning the resulting absolute `py'` (i.e. `p * y'`).
    fn solve_for_py(&self, x_prime: &Decimal) -> Result<Decimal, StableSwapError> {
        let precision = self.precision;
        let d = &self.invariant;
        let u = x_prime.div(d, precision).map_err(|_| StableSwapError::Nonconvergent("invariant is zero".to_string()))?;
        let current_py = self.price_ratio.mul(&self.pool1);
        let v0 = current_py.div(d, precision).map_err(|_| StableSwapError::Nonconvergent("invariant is zero".to_string()))?;

        let alpha = self.alpha.clone();
        let gamma1 = self.gamma1.clone();
        let gamma2 = self.gamma2.clone();
        let u_fixed = u.clone();
        let f = move |v: &Decimal| invariant_value(&alpha, &gamma1, &gamma2, &u_fixed, v, precision).unwrap_or_else(|_| Decimal::zero());

        let alpha = self.alpha.clone();
        let gamma1 = self.gamma1.clone();
        let gamma2 = self.gamma2.clone();
        let u_fixed = u.clone();
        let df = move |v: &Decimal| {
            partials(&alpha, &gamma1, &gamma2, &u_fixed, v, precision)
                .map(|(_, dv)| dv)
                .unwrap_or_else(|_| Decimal::zero())
        };

        let v_result = calc_zero(&f, &df, v0.clone(), v0, false, Some(LowerBound::Eager(Decimal::zero())), precision)?;
        let py_prime = v_result.mul(d);
        Ok(py_prime)
    }

    /// Solves `F(u, py'/d) = 0` for `u = x'/d` holding `py'` and `d` fixed,
    /// returning the resulting absolute `x'`.
    fn solve_for_x(&self, py_prime: &Decimal) -> Result<Decimal, StableSwapError> {
        let precision = self.precision;
        let d = &self.invariant;
        let v = py_prime.div(d, precision).map_err(|_| StableSwapError::Nonconvergent("invariant is zero".to_string()))?;
        let current_x = &self.pool0;
        let u0 = current_x.div(d, precision).map_err(|_| StableSwapError::Nonconvergent("invariant is zero".to_string()))?;

        let alpha = self.alpha.clone();
        let gamma1 = self.gamma1.clone();
        let gamma2 = self.gamma2.clone();
        let v_fixed = v.clone();
        let f = move |u: &Decimal| invariant_value(&alpha, &gamma1, &gamma2, u, &v_fixed, precision).unwrap_or_else(|_| Decimal::zero());

        let alpha = self.alpha.clone();
        let gamma1 = self.gamma1.clone();
        let gamma2 = self.gamma2.clone();
        let v_fixed = v.clone();
        let df = move |u: &Decimal| {
            partials(&alpha, &gamma1, &gamma2, u, &v_fixed, precision)
                .map(|(du, _)| du)
                .unwrap_or_else(|_| Decimal::zero())
        };

        let u_result = calc_zero(&f, &df, u0.clone(), u0, false, Some(LowerBound::Eager(Decimal::zero())), precision)?;
        let x_prime = u_result.mul(d);
        Ok(x_prime)
    }

    fn current_uv(&self) -> (Decimal, Decimal) {
        let u = self.pool0.div(&self.invariant, self.precision).unwrap_or_else(|_| Decimal::zero());
        let v = self
            .price_ratio
            .mul(&self.pool1)
            .div(&self.invariant, self.precision)
            .unwrap_or_else(|_| Decimal::zero());
        (u, v)
    }

    fn check_price_impact(&self, current_price: &Decimal, final_price: &Decimal) -> Result<Decimal, StableSwapError> {
        let impact = price_impact_pct(current_price, final_price, self.precision)?;
        if impact.is_negative() || impact.cmp(&self.price_impact_limit) == std::cmp::Ordering::Greater {
            return Err(StableSwapError::PriceImpactExceeded {
                impact: impact.to_decimal_string(),
                limit: self.price_impact_limit.to_decimal_string(),
            });
        }
        Ok(impact)
    }

    /// Simulates swapping `dx` of token0 into the pool for token1.
    pub fn simulate_token0_for_token1(&self, dx: &Decimal) -> Result<StableSwapOutcome, StableSwapError> {
        if dx.cmp(&self.min_trade_size_0_for_1) != std::cmp::Ordering::Greater {
            return Err(StableSwapError::TradeTooSmall(dx.to_raw_u128(self.decimals0).unwrap_or(0)));
        }
        let x_prime = self.pool0.add(dx);
        let py_prime = self.solve_for_py(&x_prime)?;
        let y_prime = py_prime.div(&self.price_ratio, self.precision).map_err(|_| StableSwapError::OracleUnavailable)?;

        let (u_cur, v_cur) = self.current_uv();
        let u_final = x_prime.div(&self.invariant, self.precision).map_err(|_| StableSwapError::Nonconvergent("invariant is zero".to_string()))?;
        let v_final = py_prime.div(&self.invariant, self.precision).map_err(|_| StableSwapError::Nonconvergent("invariant is zero".to_string()))?;

        let current_price = neg_tangent(&self.alpha, &self.gamma1, &self.gamma2, &u_cur, &v_cur, &self.price_ratio, self.precision)?;
        let final_price = neg_tangent(&self.alpha, &self.gamma1, &self.gamma2, &u_final, &v_final, &self.price_ratio, self.precision)?;
        let price_impact = self.check_price_impact(&current_price, &final_price)?;

        let gross_output = self.pool1.sub(&y_prime);
        let lp_fee_amount = gross_output.mul(&self.lp_fee);
        let dao_fee_amount = gross_output.mul(&self.dao_fee);
        let net_output = gross_output.sub(&lp_fee_amount).sub(&dao_fee_amount);

        Ok(StableSwapOutcome {
            net_output,
            gross_output,
            new_pool1: y_prime.add(&lp_fee_amount),
            lp_fee_amount,
            dao_fee_amount,
            new_pool0: x_prime,
            price_impact,
        })
    }

    /// Simulates swapping `dy` of token1 into the pool for token0.
    pub fn simulate_token1_for_token0(&self, dy: &Decimal) -> Result<StableSwapOutcome, StableSwapError> {
        if dy.cmp(&self.min_trade_size_1_for_0) != std::cmp::Ordering::Greater {
            return Err(StableSwapError::TradeTooSmall(dy.to_raw_u128(self.decimals1).unwrap_or(0)));
        }
        let y_prime = self.pool1.add(dy);
        let py_prime = self.price_ratio.mul(&y_prime);
        let x_prime = self.solve_for_x(&py_prime)?;

        let (u_cur, v_cur) = self.current_uv();
        let u_final = x_prime.div(&self.invariant, self.precision).map_err(|_| StableSwapError::Nonconvergent("invariant is zero".to_string()))?;
        let v_final = py_prime.div(&self.invariant, self.precision).map_err(|_| StableSwapError::Nonconvergent("invariant is zero".to_string()))?;

        let current_price_t0 = neg_tangent(&self.alpha, &self.gamma1, &self.gamma2, &u_cur, &v_cur, &self.price_ratio, self.precision)?;
        let final_price_t0 = neg_tangent(&self.alpha, &self.gamma1, &self.gamma2, &u_final, &v_final, &self.price_ratio, self.precision)?;
        let current_price = Decimal::one().div(&current_price_t0, self.precision).map_err(|_| StableSwapError::Nonconvergent("token0 price is zero".to_string()))?;
        let final_price = Decimal::one().div(&final_price_t0, self.precision).map_err(|_| StableSwapError::Nonconvergent("token0 price is zero".to_string()))?;
        let price_impact = self.check_price_impact(&current_price, &final_price)?;

        let gross_output = self.pool0.sub(&x_prime);
        let lp_fee_amount = gross_output.mul(&self.lp_fee);
        let dao_fee_amount = gross_output.mul(&self.dao_fee);
        let net_output = gross_output.sub(&lp_fee_amount).sub(&dao_fee_amount);

        Ok(StableSwapOutcome {
            net_output,
            gross_output,
            new_pool0: x_prime.add(&lp_fee_amount),
            lp_fee_amount,
            dao_fee_amount,
            new_pool1: y_prime,
            price_impact,
        })
    }

    /// Inverts [`simulate_token0_for_token1`]: given a desired net token1
    /// output, returns the token0 input required to produce it.
    pub fn reverse_token0_for_token1(&self, desired_output: &Decimal) -> Result<Decimal, StableSwapError> {
        let keep = Decimal::one().sub(&self.lp_fee).sub(&self.dao_fee);
        let gross_needed = desired_output.div(&keep, self.precision).map_err(|_| StableSwapError::Nonconvergent("fee rate consumes the whole trade".to_string()))?;
        let y_prime = self.pool1.sub(&gross_needed);
        if !y_prime.is_positive() {
            return Err(StableSwapError::Nonconvergent("requested output exceeds pool1 reserve".to_string()));
        }
        let py_prime = self.price_ratio.mul(&y_prime);
        let x_prime = self.solve_for_x(&py_prime)?;
        Ok(x_prime.sub(&self.pool0))
    }

    /// Inverts [`simulate_token1_for_token0`]: given a desired net token0
    /// output, returns the token1 input required to produce it.
    pub fn reverse_token1_for_token0(&self, desired_output: &Decimal) -> Result<Decimal, StableSwapError> {
        let keep = Decimal::one().sub(&self.lp_fee).sub(&self.dao_fee);
        let gross_needed = desired_output.div(&keep, self.precision).map_err(|_| StableSwapError::Nonconvergent("fee rate consumes the whole trade".to_string()))?;
        let x_prime = self.pool0.sub(&gross_needed);
        if !x_prime.is_positive() {
            return Err(StableSwapError::Nonconvergent("requested output exceeds pool0 reserve".to_string()));
        }
        let py_prime = self.solve_for_py(&x_prime)?;
        let y_prime = py_prime.div(&self.price_ratio, self.precision).map_err(|_| StableSwapError::OracleUnavailable)?;
        Ok(y_prime.sub(&self.pool1))
    }

    /// Applies a token0-for-token1 swap in place, recomputing the invariant
    /// against the new reserves.
    pub fn apply_token0_for_token1(&mut self, dx: &Decimal) -> Result<StableSwapOutcome, StableSwapError> {
        let outcome = self.simulate_token0_for_token1(dx)?;
        self.pool0 = outcome.new_pool0.clone();
        self.pool1 = outcome.new_pool1.clone();
        self.invariant = Self::solve_invariant(&self.pool0, &self.price_ratio.mul(&self.pool1), &self.alpha, &self.gamma1, &self.gamma2, self.precision)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_pool() -> StablePool {
        StablePool::new(
            Decimal::from_i64(1_000_000),
            Decimal::from_i64(1_000_000),
            18,
            18,
            Decimal::one(),
            Decimal::from_str_exact("0.0001").unwrap(),
            Decimal::from_i64(4),
            Decimal::from_i64(4),
            Decimal::from_i64(1),
            Decimal::from_i64(1),
            Decimal::from_str_exact("5").unwrap(),
            Decimal::from_str_exact("0.0015").unwrap(),
            Decimal::from_str_exact("0.0005").unwrap(),
            Precision::new(30),
        )
        .unwrap()
    }

    #[test]
    fn invariant_satisfies_its_own_equation_within_epsilon() {
        let pool = balanced_pool();
        let d = pool.invariant().clone();
        let u = pool.pool0.div(&d, Precision::new(30)).unwrap();
        let v = pool.price_ratio.mul(&pool.pool1).div(&d, Precision::new(30)).unwrap();
        let residual = invariant_value(&pool.alpha, &pool.gamma1, &pool.gamma2, &u, &v, Precision::new(30)).unwrap();
        let epsilon = Decimal::from_str_exact("0.0000000001").unwrap();
        assert!(residual.abs().cmp(&epsilon) != std::cmp::Ordering::Greater, "residual = {residual}");
    }

    #[test]
    fn balanced_pool_invariant_is_near_twice_reserve() {
        // For x = py the curve is close to the x+y=k line near the balance
        // point: d should land close to 2*x.
        let pool = balanced_pool();
        let diff = pool.invariant().sub(&Decimal::from_i64(2_000_000)).abs();
        let tolerance = Decimal::from_i64(1000); // within 0.05%
        assert!(diff.cmp(&tolerance) != std::cmp::Ordering::Greater, "invariant = {}", pool.invariant());
    }

    #[test]
    fn forward_swap_moves_pool_in_expected_direction() {
        let pool = balanced_pool();
        let outcome = pool.simulate_token0_for_token1(&Decimal::from_i64(1000)).unwrap();
        assert!(outcome.new_pool0.cmp(&pool.pool0) == std::cmp::Ordering::Greater);
        assert!(outcome.net_output.is_positive());
        assert!(outcome.net_output.cmp(&outcome.gross_output) == std::cmp::Ordering::Less);
    }

    #[test]
    fn trade_below_minimum_is_rejected() {
        let pool = balanced_pool();
        let result = pool.simulate_token0_for_token1(&Decimal::from_str_exact("0.5").unwrap());
        assert!(matches!(result, Err(StableSwapError::TradeTooSmall(_))));
    }

    #[test]
    fn reverse_swap_approximately_inverts_forward_swap() {
        let pool = balanced_pool();
        let forward = pool.simulate_token0_for_token1(&Decimal::from_i64(5000)).unwrap();
        let required = pool.reverse_token0_for_token1(&forward.net_output).unwrap();
        let diff = required.sub(&Decimal::from_i64(5000)).abs();
        let tolerance = Decimal::from_i64(5);
        assert!(diff.cmp(&tolerance) != std::cmp::Ordering::Greater, "required = {required}");
    }

    #[test]
    fn construction_rejects_nonpositive_price_ratio() {
        let result = StablePool::new(
            Decimal::from_i64(1_000_000),
            Decimal::from_i64(1_000_000),
            18,
            18,
            Decimal::zero(),
            Decimal::from_str_exact("0.0001").unwrap(),
            Decimal::from_i64(4),
            Decimal::from_i64(4),
            Decimal::from_i64(1),
            Decimal::from_i64(1),
            Decimal::from_str_exact("5").unwrap(),
            Decimal::from_str_exact("0.0015").unwrap(),
            Decimal::from_str_exact("0.0005").unwrap(),
            Precision::new(30),
        );
        assert_eq!(result.err(), Some(StableSwapError::OracleUnavailable));
    }

    #[test]
    fn oversized_trade_is_rejected_for_exceeding_price_impact_limit() {
        let pool = StablePool::new(
            Decimal::from_i64(1_000_000),
            Decimal::from_i64(1_000_000),
            18,
            18,
            Decimal::one(),
            Decimal::from_str_exact("0.0001").unwrap(),
            Decimal::from_i64(4),
            Decimal::from_i64(4),
            Decimal::from_i64(1),
            Decimal::from_i64(1),
            Decimal::from_i64(1),
            Decimal::from_str_exact("0.0015").unwrap(),
            Decimal::from_str_exact("0.0005").unwrap(),
            Precision::new(30),
        )
        .unwrap();
        let pool0_before = pool.pool0.clone();
        let pool1_before = pool.pool1.clone();
        let dx = pool.pool0.mul(&Decimal::from_i64(10));
        let result = pool.simulate_token0_for_token1(&dx);
        assert!(matches!(result, Err(StableSwapError::PriceImpactExceeded { .. })));
        assert_eq!(pool.pool0, pool0_before);
        assert_eq!(pool.pool1, pool1_before);
    }

    #[test]
    fn apply_swap_recomputes_invariant_against_new_reserves() {
        let mut pool = balanced_pool();
        let d_before = pool.invariant().clone();
        pool.apply_token0_for_token1(&Decimal::from_i64(10_000)).unwrap();
        assert_ne!(pool.invariant(), &d_before);
    }
}
