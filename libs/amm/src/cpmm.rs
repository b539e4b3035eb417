//! Constant-product (`x*y=k`) swap simulation.
//!
//! Unlike the stable engine, constant-product math never needs a root
//! finder: both the forward (input-given) and reverse (output-given)
//! quotes have closed forms. Amounts in and out of this module are raw
//! on-chain integers; arithmetic is still routed through [`Decimal`] so
//! that reserves exceeding `u64::MAX` (common for 18-decimal tokens)
//! never overflow.

use cosmoarb_decimal::{Decimal, Precision};
use cosmoarb_types::Raw;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CpmmError {
    #[error("pool reserves are degenerate (zero on one side)")]
    EmptyReserve,
    #[error("requested output {requested} meets or exceeds the pool's reserve {reserve}")]
    InsufficientLiquidity { requested: Raw, reserve: Raw },
    #[error("simulated amount does not fit in a raw u128")]
    Overflow,
}

/// The result of simulating a forward (input-given) constant-product swap.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardSwapOutcome {
    /// Amount credited to the trader after LP and DAO fees.
    pub net_output: Raw,
    /// Amount that left the pool before fees were deducted.
    pub gross_output: Raw,
    /// `(paid price / market price) - 1`, unrounded.
    pub price_impact: Decimal,
}

/// The result of solving a reverse (output-given) constant-product swap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseSwapOutcome {
    /// Input amount required to produce the requested net output.
    pub required_input: Raw,
    pub gross_output: Raw,
    pub price_impact: Decimal,
}

fn market_price(reserve_in: &Decimal, reserve_out: &Decimal, precision: Precision) -> Result<Decimal, CpmmError> {
    reserve_in.div(reserve_out, precision).map_err(|_| CpmmError::EmptyReserve)
}

/// Quotes a swap of `amount_in` into the pool, returning the net and gross
/// output along with the price impact relative to the pre-trade marginal
/// price.
pub fn simulate_forward(
    reserve_in: Raw,
    reserve_out: Raw,
    fee: &Decimal,
    amount_in: Raw,
    precision: Precision,
) -> Result<ForwardSwapOutcome, CpmmError> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(CpmmError::EmptyReserve);
    }
    let x = Decimal::from_u128(reserve_in);
    let y = Decimal::from_u128(reserve_out);
    let dx = Decimal::from_u128(amount_in);

    let x_plus_dx = x.add(&dx);
    let xy = x.mul(&y);
    let remaining = xy.div(&x_plus_dx, precision).map_err(|_| CpmmError::EmptyReserve)?;
    let gross_out = y.sub(&remaining);

    let keep = Decimal::one().sub(fee);
    let net_out = gross_out.mul(&keep);

    let net_output = net_out.to_u128_truncated().ok_or(CpmmError::Overflow)?;
    let gross_output = gross_out.to_u128_truncated().ok_or(CpmmError::Overflow)?;

    let price_impact = if gross_out.is_zero() {
        Decimal::zero()
    } else {
        let market = market_price(&x, &y, precision)?;
        let paid = dx.div(&gross_out, precision).map_err(|_| CpmmError::EmptyReserve)?;
        paid.div(&market, precision).map_err(|_| CpmmError::EmptyReserve)?.sub(&Decimal::one())
    };

    Ok(ForwardSwapOutcome { net_output, gross_output, price_impact })
}

/// Solves for the input amount that produces `desired_net_output` after
/// fees, inverting the forward swap.
pub fn simulate_reverse(
    reserve_in: Raw,
    reserve_out: Raw,
    fee: &Decimal,
    desired_net_output: Raw,
    precision: Precision,
) -> Result<ReverseSwapOutcome, CpmmError> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(CpmmError::EmptyReserve);
    }
    if desired_net_output >= reserve_out {
        return Err(CpmmError::InsufficientLiquidity { requested: desired_net_output, reserve: reserve_out });
    }

    let x = Decimal::from_u128(reserve_in);
    let y = Decimal::from_u128(reserve_out);
    let net_out = Decimal::from_u128(desired_net_output);

    let keep = Decimal::one().sub(fee);
    let gross_out = net_out.div(&keep, precision).map_err(|_| CpmmError::EmptyReserve)?;
    if gross_out.cmp(&y) != std::cmp::Ordering::Less {
        return Err(CpmmError::InsufficientLiquidity { requested: desired_net_output, reserve: reserve_out });
    }

    let y_minus_gross = y.sub(&gross_out);
    let xy = x.mul(&y);
    let x_plus_dx = xy.div(&y_minus_gross, precision).map_err(|_| CpmmError::EmptyReserve)?;
    let dx = x_plus_dx.sub(&x);

    let required_input = dx.to_u128_truncated().ok_or(CpmmError::Overflow)?;
    let gross_output = gross_out.to_u128_truncated().ok_or(CpmmError::Overflow)?;

    let market = market_price(&x, &y, precision)?;
    let paid = dx.div(&gross_out, precision).map_err(|_| CpmmError::EmptyReserve)?;
    let price_impact = paid.div(&market, precision).map_err(|_| CpmmError::EmptyReserve)?.sub(&Decimal::one());

    Ok(ReverseSwapOutcome { required_input, gross_output, price_impact })
}
