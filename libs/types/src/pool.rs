use cosmoarb_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::token::{Address, Raw, Token};

/// Curve-shape parameters for a stable pool, see `cosmoarb-amm::stable` for
/// the invariant they parameterise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StableParams {
    /// Price of token1 in units of token0.
    pub price_ratio: Decimal,
    /// Slippage scale factor.
    pub alpha: Decimal,
    /// Curve steepness when `x <= py`.
    pub gamma1: Decimal,
    /// Curve steepness when `x > py`.
    pub gamma2: Decimal,
    pub min_trade_size_0_for_1: Raw,
    pub min_trade_size_1_for_0: Raw,
    /// Percentage cap on acceptable price impact.
    pub price_impact_limit: Decimal,
}

/// A liquidity pool, tagged by the AMM curve it trades against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Pool {
    ConstantProduct {
        address: Address,
        token0: Token,
        token1: Token,
        amount0: Raw,
        amount1: Raw,
        lp_fee: Decimal,
        dao_fee: Decimal,
    },
    Stable {
        address: Address,
        token0: Token,
        token1: Token,
        amount0: Raw,
        amount1: Raw,
        lp_fee: Decimal,
        dao_fee: Decimal,
        stable_params: StableParams,
    },
}

impl Pool {
    pub fn address(&self) -> &str {
        match self {
            Pool::ConstantProduct { address, .. } => address,
            Pool::Stable { address, .. } => address,
        }
    }

    pub fn tokens(&self) -> (&Token, &Token) {
        match self {
            Pool::ConstantProduct { token0, token1, .. } => (token0, token1),
            Pool::Stable { token0, token1, .. } => (token0, token1),
        }
    }

    pub fn contains_token(&self, address: &str) -> bool {
        let (t0, t1) = self.tokens();
        t0.address == address || t1.address == address
    }

    /// Returns the token on the opposite side of this pool from `address`,
    /// or `None` if `address` is not one of this pool's two tokens.
    pub fn other_token(&self, address: &str) -> Option<&Token> {
        let (t0, t1) = self.tokens();
        if t0.address == address {
            Some(t1)
        } else if t1.address == address {
            Some(t0)
        } else {
            None
        }
    }

    pub fn amounts(&self) -> (Raw, Raw) {
        match self {
            Pool::ConstantProduct { amount0, amount1, .. } => (*amount0, *amount1),
            Pool::Stable { amount0, amount1, .. } => (*amount0, *amount1),
        }
    }

    pub fn fees(&self) -> (&Decimal, &Decimal) {
        match self {
            Pool::ConstantProduct { lp_fee, dao_fee, .. } => (lp_fee, dao_fee),
            Pool::Stable { lp_fee, dao_fee, .. } => (lp_fee, dao_fee),
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, Pool::Stable { .. })
    }
}
