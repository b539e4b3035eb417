use cosmoarb_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::token::{Address, Raw};

/// An ordered sequence of pool addresses. The path enumerator guarantees no
/// pool repeats within a single `Path`.
pub type Path = Vec<Address>;

/// A priced, simulated traversal of a `Path` starting from `input_token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub input_token: Address,
    pub output_token: Address,
    pub path: Path,
    pub input_amount: Raw,
    pub quote_output_amount: Raw,
    pub quote_lp_fee: Decimal,
    pub quote_shade_dao_fee: Decimal,
    pub price_impact: Decimal,
    pub gas_multiplier: Decimal,
}

impl Route {
    /// Gross output minus the amount that was put in — may be negative.
    pub fn gross_profit_raw(&self) -> i128 {
        self.quote_output_amount as i128 - self.input_amount as i128
    }

    pub fn is_profitable(&self) -> bool {
        self.quote_output_amount > self.input_amount
    }
}
