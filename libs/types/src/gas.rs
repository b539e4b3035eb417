use cosmoarb_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque per-hop gas weight tags. The core never interprets these values —
/// it only sums whichever one applies to each hop's pool kind, as supplied
/// by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasMultipliers {
    pub stable: Decimal,
    pub constant_product: Decimal,
}
