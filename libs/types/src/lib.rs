//! Shared data model for the triangular arbitrage engine.
//!
//! Every type here is a plain value record keyed by address rather than a
//! shared mutable node — the path enumerator and route evaluator walk the
//! pool graph by looking addresses up in these containers, never by holding
//! onto aliased references into a mutated snapshot (see `cosmoarb-amm` for
//! why: stable-pool simulation always works against an ephemeral copy).

pub mod gas;
pub mod pool;
pub mod route;
pub mod snapshot;
pub mod token;

pub use cosmoarb_decimal::Decimal;
pub use gas::GasMultipliers;
pub use pool::{Pool, StableParams};
pub use route::{Path, Route};
pub use snapshot::{Borrowable, PoolsSnapshot, RouterHop, TokensConfig, TradePlan, TradeSize, TradeSizes};
pub use token::{Address, Raw, Token};
