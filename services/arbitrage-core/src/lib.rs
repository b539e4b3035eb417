//! Triangular arbitrage search over a snapshot of pools: enumerate simple
//! cycles through the pool graph, price each one hop by hop against the
//! right AMM curve, and surface the single most profitable opportunity.

pub mod driver;
pub mod error;
pub mod path;
pub mod route;

pub use driver::{find_opportunities, ArbitrageOpportunity};
pub use error::RouteError;
pub use path::possible_paths;
pub use route::{calculate_route, get_routes};
