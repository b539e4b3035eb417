//! The top-level scan: for every borrowable token and both trade-size
//! magnitudes the caller supplies, enumerate and rank routes, keep the
//! profitable ones, and hand back the single best opportunity.
//!
//! Mirrors the shape of a strategy engine's detection loop — size
//! candidates, score them, log what was found, emit the winner — without
//! any of the async orchestration a live engine would wrap around it: this
//! is a pure function of the snapshot it's given.

use cosmoarb_decimal::Precision;
use cosmoarb_types::{Borrowable, GasMultipliers, PoolsSnapshot, Route, RouterHop, TokensConfig, TradePlan, TradeSizes};
use tracing::info;

use crate::error::RouteError;
use crate::route::get_routes;

/// A scored route paired with the trade plan a transaction-building
/// collaborator would need to act on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrageOpportunity {
    pub route: Route,
    pub plan: TradePlan,
}

/// Scans every borrowable token at its configured trade size and at half
/// that size, keeps every route whose quoted output exceeds what went in,
/// and returns the single highest-output opportunity, if any.
///
/// A fatal, configuration-level [`RouteError`] (duplicate token or pool
/// address) aborts the whole scan immediately, since it would reject every
/// remaining candidate identically; an ordinary per-route failure never
/// reaches here; `get_routes` already skips those on its own.
#[allow(clippy::too_many_arguments)]
pub fn find_opportunities(
    borrowables: &[Borrowable],
    trade_sizes: &TradeSizes,
    snapshot: &PoolsSnapshot,
    tokens: &TokensConfig,
    gas: &GasMultipliers,
    max_hops: u32,
    min_profit_raw: u128,
    precision: Precision,
) -> Result<Option<ArbitrageOpportunity>, RouteError> {
    let mut profitable = Vec::new();

    for borrowable in borrowables {
        let Some(trade_size) = trade_sizes.get(&borrowable.address) else {
            continue;
        };
        for magnitude in [trade_size.raw_trade_size, trade_size.raw_trade_size / 2] {
            if magnitude == 0 {
                continue;
            }
            let routes = get_routes(
                magnitude,
                &borrowable.address,
                &borrowable.address,
                max_hops,
                snapshot,
                tokens,
                gas,
                precision,
            )?;
            for route in routes {
                if route.is_profitable() {
                    info!(
                        token = %borrowable.address,
                        input_amount = route.input_amount,
                        quote_output_amount = route.quote_output_amount,
                        profit = route.gross_profit_raw(),
                        hops = route.path.len(),
                        "found a profitable route"
                    );
                    profitable.push(route);
                }
            }
        }
    }

    profitable.sort_by(|a, b| b.quote_output_amount.cmp(&a.quote_output_amount));
    info!(borrowables_scanned = borrowables.len(), opportunities_found = profitable.len(), "scan complete");

    let Some(route) = profitable.into_iter().next() else {
        return Ok(None);
    };
    let plan = TradePlan {
        borrow_token: route.input_token.clone(),
        borrow_amount: route.input_amount,
        router_path: route.path.iter().map(|address| RouterHop { pool_address: address.clone() }).collect(),
        expected_return: route.input_amount.saturating_add(min_profit_raw),
    };
    Ok(Some(ArbitrageOpportunity { route, plan }))
}
