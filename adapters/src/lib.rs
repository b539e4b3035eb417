//! Collaborator interfaces the engine depends on but does not implement:
//! fetching a pool snapshot, pricing a borrowable against an oracle,
//! broadcasting a trade plan, and recording a route's outcome. Each has a
//! placeholder that returns `Err` until a real RPC/indexer, oracle client,
//! transaction signer, and result store are wired in.

use anyhow::{bail, Result};
use cosmoarb_types::{Decimal, PoolsSnapshot, Route, TradePlan};

/// Fetches the current view of every pool the driver may route through.
pub trait PoolSnapshotSource {
    fn fetch_snapshot(&self) -> Result<PoolsSnapshot>;
}

/// Prices a borrowable token against an external oracle.
pub trait OraclePriceSource {
    fn price_of(&self, oracle_key: &str) -> Result<Decimal>;
}

/// Signs and submits a trade plan, returning the resulting transaction hash.
pub trait TradeBroadcaster {
    fn submit(&self, plan: &TradePlan) -> Result<String>;
}

/// Records an evaluated route for later inspection.
pub trait ResultSink {
    fn record(&self, route: &Route) -> Result<()>;
}

pub struct UnimplementedPoolSnapshotSource;

impl PoolSnapshotSource for UnimplementedPoolSnapshotSource {
    fn fetch_snapshot(&self) -> Result<PoolsSnapshot> {
        bail!("pool snapshot source not yet implemented")
    }
}

pub struct UnimplementedOraclePriceSource;

impl OraclePriceSource for UnimplementedOraclePriceSource {
    fn price_of(&self, oracle_key: &str) -> Result<Decimal> {
        bail!("oracle price source not yet implemented: {oracle_key}")
    }
}

pub struct UnimplementedTradeBroadcaster;

impl TradeBroadcaster for UnimplementedTradeBroadcaster {
    fn submit(&self, _plan: &TradePlan) -> Result<String> {
        bail!("trade broadcaster not yet implemented")
    }
}

pub struct UnimplementedResultSink;

impl ResultSink for UnimplementedResultSink {
    fn record(&self, _route: &Route) -> Result<()> {
        bail!("result sink not yet implemented")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_placeholder_collaborator_errors() {
        assert!(UnimplementedPoolSnapshotSource.fetch_snapshot().is_err());
        assert!(UnimplementedOraclePriceSource.price_of("OSMO/USD").is_err());
        assert!(UnimplementedTradeBroadcaster
            .submit(&TradePlan { borrow_token: "a".into(), borrow_amount: 0, router_path: vec![], expected_return: 0 })
            .is_err());
        assert!(UnimplementedResultSink
            .record(&Route {
                input_token: "a".into(),
                output_token: "a".into(),
                path: vec![],
                input_amount: 0,
                quote_output_amount: 0,
                quote_lp_fee: Decimal::zero(),
                quote_shade_dao_fee: Decimal::zero(),
                price_impact: Decimal::zero(),
                gas_multiplier: Decimal::zero(),
            })
            .is_err());
    }
}
