use std::collections::HashMap;

use cosmoarb_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pool::Pool;
use crate::token::{Address, Raw, Token};

/// A point-in-time view of every pool the arbitrage driver may route
/// through, as delivered by the (out-of-scope) RPC/indexer collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PoolsSnapshot(pub Vec<Pool>);

impl PoolsSnapshot {
    /// Pool addresses that appear more than once, an invariant violation the
    /// route evaluator treats as fatal for the whole call rather than a
    /// per-route failure.
    pub fn duplicate_addresses(&self) -> Vec<Address> {
        let mut seen = HashMap::new();
        let mut duplicates = Vec::new();
        for pool in &self.0 {
            let count = seen.entry(pool.address().to_string()).or_insert(0usize);
            *count += 1;
            if *count == 2 {
                duplicates.push(pool.address().to_string());
            }
        }
        duplicates
    }
}

/// The set of known tokens and their decimal precision, keyed by address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TokensConfig(pub Vec<Token>);

impl TokensConfig {
    pub fn find(&self, address: &str) -> Option<&Token> {
        self.0.iter().find(|t| t.address == address)
    }

    /// Addresses that appear more than once, an invariant violation the
    /// route evaluator treats as fatal for the whole call rather than a
    /// per-route failure.
    pub fn duplicate_addresses(&self) -> Vec<Address> {
        let mut seen = HashMap::new();
        let mut duplicates = Vec::new();
        for token in &self.0 {
            let count = seen.entry(token.address.clone()).or_insert(0usize);
            *count += 1;
            if *count == 2 {
                duplicates.push(token.address.clone());
            }
        }
        duplicates
    }
}

/// A token the arbitrage driver may borrow and repay within one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrowable {
    pub address: Address,
    pub oracle_key: String,
    pub decimals: u8,
}

/// The capped trade size and reference price for a single borrowable token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSize {
    pub raw_trade_size: Raw,
    pub price: Decimal,
}

/// `address -> TradeSize` mapping supplied by the (out-of-scope) sizing
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TradeSizes(pub HashMap<Address, TradeSize>);

impl TradeSizes {
    pub fn get(&self, address: &str) -> Option<&TradeSize> {
        self.0.get(address)
    }
}

/// One hop of a `TradePlan`'s router path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterHop {
    pub pool_address: Address,
}

/// The output handed to the (out-of-scope) transaction-building
/// collaborator for the top-ranked arbitrage opportunity: borrow
/// `borrow_amount` of `borrow_token`, swap along `router_path`, and repay
/// `expected_return` (borrow amount plus the caller's minimum profit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub borrow_token: Address,
    pub borrow_amount: Raw,
    pub router_path: Vec<RouterHop>,
    pub expected_return: Raw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_duplicate_token_addresses() {
        let config = TokensConfig(vec![
            Token::new("a", 18),
            Token::new("b", 6),
            Token::new("a", 18),
        ]);
        assert_eq!(config.duplicate_addresses(), vec!["a".to_string()]);
    }

    #[test]
    fn no_duplicates_when_all_unique() {
        let config = TokensConfig(vec![Token::new("a", 18), Token::new("b", 6)]);
        assert!(config.duplicate_addresses().is_empty());
    }

    #[test]
    fn detects_duplicate_pool_addresses() {
        let pool = |address: &str| Pool::ConstantProduct {
            address: address.to_string(),
            token0: Token::new("a", 18),
            token1: Token::new("b", 18),
            amount0: 1_000_000,
            amount1: 1_000_000,
            lp_fee: Decimal::from_str_exact("0.003").unwrap(),
            dao_fee: Decimal::zero(),
        };
        let snapshot = PoolsSnapshot(vec![pool("p-ab"), pool("p-ab")]);
        assert_eq!(snapshot.duplicate_addresses(), vec!["p-ab".to_string()]);
    }

    #[test]
    fn no_pool_duplicates_when_all_unique() {
        let pool = |address: &str| Pool::ConstantProduct {
            address: address.to_string(),
            token0: Token::new("a", 18),
            token1: Token::new("b", 18),
            amount0: 1_000_000,
            amount1: 1_000_000,
            lp_fee: Decimal::from_str_exact("0.003").unwrap(),
            dao_fee: Decimal::zero(),
        };
        let snapshot = PoolsSnapshot(vec![pool("p-ab"), pool("p-bc")]);
        assert!(snapshot.duplicate_addresses().is_empty());
    }
}
