//! Folds a single [`Path`] into a priced [`Route`], and enumerates+ranks
//! every route between two tokens.

use std::collections::HashSet;

use cosmoarb_amm::cpmm;
use cosmoarb_amm::stable::StablePool;
use cosmoarb_decimal::{Decimal, Precision};
use cosmoarb_types::{Address, GasMultipliers, Path, Pool, PoolsSnapshot, Raw, Route, Token, TokensConfig};
use tracing::debug;

use crate::error::RouteError;
use crate::path;

fn resolve_token<'a>(tokens: &'a TokensConfig, address: &str) -> Result<&'a Token, RouteError> {
    let mut matches = tokens.0.iter().filter(|token| token.address == address);
    let first = matches.next().ok_or_else(|| RouteError::UnknownToken(address.to_string()))?;
    if matches.next().is_some() {
        return Err(RouteError::DuplicateToken(address.to_string()));
    }
    Ok(first)
}

/// Resolves a pool by address, mirroring [`resolve_token`]: the snapshot
/// itself must hold at most one pool per address, independent of whatever
/// the path enumerator's own visited-set already guarantees within one path.
fn resolve_pool<'a>(pools: &'a [Pool], address: &str) -> Result<&'a Pool, RouteError> {
    let mut matches = pools.iter().filter(|pool| pool.address() == address);
    let first = matches.next().ok_or_else(|| RouteError::PoolNotFound(address.to_string()))?;
    if matches.next().is_some() {
        return Err(RouteError::DuplicatePool(address.to_string()));
    }
    Ok(first)
}

fn raw_to_decimal(raw: Raw, decimals: u8) -> Decimal {
    Decimal::from_raw_u128(raw, decimals)
}

fn decimal_to_raw(value: &Decimal, decimals: u8) -> Result<Raw, RouteError> {
    value.to_raw_u128(decimals).ok_or_else(|| RouteError::AmountOverflow { value: value.to_string(), decimals })
}

/// Simulates `input_amount` of `input_token` swapping through every pool on
/// `path`, in order, folding fees, price impact, and gas weight as it goes.
pub fn calculate_route(
    input_amount: Raw,
    input_token: &str,
    path: &Path,
    pools: &[Pool],
    tokens: &TokensConfig,
    gas: &GasMultipliers,
    precision: Precision,
) -> Result<Route, RouteError> {
    let mut seen_pools: HashSet<Address> = HashSet::new();
    let mut current_token = input_token.to_string();
    let mut current_amount = input_amount;
    let mut quote_lp_fee = Decimal::zero();
    let mut quote_dao_fee = Decimal::zero();
    let mut price_impact = Decimal::zero();
    let mut gas_multiplier = Decimal::zero();

    for pool_address in path {
        if !seen_pools.insert(pool_address.clone()) {
            return Err(RouteError::DuplicatePool(pool_address.clone()));
        }
        let pool = resolve_pool(pools, pool_address)?;
        if !pool.contains_token(&current_token) {
            return Err(RouteError::TokenMismatch { pool: pool_address.clone(), token: current_token.clone() });
        }
        let output_token = pool
            .other_token(&current_token)
            .expect("contains_token checked above")
            .address
            .clone();

        let in_token = resolve_token(tokens, &current_token)?;
        let out_token = resolve_token(tokens, &output_token)?;
        let (lp_fee, dao_fee) = pool.fees();
        let hop_gas = if pool.is_stable() { &gas.stable } else { &gas.constant_product };

        let (net_output_raw, hop_impact) = match pool {
            Pool::Stable { token0, token1, amount0, amount1, stable_params, .. } => {
                let pool0 = raw_to_decimal(*amount0, token0.decimals);
                let pool1 = raw_to_decimal(*amount1, token1.decimals);
                let min0 = raw_to_decimal(stable_params.min_trade_size_0_for_1, token0.decimals);
                let min1 = raw_to_decimal(stable_params.min_trade_size_1_for_0, token1.decimals);
                let stable_pool = StablePool::new(
                    pool0,
                    pool1,
                    token0.decimals,
                    token1.decimals,
                    stable_params.price_ratio.clone(),
                    stable_params.alpha.clone(),
                    stable_params.gamma1.clone(),
                    stable_params.gamma2.clone(),
                    min0,
                    min1,
                    stable_params.price_impact_limit.clone(),
                    lp_fee.clone(),
                    dao_fee.clone(),
                    precision,
                )?;

                let input_human = raw_to_decimal(current_amount, in_token.decimals);
                let outcome = if current_token == token0.address {
                    stable_pool.simulate_token0_for_token1(&input_human)?
                } else {
                    stable_pool.simulate_token1_for_token0(&input_human)?
                };
                (decimal_to_raw(&outcome.net_output, out_token.decimals)?, outcome.price_impact)
            }
            Pool::ConstantProduct { token0, amount0, amount1, .. } => {
                let (reserve_in, reserve_out) =
                    if current_token == token0.address { (*amount0, *amount1) } else { (*amount1, *amount0) };
                let fee = lp_fee.add(dao_fee);
                let outcome = cpmm::simulate_forward(reserve_in, reserve_out, &fee, current_amount, precision)?;
                (outcome.net_output, outcome.price_impact)
            }
        };

        quote_lp_fee = quote_lp_fee.add(lp_fee);
        quote_dao_fee = quote_dao_fee.add(dao_fee);
        price_impact = price_impact.add(&hop_impact);
        gas_multiplier = gas_multiplier.add(hop_gas);
        current_token = output_token;
        current_amount = net_output_raw;
    }

    Ok(Route {
        input_token: input_token.to_string(),
        output_token: current_token,
        path: path.clone(),
        input_amount,
        quote_output_amount: current_amount,
        quote_lp_fee,
        quote_shade_dao_fee: quote_dao_fee,
        price_impact,
        gas_multiplier,
    })
}

/// Enumerates every path from `input_token` to `output_token`, evaluates
/// each one, drops any that fail, and sorts what's left by quoted output
/// descending (ties keep path-discovery order).
///
/// Before any path is walked, the token config and pool snapshot are each
/// checked for a duplicate address. That's a configuration-level problem,
/// not a single hop's, so it aborts the whole call instead of being treated
/// like an ordinary per-route failure.
#[allow(clippy::too_many_arguments)]
pub fn get_routes(
    input_amount: Raw,
    input_token: &str,
    output_token: &str,
    max_hops: u32,
    snapshot: &PoolsSnapshot,
    tokens: &TokensConfig,
    gas: &GasMultipliers,
    precision: Precision,
) -> Result<Vec<Route>, RouteError> {
    if let Some(address) = tokens.duplicate_addresses().into_iter().next() {
        return Err(RouteError::DuplicateToken(address));
    }
    if let Some(address) = snapshot.duplicate_addresses().into_iter().next() {
        return Err(RouteError::DuplicatePool(address));
    }

    let paths = path::possible_paths(input_token, output_token, max_hops, &snapshot.0);
    let mut routes: Vec<Route> = paths
        .iter()
        .filter_map(|candidate| {
            match calculate_route(input_amount, input_token, candidate, &snapshot.0, tokens, gas, precision) {
                Ok(route) => Some(route),
                Err(error) => {
                    debug!(path = ?candidate, %error, "route evaluation failed, skipping");
                    None
                }
            }
        })
        .collect();
    routes.sort_by(|a, b| b.quote_output_amount.cmp(&a.quote_output_amount));
    Ok(routes)
}
