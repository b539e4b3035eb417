//! Depth-first enumeration of pool sequences between two tokens.
//!
//! Mirrors a classic DFS path search: a visited-pool set prevents a path
//! from ever reusing the same pool twice, and every token-matching cycle
//! back to `output_token` is recorded as its own candidate, even when the
//! search keeps going past it to look for longer paths through other pools.

use std::collections::HashSet;

use cosmoarb_types::{Address, Path, Pool};

/// Every simple (no-repeated-pool) path from `input_token` to `output_token`
/// of at most `max_hops` pools, walking `pools` in the order given.
///
/// `input_token` and `output_token` are typically the same address — a
/// borrow-swap-repay cycle — but the search makes no such assumption.
pub fn possible_paths(input_token: &str, output_token: &str, max_hops: u32, pools: &[Pool]) -> Vec<Path> {
    let mut results = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Vec::new();
    walk(input_token, output_token, max_hops, pools, &mut visited, &mut current, 0, &mut results);
    results
}

#[allow(clippy::too_many_arguments)]
fn walk(
    current_token: &str,
    output_token: &str,
    max_hops: u32,
    pools: &[Pool],
    visited: &mut HashSet<Address>,
    current_path: &mut Path,
    depth: u32,
    results: &mut Vec<Path>,
) {
    if depth > max_hops {
        return;
    }
    if depth > 0 && current_token == output_token {
        results.push(current_path.clone());
    }
    for pool in pools {
        let address = pool.address().to_string();
        if visited.contains(&address) {
            continue;
        }
        if !pool.contains_token(current_token) {
            continue;
        }
        let next_token = match pool.other_token(current_token) {
            Some(token) => token.address.clone(),
            None => continue,
        };
        visited.insert(address.clone());
        current_path.push(address.clone());
        walk(&next_token, output_token, max_hops, pools, visited, current_path, depth + 1, results);
        current_path.pop();
        visited.remove(&address);
    }
}
