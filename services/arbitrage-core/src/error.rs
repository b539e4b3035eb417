use cosmoarb_amm::{CpmmError, StableSwapError};
use cosmoarb_types::Address;
use thiserror::Error;

/// Everything that can go wrong evaluating a single [`crate::route::calculate_route`]
/// call. Most variants are per-route failures, resolved at the hop that triggered
/// them: [`crate::route::get_routes`] logs and skips to the next candidate path
/// rather than aborting its scan. `DuplicateToken`/`DuplicatePool` are additionally
/// checked once, up front, across the whole token config and pool snapshot before
/// any path is evaluated — a duplicate config entry is a configuration-level
/// problem and fatal for the whole call, not a single hop's.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("pool {0} is not present in the supplied snapshot")]
    PoolNotFound(Address),
    #[error("token {0} is not present in the supplied token config")]
    UnknownToken(Address),
    #[error("token {0} appears more than once in the token config")]
    DuplicateToken(Address),
    #[error("pool {0} appears more than once on the same path")]
    DuplicatePool(Address),
    #[error("pool {pool} does not hold the current hop's token {token}")]
    TokenMismatch { pool: Address, token: Address },
    #[error("raw amount overflowed converting between {decimals}-decimal units: {value}")]
    AmountOverflow { value: String, decimals: u8 },
    #[error(transparent)]
    Stable(#[from] StableSwapError),
    #[error(transparent)]
    Cpmm(#[from] CpmmError),
}
