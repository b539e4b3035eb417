//! AMM swap simulation: the stable-swap invariant solver, constant-product
//! swap math, and the closed-form optimal-borrow-size solver for 3-hop
//! constant-product cycles.

pub mod cpmm;
pub mod optimal_input;
pub mod stable;

pub use cpmm::{CpmmError, ForwardSwapOutcome, ReverseSwapOutcome};
pub use optimal_input::{feasible_root, solve_optimal_borrow, OptimalInputError, OptimalInputRoots};
pub use stable::{StablePool, StableSwapError, StableSwapOutcome};
