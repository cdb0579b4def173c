//! Tile-swap puzzle (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tile_swap::{core,input,store,term,types}` and adds the
//! binary's runtime configuration.

pub mod config;

pub use tile_swap_core as core;
pub use tile_swap_input as input;
pub use tile_swap_store as store;
pub use tile_swap_term as term;
pub use tile_swap_types as types;
