//! Grid Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so games and tests can use
//! `grid_arcade::{core, engine, adapter, types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use grid_arcade_adapter as adapter;
pub use grid_arcade_core as core;
pub use grid_arcade_engine as engine;
pub use grid_arcade_types as types;
