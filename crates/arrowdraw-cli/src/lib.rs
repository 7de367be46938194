#![forbid(unsafe_code)]

//! `arrowdraw` command-line inspector.
//!
//! Loads a scene of rectangles and arrow declarations into a
//! [`MemoryDocument`](arrowdraw_runtime::MemoryDocument), runs one
//! recalculation pass and reports per-arrow outcomes.

pub mod cli;
pub mod error;
pub mod scene;

pub use cli::{Cli, Commands, StrategyArg, run, run_from_env, run_with_output};
pub use error::{CliError, Result};
pub use scene::{Scene, SceneElement};
