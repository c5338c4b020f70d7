//! Subprocess execution with platform-aware binary resolution

pub mod npx;
pub mod runner;

pub use npx::run_npx;
pub use runner::{run, CommandResult, RunOptions, StdioMode, NOT_FOUND_EXIT_CODE};
