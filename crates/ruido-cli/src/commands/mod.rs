//! CLI subcommand implementations.

pub mod describe;
pub mod effects;
pub mod process;
