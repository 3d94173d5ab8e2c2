// crossword_cli/src/runs/mod.rs
#![forbid(unsafe_code)]

pub mod runner;
pub mod stats;

pub use runner::{Runner, RunnerConfig};
// pub use stats::{FinalReport, RunStats};
