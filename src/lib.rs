//! # Agora
//!
//! Multi-agent debate evaluation for reasoning benchmarks.
//!
//! Several language model agents answer the same question independently,
//! then revise their answers over a fixed number of rounds after reading
//! each other's replies. The final answers are reduced to one prediction by
//! majority vote and scored against the dataset's gold answer.
//!
//! ## Modules
//!
//! - [`debate`] - Agent contexts, rounds and the per-question session
//! - [`consensus`] - Answer extraction rules and majority vote
//! - [`completers`] - Language model backends
//! - [`datasets`] - Benchmark loaders
//! - [`evaluation`] - Repeated-trial evaluation and accuracy statistics
//! - [`cli`] - Command line interface
//! - [`types`] - Shared types

#[cfg(feature = "cli")]
pub mod cli;
pub mod completers;
pub mod consensus;
pub mod datasets;
pub mod debate;
pub mod evaluation;
pub mod types;

pub use types::config::Config;
pub use types::errors::{AgoraError, AgoraResult};
