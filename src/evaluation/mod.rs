//! Evaluation loop.
//!
//! Debates every sample of a dataset, scores the majority answers against
//! the gold answers and repeats the whole pass for a number of trials. The
//! report carries per-trial accuracy plus its mean and population standard
//! deviation.

mod observer;
mod runner;
mod stats;

pub use observer::{EvaluationObserver, NoopObserver};
pub use runner::{EvaluationLoop, EvaluationOptions};
pub use stats::{mean, shuffle, std_dev};
