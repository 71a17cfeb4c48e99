//! Progress callbacks for an evaluation run.

use crate::types::verdict::{TrialReport, Verdict};

/// Receives progress events from [`super::EvaluationLoop`].
///
/// All methods have no-op defaults.
pub trait EvaluationObserver: Send + Sync {
    /// A trial over `total` questions is starting.
    fn on_trial_start(&self, _trial: usize, _total: usize) {}

    /// A question finished.
    fn on_verdict(&self, _trial: usize, _verdict: &Verdict) {}

    /// A trial finished and its accuracy is known.
    fn on_trial_end(&self, _report: &TrialReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl EvaluationObserver for NoopObserver {}
