//! Terminal progress for evaluation runs.

use indicatif::{ProgressBar, ProgressStyle};

use crate::evaluation::EvaluationObserver;
use crate::types::verdict::{TrialReport, Verdict};

const TEMPLATE: &str = "{msg} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed_precise})";

/// Progress bar over the questions of each trial.
///
/// Prints each trial's accuracy when the trial ends.
pub struct TrialProgress {
    bar: ProgressBar,
}

impl TrialProgress {
    pub fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };

        match ProgressStyle::with_template(TEMPLATE) {
            Ok(style) => bar.set_style(style.progress_chars("=> ")),
            Err(e) => tracing::debug!("Using default progress style: {}", e),
        }

        Self { bar }
    }
}

impl EvaluationObserver for TrialProgress {
    fn on_trial_start(&self, trial: usize, total: usize) {
        self.bar.reset();
        self.bar.set_length(total as u64);
        self.bar.set_message(format!("Trial {}", trial + 1));
    }

    fn on_verdict(&self, _trial: usize, verdict: &Verdict) {
        if verdict.is_error() {
            self.bar.set_message(format!("Error on {}", verdict.question_id));
        }
        self.bar.inc(1);
    }

    fn on_trial_end(&self, report: &TrialReport) {
        self.bar.finish_and_clear();
        self.bar.suspend(|| println!("Accuracy: {}", report.accuracy));
    }
}
