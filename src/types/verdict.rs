//! Per-question verdicts and evaluation reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::question::Turn;

/// How a question was scored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Majority answer matched the gold answer.
    Correct,
    /// Majority answer differed from the gold answer.
    Incorrect,
    /// The question could not be scored (no votes, retries exhausted, ...).
    Error,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Correct => write!(f, "correct"),
            Outcome::Incorrect => write!(f, "incorrect"),
            Outcome::Error => write!(f, "error"),
        }
    }
}

/// Outcome of one debate over one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Debate session that produced this verdict.
    pub session_id: Uuid,

    /// Question identifier.
    pub question_id: String,

    /// Majority answer, absent when the question errored.
    pub predicted_answer: Option<String>,

    /// Gold answer the prediction was compared against.
    pub gold_answer: String,

    /// Canonical answers that took part in the vote, in agent order.
    #[serde(default)]
    pub votes: Vec<String>,

    /// Whether the prediction matched the gold answer.
    pub is_correct: bool,

    /// `1` if none of the terminal texts held an extractable answer.
    pub invalid_count: usize,

    /// Scoring outcome.
    pub outcome: Outcome,

    /// Error message when `outcome` is [`Outcome::Error`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Full agent conversations, kept only on request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcripts: Option<Vec<Vec<Turn>>>,
}

impl Verdict {
    /// Creates a scored verdict.
    pub fn scored(
        session_id: Uuid,
        question_id: impl Into<String>,
        gold_answer: impl Into<String>,
        predicted: impl Into<String>,
        votes: Vec<String>,
        invalid_count: usize,
    ) -> Self {
        let gold_answer = gold_answer.into();
        let predicted = predicted.into();
        let is_correct = predicted == gold_answer;

        Self {
            session_id,
            question_id: question_id.into(),
            predicted_answer: Some(predicted),
            gold_answer,
            votes,
            is_correct,
            invalid_count,
            outcome: if is_correct {
                Outcome::Correct
            } else {
                Outcome::Incorrect
            },
            error: None,
            transcripts: None,
        }
    }

    /// Creates a verdict for a question that could not be scored.
    pub fn errored(
        session_id: Uuid,
        question_id: impl Into<String>,
        gold_answer: impl Into<String>,
        invalid_count: usize,
        error: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            question_id: question_id.into(),
            predicted_answer: None,
            gold_answer: gold_answer.into(),
            votes: Vec::new(),
            is_correct: false,
            invalid_count,
            outcome: Outcome::Error,
            error: Some(error.into()),
            transcripts: None,
        }
    }

    /// Attaches the agents' conversations.
    #[must_use]
    pub fn with_transcripts(mut self, transcripts: Vec<Vec<Turn>>) -> Self {
        self.transcripts = Some(transcripts);
        self
    }

    /// Returns true if the question counted as an execution error.
    pub fn is_error(&self) -> bool {
        self.outcome == Outcome::Error
    }
}

/// Counters and accuracy of one trial over the whole sample set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialReport {
    /// Zero-based trial index.
    pub trial: usize,

    /// Number of questions in the sample set (the accuracy denominator).
    pub total: usize,

    /// Questions whose majority answer matched the gold answer.
    pub num_correct: usize,

    /// Questions that failed to produce a verdict.
    pub num_error: usize,

    /// Questions where no terminal text held an extractable answer.
    pub invalid_answer: usize,

    /// `num_correct / total`.
    pub accuracy: f64,

    /// Verdicts in sample order.
    #[serde(default)]
    pub verdicts: Vec<Verdict>,
}

impl TrialReport {
    /// Starts an empty report for a trial.
    pub fn new(trial: usize, total: usize) -> Self {
        Self {
            trial,
            total,
            ..Default::default()
        }
    }

    /// Folds a finished verdict into the counters.
    pub fn record(&mut self, verdict: Verdict) {
        self.invalid_answer += verdict.invalid_count;
        match verdict.outcome {
            Outcome::Correct => self.num_correct += 1,
            Outcome::Incorrect => {}
            Outcome::Error => self.num_error += 1,
        }
        self.verdicts.push(verdict);
    }

    /// Computes the accuracy. Errored questions stay in the denominator.
    pub fn finish(&mut self) {
        self.accuracy = if self.total == 0 {
            0.0
        } else {
            self.num_correct as f64 / self.total as f64
        };
    }
}

/// Result of a full evaluation run across trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique id of the run.
    pub run_id: Uuid,

    /// Dataset tag (`SQA`, `Aqua`, ...).
    pub dataset: String,

    /// Agents per debate.
    pub agents: usize,

    /// Debate rounds per question.
    pub debate_rounds: usize,

    /// Seed used for the one-time sample shuffle.
    pub seed: u64,

    /// Per-trial results.
    pub trials: Vec<TrialReport>,

    /// Mean of per-trial accuracies.
    pub mean_accuracy: f64,

    /// Population standard deviation of per-trial accuracies.
    pub std_accuracy: f64,

    /// Execution errors summed over trials.
    pub num_error: usize,

    /// Invalid answers summed over trials.
    pub invalid_answer: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl EvaluationReport {
    /// Per-trial accuracies in trial order.
    pub fn accuracies(&self) -> Vec<f64> {
        self.trials.iter().map(|t| t.accuracy).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_verdict_correct() {
        let v = Verdict::scored(Uuid::new_v4(), "q1", "yes", "yes", vec!["yes".into()], 0);
        assert!(v.is_correct);
        assert_eq!(v.outcome, Outcome::Correct);
    }

    #[test]
    fn test_trial_report_keeps_errors_in_denominator() {
        let mut trial = TrialReport::new(0, 4);
        trial.record(Verdict::scored(Uuid::new_v4(), "q1", "A", "A", vec![], 0));
        trial.record(Verdict::scored(Uuid::new_v4(), "q2", "A", "B", vec![], 0));
        trial.record(Verdict::errored(Uuid::new_v4(), "q3", "A", 1, "no votes"));
        trial.record(Verdict::errored(Uuid::new_v4(), "q4", "A", 0, "boom"));
        trial.finish();

        assert_eq!(trial.num_correct, 1);
        assert_eq!(trial.num_error, 2);
        assert_eq!(trial.invalid_answer, 1);
        assert!((trial.accuracy - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trial_report_survives_json() {
        let mut trial = TrialReport::new(2, 2);
        trial.record(Verdict::scored(
            Uuid::new_v4(),
            "q1",
            "B",
            "B",
            vec!["B".into(), "B".into(), "C".into()],
            0,
        ));
        trial.record(
            Verdict::errored(Uuid::new_v4(), "q2", "A", 1, "no votes")
                .with_transcripts(vec![vec![Turn::user("q2"), Turn::assistant("unsure")]]),
        );
        trial.finish();

        let json = serde_json::to_string(&trial).unwrap();
        let restored: TrialReport = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, trial);
        assert_eq!(restored.verdicts[1].outcome, Outcome::Error);
    }

    #[test]
    fn test_empty_trial_accuracy_is_zero() {
        let mut trial = TrialReport::new(0, 0);
        trial.finish();
        assert_eq!(trial.accuracy, 0.0);
    }
}
