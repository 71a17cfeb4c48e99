//! Repeated-trial evaluation over a dataset.

use chrono::Utc;
use uuid::Uuid;

use crate::completers::Completer;
use crate::consensus::{AnswerExtractor, MajorityVote, RuleKind};
use crate::debate::{DebateSession, DebateSettings};
use crate::types::config::EvaluationConfig;
use crate::types::question::Question;
use crate::types::verdict::{EvaluationReport, TrialReport, Verdict};
use crate::AgoraResult;

use super::observer::EvaluationObserver;
use super::stats::{mean, shuffle, std_dev};

/// How many questions to evaluate, how often, and in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Independent trials over the same sample set.
    pub trials: usize,
    /// Samples kept after shuffling (0 = all).
    pub num_samples: usize,
    /// Seed of the one-time shuffle.
    pub seed: u64,
    /// Attach the agents' conversations to each verdict.
    pub keep_transcripts: bool,
}

impl EvaluationOptions {
    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self {
            trials: config.trials,
            num_samples: config.num_samples,
            seed: config.seed,
            keep_transcripts: config.keep_transcripts,
        }
    }
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self::from_config(&EvaluationConfig::default())
    }
}

/// Runs debates over a fixed sample set and scores them.
///
/// Samples are shuffled once, at construction, and every trial walks them
/// in that order. Questions are debated one after another; a failing
/// question becomes an error verdict and the trial moves on.
pub struct EvaluationLoop {
    dataset: String,
    samples: Vec<Question>,
    extractor: AnswerExtractor,
    settings: DebateSettings,
    options: EvaluationOptions,
}

impl EvaluationLoop {
    pub fn new(
        dataset: impl Into<String>,
        samples: Vec<Question>,
        rule: RuleKind,
        settings: DebateSettings,
        options: EvaluationOptions,
    ) -> Self {
        let mut samples = shuffle(samples, options.seed);
        if options.num_samples > 0 {
            samples.truncate(options.num_samples);
        }

        Self {
            dataset: dataset.into(),
            samples,
            extractor: AnswerExtractor::new(rule),
            settings,
            options,
        }
    }

    /// Questions in evaluation order.
    pub fn samples(&self) -> &[Question] {
        &self.samples
    }

    pub fn settings(&self) -> &DebateSettings {
        &self.settings
    }

    /// Runs every trial and aggregates the accuracies.
    ///
    /// Only an invalid debate shape is fatal. Per-question failures are
    /// recorded in the report.
    pub async fn run(
        &self,
        completer: &dyn Completer,
        observer: &dyn EvaluationObserver,
    ) -> AgoraResult<EvaluationReport> {
        self.settings.validate()?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(
            run = %run_id,
            dataset = %self.dataset,
            samples = self.samples.len(),
            trials = self.options.trials,
            agents = self.settings.agents,
            rounds = self.settings.rounds,
            completer = completer.name(),
            "Starting evaluation"
        );

        let mut trials = Vec::with_capacity(self.options.trials);
        for trial in 0..self.options.trials {
            let report = self.run_trial(trial, completer, observer).await;
            tracing::info!(
                trial,
                accuracy = report.accuracy,
                num_error = report.num_error,
                invalid_answer = report.invalid_answer,
                "Trial finished"
            );
            observer.on_trial_end(&report);
            trials.push(report);
        }

        let accuracies: Vec<f64> = trials.iter().map(|t| t.accuracy).collect();

        Ok(EvaluationReport {
            run_id,
            dataset: self.dataset.clone(),
            agents: self.settings.agents,
            debate_rounds: self.settings.rounds,
            seed: self.options.seed,
            mean_accuracy: mean(&accuracies),
            std_accuracy: std_dev(&accuracies),
            num_error: trials.iter().map(|t| t.num_error).sum(),
            invalid_answer: trials.iter().map(|t| t.invalid_answer).sum(),
            trials,
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn run_trial(
        &self,
        trial: usize,
        completer: &dyn Completer,
        observer: &dyn EvaluationObserver,
    ) -> TrialReport {
        let mut report = TrialReport::new(trial, self.samples.len());
        observer.on_trial_start(trial, self.samples.len());

        for question in &self.samples {
            let verdict = self.evaluate(question, completer).await;
            tracing::debug!(
                trial,
                question = %verdict.question_id,
                outcome = %verdict.outcome,
                predicted = verdict.predicted_answer.as_deref().unwrap_or("-"),
                gold = %verdict.gold_answer,
                "Question scored"
            );
            observer.on_verdict(trial, &verdict);
            report.record(verdict);
        }

        report.finish();
        report
    }

    /// Debates one question and scores the outcome.
    pub async fn evaluate(&self, question: &Question, completer: &dyn Completer) -> Verdict {
        let mut session = DebateSession::new(question, self.settings);
        let session_id = session.id();

        let verdict = match session.run(completer).await {
            Ok(texts) => {
                let extraction = self.extractor.extract(&texts);
                match MajorityVote::resolve(&extraction.answers) {
                    Ok(predicted) => Verdict::scored(
                        session_id,
                        question.id.as_str(),
                        question.gold_answer.as_str(),
                        predicted,
                        extraction.answers,
                        extraction.invalid_count,
                    ),
                    Err(e) => {
                        tracing::warn!(question = %question.id, "{}", e);
                        Verdict::errored(
                            session_id,
                            question.id.as_str(),
                            question.gold_answer.as_str(),
                            extraction.invalid_count,
                            e.to_string(),
                        )
                    }
                }
            }
            Err(e) => {
                tracing::error!(question = %question.id, "Debate failed: {}", e);
                Verdict::errored(
                    session_id,
                    question.id.as_str(),
                    question.gold_answer.as_str(),
                    0,
                    e.to_string(),
                )
            }
        };

        if self.options.keep_transcripts {
            verdict.with_transcripts(session.into_transcripts())
        } else {
            verdict
        }
    }
}
