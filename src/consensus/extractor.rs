//! Canonical answer extraction over agents' terminal texts.

use super::rules::{create_rule, AnswerRule, RuleKind};

/// Answers extracted from one question's terminal texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Canonical answers, in agent order.
    pub answers: Vec<String>,
    /// `1` when no text yielded an answer (including when there were no
    /// texts at all), `0` otherwise.
    pub invalid_count: usize,
}

impl Extraction {
    /// Returns true if no text yielded an answer.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Applies one dataset's answer rule to every terminal text.
///
/// Never fails: a text without a match is left out of the vote. A question
/// counts as one invalid answer only when none of its texts matched.
pub struct AnswerExtractor {
    kind: RuleKind,
    rule: Box<dyn AnswerRule>,
}

impl AnswerExtractor {
    /// Creates an extractor for the given rule.
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            rule: create_rule(kind),
        }
    }

    /// Rule this extractor applies.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Extracts the canonical answer of a single text.
    pub fn extract_one(&self, text: &str) -> Option<String> {
        self.rule.extract(text)
    }

    /// Extracts canonical answers from all terminal texts.
    pub fn extract<S: AsRef<str>>(&self, texts: &[S]) -> Extraction {
        let mut answers = Vec::with_capacity(texts.len());

        for text in texts {
            match self.rule.extract(text.as_ref()) {
                Some(answer) => answers.push(answer),
                None => {
                    tracing::debug!(rule = self.rule.name(), "No answer found in agent text")
                }
            }
        }

        let invalid_count = usize::from(answers.is_empty());
        Extraction {
            answers,
            invalid_count,
        }
    }
}
