//! Answer extraction rules.
//!
//! Each dataset family instructs agents to wrap their final answer in
//! parentheses, and each family has its own rule for finding that answer in
//! free-form text:
//! - YesNo: standalone `no`, else `yes` (binary fact checking)
//! - Letter: `(A)` .. `(E)` (multiple choice)
//! - Nli: `(e)`, `(c)`, `(n)` or the full label (natural language inference)
//! - Numeric: `(123.45)` or `\boxed{123.45}` (math word problems)
//!
//! The prompt templates in [`crate::debate`] and these patterns form one
//! contract and must change together.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(no|No|NO)\.?\b").expect("valid no pattern"));

static YES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(yes|Yes|YES)\.?\b").expect("valid yes pattern"));

static LETTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-E])\)").expect("valid letter pattern"));

static NLI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\((e|c|n|contradiction|neutral|entailment)\)").expect("valid nli pattern")
});

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(\s*\$?(-?[0-9][0-9,]*(?:\.[0-9]+)?)\s*\)|\\boxed\{\s*\$?(-?[0-9][0-9,]*(?:\.[0-9]+)?)\s*\}",
    )
    .expect("valid number pattern")
});

/// Rule that maps agent text to a canonical answer.
pub trait AnswerRule: Send + Sync {
    /// Rule name.
    fn name(&self) -> &str;

    /// Extracts the canonical answer, or `None` if the text has none.
    fn extract(&self, text: &str) -> Option<String>;
}

/// Binary yes/no answers.
///
/// `no` is checked before `yes`, so text mentioning both yields `no`.
#[derive(Debug, Clone, Default)]
pub struct YesNoRule;

impl AnswerRule for YesNoRule {
    fn name(&self) -> &str {
        "yes_no"
    }

    fn extract(&self, text: &str) -> Option<String> {
        if NO_PATTERN.is_match(text) {
            Some("no".to_string())
        } else if YES_PATTERN.is_match(text) {
            Some("yes".to_string())
        } else {
            None
        }
    }
}

/// Parenthesized uppercase option letter A-E. First match wins.
#[derive(Debug, Clone, Default)]
pub struct LetterRule;

impl AnswerRule for LetterRule {
    fn name(&self) -> &str {
        "letter"
    }

    fn extract(&self, text: &str) -> Option<String> {
        LETTER_PATTERN
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Parenthesized entailment label, case-insensitive.
///
/// Labels are canonicalized to their lowercase initial (`e`, `c`, `n`),
/// the form gold labels use.
#[derive(Debug, Clone, Default)]
pub struct NliRule;

impl AnswerRule for NliRule {
    fn name(&self) -> &str {
        "nli"
    }

    fn extract(&self, text: &str) -> Option<String> {
        NLI_PATTERN
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next())
            .map(|c| c.to_ascii_lowercase().to_string())
    }
}

/// Parenthesized or boxed number. First match wins.
#[derive(Debug, Clone, Default)]
pub struct NumericRule;

impl AnswerRule for NumericRule {
    fn name(&self) -> &str {
        "numeric"
    }

    fn extract(&self, text: &str) -> Option<String> {
        NUMBER_PATTERN
            .captures(text)
            .and_then(|c| c.get(1).or_else(|| c.get(2)))
            .map(|m| normalize_number(m.as_str()))
            .filter(|n| !n.is_empty())
    }
}

/// Normalizes a numeric answer: keeps only digits and `.`, then drops
/// trailing fractional zeros (`1,000.50` -> `1000.5`, `18.00` -> `18`).
pub fn normalize_number(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.contains('.') {
        let trimmed = digits.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        digits
    }
}

/// Available answer rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    YesNo,
    Letter,
    Nli,
    Numeric,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", create_rule(*self).name())
    }
}

/// Creates a rule from its kind.
pub fn create_rule(kind: RuleKind) -> Box<dyn AnswerRule> {
    match kind {
        RuleKind::YesNo => Box::new(YesNoRule),
        RuleKind::Letter => Box::new(LetterRule),
        RuleKind::Nli => Box::new(NliRule),
        RuleKind::Numeric => Box::new(NumericRule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_prefers_no() {
        let rule = YesNoRule;
        assert_eq!(
            rule.extract("Yes, I agree with the others. Final answer: (no)"),
            Some("no".to_string())
        );
        assert_eq!(rule.extract("(yes)"), Some("yes".to_string()));
        assert_eq!(rule.extract("YES."), Some("yes".to_string()));
    }

    #[test]
    fn test_yes_no_needs_word_boundary() {
        let rule = YesNoRule;
        assert_eq!(rule.extract("Nobody knows, eyes closed"), None);
        assert_eq!(rule.extract("I cannot say"), None);
    }

    #[test]
    fn test_letter_first_match_wins() {
        let rule = LetterRule;
        assert_eq!(rule.extract("Not (B). The answer is (C)"), Some("B".to_string()));
        assert_eq!(rule.extract("answer (F) or (a)"), None);
    }

    #[test]
    fn test_nli_labels() {
        let rule = NliRule;
        assert_eq!(rule.extract("So: (Entailment)"), Some("e".to_string()));
        assert_eq!(rule.extract("(NEUTRAL)"), Some("n".to_string()));
        assert_eq!(rule.extract("answer (c)"), Some("c".to_string()));
        assert_eq!(rule.extract("(contradicts)"), None);
    }

    #[test]
    fn test_numeric_forms() {
        let rule = NumericRule;
        assert_eq!(rule.extract("Total: (1,234.50)"), Some("1234.5".to_string()));
        assert_eq!(rule.extract("so \\boxed{18}"), Some("18".to_string()));
        assert_eq!(rule.extract("($42)"), Some("42".to_string()));
        assert_eq!(rule.extract("(A)"), None);
    }

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number("18.00"), "18");
        assert_eq!(normalize_number("100"), "100");
        assert_eq!(normalize_number("-3.50"), "3.5");
    }

    #[test]
    fn test_create_rule_names() {
        assert_eq!(create_rule(RuleKind::YesNo).name(), "yes_no");
        assert_eq!(RuleKind::Letter.to_string(), "letter");
    }
}
