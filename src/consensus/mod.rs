//! Answer extraction and aggregation.
//!
//! Turns the agents' terminal texts into a single predicted answer:
//!
//! 1. [`AnswerExtractor`] applies the dataset's [`AnswerRule`] to each text,
//!    producing canonical answers (`yes`, `B`, `e`, `18`) and counting misses.
//! 2. [`MajorityVote`] picks the most frequent canonical answer, first-seen
//!    on ties.
//!
//! ## Example
//!
//! ```rust
//! use agora::consensus::{AnswerExtractor, MajorityVote, RuleKind};
//!
//! let extractor = AnswerExtractor::new(RuleKind::Letter);
//! let extraction = extractor.extract(&["(B)", "(A)", "I think (B)"]);
//! assert_eq!(MajorityVote::resolve(&extraction.answers).unwrap(), "B");
//! ```

mod aggregator;
mod extractor;
mod rules;

pub use aggregator::MajorityVote;
pub use extractor::{AnswerExtractor, Extraction};
pub use rules::{
    create_rule, normalize_number, AnswerRule, LetterRule, NliRule, NumericRule, RuleKind,
    YesNoRule,
};
