//! Majority vote over canonical answers.

use std::collections::HashMap;

use crate::{AgoraError, AgoraResult};

/// Plurality vote with first-seen tie-break.
pub struct MajorityVote;

impl MajorityVote {
    /// Returns the most frequent answer.
    ///
    /// Answers are scanned in submission order and a candidate only replaces
    /// the current best when its count is strictly greater, so the answer
    /// seen first wins ties.
    pub fn resolve<S: AsRef<str>>(answers: &[S]) -> AgoraResult<String> {
        let counts = Self::tally(answers);

        let mut best: Option<(&str, usize)> = None;
        for answer in answers {
            let answer = answer.as_ref();
            let count = counts.get(answer).copied().unwrap_or(0);
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((answer, count));
            }
        }

        best.map(|(answer, _)| answer.to_string())
            .ok_or(AgoraError::NoVotes)
    }

    /// Counts occurrences of each answer.
    pub fn tally<S: AsRef<str>>(answers: &[S]) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for answer in answers {
            *counts.entry(answer.as_ref()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_goes_to_first_seen() {
        assert_eq!(MajorityVote::resolve(&["A", "B", "A", "B"]).unwrap(), "A");
        assert_eq!(MajorityVote::resolve(&["B", "A", "A", "B"]).unwrap(), "B");
    }

    #[test]
    fn test_plurality() {
        assert_eq!(MajorityVote::resolve(&["A", "A", "B"]).unwrap(), "A");
        assert_eq!(MajorityVote::resolve(&["C", "B", "B"]).unwrap(), "B");
    }

    #[test]
    fn test_single_vote() {
        assert_eq!(MajorityVote::resolve(&["no"]).unwrap(), "no");
    }

    #[test]
    fn test_empty_is_no_votes() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(
            MajorityVote::resolve(&empty),
            Err(AgoraError::NoVotes)
        ));
    }

    #[test]
    fn test_tally() {
        let counts = MajorityVote::tally(&["yes", "no", "yes"]);
        assert_eq!(counts["yes"], 2);
        assert_eq!(counts["no"], 1);
    }
}
