//! StrategyQA: yes/no questions requiring implicit multi-hop reasoning.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{read_text, DatasetAdapter, DatasetKind};
use crate::types::question::Question;
use crate::{AgoraError, AgoraResult};

const PROMPT_SUFFIX: &str = " The response should be yes or no.";

#[derive(Deserialize)]
struct Record {
    qid: String,
    question: String,
    answer: bool,
    #[serde(default)]
    facts: Vec<String>,
}

/// Loader for StrategyQA `dev.json` (a JSON array).
pub struct StrategyQa {
    path: PathBuf,
}

impl StrategyQa {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetAdapter for StrategyQa {
    fn kind(&self) -> DatasetKind {
        DatasetKind::StrategyQa
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn test_samples(&self) -> AgoraResult<Vec<Question>> {
        let content = read_text(&self.path)?;
        let records: Vec<Record> = serde_json::from_str(&content).map_err(|e| {
            AgoraError::dataset(format!("{}: {}", self.path.display(), e))
        })?;

        Ok(records
            .into_iter()
            .map(|r| {
                Question::new(
                    r.qid,
                    format!("{}{}", r.question, PROMPT_SUFFIX),
                    if r.answer { "yes" } else { "no" },
                )
                .with_explanation(r.facts.join(" "))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_records_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev.json");
        std::fs::write(
            &path,
            "\u{feff}[{\"qid\":\"q1\",\"question\":\"Can a cat fly?\",\"answer\":false,\"facts\":[\"Cats lack wings.\",\"Flight needs wings.\"]}]",
        )
        .unwrap();

        let samples = StrategyQa::new(&path).test_samples().unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].id, "q1");
        assert_eq!(samples[0].gold_answer, "no");
        assert!(samples[0].prompt.ends_with("The response should be yes or no."));
        assert_eq!(
            samples[0].gold_explanation.as_deref(),
            Some("Cats lack wings. Flight needs wings.")
        );
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let err = StrategyQa::new("/nonexistent/dev.json")
            .test_samples()
            .unwrap_err();
        assert!(matches!(err, AgoraError::Dataset(_)));
    }
}
