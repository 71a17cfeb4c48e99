//! ANLI: adversarial natural language inference.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{read_json_lines, DatasetAdapter, DatasetKind};
use crate::types::question::Question;
use crate::AgoraResult;

const PROMPT_SUFFIX: &str = " Choose from entailment, contradiction, neutral.";

#[derive(Deserialize)]
struct Record {
    uid: String,
    context: String,
    hypothesis: String,
    /// `e`, `c` or `n`.
    label: String,
}

/// Loader for ANLI `test.jsonl` (rounds R1-R3 concatenated).
pub struct Anli {
    path: PathBuf,
}

impl Anli {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetAdapter for Anli {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Anli
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn test_samples(&self) -> AgoraResult<Vec<Question>> {
        let records: Vec<Record> = read_json_lines(&self.path)?;

        Ok(records
            .into_iter()
            .map(|r| {
                Question::new(
                    r.uid,
                    format!(
                        "Premise: {}\nHypothesis: {}{}",
                        r.context, r.hypothesis, PROMPT_SUFFIX
                    ),
                    r.label.trim().to_lowercase(),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_premise_hypothesis_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.jsonl");
        std::fs::write(
            &path,
            r#"{"uid":"abc-1","context":"A man plays guitar.","hypothesis":"A man makes music.","label":"e","reason":""}"#,
        )
        .unwrap();

        let samples = Anli::new(&path).test_samples().unwrap();

        assert_eq!(samples[0].id, "abc-1");
        assert_eq!(samples[0].gold_answer, "e");
        assert_eq!(
            samples[0].prompt,
            "Premise: A man plays guitar.\nHypothesis: A man makes music. Choose from entailment, contradiction, neutral."
        );
    }
}
