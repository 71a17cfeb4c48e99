//! AQuA-RAT: algebra word problems with five lettered options.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{choice_suffix, read_json_lines, DatasetAdapter, DatasetKind};
use crate::types::question::Question;
use crate::AgoraResult;

#[derive(Deserialize)]
struct Record {
    question: String,
    options: Vec<String>,
    correct: String,
    #[serde(default)]
    rationale: Option<String>,
}

/// Loader for AQuA `test.json` (one JSON object per line).
///
/// Options already carry their letters (`A)21`).
pub struct Aqua {
    path: PathBuf,
}

impl Aqua {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetAdapter for Aqua {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Aqua
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn test_samples(&self) -> AgoraResult<Vec<Question>> {
        let records: Vec<Record> = read_json_lines(&self.path)?;

        Ok(records
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let prompt = format!("{}{}", r.question, choice_suffix(&r.options));
                let mut question = Question::new(format!("Aqua-{}", i), prompt, r.correct.trim())
                    .with_options(r.options);
                question.gold_explanation = r.rationale;
                question
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_options_into_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");
        std::fs::write(
            &path,
            r#"{"question":"What is 2+3?","options":["A)4","B)5","C)6","D)7","E)8"],"rationale":"2+3=5","correct":"B"}"#,
        )
        .unwrap();

        let samples = Aqua::new(&path).test_samples().unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].gold_answer, "B");
        assert_eq!(
            samples[0].prompt,
            "What is 2+3? Choose one of the following options: ['A)4', 'B)5', 'C)6', 'D)7', 'E)8']"
        );
        assert_eq!(samples[0].options.as_ref().map(Vec::len), Some(5));
        assert_eq!(samples[0].gold_explanation.as_deref(), Some("2+3=5"));
    }
}
