//! BIG-bench Date Understanding: multiple-choice date arithmetic.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{choice_suffix, option_letter, read_text, DatasetAdapter, DatasetKind};
use crate::types::question::Question;
use crate::{AgoraError, AgoraResult};

#[derive(Deserialize)]
struct Task {
    examples: Vec<Example>,
}

#[derive(Deserialize)]
struct Example {
    input: String,
    /// Candidate answers mapped to 1 (correct) or 0, in file order.
    target_scores: Map<String, Value>,
}

/// Loader for the BIG-bench `task.json`.
///
/// Options are lettered in the order the candidates appear in the file.
pub struct DateUnderstanding {
    path: PathBuf,
}

impl DateUnderstanding {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetAdapter for DateUnderstanding {
    fn kind(&self) -> DatasetKind {
        DatasetKind::DateUnderstanding
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn test_samples(&self) -> AgoraResult<Vec<Question>> {
        let content = read_text(&self.path)?;
        let task: Task = serde_json::from_str(&content)
            .map_err(|e| AgoraError::dataset(format!("{}: {}", self.path.display(), e)))?;

        task.examples
            .into_iter()
            .enumerate()
            .map(|(i, example)| {
                let mut options = Vec::with_capacity(example.target_scores.len());
                let mut gold = None;

                for (j, (date, score)) in example.target_scores.iter().enumerate() {
                    let letter = option_letter(j)?;
                    options.push(format!("{}){}", letter, date));
                    if gold.is_none() && score.as_f64() == Some(1.0) {
                        gold = Some(letter);
                    }
                }

                let gold = gold.ok_or_else(|| {
                    AgoraError::dataset(format!(
                        "{}: example {} has no target scored 1",
                        self.path.display(),
                        i
                    ))
                })?;

                let prompt = format!("{}{}", example.input, choice_suffix(&options));
                Ok(Question::new(
                    format!("DateUnderstanding-{}", i),
                    prompt,
                    gold.to_string(),
                )
                .with_options(options))
            })
            .collect()
    }
}
