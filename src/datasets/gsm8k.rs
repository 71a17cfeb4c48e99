//! GSM8K: grade-school math word problems with numeric answers.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{read_json_lines, DatasetAdapter, DatasetKind};
use crate::consensus::normalize_number;
use crate::types::question::Question;
use crate::{AgoraError, AgoraResult};

const PROMPT_SUFFIX: &str = " The response should be a single numeric value.";

const ANSWER_MARKER: &str = "#### ";

/// Calculator annotations such as `<<48/2=24>>`.
static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<<.*>>").expect("valid annotation pattern"));

#[derive(Deserialize)]
struct Record {
    question: String,
    answer: String,
}

/// Loader for GSM8K `test.jsonl`.
pub struct Gsm8k {
    path: PathBuf,
}

impl Gsm8k {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Splits a GSM8K answer into (gold number, explanation).
fn split_answer(answer: &str) -> Option<(String, String)> {
    let (rationale, result) = answer.split_once(ANSWER_MARKER)?;

    let rationale = rationale.replace("\n\n", "\n");
    let rationale = ANNOTATION.replace_all(rationale.trim(), "");
    let explanation = rationale
        .split('\n')
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.ends_with('.') {
                s.to_string()
            } else {
                format!("{}.", s)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    Some((normalize_number(result.trim()), explanation))
}

impl DatasetAdapter for Gsm8k {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Gsm8k
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn test_samples(&self) -> AgoraResult<Vec<Question>> {
        let records: Vec<Record> = read_json_lines(&self.path)?;

        records
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let (gold, explanation) = split_answer(&r.answer).ok_or_else(|| {
                    AgoraError::dataset(format!(
                        "{}: record {} has no '{}' answer marker",
                        self.path.display(),
                        i,
                        ANSWER_MARKER.trim()
                    ))
                })?;

                Ok(Question::new(
                    format!("GSM8k-{}", i),
                    format!("{}{}", r.question, PROMPT_SUFFIX),
                    gold,
                )
                .with_explanation(explanation))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_answer_strips_annotations() {
        let (gold, explanation) = split_answer(
            "Natalia sold 48/2 = <<48/2=24>>24 clips in May.\n\nAltogether she sold 48+24 = <<48+24=72>>72 clips\n#### 72",
        )
        .unwrap();

        assert_eq!(gold, "72");
        assert_eq!(
            explanation,
            "Natalia sold 48/2 = 24 clips in May. Altogether she sold 48+24 = 72 clips."
        );
    }

    #[test]
    fn test_gold_drops_separators() {
        let (gold, _) = split_answer("Work.\n#### 1,200").unwrap();
        assert_eq!(gold, "1200");
    }

    #[test]
    fn test_loads_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.jsonl");
        std::fs::write(
            &path,
            "{\"question\":\"2+2?\",\"answer\":\"Add.\\n#### 4\"}\n\n{\"question\":\"3+3?\",\"answer\":\"Add.\\n#### 6\"}\n",
        )
        .unwrap();

        let samples = Gsm8k::new(&path).test_samples().unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].id, "GSM8k-1");
        assert_eq!(samples[1].gold_answer, "6");
        assert!(samples[0].prompt.ends_with("single numeric value."));
    }

    #[test]
    fn test_missing_marker_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.jsonl");
        std::fs::write(&path, "{\"question\":\"q\",\"answer\":\"no marker\"}\n").unwrap();

        assert!(Gsm8k::new(&path).test_samples().is_err());
    }
}
