//! ECQA: CommonsenseQA with human explanations, stored as CSV.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{choice_suffix, option_letter, read_text, DatasetAdapter, DatasetKind};
use crate::types::question::Question;
use crate::{AgoraError, AgoraResult};

#[derive(Deserialize)]
struct Record {
    q_text: String,
    q_op1: String,
    q_op2: String,
    q_op3: String,
    q_op4: String,
    q_op5: String,
    q_ans: String,
    #[serde(rename = "taskB", default)]
    explanation: Option<String>,
}

/// Loader for ECQA `cqa_data_test.csv`.
///
/// Options are lettered `A)` to `E)` and the gold letter is the position of
/// `q_ans` among them.
pub struct Ecqa {
    path: PathBuf,
}

impl Ecqa {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetAdapter for Ecqa {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Ecqa
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn test_samples(&self) -> AgoraResult<Vec<Question>> {
        let content = read_text(&self.path)?;
        let mut reader = csv::Reader::from_reader(content.as_bytes());

        let mut samples = Vec::new();
        for (i, row) in reader.deserialize::<Record>().enumerate() {
            let r = row?;
            let raw = [r.q_op1, r.q_op2, r.q_op3, r.q_op4, r.q_op5];

            let gold_index = raw.iter().position(|o| *o == r.q_ans).ok_or_else(|| {
                AgoraError::dataset(format!(
                    "{}: row {} answer '{}' is not among its options",
                    self.path.display(),
                    i,
                    r.q_ans
                ))
            })?;

            let options = raw
                .iter()
                .enumerate()
                .map(|(j, o)| Ok(format!("{}){}", option_letter(j)?, o)))
                .collect::<AgoraResult<Vec<String>>>()?;

            let prompt = format!("{}{}", r.q_text, choice_suffix(&options));
            let mut question = Question::new(
                format!("ECQA-{}", i),
                prompt,
                option_letter(gold_index)?.to_string(),
            )
            .with_options(options);
            question.gold_explanation = r.explanation;

            samples.push(question);
        }

        Ok(samples)
    }
}
