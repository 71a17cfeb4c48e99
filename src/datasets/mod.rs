//! Benchmark dataset adapters.
//!
//! Every dataset is normalized into [`Question`]s and paired with the
//! [`RuleKind`] that extracts answers for it. Adapters are selected once, by
//! tag, through [`DatasetKind`].
//!
//! | Tag                 | File                 | Rule     |
//! |---------------------|----------------------|----------|
//! | `SQA`               | `dev.json`           | yes/no   |
//! | `GSM8k`             | `test.jsonl`         | numeric  |
//! | `Aqua`              | `test.json`          | letter   |
//! | `ECQA`              | `cqa_data_test.csv`  | letter   |
//! | `ANLI`              | `test.jsonl`         | nli      |
//! | `DateUnderstanding` | `task.json`          | letter   |

mod anli;
mod aqua;
mod date_understanding;
mod ecqa;
mod gsm8k;
mod strategyqa;

pub use anli::Anli;
pub use aqua::Aqua;
pub use date_understanding::DateUnderstanding;
pub use ecqa::Ecqa;
pub use gsm8k::Gsm8k;
pub use strategyqa::StrategyQa;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::consensus::RuleKind;
use crate::types::question::Question;
use crate::{AgoraError, AgoraResult};

/// Source of benchmark questions.
pub trait DatasetAdapter: Send + Sync {
    /// Dataset this adapter loads.
    fn kind(&self) -> DatasetKind;

    /// File the questions are read from.
    fn path(&self) -> &Path;

    /// Loads every test question, in file order.
    fn test_samples(&self) -> AgoraResult<Vec<Question>>;

    /// Answer rule for this dataset.
    fn rule(&self) -> RuleKind {
        self.kind().rule()
    }
}

/// Registry of supported datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    StrategyQa,
    Gsm8k,
    Aqua,
    Ecqa,
    Anli,
    DateUnderstanding,
}

impl DatasetKind {
    /// All supported datasets.
    pub fn all() -> [DatasetKind; 6] {
        [
            DatasetKind::StrategyQa,
            DatasetKind::Gsm8k,
            DatasetKind::Aqua,
            DatasetKind::Ecqa,
            DatasetKind::Anli,
            DatasetKind::DateUnderstanding,
        ]
    }

    /// Tag used on the command line and as the data sub-directory.
    pub fn tag(&self) -> &'static str {
        match self {
            DatasetKind::StrategyQa => "SQA",
            DatasetKind::Gsm8k => "GSM8k",
            DatasetKind::Aqua => "Aqua",
            DatasetKind::Ecqa => "ECQA",
            DatasetKind::Anli => "ANLI",
            DatasetKind::DateUnderstanding => "DateUnderstanding",
        }
    }

    /// Name of the test file inside the dataset directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            DatasetKind::StrategyQa => "dev.json",
            DatasetKind::Gsm8k => "test.jsonl",
            DatasetKind::Aqua => "test.json",
            DatasetKind::Ecqa => "cqa_data_test.csv",
            DatasetKind::Anli => "test.jsonl",
            DatasetKind::DateUnderstanding => "task.json",
        }
    }

    /// Answer rule paired with this dataset.
    pub fn rule(&self) -> RuleKind {
        match self {
            DatasetKind::StrategyQa => RuleKind::YesNo,
            DatasetKind::Gsm8k => RuleKind::Numeric,
            DatasetKind::Aqua | DatasetKind::Ecqa | DatasetKind::DateUnderstanding => {
                RuleKind::Letter
            }
            DatasetKind::Anli => RuleKind::Nli,
        }
    }

    /// Creates the adapter reading `<data_dir>/<tag>/<file_name>`.
    pub fn adapter(&self, data_dir: &Path) -> Box<dyn DatasetAdapter> {
        let path = dataset_path(data_dir, *self);
        match self {
            DatasetKind::StrategyQa => Box::new(StrategyQa::new(path)),
            DatasetKind::Gsm8k => Box::new(Gsm8k::new(path)),
            DatasetKind::Aqua => Box::new(Aqua::new(path)),
            DatasetKind::Ecqa => Box::new(Ecqa::new(path)),
            DatasetKind::Anli => Box::new(Anli::new(path)),
            DatasetKind::DateUnderstanding => Box::new(DateUnderstanding::new(path)),
        }
    }
}

impl FromStr for DatasetKind {
    type Err = AgoraError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        DatasetKind::all()
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| AgoraError::UnknownDataset(tag.to_string()))
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Reads a text file, dropping a leading UTF-8 byte order mark.
pub(crate) fn read_text(path: &Path) -> AgoraResult<String> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AgoraError::dataset(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(content.trim_start_matches('\u{feff}').to_string())
}

/// Parses one JSON record per non-empty line.
pub(crate) fn read_json_lines<T: DeserializeOwned>(path: &Path) -> AgoraResult<Vec<T>> {
    let content = read_text(path)?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).map_err(|e| {
                AgoraError::dataset(format!("{}:{}: {}", path.display(), n + 1, e))
            })
        })
        .collect()
}

/// Letter of the option at `index` (`0` -> `A`).
pub(crate) fn option_letter(index: usize) -> AgoraResult<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
        .ok_or_else(|| AgoraError::dataset(format!("Option index {} has no letter", index)))
}

/// Renders options as a bracketed, quoted list: `['A)1', 'B)2']`.
pub(crate) fn format_options(options: &[String]) -> String {
    let quoted: Vec<String> = options
        .iter()
        .map(|o| {
            if o.contains('\'') && !o.contains('"') {
                format!("\"{}\"", o)
            } else {
                format!("'{}'", o.replace('\'', "\\'"))
            }
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Suffix that asks the agent to pick one of `options`.
pub(crate) fn choice_suffix(options: &[String]) -> String {
    format!(
        " Choose one of the following options: {}",
        format_options(options)
    )
}

/// Default location of a dataset under `data_dir`.
pub fn dataset_path(data_dir: &Path, kind: DatasetKind) -> PathBuf {
    data_dir.join(kind.tag()).join(kind.file_name())
}
