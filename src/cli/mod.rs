//! Command line interface for Agora.

pub mod commands;
pub mod progress;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::types::config::Config;

/// Agora - multi-agent debate evaluation on reasoning benchmarks.
#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = "agora.toml", global = true)]
    pub config: PathBuf,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs a debate evaluation over a dataset.
    Run(RunArgs),

    /// Writes a default configuration file.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Lists the supported datasets.
    Datasets,

    /// Shows version.
    Version,
}

/// Options of `agora run`. Anything left unset comes from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Dataset tag (SQA, GSM8k, Aqua, ECQA, ANLI, DateUnderstanding).
    #[arg(short, long)]
    pub dataset: String,

    /// Samples to evaluate after shuffling (0 = all).
    #[arg(short, long, alias = "num_samples")]
    pub num_samples: Option<usize>,

    /// Independent evaluation trials.
    #[arg(short, long)]
    pub rounds: Option<usize>,

    /// Agents per debate.
    #[arg(long)]
    pub agents: Option<usize>,

    /// Debate rounds per question.
    #[arg(long)]
    pub debate_rounds: Option<usize>,

    /// Shuffle seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Root directory of the datasets.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Writes the full JSON report to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Retries per failed completion before the question errors.
    #[arg(long, conflicts_with = "retry_forever")]
    pub max_retries: Option<u32>,

    /// Retries failed completions until they succeed.
    #[arg(long)]
    pub retry_forever: bool,

    /// Keeps the agents' conversations in the JSON report.
    #[arg(long)]
    pub keep_transcripts: bool,
}

impl RunArgs {
    /// Applies the command line overrides on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(n) = self.num_samples {
            config.evaluation.num_samples = n;
        }
        if let Some(n) = self.rounds {
            config.evaluation.trials = n;
        }
        if let Some(n) = self.agents {
            config.debate.agents = n;
        }
        if let Some(n) = self.debate_rounds {
            config.debate.rounds = n;
        }
        if let Some(seed) = self.seed {
            config.evaluation.seed = seed;
        }
        if let Some(dir) = &self.data_dir {
            config.evaluation.data_dir = dir.clone();
        }
        if let Some(n) = self.max_retries {
            config.debate.max_retries = n;
            config.debate.retry_forever = false;
        }
        if self.retry_forever {
            config.debate.retry_forever = true;
        }
        if self.keep_transcripts {
            config.evaluation.keep_transcripts = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "agora",
            "run",
            "--dataset",
            "SQA",
            "--num_samples",
            "10",
            "--rounds",
            "2",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.dataset, "SQA");
        assert_eq!(args.num_samples, Some(10));
        assert_eq!(args.rounds, Some(2));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "agora", "run", "--dataset", "SQA", "-q", "--config", "other.toml",
        ])
        .unwrap();

        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn test_apply_overrides_only_set_values() {
        let args = RunArgs {
            dataset: "Aqua".into(),
            rounds: Some(1),
            debate_rounds: Some(4),
            max_retries: Some(3),
            ..Default::default()
        };
        let mut config = Config::default_config();
        args.apply(&mut config);

        assert_eq!(config.evaluation.trials, 1);
        assert_eq!(config.debate.rounds, 4);
        assert_eq!(config.debate.max_retries, 3);
        assert_eq!(config.debate.agents, 3);
        assert_eq!(config.evaluation.seed, 9999);
    }

    #[test]
    fn test_retry_flags_conflict() {
        let result = Cli::try_parse_from([
            "agora",
            "run",
            "--dataset",
            "SQA",
            "--max-retries",
            "2",
            "--retry-forever",
        ]);
        assert!(result.is_err());
    }
}
