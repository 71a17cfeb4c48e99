//! Implementation of the Agora CLI commands.

use std::path::{Path, PathBuf};

use crate::cli::progress::TrialProgress;
use crate::cli::RunArgs;
use crate::completers::create_completer;
use crate::datasets::{dataset_path, DatasetKind};
use crate::debate::DebateSettings;
use crate::evaluation::{EvaluationLoop, EvaluationOptions};
use crate::types::config::Config;
use crate::types::verdict::EvaluationReport;
use crate::AgoraResult;

/// Runs a debate evaluation.
///
/// The dataset tag is checked before anything is loaded, so an unknown tag
/// fails without touching the data directory or the completer.
pub async fn run(args: &RunArgs, config: &Config, quiet: bool) -> AgoraResult<()> {
    let kind: DatasetKind = args.dataset.parse()?;

    let mut config = config.clone();
    args.apply(&mut config);

    let adapter = kind.adapter(&config.evaluation.data_dir);
    let samples = adapter.test_samples()?;
    tracing::info!(
        "Loaded {} {} questions from {}",
        samples.len(),
        kind,
        adapter.path().display()
    );

    let completer = create_completer(&config.completer)?;
    let settings = DebateSettings::from_config(&config.debate);
    let options = EvaluationOptions::from_config(&config.evaluation);
    let evaluation = EvaluationLoop::new(kind.tag(), samples, adapter.rule(), settings, options);

    let progress = TrialProgress::new(quiet);
    let report = evaluation.run(completer.as_ref(), &progress).await?;

    print_summary(&report);

    if let Some(output) = &args.output {
        write_report(&report, output)?;
        println!("Report written to: {}", output.display());
    }

    Ok(())
}

fn print_summary(report: &EvaluationReport) {
    println!();
    println!(
        "Accuracy: {:.4} ± {:.4}",
        report.mean_accuracy, report.std_accuracy
    );
    println!("Num error: {}", report.num_error);
    println!("Num invalid answer: {}", report.invalid_answer);
}

fn write_report(report: &EvaluationReport, output: &Path) -> AgoraResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output, json)?;
    Ok(())
}

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> AgoraResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("agora.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Agora initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Put the datasets under {}",
        config.evaluation.data_dir.display()
    );
    println!(
        "  2. Export {} (or set [completer] provider = \"command\")",
        config.completer.api_key_env
    );
    println!("  3. Run: agora run --dataset SQA --num-samples 10");

    Ok(())
}

/// Lists the supported datasets and whether their files are present.
pub fn datasets(config: &Config) {
    let data_dir = &config.evaluation.data_dir;
    println!("Datasets under {}:\n", data_dir.display());

    for kind in DatasetKind::all() {
        let path = dataset_path(data_dir, kind);
        let marker = if path.exists() { "✓" } else { "○" };
        println!(
            "  {} {:<18} {:<8} {}",
            marker,
            kind.tag(),
            kind.rule().to_string(),
            path.display()
        );
    }
}

/// Shows version.
pub fn version() {
    println!("agora {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Multi-agent debate evaluation for reasoning benchmarks");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AgoraError;

    #[tokio::test]
    async fn test_run_rejects_unknown_dataset() {
        let args = RunArgs {
            dataset: "MMLU".into(),
            ..Default::default()
        };

        let err = run(&args, &Config::default_config(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AgoraError::UnknownDataset(_)));
    }

    #[tokio::test]
    async fn test_run_reports_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            dataset: "SQA".into(),
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        let err = run(&args, &Config::default_config(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AgoraError::Dataset(_)));
    }

    #[tokio::test]
    async fn test_init_writes_config_once() {
        let dir = tempfile::tempdir().unwrap();
        init(Some(dir.path().to_path_buf())).await.unwrap();

        let path = dir.path().join("agora.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.debate.agents, 3);

        std::fs::write(&path, "[debate]\nagents = 7\n").unwrap();
        init(Some(dir.path().to_path_buf())).await.unwrap();
        assert_eq!(Config::load(&path).unwrap().debate.agents, 7);
    }
}
