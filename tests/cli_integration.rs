//! Integration tests for the Agora CLI.

use assert_cmd::Command;
use predicates::prelude::*;

fn agora_bin() -> Command {
    Command::cargo_bin("agora").expect("agora binary is built")
}

#[test]
fn test_version_command() {
    agora_bin()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agora"));
}

#[test]
fn test_help_lists_commands() {
    agora_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("run")
                .and(predicate::str::contains("init"))
                .and(predicate::str::contains("datasets")),
        );
}

#[test]
fn test_unknown_dataset_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();

    agora_bin()
        .current_dir(dir.path())
        .args(["--quiet", "run", "--dataset", "MMLU"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown dataset 'MMLU'"));
}

#[test]
fn test_global_flags_after_subcommand() {
    let dir = tempfile::tempdir().unwrap();

    agora_bin()
        .current_dir(dir.path())
        .args(["run", "--dataset", "MMLU", "-q", "--config", "missing.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown dataset 'MMLU'"));
}

#[test]
fn test_missing_dataset_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    agora_bin()
        .current_dir(dir.path())
        .args(["--quiet", "run", "--dataset", "SQA", "--data-dir", "nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dev.json"));
}

#[test]
fn test_init_creates_config() {
    let dir = tempfile::tempdir().unwrap();

    agora_bin()
        .args(["init", "--path"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("agora.toml"));

    let content = std::fs::read_to_string(dir.path().join("agora.toml")).unwrap();
    assert!(content.contains("[general]"));
    assert!(content.contains("[debate]"));
    assert!(content.contains("[evaluation]"));
}

#[test]
fn test_datasets_lists_tags() {
    let dir = tempfile::tempdir().unwrap();

    agora_bin()
        .current_dir(dir.path())
        .arg("datasets")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("SQA")
                .and(predicate::str::contains("GSM8k"))
                .and(predicate::str::contains("ECQA"))
                .and(predicate::str::contains("DateUnderstanding")),
        );
}

#[test]
fn test_run_with_command_completer() {
    let dir = tempfile::tempdir().unwrap();
    let sqa = dir.path().join("data").join("SQA");
    std::fs::create_dir_all(&sqa).unwrap();
    std::fs::write(
        sqa.join("dev.json"),
        r#"[{"qid": "a", "question": "Is the sky blue?", "answer": true, "facts": []}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("agora.toml"),
        "[completer]\nprovider = \"command\"\ncommand = \"sh\"\nargs = [\"-c\", \"cat > /dev/null; echo '(yes)'\"]\n\n[debate]\nretry_delay_secs = 0\nmax_retries = 0\n",
    )
    .unwrap();

    agora_bin()
        .current_dir(dir.path())
        .args([
            "--quiet",
            "run",
            "--dataset",
            "SQA",
            "--data-dir",
            "data",
            "--rounds",
            "2",
            "--output",
            "report.json",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Accuracy: 1.0000 ± 0.0000")
                .and(predicate::str::contains("Num error: 0"))
                .and(predicate::str::contains("Num invalid answer: 0")),
        );

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(report["dataset"], "SQA");
    assert_eq!(report["trials"].as_array().unwrap().len(), 2);
}
