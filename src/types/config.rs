//! Configuration for Agora.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::AgoraResult;

/// Main configuration for Agora.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Language model settings.
    #[serde(default)]
    pub completer: CompleterConfig,

    /// Debate protocol settings.
    #[serde(default)]
    pub debate: DebateConfig,

    /// Evaluation run settings.
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Which completer backend answers agent turns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompleterProvider {
    /// OpenAI-compatible (or Azure OpenAI) chat-completions HTTP API.
    Chat,
    /// External command fed the conversation on stdin.
    Command,
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleterConfig {
    /// Backend to use.
    #[serde(default = "default_provider")]
    pub provider: CompleterProvider,

    /// API base URL. Falls back to `OPEN_AI_API_BASE`.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Azure API version. Falls back to `OPEN_AI_API_VERSION`.
    /// When set, Azure deployment URLs are used.
    #[serde(default)]
    pub api_version: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model (or Azure deployment) name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, left to the server default when unset.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Timeout for a single completion (in seconds).
    #[serde(default = "default_completion_timeout")]
    pub timeout_secs: u64,

    /// Command for the `command` provider.
    #[serde(default)]
    pub command: String,

    /// Arguments for the `command` provider.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for CompleterConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_base: None,
            api_version: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            temperature: None,
            timeout_secs: default_completion_timeout(),
            command: String::new(),
            args: Vec::new(),
        }
    }
}

impl CompleterConfig {
    /// Timeout for a single completion.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_provider() -> CompleterProvider {
    CompleterProvider::Chat
}

fn default_api_key_env() -> String {
    "OPEN_AI_API_KEY".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_completion_timeout() -> u64 {
    120
}

/// Debate protocol settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Agents per debate.
    #[serde(default = "default_agents")]
    pub agents: usize,

    /// Debate rounds per question.
    #[serde(default = "default_rounds")]
    pub rounds: usize,

    /// Fixed delay between retries of a failed completion (in seconds).
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Retries allowed per agent step before the question errors.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Ignore `max_retries` and retry until the completer answers.
    #[serde(default)]
    pub retry_forever: bool,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            agents: default_agents(),
            rounds: default_rounds(),
            retry_delay_secs: default_retry_delay(),
            max_retries: default_max_retries(),
            retry_forever: false,
        }
    }
}

fn default_agents() -> usize {
    3
}

fn default_rounds() -> usize {
    2
}

fn default_retry_delay() -> u64 {
    20
}

fn default_max_retries() -> u32 {
    1000
}

/// Evaluation run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Root directory holding one sub-directory per dataset tag.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Independent trials over the sample set.
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Samples to evaluate after shuffling (0 = all).
    #[serde(default)]
    pub num_samples: usize,

    /// Seed for the one-time sample shuffle.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Keep full agent conversations in the report.
    #[serde(default)]
    pub keep_transcripts: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            trials: default_trials(),
            num_samples: 0,
            seed: default_seed(),
            keep_transcripts: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./dataset/ReConcile/")
}

fn default_trials() -> usize {
    3
}

fn default_seed() -> u64 {
    9999
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> AgoraResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> AgoraResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            completer: CompleterConfig::default(),
            debate: DebateConfig::default(),
            evaluation: EvaluationConfig::default(),
        }
    }

    /// Loads `path` if it exists, otherwise returns the default
    /// configuration. A file that exists but does not parse is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> AgoraResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default_config())
        }
    }
}
