//! Configuration system for AgentCamp
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (AGENTCAMP_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::provider::ProviderKind;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the JSON documents live
    pub storage: StorageSettings,

    /// Logging configuration
    pub logging: LoggingSettings,

    /// Which text-generation provider answers questions
    pub provider: ProviderSettings,

    /// OpenAI-compatible API settings
    pub openai: OpenAiSettings,

    /// Anthropic Claude API settings
    pub claude: ClaudeSettings,
}

/// Storage path settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding org.json, knowledge.json and sessions.json
    pub data_dir: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

/// Provider selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// mock, openai or claude
    pub kind: String,
}

/// OpenAI-compatible API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// API base URL (e.g., "https://api.openai.com/v1", "http://localhost:11434/v1")
    pub base_url: String,

    /// API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Maximum tokens per answer
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// HTTP client timeout in seconds
    pub timeout_secs: u64,
}

/// Anthropic Claude API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaudeSettings {
    /// API base URL
    pub base_url: String,

    /// API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Maximum tokens per answer
    pub max_tokens: u32,

    /// HTTP client timeout in seconds
    pub timeout_secs: u64,
}

// Default implementations

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.agentcamp/data".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_files: 5,
            json_format: false,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: "mock".to_string(),
        }
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

impl Default for ClaudeSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            api_key: String::new(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1024,
            timeout_secs: 120,
        }
    }
}

impl AppConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::ConfigNotFound { path });
        }

        let search_paths = [
            PathBuf::from("agentcamp.toml"),
            dirs::config_dir()
                .map(|p| p.join("agentcamp").join("config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".agentcamp").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if path.is_file() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AGENTCAMP_DATA_DIR") {
            self.storage.data_dir = val;
        }

        // Logging settings
        if let Ok(val) = std::env::var("AGENTCAMP_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("AGENTCAMP_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("AGENTCAMP_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("AGENTCAMP_PROVIDER") {
            self.provider.kind = val;
        }

        // OpenAI settings
        if let Ok(val) = std::env::var("AGENTCAMP_OPENAI_BASE_URL") {
            self.openai.base_url = val;
        }
        if let Ok(val) = std::env::var("AGENTCAMP_OPENAI_MODEL") {
            self.openai.model = val;
        }
        if let Ok(val) = std::env::var("AGENTCAMP_OPENAI_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.openai.timeout_secs = n;
            }
        }
        if let Ok(val) = std::env::var("AGENTCAMP_OPENAI_API_KEY") {
            self.openai.api_key = val;
        } else if self.openai.api_key.is_empty() {
            // Fall back to the vendor's conventional variable
            if let Ok(val) = std::env::var("OPENAI_API_KEY") {
                self.openai.api_key = val;
            }
        }

        // Claude settings
        if let Ok(val) = std::env::var("AGENTCAMP_CLAUDE_BASE_URL") {
            self.claude.base_url = val;
        }
        if let Ok(val) = std::env::var("AGENTCAMP_CLAUDE_MODEL") {
            self.claude.model = val;
        }
        if let Ok(val) = std::env::var("AGENTCAMP_CLAUDE_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.claude.timeout_secs = n;
            }
        }
        if let Ok(val) = std::env::var("AGENTCAMP_CLAUDE_API_KEY") {
            self.claude.api_key = val;
        } else if self.claude.api_key.is_empty() {
            if let Ok(val) = std::env::var("ANTHROPIC_API_KEY") {
                self.claude.api_key = val;
            }
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.storage.data_dir = expand_path(&self.storage.data_dir);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.storage.data_dir.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "storage.data_dir",
                "data_dir cannot be empty",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        self.provider_kind()?;

        for (field, base_url) in [
            ("openai.base_url", &self.openai.base_url),
            ("claude.base_url", &self.claude.base_url),
        ] {
            url::Url::parse(base_url).map_err(|e| {
                Error::config_field_invalid(field, format!("'{}' is not a valid URL: {}", base_url, e))
            })?;
        }

        Ok(())
    }

    /// The configured provider kind
    pub fn provider_kind(&self) -> Result<ProviderKind> {
        ProviderKind::from_str(&self.provider.kind).ok_or_else(|| Error::ProviderUnknown {
            name: self.provider.kind.clone(),
        })
    }

    /// Get the data directory as a PathBuf
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Mask API keys before the config is displayed
    pub fn redact_secrets(&mut self) {
        for key in [&mut self.openai.api_key, &mut self.claude.api_key] {
            if !key.is_empty() {
                *key = "********".to_string();
            }
        }
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".agentcamp")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::config_validation(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# AgentCamp Configuration

[storage]
# Directory for org.json, knowledge.json and sessions.json
data_dir = "~/.agentcamp/data"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.agentcamp/logs/agentcamp.log"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false

[provider]
# Answer generator: mock (templated, no network), openai, claude
kind = "mock"

[openai]
base_url = "https://api.openai.com/v1"
# api_key = "sk-..."   (or export OPENAI_API_KEY)
model = "gpt-4o"
max_tokens = 1024
temperature = 0.7
timeout_secs = 120

[claude]
base_url = "https://api.anthropic.com"
# api_key = "sk-ant-..."   (or export ANTHROPIC_API_KEY)
model = "claude-sonnet-4-20250514"
max_tokens = 1024
timeout_secs = 120
"#
    .to_string()
}
