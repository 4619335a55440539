//! Error types for AgentCamp
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for AgentCamp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Provider errors (3xx)
    ProviderUnknown = 300,
    ProviderCredentials = 301,
    ProviderRequest = 302,
    ProviderResponse = 303,

    // Storage errors (4xx)
    DocumentCorrupted = 400,
    DocumentEncode = 401,

    // Input errors (5xx)
    InputEmpty = 500,
    PersonaNotFound = 502,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10,
            200..=299 => 20,
            300..=399 => 30,
            400..=499 => 40,
            500..=599 => 50,
            900..=999 => 90,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Provider Errors
    // ─────────────────────────────────────────────────────────────

    /// Unknown provider name in configuration
    #[error("Unsupported provider: {name}")]
    ProviderUnknown { name: String },

    /// Provider selected without the credentials it needs
    #[error("API key required to use the {provider} provider")]
    ProviderCredentials { provider: String },

    /// Provider request could not be sent or was rejected
    #[error("{provider} request failed: {message}")]
    ProviderRequest { provider: String, message: String },

    /// Provider answered with something we could not use
    #[error("{provider} returned an unusable response: {message}")]
    ProviderResponse { provider: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────

    /// Stored document is not valid JSON of the expected shape
    #[error("Document '{name}' is corrupted: {source}")]
    DocumentCorrupted {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Document could not be encoded
    #[error("Failed to encode document '{name}': {source}")]
    DocumentEncode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────

    /// Blank input where content is required
    #[error("{what} is empty")]
    InputEmpty { what: String },

    /// Unknown persona identifier
    #[error("Persona not found: {name}")]
    PersonaNotFound { name: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::ProviderUnknown { .. } => ErrorCode::ProviderUnknown,
            Error::ProviderCredentials { .. } => ErrorCode::ProviderCredentials,
            Error::ProviderRequest { .. } => ErrorCode::ProviderRequest,
            Error::ProviderResponse { .. } => ErrorCode::ProviderResponse,

            Error::DocumentCorrupted { .. } => ErrorCode::DocumentCorrupted,
            Error::DocumentEncode { .. } => ErrorCode::DocumentEncode,

            Error::InputEmpty { .. } => ErrorCode::InputEmpty,
            Error::PersonaNotFound { .. } => ErrorCode::PersonaNotFound,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Error text without the provider prefix, used for inline answer markers
    pub fn detail(&self) -> String {
        match self {
            Error::ProviderRequest { message, .. } | Error::ProviderResponse { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => {
                Some("Run 'agentcamp config init' to create a default configuration file.")
            }
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'agentcamp config validate' to see details.",
            ),
            Error::ConfigValidation { .. } => {
                Some("Review the configuration file and fix the invalid values.")
            }
            Error::ProviderUnknown { .. } => {
                Some("Set [provider] kind to one of: mock, openai, claude.")
            }
            Error::ProviderCredentials { .. } => Some(
                "Set the api_key in the provider section or export AGENTCAMP_OPENAI_API_KEY / AGENTCAMP_CLAUDE_API_KEY.",
            ),
            Error::DocumentCorrupted { .. } => Some(
                "The data file was edited by hand or truncated. Fix the JSON or delete it to restore defaults.",
            ),
            Error::InputEmpty { .. } => Some("Provide non-blank text with --text or --file."),
            Error::PersonaNotFound { .. } => {
                Some("Run 'agentcamp persona list' to see the available personas.")
            }
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!("\x1b[31mError [{}]\x1b[0m: {}\n", self.code().as_str(), self);

        if let Error::ConfigValidation { field: Some(field), .. } = self {
            output.push_str(&format!("  field: {}\n", field));
        }

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config validation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a provider request error
    pub fn provider_request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ProviderRequest {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a provider response error
    pub fn provider_response(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ProviderResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an empty-input error
    pub fn input_empty(what: impl Into<String>) -> Self {
        Error::InputEmpty { what: what.into() }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::ProviderCredentials.as_str(), "E301");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigValidation.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::ProviderUnknown.exit_code(), 30);
        assert_eq!(ErrorCode::DocumentCorrupted.exit_code(), 40);
        assert_eq!(ErrorCode::InputEmpty.exit_code(), 50);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_provider_errors() {
        let err = Error::ProviderCredentials {
            provider: "claude".into(),
        };
        assert!(err.to_string().contains("claude"));
        assert_eq!(err.exit_code(), 30);

        let err = Error::ProviderUnknown {
            name: "gemini".into(),
        };
        assert_eq!(err.code(), ErrorCode::ProviderUnknown);
    }

    #[test]
    fn test_detail_drops_provider_prefix() {
        let err = Error::provider_request("OpenAI", "HTTP 401: invalid key");
        assert_eq!(err.to_string(), "OpenAI request failed: HTTP 401: invalid key");
        assert_eq!(err.detail(), "HTTP 401: invalid key");

        let err = Error::provider_response("Claude", "missing content");
        assert_eq!(err.detail(), "missing content");

        let err = Error::input_empty("Question");
        assert_eq!(err.detail(), "Question is empty");
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/test"),
        };
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::input_empty("Question");
        assert_eq!(err.to_string(), "Question is empty");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_format_for_terminal() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/test/config.toml"),
        };
        let formatted = err.format_for_terminal();

        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_terminal_names_field() {
        let err = Error::config_field_invalid("logging.level", "unknown level 'loud'");
        assert!(err.format_for_terminal().contains("field: logging.level"));
    }

    #[test]
    fn test_format_for_log() {
        let err = Error::PersonaNotFound {
            name: "Nobody".into(),
        };
        let formatted = err.format_for_log();

        assert!(formatted.contains("[E502]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
