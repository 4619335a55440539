//! Provider registry
//!
//! Maps configured provider names to implementations and holds the active
//! provider.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;

use super::{ClaudeProvider, MockProvider, OpenAiProvider, SharedProvider};

// ─────────────────────────────────────────────────────────────────
// Provider Kind
// ─────────────────────────────────────────────────────────────────

/// Supported provider kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Templated answers, no network
    Mock,
    /// OpenAI-compatible chat completions
    OpenAi,
    /// Anthropic Messages API
    Claude,
}

impl ProviderKind {
    /// Get the provider name
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Claude => "claude",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Some(ProviderKind::Mock),
            "openai" => Some(ProviderKind::OpenAi),
            "claude" | "anthropic" => Some(ProviderKind::Claude),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ─────────────────────────────────────────────────────────────────
// Provider Factory
// ─────────────────────────────────────────────────────────────────

/// Factory for creating providers
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider of the given kind from application config
    pub fn create(kind: ProviderKind, config: &AppConfig) -> Result<SharedProvider> {
        match kind {
            ProviderKind::Mock => Ok(Arc::new(MockProvider::new())),
            ProviderKind::OpenAi => Ok(Arc::new(OpenAiProvider::new(config.openai.clone())?)),
            ProviderKind::Claude => Ok(Arc::new(ClaudeProvider::new(config.claude.clone())?)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Provider Context
// ─────────────────────────────────────────────────────────────────

/// Holds the single active provider.
///
/// Passed explicitly to the response generator. The active provider can be
/// replaced at runtime; callers already holding a handle keep using it.
pub struct ProviderContext {
    active: RwLock<SharedProvider>,
}

impl ProviderContext {
    pub fn new(provider: SharedProvider) -> Self {
        Self {
            active: RwLock::new(provider),
        }
    }

    /// Context with the templated provider active
    pub fn templated() -> Self {
        Self::new(Arc::new(MockProvider::new()))
    }

    /// Context with the provider selected by configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let kind = config.provider_kind()?;
        let provider = ProviderFactory::create(kind, config)?;
        info!(provider = %kind, "Provider selected");
        Ok(Self::new(provider))
    }

    /// Handle to the active provider
    pub fn active(&self) -> SharedProvider {
        self.active.read().clone()
    }

    /// Replace the active provider
    pub fn set_active(&self, provider: SharedProvider) {
        info!(provider = provider.name(), "Active provider replaced");
        *self.active.write() = provider;
    }

    /// Build and activate a provider of another kind
    pub fn switch(&self, kind: ProviderKind, config: &AppConfig) -> Result<()> {
        let provider = ProviderFactory::create(kind, config)?;
        self.set_active(provider);
        Ok(())
    }
}

impl Default for ProviderContext {
    fn default() -> Self {
        Self::templated()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
