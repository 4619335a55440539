//! Provider trait definitions
//!
//! A provider turns a persona, the organization context, a knowledge snippet
//! and a question into answer text.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::persona::Persona;
use crate::storage::OrgSettings;

/// Text-generation strategy used to answer trainee questions.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short name, matches the config `kind`
    fn name(&self) -> &'static str;

    /// Name shown to users, e.g. in inline error markers
    fn display_name(&self) -> &'static str;

    /// Generate an answer in the persona's voice.
    ///
    /// One request, no retry. Failures are returned to the caller, which
    /// decides how to present them.
    async fn generate(
        &self,
        persona: &Persona,
        org: &OrgSettings,
        knowledge: &str,
        question: &str,
    ) -> Result<String>;
}

/// Shared handle to a provider
pub type SharedProvider = Arc<dyn Provider>;
