//! Response generation
//!
//! Answers a routed question through the active provider. Provider failures
//! never escape: they are rendered inline as `[<Provider> API 오류] <detail>`.

use tracing::{debug, warn};

use crate::persona::Persona;
use crate::provider::ProviderContext;
use crate::storage::OrgSettings;

/// Answer a question in the persona's voice.
pub async fn respond(
    persona: &Persona,
    org: &OrgSettings,
    knowledge: &str,
    question: &str,
    providers: &ProviderContext,
) -> String {
    let provider = providers.active();
    match provider.generate(persona, org, knowledge, question).await {
        Ok(answer) => {
            debug!(provider = provider.name(), persona = %persona.id, "Answer generated");
            answer
        }
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "Provider failed");
            format!("[{} API 오류] {}", provider.display_name(), e.detail())
        }
    }
}
