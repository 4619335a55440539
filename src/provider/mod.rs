//! Text-generation providers
//!
//! The templated provider is the default. Remote providers send a persona
//! system prompt to an external API.

mod claude;
mod mock;
mod openai;
mod prompt;
mod registry;
mod traits;

pub use claude::ClaudeProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;
pub use registry::*;
pub use traits::*;
