//! Persona system: the four mentor identities answers are written in.

pub mod registry;
pub mod types;

pub use registry::PersonaRegistry;
pub use types::{Persona, PersonaId};
