//! Bundled persona registry.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

use super::types::{Persona, PersonaId};

const BUNDLED_PERSONAS: &str = include_str!("../../config/personas.toml");

#[derive(Debug, Deserialize)]
struct PersonaFile {
    persona: Vec<Persona>,
}

/// Immutable table of the four mentor personas.
///
/// Built once at startup and handed to the router consumers and the
/// response generator by reference.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Load the personas compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_toml(BUNDLED_PERSONAS)
    }

    /// Parse and validate a persona table.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: PersonaFile = toml::from_str(content).map_err(|e| Error::ConfigParse {
            message: format!("persona table: {}", e),
            source: Some(e),
        })?;
        Self::from_personas(file.persona)
    }

    /// Build from explicit definitions. Every persona id must appear exactly once.
    pub fn from_personas(personas: Vec<Persona>) -> Result<Self> {
        for id in PersonaId::all() {
            let count = personas.iter().filter(|p| p.id == *id).count();
            if count != 1 {
                return Err(Error::config_field_invalid(
                    "persona",
                    format!("persona '{}' defined {} times, expected once", id.slug(), count),
                ));
            }
        }
        if personas.len() != PersonaId::all().len() {
            return Err(Error::config_validation(format!(
                "expected {} personas, found {}",
                PersonaId::all().len(),
                personas.len()
            )));
        }

        debug!(count = personas.len(), "Persona registry loaded");
        Ok(Self { personas })
    }

    /// Look up a persona. Always present for a validated registry.
    pub fn get(&self, id: PersonaId) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// Look up a persona by name or slug.
    pub fn find(&self, name: &str) -> Result<&Persona> {
        let id: PersonaId = name.parse().map_err(|_| Error::PersonaNotFound {
            name: name.to_string(),
        })?;
        self.get(id).ok_or_else(|| Error::PersonaNotFound {
            name: name.to_string(),
        })
    }

    /// Personas in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }
}
