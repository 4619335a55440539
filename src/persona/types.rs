//! Core types for the persona system.
//!
//! A persona is a fixed mentor identity. Questions are routed to one of four
//! personas and the answer is written in that persona's voice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Persona Id
// ─────────────────────────────────────────────────────────────────

/// The four mentor personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonaId {
    /// CEO: strategy, priorities, customer impact, risk.
    SamLee,
    /// PM: requirements, scope, success metrics.
    JhKim,
    /// Frontend: UI/UX, screens, components.
    SeulKim,
    /// Backend: APIs, data, infrastructure. Default route.
    JinPark,
}

impl PersonaId {
    /// Slug used in config files and CLI args.
    pub fn slug(&self) -> &'static str {
        match self {
            PersonaId::SamLee => "sam-lee",
            PersonaId::JhKim => "jh-kim",
            PersonaId::SeulKim => "seul-kim",
            PersonaId::JinPark => "jin-park",
        }
    }

    /// Display name, also the key used in stored documents.
    pub fn name(&self) -> &'static str {
        match self {
            PersonaId::SamLee => "Sam Lee",
            PersonaId::JhKim => "JH Kim",
            PersonaId::SeulKim => "Seul Kim",
            PersonaId::JinPark => "Jin Park",
        }
    }

    /// All personas in listing order.
    pub fn all() -> &'static [PersonaId] {
        &[
            PersonaId::SamLee,
            PersonaId::JhKim,
            PersonaId::SeulKim,
            PersonaId::JinPark,
        ]
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PersonaId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        PersonaId::all()
            .iter()
            .find(|id| id.slug() == normalized)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown persona '{}'. Valid: sam-lee, jh-kim, seul-kim, jin-park",
                    s
                )
            })
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona
// ─────────────────────────────────────────────────────────────────

/// A mentor persona definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Which persona this is.
    pub id: PersonaId,

    /// Role label, e.g. "PM".
    pub role: String,

    /// How the persona communicates.
    pub style: String,

    /// Areas the persona owns, in priority order.
    #[serde(default)]
    pub responsibilities: Vec<String>,

    /// Rules of thumb the persona decides by, most important first.
    #[serde(default)]
    pub decision_rules: Vec<String>,
}

impl Persona {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// The rule quoted as a caution at the end of templated answers.
    pub fn primary_rule(&self) -> Option<&str> {
        self.decision_rules.first().map(String::as_str)
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
