//! Question routing
//!
//! Maps a free-text question to the persona best placed to answer it. The
//! keyword groups are an ordered table: the first group with a matching
//! keyword wins and questions matching nothing go to [`DEFAULT_PERSONA`].

use tracing::debug;

use crate::persona::PersonaId;

/// Ordered keyword groups. Keywords are lower-case; the question is folded
/// before matching.
const ROUTE_RULES: &[(PersonaId, &[&str])] = &[
    (PersonaId::SamLee, &["우선순위", "전략", "고객", "리스크", "비용"]),
    (PersonaId::JhKim, &["요구사항", "스코프", "정의", "kpi", "지표"]),
    (
        PersonaId::SeulKim,
        &["ui", "ux", "화면", "프론트", "component", "반응형"],
    ),
];

/// Persona for backend and systems questions, and anything unmatched.
pub const DEFAULT_PERSONA: PersonaId = PersonaId::JinPark;

/// Route a question to a persona. Never fails.
pub fn route(question: &str) -> PersonaId {
    let lowered = question.to_lowercase();
    let persona = ROUTE_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(persona, _)| *persona)
        .unwrap_or(DEFAULT_PERSONA);

    debug!(persona = %persona, "Question routed");
    persona
}
