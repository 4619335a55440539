//! Templated provider
//!
//! Renders a fixed answer layout from the persona definition. Needs no
//! network access or credentials and is the default provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::persona::Persona;
use crate::storage::OrgSettings;

use super::Provider;

/// Characters of the knowledge snippet quoted in a templated answer.
pub const SNIPPET_CHARS: usize = 280;

/// Caution used when a persona has no decision rules.
pub const GENERIC_CAUTION: &str = "근거 기반 판단";

const ACTION_STEPS: &[&str] = &[
    "1) 완료 기준을 1문장으로 다시 쓰기",
    "2) 지금 가진 근거(로그/스크린샷/재현단계)를 붙이기",
    "3) 10분 안에 검증 가능한 다음 스텝 실행",
];

/// Deterministic templated answers
#[derive(Debug, Default, Clone)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    /// Render the templated answer.
    pub fn render(persona: &Persona, knowledge: &str, question: &str) -> String {
        let mut lines = vec![
            format!("[{} | {}]", persona.name(), persona.role),
            format!("스타일: {}", persona.style),
            String::new(),
            format!("질문: {}", question),
            String::new(),
            "내가 보는 핵심:".to_string(),
        ];

        if !knowledge.is_empty() {
            let quoted: String = knowledge.chars().take(SNIPPET_CHARS).collect();
            lines.push(format!("- (회사 지식 참고) {}", quoted));
        }

        lines.push(String::new());
        lines.push("권장 액션(오늘 OJT 관점):".to_string());
        lines.extend(ACTION_STEPS.iter().map(|s| s.to_string()));
        lines.push(String::new());
        lines.push("주의:".to_string());
        lines.push(format!(
            "- {}",
            persona.primary_rule().unwrap_or(GENERIC_CAUTION)
        ));

        lines.join("\n")
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Mock"
    }

    async fn generate(
        &self,
        persona: &Persona,
        _org: &OrgSettings,
        knowledge: &str,
        question: &str,
    ) -> Result<String> {
        Ok(Self::render(persona, knowledge, question))
    }
}
