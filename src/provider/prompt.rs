//! System prompt shared by the remote providers.

use crate::persona::Persona;
use crate::storage::OrgSettings;

const INSTRUCTIONS: &[&str] = &[
    "신입 직원의 OJT를 돕는 멘토 역할을 합니다.",
    "질문에 대해 당신의 역할과 스타일에 맞게 답변하세요.",
    "구체적이고 실행 가능한 조언을 제공하세요.",
    "한국어로 답변하세요.",
];

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the mentor system prompt for a persona.
pub fn build_system_prompt(persona: &Persona, org: &OrgSettings, knowledge: &str) -> String {
    let knowledge = if knowledge.is_empty() {
        "(없음)"
    } else {
        knowledge
    };
    let instructions = INSTRUCTIONS
        .iter()
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "당신은 {company} 회사의 {name}입니다.\n\
         \n\
         [역할] {role}\n\
         [커뮤니케이션 스타일] {style}\n\
         \n\
         [책임 영역]\n\
         {responsibilities}\n\
         \n\
         [의사결정 규칙]\n\
         {rules}\n\
         \n\
         [회사 지식/컨텍스트]\n\
         {knowledge}\n\
         \n\
         [지시사항]\n\
         {instructions}",
        company = org.company,
        name = persona.name(),
        role = persona.role,
        style = persona.style,
        responsibilities = bullets(&persona.responsibilities),
        rules = bullets(&persona.decision_rules),
        knowledge = knowledge,
        instructions = instructions,
    )
}
