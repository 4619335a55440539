//! Typed shapes of the three stored documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeItem;
use crate::review::Task;

// ─────────────────────────────────────────────────────────────────
// Organization Settings
// ─────────────────────────────────────────────────────────────────

/// Company-level OJT settings (`org.json`).
///
/// Missing fields take the defaults. Fields that are present are kept as
/// stored, even when blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgSettings {
    #[serde(default = "default_company")]
    pub company: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_tools")]
    pub tools: Vec<String>,
    #[serde(default)]
    pub rubric: Rubric,
}

/// Review rubric for daily missions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    /// `None` when the organization never configured keywords. An explicit
    /// empty list means missions carry no keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_keywords: Option<Vec<String>>,
}

/// Keywords used when an organization has not configured its own.
pub const DEFAULT_ACCEPTANCE_KEYWORDS: &[&str] = &["원인", "재현", "재발방지", "로그"];

fn default_company() -> String {
    "Veluga".to_string()
}

fn default_role() -> String {
    "Backend Engineer".to_string()
}

fn default_tools() -> Vec<String> {
    vec!["Slack".to_string(), "GitHub".to_string()]
}

impl Default for OrgSettings {
    fn default() -> Self {
        Self {
            company: default_company(),
            role: default_role(),
            tools: default_tools(),
            rubric: Rubric {
                acceptance_keywords: Some(
                    DEFAULT_ACCEPTANCE_KEYWORDS
                        .iter()
                        .map(|k| k.to_string())
                        .collect(),
                ),
            },
        }
    }
}

impl Rubric {
    /// Configured keywords, or the default list when none were ever set.
    pub fn keywords(&self) -> Vec<String> {
        match &self.acceptance_keywords {
            Some(keywords) => keywords.clone(),
            None => DEFAULT_ACCEPTANCE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Split a comma separated list, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ─────────────────────────────────────────────────────────────────
// Knowledge Base
// ─────────────────────────────────────────────────────────────────

/// Append-only collection of knowledge items (`knowledge.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub items: Vec<KnowledgeItem>,
}

impl KnowledgeBase {
    pub fn append(&mut self, items: impl IntoIterator<Item = KnowledgeItem>) {
        self.items.extend(items);
    }

    /// Text of the most recently added item, or an empty string.
    pub fn latest_snippet(&self) -> &str {
        self.items.last().map(|i| i.text.as_str()).unwrap_or("")
    }

    /// The last `n` items, oldest first.
    pub fn recent(&self, n: usize) -> &[KnowledgeItem] {
        let start = self.items.len().saturating_sub(n);
        &self.items[start..]
    }
}

// ─────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────

/// Progress of one trainee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub name: String,
    pub adapt_score: u32,
    pub risk_score: u32,
    pub tasks_done: u32,
    pub questions: u32,
    #[serde(default)]
    pub last_task: Option<Task>,
}

impl UserSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adapt_score: 50,
            risk_score: 50,
            tasks_done: 0,
            questions: 0,
            last_task: None,
        }
    }
}

/// All trainee sessions keyed by user id (`sessions.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBook {
    #[serde(default)]
    pub users: BTreeMap<String, UserSession>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{SourceType, Tag};

    #[test]
    fn test_default_org_shape() {
        let value = serde_json::to_value(OrgSettings::default()).unwrap();
        assert_eq!(value["company"], "Veluga");
        assert_eq!(value["role"], "Backend Engineer");
        assert_eq!(value["tools"][1], "GitHub");
        assert_eq!(value["rubric"]["acceptance_keywords"][3], "로그");
    }

    #[test]
    fn test_org_missing_fields_take_defaults() {
        let org: OrgSettings = serde_json::from_str(r#"{"role": "PM"}"#).unwrap();
        assert_eq!(org.company, "Veluga");
        assert_eq!(org.role, "PM");
        assert_eq!(org.tools, vec!["Slack", "GitHub"]);
        assert!(org.rubric.acceptance_keywords.is_none());
        assert_eq!(org.rubric.keywords(), vec!["원인", "재현", "재발방지", "로그"]);
    }

    #[test]
    fn test_org_blank_fields_are_kept() {
        let org: OrgSettings = serde_json::from_str(
            r#"{"company": "", "role": "PM", "tools": [], "rubric": {"acceptance_keywords": []}}"#,
        )
        .unwrap();
        assert_eq!(org.company, "");
        assert!(org.tools.is_empty());
        assert_eq!(org.rubric.acceptance_keywords, Some(vec![]));
        assert!(org.rubric.keywords().is_empty());

        let value = serde_json::to_value(&org).unwrap();
        assert_eq!(value["rubric"]["acceptance_keywords"], serde_json::json!([]));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" Slack, ,GitHub ,"), vec!["Slack", "GitHub"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_latest_snippet_and_recent() {
        let mut kb = KnowledgeBase::default();
        assert_eq!(kb.latest_snippet(), "");
        assert!(kb.recent(10).is_empty());

        kb.append((0..3).map(|i| KnowledgeItem {
            id: format!("meeting_stt-1-{}", i),
            source: SourceType::MeetingStt,
            tag: Tag::Process,
            text: format!("item {}", i),
        }));
        assert_eq!(kb.latest_snippet(), "item 2");
        assert_eq!(kb.recent(2)[0].text, "item 1");
        assert_eq!(kb.recent(10).len(), 3);
    }

    #[test]
    fn test_new_session_defaults() {
        let s = UserSession::new("minsu");
        assert_eq!(s.adapt_score, 50);
        assert_eq!(s.risk_score, 50);
        assert_eq!(s.tasks_done, 0);
        assert!(s.last_task.is_none());
    }
}
