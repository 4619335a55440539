//! Daily OJT missions.

use serde::{Deserialize, Serialize};

use crate::storage::OrgSettings;

/// A mission assigned to a trainee. Read-only to the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub context: String,
    pub deliverable: String,
    #[serde(default)]
    pub acceptance_keywords: Vec<String>,
}

impl Task {
    /// Today's mission for an organization.
    ///
    /// Acceptance keywords come from the org rubric. The default list applies
    /// only when the rubric has never been configured.
    pub fn daily(org: &OrgSettings) -> Self {
        Self {
            title: "로그 기반 장애 원인 요약".to_string(),
            context: "최근 배포 이후 500 에러가 증가. 원인을 추정하고 재발 방지안을 제시."
                .to_string(),
            deliverable: "원인(가설) 1개 이상 + 재현 조건 + 재발 방지 1개 + 참고 로그 키워드"
                .to_string(),
            acceptance_keywords: org.rubric.keywords(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_uses_org_rubric() {
        let mut org = OrgSettings::default();
        org.rubric.acceptance_keywords = Some(vec!["timeout".into(), "retry".into()]);
        let task = Task::daily(&org);
        assert_eq!(task.title, "로그 기반 장애 원인 요약");
        assert_eq!(task.acceptance_keywords, vec!["timeout", "retry"]);
    }

    #[test]
    fn test_daily_falls_back_to_default_keywords() {
        let mut org = OrgSettings::default();
        org.rubric.acceptance_keywords = None;
        let task = Task::daily(&org);
        assert_eq!(task.acceptance_keywords, vec!["원인", "재현", "재발방지", "로그"]);
    }

    #[test]
    fn test_daily_keeps_blank_rubric() {
        let mut org = OrgSettings::default();
        org.rubric.acceptance_keywords = Some(crate::storage::split_list(""));
        let task = Task::daily(&org);
        assert!(task.acceptance_keywords.is_empty());

        let review = crate::review::score(&task, &"가".repeat(150));
        assert_eq!(review.score, 70);
    }
}
