//! Rubric scoring of trainee submissions.
//!
//! The score starts at [`BASE_SCORE`] and gains up to 50 points for keyword
//! coverage. A task with no keywords gets a flat [`NO_RUBRIC_BONUS`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::task::Task;

pub const BASE_SCORE: u32 = 50;
pub const MAX_SCORE: u32 = 100;
pub const NO_RUBRIC_BONUS: u32 = 20;

/// Submissions shorter than this (in characters) get a "too short" note.
pub const MIN_SUBMISSION_CHARS: usize = 120;

pub const STRENGTH_KEYWORDS: &str = "핵심 포인트를 일부 포함했습니다.";
pub const IMPROVE_TOO_SHORT: &str = "설명이 너무 짧습니다. 근거(로그/수치/재현 조건)를 추가하세요.";
pub const IMPROVE_KEYWORDS: &str = "완료 기준 키워드(원인/재발방지/재현조건 등)를 더 명시하세요.";
pub const NEXT_STEP: &str =
    "리뷰 반영 후 1회 재제출하거나, AI 멘토에게 '어떤 로그를 봐야 하나'를 질문해보세요.";

/// Score and feedback for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub next_step: String,
}

/// Evaluate a submission against a task's acceptance keywords.
pub fn score(task: &Task, submission: &str) -> Review {
    let total = task.acceptance_keywords.len();
    let hits = count_hits(&task.acceptance_keywords, submission);

    let mut strengths = Vec::new();
    if hits >= (total / 2).max(1) {
        strengths.push(STRENGTH_KEYWORDS.to_string());
    }

    let mut improvements = Vec::new();
    if submission.chars().count() < MIN_SUBMISSION_CHARS {
        improvements.push(IMPROVE_TOO_SHORT.to_string());
    }
    if strengths.is_empty() {
        improvements.push(IMPROVE_KEYWORDS.to_string());
    }

    let score = points(hits, total);
    debug!(score, hits, total, "Submission scored");

    Review {
        score,
        strengths,
        improvements,
        next_step: NEXT_STEP.to_string(),
    }
}

/// Number of keywords present in the submission, case-insensitively.
fn count_hits(keywords: &[String], submission: &str) -> usize {
    let lowered = submission.to_lowercase();
    keywords
        .iter()
        .filter(|kw| lowered.contains(&kw.to_lowercase()))
        .count()
}

fn points(hits: usize, total: usize) -> u32 {
    let bonus = if total > 0 {
        (50 * hits / total) as u32
    } else {
        NO_RUBRIC_BONUS
    };
    (BASE_SCORE + bonus).min(MAX_SCORE)
}
