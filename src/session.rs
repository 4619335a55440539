//! Trainee sessions and the HR dashboard summary.

use serde::Serialize;
use tracing::{debug, info};

use crate::review::{Review, Task};
use crate::storage::{OrgSettings, SessionBook, UserSession};

impl SessionBook {
    /// Session for a user, created with starting scores on first use.
    pub fn ensure_user(&mut self, user_id: &str) -> &mut UserSession {
        self.users.entry(user_id.to_string()).or_insert_with(|| {
            info!(user = user_id, "New trainee session");
            UserSession::new(user_id)
        })
    }
}

impl UserSession {
    /// Current mission, assigning today's mission when there is none or when
    /// `renew` is set.
    pub fn assign_task(&mut self, org: &OrgSettings, renew: bool) -> &Task {
        if renew || self.last_task.is_none() {
            debug!(user = %self.name, "Daily mission assigned");
        }
        if renew {
            self.last_task = None;
        }
        self.last_task.get_or_insert_with(|| Task::daily(org))
    }

    pub fn record_question(&mut self) {
        self.questions += 1;
    }

    /// Apply a review result to the trainee's scores.
    pub fn record_review(&mut self, review: &Review) {
        self.tasks_done += 1;
        self.adapt_score = (self.adapt_score + review.score / 10).min(100);
        self.risk_score = self.risk_score.saturating_sub(review.score / 20);
        debug!(
            user = %self.name,
            adapt = self.adapt_score,
            risk = self.risk_score,
            "Review recorded"
        );
    }
}

// ─────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────

/// One row of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardRow {
    pub user_id: String,
    pub adapt_score: u32,
    pub risk_score: u32,
    pub tasks_done: u32,
    pub questions: u32,
}

/// Aggregate OJT progress across all trainees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub user_count: usize,
    pub avg_adapt: u32,
    pub avg_risk: u32,
    pub total_tasks: u32,
    pub rows: Vec<DashboardRow>,
}

impl Dashboard {
    pub fn from_sessions(book: &SessionBook) -> Self {
        let user_count = book.users.len();
        let divisor = user_count.max(1) as u32;
        let sum = |f: fn(&UserSession) -> u32| book.users.values().map(f).sum::<u32>();

        Self {
            user_count,
            avg_adapt: sum(|u| u.adapt_score) / divisor,
            avg_risk: sum(|u| u.risk_score) / divisor,
            total_tasks: sum(|u| u.tasks_done),
            rows: book
                .users
                .iter()
                .map(|(id, u)| DashboardRow {
                    user_id: id.clone(),
                    adapt_score: u.adapt_score,
                    risk_score: u.risk_score,
                    tasks_done: u.tasks_done,
                    questions: u.questions,
                })
                .collect(),
        }
    }
}
