use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_ABANDONED: &str = "abandoned";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exam {
    pub id: Uuid,
    pub device_id: String,
    pub status: String,
    pub total_questions: i32,
    pub total_points: i32,
    pub max_possible_points: i32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row per (exam, question). `correct_answer` and `max_points` are
/// snapshotted at exam creation and never recomputed from the live
/// question, so later edits to the bank cannot change a running exam.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExamQuestion {
    pub id: Uuid,
    pub exam_id: Uuid,
    pub question_id: Uuid,
    pub order_index: i32,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub points_earned: i32,
    pub max_points: i32,
    pub answered_at: Option<DateTime<Utc>>,
}
