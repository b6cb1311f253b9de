use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::context::Context;
use crate::models::exam::{Exam, ExamQuestion};
use crate::models::question::Question;

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartExamRequest {
    #[validate(length(min = 1, max = 128))]
    pub device_id: String,
}

/// Question as shown to the client: no correct answer, no suboption
/// correctness flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: Uuid,
    pub order: i32,
    pub text_uk: Option<String>,
    pub text_en: Option<String>,
    pub options: Vec<PublicOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicOption {
    pub letter: String,
    pub text_uk: Option<String>,
    pub text_en: Option<String>,
    pub suboptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicContext {
    pub id: Uuid,
    pub title: Option<String>,
    pub text_uk: Option<String>,
    pub text_en: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartExamResponse {
    pub exam_id: Uuid,
    pub device_id: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub total_questions: i32,
    pub max_possible_points: i32,
    pub structured: bool,
    pub issues: Vec<String>,
    pub context: Option<PublicContext>,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveAnswerRequest {
    #[validate(range(min = 1))]
    pub order: i32,
    #[validate(length(max = 256))]
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAnswerResponse {
    pub saved: bool,
    pub order: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitExamRequest {
    pub answers: Vec<SaveAnswerRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    pub order: i32,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub points_earned: i32,
    pub max_points: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitExamResponse {
    pub exam_id: Uuid,
    pub status: String,
    pub total_points: i32,
    pub max_possible_points: i32,
    pub percentage: f64,
    pub completed_at: Option<DateTime<Utc>>,
    pub results: Vec<AnswerResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamDetailResponse {
    pub exam_id: Uuid,
    pub device_id: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_questions: i32,
    pub total_points: i32,
    pub max_possible_points: i32,
    pub answered_count: usize,
    /// Per-question breakdown, only revealed once the exam is completed.
    pub results: Option<Vec<AnswerResult>>,
}

impl PublicQuestion {
    pub fn from_question(question: &Question, order: i32) -> Self {
        Self {
            id: question.id,
            order,
            text_uk: question.text_uk.clone(),
            text_en: question.text_en.clone(),
            options: question
                .options
                .iter()
                .map(|o| PublicOption {
                    letter: o.letter.clone(),
                    text_uk: o.text_uk.clone(),
                    text_en: o.text_en.clone(),
                    suboptions: o.suboptions.iter().map(|s| s.text.clone()).collect(),
                })
                .collect(),
        }
    }
}

impl From<&Context> for PublicContext {
    fn from(context: &Context) -> Self {
        Self {
            id: context.id,
            title: context.title.clone(),
            text_uk: context.text_uk.clone(),
            text_en: context.text_en.clone(),
        }
    }
}

impl From<&ExamQuestion> for AnswerResult {
    fn from(row: &ExamQuestion) -> Self {
        Self {
            order: row.order_index,
            user_answer: row.user_answer.clone(),
            correct_answer: row.correct_answer.clone(),
            points_earned: row.points_earned,
            max_points: row.max_points,
        }
    }
}

impl ExamDetailResponse {
    pub fn from_parts(exam: &Exam, rows: &[ExamQuestion]) -> Self {
        let completed = exam.status == crate::models::exam::STATUS_COMPLETED;
        Self {
            exam_id: exam.id,
            device_id: exam.device_id.clone(),
            status: exam.status.clone(),
            started_at: exam.started_at,
            completed_at: exam.completed_at,
            total_questions: exam.total_questions,
            total_points: exam.total_points,
            max_possible_points: exam.max_possible_points,
            answered_count: rows.iter().filter(|r| r.user_answer.is_some()).count(),
            results: completed.then(|| rows.iter().map(AnswerResult::from).collect()),
        }
    }
}
