use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::context::Context;
use crate::models::exam::{Exam, ExamQuestion, STATUS_ABANDONED, STATUS_COMPLETED, STATUS_IN_PROGRESS};
use crate::models::question::{Language, Question};
use crate::services::assembly_service::AssemblyService;
use crate::services::exam_structure::STRUCTURED_EXAM_SIZE;
use crate::services::scoring_service::{derive_question_type, ScoringService};
use crate::utils::random::RandomSource;

#[derive(Debug, Clone)]
pub struct StartedExam {
    pub exam: Exam,
    pub questions: Vec<Question>,
    pub context_used: Option<Context>,
    pub structured: bool,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SubmittedExam {
    pub exam: Exam,
    pub results: Vec<ExamQuestion>,
}

/// Exam lifecycle over Postgres: assembles via the structure, snapshots
/// correct answers and max points at creation, scores once on submit.
#[derive(Clone)]
pub struct ExamService {
    pool: PgPool,
    assembly: AssemblyService,
}

impl ExamService {
    pub fn new(pool: PgPool, assembly: AssemblyService) -> Self {
        Self { pool, assembly }
    }

    pub async fn start_exam(
        &self,
        device_id: &str,
        language: Language,
        rng: &mut dyn RandomSource,
    ) -> Result<StartedExam> {
        let assembled = self.assembly.assemble_structured_exam(language, rng).await;
        let issues = assembled.issues.clone();

        let (questions, context_used, structured) = if assembled.needs_fallback() {
            tracing::warn!(
                filled = assembled.questions.len(),
                "too few structured positions filled, falling back to random selection"
            );
            let fallback = self
                .assembly
                .random_exam(STRUCTURED_EXAM_SIZE, language, rng)
                .await?;
            (fallback, None, false)
        } else {
            (assembled.questions, assembled.context_used, true)
        };

        if questions.is_empty() {
            return Err(Error::BadRequest(
                "Question bank has no questions available for this language".to_string(),
            ));
        }

        let total_questions = questions.len() as i32;
        // max_points is fixed here from the snapshotted answer and never
        // recomputed, even if the source question is edited later.
        let max_per_question: Vec<i32> = questions
            .iter()
            .enumerate()
            .map(|(idx, q)| {
                let kind = derive_question_type(idx as i32 + 1, total_questions);
                ScoringService::max_points(&q.answer, kind)
            })
            .collect();
        let max_possible_points: i32 = max_per_question.iter().sum();

        let mut tx = self.pool.begin().await?;

        let exam = sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (device_id, status, total_questions, total_points, max_possible_points)
            VALUES ($1, $2, $3, 0, $4)
            RETURNING *
            "#,
        )
        .bind(device_id)
        .bind(STATUS_IN_PROGRESS)
        .bind(total_questions)
        .bind(max_possible_points)
        .fetch_one(&mut *tx)
        .await?;

        for (idx, question) in questions.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO exam_questions (exam_id, question_id, order_index, correct_answer, max_points)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(exam.id)
            .bind(question.id)
            .bind(idx as i32 + 1)
            .bind(&question.answer)
            .bind(max_per_question[idx])
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            exam_id = %exam.id,
            device_id,
            total_questions,
            structured,
            "exam started"
        );

        Ok(StartedExam {
            exam,
            questions,
            context_used,
            structured,
            issues,
        })
    }

    pub async fn get_exam(&self, exam_id: Uuid) -> Result<(Exam, Vec<ExamQuestion>)> {
        let exam = sqlx::query_as::<_, Exam>(r#"SELECT * FROM exams WHERE id = $1"#)
            .bind(exam_id)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, ExamQuestion>(
            r#"SELECT * FROM exam_questions WHERE exam_id = $1 ORDER BY order_index"#,
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await?;

        Ok((exam, rows))
    }

    pub async fn save_answer(
        &self,
        exam_id: Uuid,
        order_index: i32,
        answer: &str,
    ) -> Result<DateTime<Utc>> {
        let (exam, _) = self.get_exam(exam_id).await?;
        if exam.status != STATUS_IN_PROGRESS {
            return Err(Error::Conflict(format!(
                "Cannot answer an exam with status '{}'",
                exam.status
            )));
        }

        let now = Utc::now();
        let updated = sqlx::query(
            r#"
            UPDATE exam_questions SET user_answer = $1, answered_at = $2
            WHERE exam_id = $3 AND order_index = $4
            "#,
        )
        .bind(answer)
        .bind(now)
        .bind(exam_id)
        .bind(order_index)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "Exam has no question at position {}",
                order_index
            )));
        }
        Ok(now)
    }

    /// Scores and completes the exam. Submit is once per exam: a second
    /// submit against a completed or abandoned exam is rejected here.
    pub async fn submit_exam(
        &self,
        exam_id: Uuid,
        answers: &[(i32, String)],
    ) -> Result<SubmittedExam> {
        let (exam, rows) = self.get_exam(exam_id).await?;
        if exam.status != STATUS_IN_PROGRESS {
            return Err(Error::Conflict(format!(
                "Exam has already been {}",
                exam.status
            )));
        }

        let now = Utc::now();
        let mut total_points = 0;
        let mut results = Vec::with_capacity(rows.len());
        let mut tx = self.pool.begin().await?;

        for row in rows {
            let submitted = answers
                .iter()
                .find(|(order, _)| *order == row.order_index)
                .map(|(_, answer)| answer.as_str());
            let user_answer = effective_answer(submitted, row.user_answer.as_deref());

            let kind = derive_question_type(row.order_index, exam.total_questions);
            let score = ScoringService::score(&row.correct_answer, user_answer, kind);
            total_points += score.points_earned;

            let result = sqlx::query_as::<_, ExamQuestion>(
                r#"
                UPDATE exam_questions
                SET user_answer = $1, points_earned = $2,
                    answered_at = CASE WHEN $1 = '' THEN answered_at ELSE COALESCE(answered_at, $3) END
                WHERE id = $4
                RETURNING *
                "#,
            )
            .bind(user_answer)
            .bind(score.points_earned)
            .bind(now)
            .bind(row.id)
            .fetch_one(&mut *tx)
            .await?;
            results.push(result);
        }

        let exam = sqlx::query_as::<_, Exam>(
            r#"
            UPDATE exams
            SET status = $1, completed_at = $2, total_points = $3, updated_at = $2
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(STATUS_COMPLETED)
        .bind(now)
        .bind(total_points)
        .bind(exam_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            exam_id = %exam.id,
            total_points,
            max_possible_points = exam.max_possible_points,
            "exam submitted"
        );

        Ok(SubmittedExam { exam, results })
    }

    pub async fn abandon_exam(&self, exam_id: Uuid) -> Result<Exam> {
        let (exam, _) = self.get_exam(exam_id).await?;
        if exam.status != STATUS_IN_PROGRESS {
            return Err(Error::Conflict(format!(
                "Cannot abandon an exam with status '{}'",
                exam.status
            )));
        }

        let now = Utc::now();
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            UPDATE exams SET status = $1, completed_at = $2, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(STATUS_ABANDONED)
        .bind(now)
        .bind(exam_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exam)
    }
}

/// Answers in the submit payload take precedence over previously saved
/// ones, but an empty placeholder must not clobber a saved answer.
/// Blank wins only when nothing was saved either.
fn effective_answer<'a>(submitted: Option<&'a str>, saved: Option<&'a str>) -> &'a str {
    submitted
        .filter(|answer| !answer.trim().is_empty())
        .or(saved)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::effective_answer;

    #[test]
    fn submitted_answer_overrides_saved_one() {
        assert_eq!(effective_answer(Some("B"), Some("A")), "B");
        assert_eq!(effective_answer(Some("B"), None), "B");
    }

    #[test]
    fn empty_submitted_answer_keeps_saved_one() {
        assert_eq!(effective_answer(Some(""), Some("A")), "A");
        assert_eq!(effective_answer(Some("   "), Some("A")), "A");
    }

    #[test]
    fn blank_everywhere_scores_as_unanswered() {
        assert_eq!(effective_answer(Some(""), None), "");
        assert_eq!(effective_answer(None, None), "");
        assert_eq!(effective_answer(None, Some("A")), "A");
    }
}
