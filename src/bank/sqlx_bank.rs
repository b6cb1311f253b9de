use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::error::Result;
use crate::models::context::Context;
use crate::models::question::{AnswerOption, Language, Question, Suboption};

/// Postgres-backed question bank. Questions, options and suboptions are
/// loaded in three queries and stitched together in memory; the bank is
/// small enough that per-language filtering happens after the fetch.
#[derive(Clone)]
pub struct SqlxQuestionBank {
    pool: PgPool,
}

impl SqlxQuestionBank {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct QuestionRow {
    id: Uuid,
    text_uk: Option<String>,
    text_en: Option<String>,
    answer: String,
    topic: String,
    level: Option<i16>,
    context_id: Option<Uuid>,
}

#[derive(Debug, FromRow)]
struct OptionRow {
    id: Uuid,
    question_id: Uuid,
    letter: String,
    text_uk: Option<String>,
    text_en: Option<String>,
}

#[derive(Debug, FromRow)]
struct SuboptionRow {
    option_id: Uuid,
    text: String,
    is_correct: bool,
    position: i16,
}

#[derive(Debug, FromRow)]
struct ContextRow {
    id: Uuid,
    title: Option<String>,
    text_uk: Option<String>,
    text_en: Option<String>,
}

#[async_trait]
impl QuestionBank for SqlxQuestionBank {
    async fn list_questions(&self, language: Language) -> Result<Vec<Question>> {
        let question_rows = sqlx::query_as::<_, QuestionRow>(
            r#"SELECT id, text_uk, text_en, answer, topic, level, context_id
               FROM questions ORDER BY created_at, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let option_rows = sqlx::query_as::<_, OptionRow>(
            r#"SELECT id, question_id, letter, text_uk, text_en
               FROM answer_options ORDER BY question_id, position, letter"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let suboption_rows = sqlx::query_as::<_, SuboptionRow>(
            r#"SELECT option_id, text, is_correct, position
               FROM suboptions ORDER BY option_id, position"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut suboptions_by_option: HashMap<Uuid, Vec<Suboption>> = HashMap::new();
        for row in suboption_rows {
            suboptions_by_option
                .entry(row.option_id)
                .or_default()
                .push(Suboption {
                    text: row.text,
                    is_correct: row.is_correct,
                    position: row.position,
                });
        }

        let mut options_by_question: HashMap<Uuid, Vec<AnswerOption>> = HashMap::new();
        for row in option_rows {
            let suboptions = suboptions_by_option.remove(&row.id).unwrap_or_default();
            options_by_question
                .entry(row.question_id)
                .or_default()
                .push(AnswerOption {
                    letter: row.letter,
                    text_uk: row.text_uk,
                    text_en: row.text_en,
                    suboptions,
                });
        }

        let questions = question_rows
            .into_iter()
            .map(|row| {
                let options = options_by_question.remove(&row.id).unwrap_or_default();
                Question {
                    id: row.id,
                    text_uk: row.text_uk,
                    text_en: row.text_en,
                    answer: row.answer,
                    topic: row.topic,
                    level: row.level,
                    context_id: row.context_id,
                    options,
                }
            })
            .filter(|q| q.has_text(language))
            .collect();

        Ok(questions)
    }

    async fn list_contexts(&self) -> Result<Vec<Context>> {
        let rows = sqlx::query_as::<_, ContextRow>(
            r#"SELECT id, title, text_uk, text_en FROM contexts ORDER BY created_at, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Context {
                id: row.id,
                title: row.title,
                text_uk: row.text_uk,
                text_en: row.text_en,
            })
            .collect())
    }
}
