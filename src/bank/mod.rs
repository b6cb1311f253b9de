pub mod sqlx_bank;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::context::Context;
use crate::models::question::{Language, Question};

/// Read side of the question bank. The exam core only ever reads from it
/// and snapshots what it needs at assembly time; writes belong to the
/// admin tooling that owns the bank.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// All questions available in the given language, with options and
    /// suboptions attached.
    async fn list_questions(&self, language: Language) -> Result<Vec<Question>>;

    async fn list_contexts(&self) -> Result<Vec<Context>>;
}
