use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::question::Language;

/// A shared reading passage grouping up to 5 questions. Only contexts with
/// at least 5 linked questions are usable for the context section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    pub id: Uuid,
    pub title: Option<String>,
    pub text_uk: Option<String>,
    pub text_en: Option<String>,
}

impl Context {
    pub fn text(&self, language: Language) -> Option<&str> {
        match language {
            Language::Uk => self.text_uk.as_deref(),
            Language::En => self.text_en.as_deref(),
        }
    }
}
