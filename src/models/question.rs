use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Languages a question can be served in. A question qualifies for a
/// language only when it has non-empty text in that language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Uk,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Uk => "uk",
            Language::En => "en",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uk" => Ok(Language::Uk),
            "en" => Ok(Language::En),
            other => Err(format!("Unknown language: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub text_uk: Option<String>,
    pub text_en: Option<String>,
    /// Raw correct-answer string; its grammar depends on the question shape
    /// ("A", "A1B2", "A,B,C").
    pub answer: String,
    pub topic: String,
    pub level: Option<i16>,
    pub context_id: Option<Uuid>,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub letter: String,
    pub text_uk: Option<String>,
    pub text_en: Option<String>,
    #[serde(default)]
    pub suboptions: Vec<Suboption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suboption {
    pub text: String,
    pub is_correct: bool,
    pub position: i16,
}

impl Question {
    pub fn has_text(&self, language: Language) -> bool {
        let text = match language {
            Language::Uk => &self.text_uk,
            Language::En => &self.text_en,
        };
        text.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false)
    }

    pub fn has_suboptions(&self) -> bool {
        self.options.iter().any(|o| !o.suboptions.is_empty())
    }

    /// 4 options without suboptions: the shape shared by simple and complex
    /// structure slots.
    pub fn is_simple_shape(&self) -> bool {
        self.options.len() == 4 && !self.has_suboptions()
    }

    /// Any suboptions present: answered with letter-digit pairs.
    pub fn is_matching_shape(&self) -> bool {
        self.has_suboptions()
    }

    /// Exactly 6 options: multi-select.
    pub fn is_multiple_shape(&self) -> bool {
        self.options.len() == 6
    }
}
