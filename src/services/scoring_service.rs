use serde::{Deserialize, Serialize};

use crate::services::answer_format::{parse_matching, parse_multiple, parse_simple};
use crate::services::exam_structure::{
    CONTEXT_SECTION_END, MATCHING_SECTION_END, STRUCTURED_EXAM_SIZE,
};

/// Answer grammar a question is scored under. Derived from the question's
/// position in a structured exam, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Simple,
    Matching,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub points_earned: i32,
    pub max_points: i32,
}

impl Score {
    fn new(points_earned: i32, max_points: i32) -> Self {
        Self {
            points_earned,
            max_points,
        }
    }

    /// An empty stored correct answer is a data defect, not a user error:
    /// the position cannot be scored meaningfully.
    fn unscorable() -> Self {
        Self::new(0, 0)
    }
}

/// Scoring grammar by 1-based position: in a 40-question structured exam
/// positions 1-30 are single-letter, 31-35 letter-digit matching, 36-40
/// multi-select. Any other exam size (the unstructured fallback) scores
/// everything as simple.
pub fn derive_question_type(position: i32, total_questions: i32) -> QuestionKind {
    if total_questions != STRUCTURED_EXAM_SIZE as i32 {
        return QuestionKind::Simple;
    }
    if position > CONTEXT_SECTION_END as i32 && position <= MATCHING_SECTION_END as i32 {
        QuestionKind::Matching
    } else if position > MATCHING_SECTION_END as i32 && position <= STRUCTURED_EXAM_SIZE as i32 {
        QuestionKind::Multiple
    } else {
        QuestionKind::Simple
    }
}

pub struct ScoringService;

impl ScoringService {
    /// Points a question is worth, fixed once at exam creation from the
    /// snapshotted correct answer.
    pub fn max_points(correct_answer: &str, kind: QuestionKind) -> i32 {
        match kind {
            QuestionKind::Simple => {
                if parse_simple(correct_answer).is_empty() {
                    0
                } else {
                    1
                }
            }
            QuestionKind::Matching => {
                if parse_matching(correct_answer).is_empty() {
                    0
                } else {
                    2
                }
            }
            QuestionKind::Multiple => {
                if parse_multiple(correct_answer).is_empty() {
                    0
                } else {
                    2
                }
            }
        }
    }

    pub fn score(correct_answer: &str, user_answer: &str, kind: QuestionKind) -> Score {
        match kind {
            QuestionKind::Simple => Self::score_simple(correct_answer, user_answer),
            QuestionKind::Matching => Self::score_matching(correct_answer, user_answer),
            QuestionKind::Multiple => Self::score_multiple(correct_answer, user_answer),
        }
    }

    fn score_simple(correct_answer: &str, user_answer: &str) -> Score {
        let correct = parse_simple(correct_answer);
        if correct.is_empty() {
            return Score::unscorable();
        }
        let user = parse_simple(user_answer);
        let earned = correct.chars().count() == 1 && user.chars().count() == 1 && user == correct;
        Score::new(earned as i32, 1)
    }

    fn score_matching(correct_answer: &str, user_answer: &str) -> Score {
        let correct_pairs = parse_matching(correct_answer);
        if correct_pairs.is_empty() {
            return Score::unscorable();
        }
        let user_pairs = parse_matching(user_answer);
        let total = correct_pairs.len();
        let hit = intersection_size(&correct_pairs, &user_pairs);

        let earned = match total {
            1 => {
                if hit == 1 {
                    1
                } else {
                    0
                }
            }
            2 => hit as i32,
            3 => match hit {
                3 => 2,
                2 => 1,
                _ => 0,
            },
            // The partial-credit table is only defined for 1-3 correct
            // pairs; larger sets continue the total=3 row's pattern.
            _ => {
                if hit == total {
                    2
                } else if hit + 1 == total {
                    1
                } else {
                    0
                }
            }
        };
        Score::new(earned, 2)
    }

    fn score_multiple(correct_answer: &str, user_answer: &str) -> Score {
        let correct_tokens = parse_multiple(correct_answer);
        if correct_tokens.is_empty() {
            return Score::unscorable();
        }
        let user_tokens = parse_multiple(user_answer);
        // Raw pre-intersection count; only the over-selection branches use it.
        let selected = user_tokens.len();
        let total = dedup_size(&correct_tokens);
        let hit = intersection_size(&correct_tokens, &user_tokens);

        // Over-selection branches come before hit branches: picking extra
        // answers caps the credit even when every correct one was included.
        let earned = match total {
            1 => {
                if selected >= 3 {
                    0
                } else if selected == 2 {
                    1
                } else if hit == 1 {
                    2
                } else {
                    0
                }
            }
            2 => {
                if selected >= 3 {
                    1
                } else if hit == 2 {
                    2
                } else if hit == 1 {
                    1
                } else {
                    0
                }
            }
            3 => match hit {
                3 => 2,
                2 => 1,
                _ => 0,
            },
            _ => {
                if hit == total {
                    2
                } else if hit + 1 == total {
                    1
                } else {
                    0
                }
            }
        };
        Score::new(earned, 2)
    }
}

fn intersection_size(correct: &[String], user: &[String]) -> usize {
    use std::collections::HashSet;
    let correct_set: HashSet<&str> = correct.iter().map(String::as_str).collect();
    let user_set: HashSet<&str> = user.iter().map(String::as_str).collect();
    correct_set.intersection(&user_set).count()
}

fn dedup_size(tokens: &[String]) -> usize {
    use std::collections::HashSet;
    tokens.iter().map(String::as_str).collect::<HashSet<_>>().len()
}
