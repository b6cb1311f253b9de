use mathquiz_backend::services::answer_format::{parse_matching, parse_multiple, parse_simple};
use mathquiz_backend::services::scoring_service::{
    derive_question_type, QuestionKind, ScoringService,
};

fn points(correct: &str, user: &str, kind: QuestionKind) -> (i32, i32) {
    let score = ScoringService::score(correct, user, kind);
    (score.points_earned, score.max_points)
}

#[test]
fn simple_scores_one_for_case_insensitive_match() {
    assert_eq!(points("A", "A", QuestionKind::Simple), (1, 1));
    assert_eq!(points("A", "a", QuestionKind::Simple), (1, 1));
    assert_eq!(points("A", " a ", QuestionKind::Simple), (1, 1));
    assert_eq!(points("B", "A", QuestionKind::Simple), (0, 1));
    assert_eq!(points("A", "", QuestionKind::Simple), (0, 1));
    assert_eq!(points("A", "AB", QuestionKind::Simple), (0, 1));
}

#[test]
fn simple_empty_correct_answer_is_unscorable() {
    assert_eq!(points("", "A", QuestionKind::Simple), (0, 0));
    assert_eq!(points("   ", "A", QuestionKind::Simple), (0, 0));
}

#[test]
fn matching_concrete_cases() {
    assert_eq!(points("A1B2", "A1B2", QuestionKind::Matching), (2, 2));
    assert_eq!(points("A1B2", "A1B3", QuestionKind::Matching), (1, 2));
    assert_eq!(points("A1B2", "A3B4", QuestionKind::Matching), (0, 2));
    // A single correct pair still carries max_points 2.
    assert_eq!(points("A1", "A1", QuestionKind::Matching), (1, 2));
    assert_eq!(points("A1", "B1", QuestionKind::Matching), (0, 2));
}

#[test]
fn matching_three_pair_table() {
    assert_eq!(points("A1B2C3", "A1B2C3", QuestionKind::Matching), (2, 2));
    assert_eq!(points("A1B2C3", "A1B2C4", QuestionKind::Matching), (1, 2));
    assert_eq!(points("A1B2C3", "A1B4C5", QuestionKind::Matching), (0, 2));
    assert_eq!(points("A1B2C3", "", QuestionKind::Matching), (0, 2));
}

#[test]
fn matching_is_symmetric_in_pair_order() {
    assert_eq!(
        points("A1B2", "B2A1", QuestionKind::Matching),
        points("A1B2", "A1B2", QuestionKind::Matching)
    );
}

#[test]
fn matching_ignores_extra_and_duplicate_user_pairs() {
    assert_eq!(points("A1B2", "A1A1B2", QuestionKind::Matching), (2, 2));
    assert_eq!(points("A1B2", "A1B2C9", QuestionKind::Matching), (2, 2));
}

#[test]
fn matching_four_or_more_pairs_follow_the_three_pair_pattern() {
    assert_eq!(points("A1B2C3D4", "A1B2C3D4", QuestionKind::Matching), (2, 2));
    assert_eq!(points("A1B2C3D4", "A1B2C3D5", QuestionKind::Matching), (1, 2));
    assert_eq!(points("A1B2C3D4", "A1B2C5D6", QuestionKind::Matching), (0, 2));
    assert_eq!(points("A1B2C3D4", "", QuestionKind::Matching), (0, 2));
    // Five pairs, one miss.
    assert_eq!(
        points("A1B2C3D4E5", "A1B2C3D4E9", QuestionKind::Matching),
        (1, 2)
    );
}

#[test]
fn matching_empty_correct_answer_is_unscorable() {
    assert_eq!(points("", "A1", QuestionKind::Matching), (0, 0));
}

#[test]
fn multiple_choice_table_total_one() {
    assert_eq!(points("A", "A", QuestionKind::Multiple), (2, 2));
    assert_eq!(points("A", "A,B", QuestionKind::Multiple), (1, 2));
    assert_eq!(points("A", "A,B,C", QuestionKind::Multiple), (0, 2));
    assert_eq!(points("A", "B", QuestionKind::Multiple), (0, 2));
    assert_eq!(points("A", "", QuestionKind::Multiple), (0, 2));
    // Two wrong selections still earn the over-selection point.
    assert_eq!(points("A", "B,C", QuestionKind::Multiple), (1, 2));
}

#[test]
fn multiple_choice_table_total_two() {
    assert_eq!(points("A,B", "A,B", QuestionKind::Multiple), (2, 2));
    assert_eq!(points("A,B", "A,C", QuestionKind::Multiple), (1, 2));
    assert_eq!(points("A,B", "A,B,C", QuestionKind::Multiple), (1, 2));
    assert_eq!(points("A,B", "C,D", QuestionKind::Multiple), (0, 2));
    assert_eq!(points("A,B", "C,D,E", QuestionKind::Multiple), (1, 2));
    assert_eq!(points("A,B", "", QuestionKind::Multiple), (0, 2));
}

#[test]
fn multiple_choice_table_total_three() {
    assert_eq!(points("A,B,C", "A,B,C", QuestionKind::Multiple), (2, 2));
    assert_eq!(points("A,B,C", "A,B,D", QuestionKind::Multiple), (1, 2));
    assert_eq!(points("A,B,C", "A,D,E", QuestionKind::Multiple), (0, 2));
}

#[test]
fn multiple_choice_four_or_more_answers_follow_the_three_answer_pattern() {
    assert_eq!(points("A,B,C,D", "A,B,C,D", QuestionKind::Multiple), (2, 2));
    assert_eq!(points("A,B,C,D", "A,B,C,E", QuestionKind::Multiple), (1, 2));
    assert_eq!(points("A,B,C,D", "A,B,E,F", QuestionKind::Multiple), (0, 2));
    assert_eq!(points("A,B,C,D", "", QuestionKind::Multiple), (0, 2));
    // Five correct answers on a six-option question, one miss.
    assert_eq!(
        points("A,B,C,D,E", "A,B,C,D,F", QuestionKind::Multiple),
        (1, 2)
    );
}

#[test]
fn multiple_empty_correct_answer_is_unscorable() {
    assert_eq!(points("", "A", QuestionKind::Multiple), (0, 0));
    assert_eq!(points(" , ", "A", QuestionKind::Multiple), (0, 0));
}

#[test]
fn max_points_derivation() {
    assert_eq!(ScoringService::max_points("A", QuestionKind::Simple), 1);
    assert_eq!(ScoringService::max_points("", QuestionKind::Simple), 0);
    assert_eq!(ScoringService::max_points("A1B2", QuestionKind::Matching), 2);
    assert_eq!(ScoringService::max_points("", QuestionKind::Matching), 0);
    assert_eq!(ScoringService::max_points("A,B", QuestionKind::Multiple), 2);
    assert_eq!(ScoringService::max_points("", QuestionKind::Multiple), 0);
}

#[test]
fn parse_matching_round_trips() {
    assert_eq!(parse_matching("A1B2C3"), vec!["A1", "B2", "C3"]);
    assert_eq!(parse_matching(""), Vec::<String>::new());
    assert_eq!(parse_matching("a1b2"), vec!["A1", "B2"]);
    assert_eq!(parse_matching("A1B"), vec!["A1"]);
}

#[test]
fn parse_multiple_preserves_order_without_dedupe() {
    assert_eq!(parse_multiple("b, a ,b"), vec!["B", "A", "B"]);
    assert_eq!(parse_multiple("   "), Vec::<String>::new());
}

#[test]
fn parse_simple_normalizes() {
    assert_eq!(parse_simple(" a "), "A");
    assert_eq!(parse_simple(""), "");
}

#[test]
fn question_type_by_position_in_structured_exam() {
    for position in [1, 15, 16, 25, 26, 30] {
        assert_eq!(derive_question_type(position, 40), QuestionKind::Simple);
    }
    for position in [31, 35] {
        assert_eq!(derive_question_type(position, 40), QuestionKind::Matching);
    }
    for position in [36, 40] {
        assert_eq!(derive_question_type(position, 40), QuestionKind::Multiple);
    }
}

#[test]
fn question_type_defaults_to_simple_for_other_exam_sizes() {
    assert_eq!(derive_question_type(33, 38), QuestionKind::Simple);
    assert_eq!(derive_question_type(40, 20), QuestionKind::Simple);
    assert_eq!(derive_question_type(1, 1), QuestionKind::Simple);
}
