use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::exam_dto::{
    ExamDetailResponse, LanguageQuery, PublicContext, PublicQuestion, SaveAnswerRequest,
    SaveAnswerResponse, StartExamRequest, StartExamResponse, SubmitExamRequest,
    SubmitExamResponse,
};
use crate::error::{Error, Result};
use crate::models::question::Language;
use crate::utils::random::ThreadRngSource;
use crate::AppState;

fn resolve_language(query: &LanguageQuery) -> Result<Language> {
    match &query.lang {
        Some(raw) => raw.parse().map_err(Error::BadRequest),
        None => Ok(crate::config::get_config().default_language),
    }
}

#[axum::debug_handler]
pub async fn start_exam(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
    Json(req): Json<StartExamRequest>,
) -> Result<Response> {
    req.validate()?;
    let language = resolve_language(&query)?;

    let mut rng = ThreadRngSource;
    let started = state
        .exam_service
        .start_exam(&req.device_id, language, &mut rng)
        .await?;

    let response = StartExamResponse {
        exam_id: started.exam.id,
        device_id: started.exam.device_id,
        status: started.exam.status,
        started_at: started.exam.started_at,
        total_questions: started.exam.total_questions,
        max_possible_points: started.exam.max_possible_points,
        structured: started.structured,
        issues: started.issues,
        context: started.context_used.as_ref().map(PublicContext::from),
        questions: started
            .questions
            .iter()
            .enumerate()
            .map(|(idx, q)| PublicQuestion::from_question(q, idx as i32 + 1))
            .collect(),
    };
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn get_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
) -> Result<Response> {
    let (exam, rows) = state.exam_service.get_exam(exam_id).await?;
    Ok(Json(ExamDetailResponse::from_parts(&exam, &rows)).into_response())
}

#[axum::debug_handler]
pub async fn save_answer(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
    Json(req): Json<SaveAnswerRequest>,
) -> Result<Response> {
    req.validate()?;
    let timestamp = state
        .exam_service
        .save_answer(exam_id, req.order, &req.answer)
        .await?;
    Ok(Json(SaveAnswerResponse {
        saved: true,
        order: req.order,
        timestamp,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn submit_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
    Json(req): Json<SubmitExamRequest>,
) -> Result<Response> {
    for answer in &req.answers {
        answer.validate()?;
    }
    let answers: Vec<(i32, String)> = req
        .answers
        .into_iter()
        .map(|a| (a.order, a.answer))
        .collect();

    let submitted = state.exam_service.submit_exam(exam_id, &answers).await?;
    let exam = submitted.exam;
    let percentage = if exam.max_possible_points > 0 {
        exam.total_points as f64 / exam.max_possible_points as f64 * 100.0
    } else {
        0.0
    };

    Ok(Json(SubmitExamResponse {
        exam_id: exam.id,
        status: exam.status,
        total_points: exam.total_points,
        max_possible_points: exam.max_possible_points,
        percentage,
        completed_at: exam.completed_at,
        results: submitted.results.iter().map(Into::into).collect(),
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn abandon_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
) -> Result<Response> {
    let exam = state.exam_service.abandon_exam(exam_id).await?;
    Ok(Json(serde_json::json!({
        "exam_id": exam.id,
        "status": exam.status,
    }))
    .into_response())
}

#[axum::debug_handler]
pub async fn check_readiness(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<Response> {
    let language = resolve_language(&query)?;
    let report = state.readiness_service.check_readiness(language).await;
    Ok(Json(report).into_response())
}
