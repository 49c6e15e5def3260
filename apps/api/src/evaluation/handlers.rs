//! Axum route handlers for the Evaluation API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::pdf::{extract_text_from_pdf, has_pdf_extension};
use crate::models::evaluation::{EvaluationRequest, EvaluationResult};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// POST /evaluate
///
/// Multipart form: `resume` (PDF file) + `job_description` (text).
/// Extracts the résumé text and returns the full fit evaluation.
pub async fn handle_evaluate_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluationResult>, AppError> {
    let mut resume: Option<(String, Vec<u8>)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume = Some((filename, bytes.to_vec()));
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        resume.ok_or_else(|| AppError::Validation("A resume PDF file is required".to_string()))?;
    if !has_pdf_extension(&filename) {
        return Err(AppError::Validation(
            "Uploaded file is not a valid PDF".to_string(),
        ));
    }

    let job_description = require_job_description(job_description.unwrap_or_default())?;

    let resume_text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))??;

    info!(
        "Evaluating uploaded resume '{filename}' ({} chars)",
        resume_text.len()
    );

    let result = run_evaluation(&state, resume_text, job_description).await?;
    Ok(Json(result))
}

/// POST /api/v1/evaluate
///
/// JSON variant for callers that already hold the résumé as text.
pub async fn handle_evaluate_text(
    State(state): State<AppState>,
    Json(request): Json<EvaluationRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let job_description = require_job_description(request.job_description_text)?;
    let result = run_evaluation(&state, request.resume_text, job_description).await?;
    Ok(Json(result))
}

fn require_job_description(text: String) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }
    Ok(text)
}

/// Runs the synchronous pipeline off the async executor.
async fn run_evaluation(
    state: &AppState,
    resume_text: String,
    job_description: String,
) -> Result<EvaluationResult, AppError> {
    let pipeline = Arc::clone(&state.pipeline);
    let result = tokio::task::spawn_blocking(move || {
        pipeline.evaluate(&resume_text, &job_description)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Evaluation task failed: {e}")))??;
    Ok(result)
}
