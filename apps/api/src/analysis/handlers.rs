//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::report::{analyze_resume, AnalysisReport};
use crate::errors::AppError;
use crate::ingest::extract::extract_resume_text;
use crate::models::role::{RoleCatalog, RoleDescription};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RoleInput {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub candidate_name: Option<String>,
    /// Replaces the loaded catalog for this call. Order decides ties.
    #[serde(default)]
    pub roles: Option<Vec<RoleInput>>,
}

#[derive(Debug, Serialize)]
pub struct RoleListResponse {
    pub roles: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
///
/// Lists loaded role names in file order.
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RoleListResponse> {
    Json(RoleListResponse {
        roles: state.roles.names().into_iter().map(String::from).collect(),
    })
}

/// GET /api/v1/roles/:name
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RoleDescription>, AppError> {
    state
        .roles
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Role '{name}' not found")))
}

/// POST /api/v1/analysis
///
/// Scores raw resume text against the loaded roles, or against `roles` when
/// the request supplies its own.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let request_roles = request
        .roles
        .map(|inputs| catalog_from_inputs(inputs, &state.normalizer))
        .transpose()?;
    let roles = request_roles.as_ref().unwrap_or(state.roles.as_ref());

    let report = analyze_resume(
        &request.resume_text,
        request.candidate_name,
        roles,
        &state.normalizer,
        state.scorer.as_ref(),
    )?;

    Ok(Json(report))
}

/// POST /api/v1/analysis/upload
///
/// Multipart form: `resume` file (.pdf, .docx, .txt or .md) and optional `candidate_name`.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut resume: Option<(String, bytes::Bytes)> = None;
    let mut candidate_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                resume = Some((file_name, data));
            }
            Some("candidate_name") => {
                candidate_name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?,
                );
            }
            _ => {}
        }
    }

    let (file_name, data) =
        resume.ok_or_else(|| AppError::Validation("missing 'resume' file field".to_string()))?;
    tracing::info!(file_name = %file_name, bytes = data.len(), "Received resume upload");

    let text = tokio::task::spawn_blocking(move || extract_resume_text(&file_name, &data))
        .await
        .map_err(|e| anyhow::anyhow!("resume extraction task failed: {e}"))??;

    let report = analyze_resume(
        &text,
        candidate_name,
        &state.roles,
        &state.normalizer,
        state.scorer.as_ref(),
    )?;

    Ok(Json(report))
}

fn catalog_from_inputs(
    inputs: Vec<RoleInput>,
    normalizer: &TextNormalizer,
) -> Result<RoleCatalog, AppError> {
    let mut catalog = RoleCatalog::new();
    for input in inputs {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("role name cannot be empty".to_string()));
        }
        catalog.insert(RoleDescription::new(name, input.text, normalizer));
    }
    Ok(catalog)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::normalizer::TextNormalizer;
    use crate::analysis::scoring::{scorer_for, ScorerBackend};
    use crate::config::Config;
    use crate::ingest::extract::{sample_docx, SAMPLE_PDF};
    use crate::ingest::job_descriptions::parse_job_descriptions;
    use crate::routes::build_router;
    use crate::state::AppState;

    const JOBS: &str = "\
===== Data Scientist =====
Python, machine learning and statistics.

===== Sales Manager =====
Negotiation, client relationships, revenue.
";

    fn app() -> Router {
        let normalizer = TextNormalizer::default();
        let roles = parse_job_descriptions(JOBS, &normalizer).unwrap();
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            job_descriptions_path: "job_description.txt".into(),
            stopwords_path: None,
            scorer: ScorerBackend::Pairwise,
            max_upload_bytes: 1024 * 1024,
        };
        build_router(AppState {
            scorer: scorer_for(config.scorer),
            config,
            roles: Arc::new(roles),
            normalizer,
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(file_name: &str, content: &[u8]) -> Request<Body> {
        let boundary = "rolematch-test-boundary";
        let mut body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"candidate_name\"\r\n\r\n\
             Ada\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::post("/api/v1/analysis/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_roles_in_file_order() {
        let (status, body) =
            send(Request::get("/api/v1/roles").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["roles"], json!(["Data Scientist", "Sales Manager"]));
    }

    #[tokio::test]
    async fn test_get_role_and_missing_role() {
        let (status, body) = send(
            Request::get("/api/v1/roles/Data%20Scientist")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cleaned_text"], "python machine learning statistics");

        let (status, body) =
            send(Request::get("/api/v1/roles/Chef").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_analyze_picks_data_scientist() {
        let (status, body) = send(post_json(
            "/api/v1/analysis",
            json!({
                "resume_text": "Python developer with machine learning experience",
                "candidate_name": "Ada"
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["best_match"]["role"], "Data Scientist");
        assert_eq!(body["result"]["best_match"]["normalized_score"], 100);
        assert_eq!(body["ranking"][0]["role"], "Data Scientist");
        assert_eq!(body["scorer_backend"], "pairwise");
        assert_eq!(body["candidate_name"], "Ada");
        assert_eq!(body["feedback"]["tier"], "excellent");
    }

    #[tokio::test]
    async fn test_analyze_with_request_roles() {
        let (status, body) = send(post_json(
            "/api/v1/analysis",
            json!({
                "resume_text": "rust tokio axum",
                "roles": [
                    {"name": "Chef", "text": "cooking kitchen"},
                    {"name": "Rust Engineer", "text": "Rust, Tokio and Axum"}
                ]
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["scores"][1]["raw_score"], 100);
        assert_eq!(body["result"]["best_match"]["role"], "Rust Engineer");
    }

    #[tokio::test]
    async fn test_analyze_blank_resume_is_400() {
        let (status, body) =
            send(post_json("/api/v1/analysis", json!({"resume_text": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_stopword_resume_is_422() {
        let (status, body) = send(post_json(
            "/api/v1/analysis",
            json!({"resume_text": "the and of 2024"}),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "ANALYSIS_FAILED");
    }

    #[tokio::test]
    async fn test_analyze_empty_role_list_is_422() {
        let (status, _) = send(post_json(
            "/api/v1/analysis",
            json!({"resume_text": "python", "roles": []}),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_text_resume() {
        let (status, body) = send(multipart_request(
            "resume.txt",
            b"Python developer with machine learning experience",
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidate_name"], "Ada");
        assert_eq!(body["result"]["best_match"]["role"], "Data Scientist");
    }

    #[tokio::test]
    async fn test_upload_pdf_resume() {
        let (status, body) = send(multipart_request("resume.pdf", SAMPLE_PDF)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["best_match"]["role"], "Data Scientist");
        assert_eq!(body["result"]["scores"][1]["raw_score"], 0);
    }

    #[tokio::test]
    async fn test_upload_docx_resume() {
        let docx = sample_docx(&["Ada Lovelace", "Python developer, machine learning"]);
        let (status, body) = send(multipart_request("resume.docx", &docx)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["best_match"]["role"], "Data Scientist");
    }

    #[tokio::test]
    async fn test_upload_unknown_format_is_415() {
        let (status, body) = send(multipart_request("resume.rtf", b"{\\rtf1 binary}")).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }
}
