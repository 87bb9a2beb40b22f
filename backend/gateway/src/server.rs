//! Main HTTP server: router construction and request handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use uuid::Uuid;

use inkmath_analysis::{fallback_record, Analyzer};
use inkmath_core::{AnalysisRequest, ApiResponse, QuizItem, QuizRequest, ResponseStatus};
use inkmath_media::parse_data_url;

use crate::auth::RequireAuth;

/// Application state shared across routes.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub auth_token: String,
    pub env: String,
    pub model_name: String,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/calculate", post(calculate))
        .route("/quiz", post(quiz))
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn start_server(addr: SocketAddr, app: Router) -> Result<()> {
    info!("inkmath HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Server is running" }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.model_name,
        "env": state.env,
    }))
}

async fn calculate(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Json(body): Json<AnalysisRequest>,
) -> Json<ApiResponse> {
    let request_id = Uuid::new_v4();

    let image = match parse_data_url(&body.image) {
        Ok(image) => image,
        Err(e) => {
            warn!(%request_id, error = %e, "Rejecting undecodable image payload");
            return Json(ApiResponse::error(
                "Error processing image",
                Some(e.to_string()),
            ));
        }
    };

    info!(
        %request_id,
        mime = image.mime_type,
        vars = body.dict_of_vars.len(),
        "Analyzing image"
    );

    match state.analyzer.analyze(&image, &body.dict_of_vars).await {
        Ok(data) => Json(ApiResponse::success("Image processed", data)),
        Err(e) => {
            error!(%request_id, error = %e, "Analysis failed upstream");
            Json(ApiResponse {
                message: "Error processing image".to_string(),
                status: ResponseStatus::Error,
                data: vec![fallback_record()],
                error: Some(e.to_string()),
            })
        }
    }
}

async fn quiz(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Json(body): Json<QuizRequest>,
) -> Json<Vec<QuizItem>> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        topic = %body.topic,
        count = body.number_of_questions,
        "Generating quiz"
    );
    Json(state.analyzer.generate_quiz(&body).await)
}
