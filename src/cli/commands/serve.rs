//! HTTP API server for frontend integration.
//!
//! Provides REST endpoints for quiz generation and answer verification.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::pipeline::QuizPipeline;
use crate::quiz::{verifier, Quiz, QuizQuestion, UserAnswers, VerificationResult};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    pipeline: QuizPipeline,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    preflight::check(preflight::Operation::Serve)?;

    let pipeline = QuizPipeline::new(settings)?;
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/quiz", post(generate_quiz))
        .route("/verify", post(verify_answers))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Quizzle API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Generate Quiz", "POST /quiz");
    Output::kv("Verify Answers", "POST /verify");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct QuizRequest {
    /// YouTube URL/ID or local file path
    input: String,
    /// Defaults to the configured target language when absent
    #[serde(default)]
    target_lang: Option<String>,
    /// Defaults to the configured difficulty when absent
    #[serde(default)]
    difficulty: Option<String>,
}

#[derive(Serialize)]
struct QuizResponse {
    media_id: String,
    title: String,
    transcript: String,
    detected_language: String,
    summary: String,
    quiz: Quiz,
}

#[derive(Deserialize)]
struct VerifyRequest {
    questions: Vec<QuizQuestion>,
    /// Question index (as a string key, JSON object keys are strings) to
    /// chosen option index. Keys that don't parse as integers are skipped.
    user_answers: std::collections::HashMap<String, usize>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuizRequest>,
) -> impl IntoResponse {
    let settings = state.pipeline.settings();
    let target_lang = req
        .target_lang
        .as_deref()
        .unwrap_or(&settings.translation.target_lang);
    let difficulty = req
        .difficulty
        .as_deref()
        .unwrap_or(&settings.quiz.difficulty);

    match state.pipeline.run(&req.input, target_lang, difficulty).await {
        Ok(result) => Json(QuizResponse {
            media_id: result.media_id,
            title: result.title,
            transcript: result.transcript,
            detected_language: result.detected_language,
            summary: result.summary,
            quiz: result.quiz,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn verify_answers(Json(req): Json<VerifyRequest>) -> Json<VerificationResult> {
    // Client-supplied questions aren't parser-validated, so guard the
    // correct_answer index here before the verifier dereferences it.
    let questions: Vec<QuizQuestion> = req
        .questions
        .into_iter()
        .filter(|q| q.correct_answer < q.options.len())
        .collect();
    let quiz = Quiz::from_questions(questions);

    let answers: UserAnswers = req
        .user_answers
        .into_iter()
        .filter_map(|(k, v)| k.trim().parse::<usize>().ok().map(|i| (i, v)))
        .collect();

    Json(verifier::verify(&quiz, &answers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_request_falls_back_to_configured_defaults() {
        let req: QuizRequest = serde_json::from_str(r#"{"input":"dQw4w9WgXcQ"}"#).unwrap();
        assert_eq!(req.target_lang, None);
        assert_eq!(req.difficulty, None);

        let mut settings = Settings::default();
        settings.translation.target_lang = "hi".to_string();
        settings.quiz.difficulty = "hard".to_string();

        // Same resolution the handler applies
        assert_eq!(
            req.target_lang
                .as_deref()
                .unwrap_or(&settings.translation.target_lang),
            "hi"
        );
        assert_eq!(
            req.difficulty.as_deref().unwrap_or(&settings.quiz.difficulty),
            "hard"
        );
    }

    #[test]
    fn test_quiz_request_explicit_fields_win() {
        let req: QuizRequest = serde_json::from_str(
            r#"{"input":"dQw4w9WgXcQ","target_lang":"fr","difficulty":"basic"}"#,
        )
        .unwrap();

        let settings = Settings::default();
        assert_eq!(
            req.target_lang
                .as_deref()
                .unwrap_or(&settings.translation.target_lang),
            "fr"
        );
        assert_eq!(
            req.difficulty.as_deref().unwrap_or(&settings.quiz.difficulty),
            "basic"
        );
    }

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: "Q".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: correct,
            explanation: None,
        }
    }

    #[tokio::test]
    async fn test_verify_skips_invalid_keys() {
        let mut user_answers = std::collections::HashMap::new();
        user_answers.insert("0".to_string(), 0usize);
        user_answers.insert("abc".to_string(), 1usize);

        let req = VerifyRequest {
            questions: vec![question(0), question(1)],
            user_answers,
        };

        let Json(result) = verify_answers(Json(req)).await;
        assert_eq!(result.total, 2);
        assert_eq!(result.score, 1);
        assert!(result.details[1].user_answer.is_none());
    }

    #[tokio::test]
    async fn test_verify_drops_out_of_range_correct_answer() {
        let req = VerifyRequest {
            questions: vec![question(0), question(5)],
            user_answers: std::collections::HashMap::new(),
        };

        let Json(result) = verify_answers(Json(req)).await;
        assert_eq!(result.total, 1);
    }
}
