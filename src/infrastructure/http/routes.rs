//! HTTP Routes
//!
//! API Endpoints:
//! - /                              GET     服务信息
//! - /api/v1/generate-script        POST    生成讲解脚本（含每块音频）
//! - /api/v1/generate-audio         POST    合成单段文本
//! - /api/v1/audio/:audio_id        GET     读取已登记音频
//! - /api/v1/cache/stats            GET     缓存统计
//! - /api/v1/cache                  DELETE  清空缓存
//! - /api/v1/health                 GET     健康检查
//! - /api/v1/available-providers    GET     可用提供方
//! - /api/v1/file-content           GET     读取源文件
//! - /api/v1/system-check           GET     完整系统检查
//! - /api/v1/system-check/quick     GET     快速系统检查

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/v1", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-script", post(handlers::generate_script))
        .route("/generate-audio", post(handlers::generate_audio))
        .route("/audio/:audio_id", get(handlers::get_audio))
        .route("/cache", delete(handlers::clear_cache))
        .route("/cache/stats", get(handlers::cache_stats))
        .route("/health", get(handlers::health))
        .route("/available-providers", get(handlers::available_providers))
        .route("/file-content", get(handlers::file_content))
        .route("/system-check", get(handlers::system_check))
        .route("/system-check/quick", get(handlers::quick_system_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::application::services::fakes::{FakeAnswerGenerator, FakeSynthesizer, MemoryCache};
    use crate::application::{AnswerGeneratorPort, SpeechSynthesizerPort};
    use crate::domain::{AnswerProviderId, SpeechProviderId};
    use crate::infrastructure::memory::InMemoryAudioRegistry;

    const SCRIPT: &str = r#"Sure! [{"type":"text","markdown":"Hello"},{"type":"code","file":"/r/a.rs","markdown":"Look","relevant_lines":[{"line":3}]}]"#;

    async fn app(with_tts: bool) -> Router {
        let generators: Vec<Arc<dyn AnswerGeneratorPort>> = vec![
            FakeAnswerGenerator::unavailable(AnswerProviderId::ClaudeCode) as Arc<dyn AnswerGeneratorPort>,
            FakeAnswerGenerator::ok(AnswerProviderId::OpenAi, SCRIPT) as Arc<dyn AnswerGeneratorPort>,
        ];
        let synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>> = if with_tts {
            vec![FakeSynthesizer::new(SpeechProviderId::ElevenLabs, true) as Arc<dyn SpeechSynthesizerPort>]
        } else {
            Vec::new()
        };

        let state = AppState::new(
            generators,
            synthesizers,
            Arc::new(MemoryCache::default()),
            Arc::new(InMemoryAudioRegistry::default()),
        )
        .await;

        create_routes().with_state(Arc::new(state))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_and_root() {
        let app = app(true).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "healthy");

        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        let root = json(&body);
        assert_eq!(root["name"], "docc");
        assert_eq!(root["status"], "running");
        assert_eq!(root["providers"]["ai_providers"][0]["id"], "openai");
    }

    #[tokio::test]
    async fn test_generate_audio_then_fetch_it() {
        let app = app(true).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/generate-audio",
            Some(serde_json::json!({"text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let created = json(&body);
        assert_eq!(created["cache_hit"], false);

        let url = created["audio_url"].as_str().unwrap().to_string();
        assert!(url.starts_with("/api/v1/audio/"));

        let (status, body) = send(&app, Method::GET, &url, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"elevenlabs:hello".to_vec());

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/generate-audio",
            Some(serde_json::json!({"text": "hello"})),
        )
        .await;
        assert_eq!(json(&body)["cache_hit"], true);
    }

    #[tokio::test]
    async fn test_unknown_audio_is_404_envelope() {
        let app = app(true).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/audio/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let err = json(&body);
        assert_eq!(err["errno"], 404);
        assert!(err["error"].is_string());
    }

    #[tokio::test]
    async fn test_empty_text_is_400() {
        let app = app(true).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/generate-audio",
            Some(serde_json::json!({"text": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_audio_without_synthesizer_is_503() {
        let app = app(false).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/generate-audio",
            Some(serde_json::json!({"text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_generate_script_registers_audio_per_block() {
        let app = app(true).await;
        let repo = tempfile::tempdir().unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/generate-script",
            Some(serde_json::json!({
                "repository_path": repo.path().to_string_lossy(),
                "question": "What does it do?"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response = json(&body);
        assert_eq!(response["script"].as_array().unwrap().len(), 2);
        assert_eq!(response["script"][1]["type"], "code");

        let audio_files = response["audio_files"].as_array().unwrap();
        assert_eq!(audio_files.len(), 2);

        let (status, body) = send(&app, Method::GET, audio_files[1].as_str().unwrap(), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"elevenlabs:Look".to_vec());
    }

    #[tokio::test]
    async fn test_generate_script_without_tts_has_null_audio_files() {
        let app = app(false).await;
        let repo = tempfile::tempdir().unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/generate-script",
            Some(serde_json::json!({
                "repository_path": repo.path().to_string_lossy(),
                "question": "Why?"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json(&body)["audio_files"].is_null());
    }

    #[tokio::test]
    async fn test_cache_stats_and_clear() {
        let app = app(true).await;
        send(
            &app,
            Method::POST,
            "/api/v1/generate-audio",
            Some(serde_json::json!({"text": "abc"})),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/v1/cache/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["cached_files_count"], 1);

        let (status, body) = send(&app, Method::DELETE, "/api/v1/cache", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["message"], "Cache cleared successfully");

        let (_, body) = send(&app, Method::GET, "/api/v1/cache/stats", None).await;
        assert_eq!(json(&body)["cached_files_count"], 0);
        assert_eq!(json(&body)["cache_size_bytes"], 0);
    }

    #[tokio::test]
    async fn test_system_check_and_providers() {
        let app = app(true).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/system-check/quick", None).await;
        assert_eq!(status, StatusCode::OK);
        let check = json(&body);
        assert_eq!(check["has_ai_cli"], false);
        assert_eq!(check["has_tts"], true);

        let (status, body) = send(&app, Method::GET, "/api/v1/available-providers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["tts_providers"][0]["id"], "elevenlabs");
    }

    #[tokio::test]
    async fn test_full_system_check_reports_services() {
        let app = app(true).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/system-check", None).await;
        assert_eq!(status, StatusCode::OK);

        let check = json(&body);
        assert_eq!(check["system_ready"], false);
        assert_eq!(check["requirements_met"]["ai_cli"], false);
        assert_eq!(check["requirements_met"]["tts_service"], true);
        assert_eq!(check["services"]["claude_code"]["installed"], false);
        assert_eq!(check["services"]["claude_code"]["error"], "Claude Code not found in PATH");
        assert!(check["services"]["claude_code"]["version"].is_null());
        assert_eq!(check["services"]["elevenlabs"]["accessible"], true);
        assert_eq!(check["services"]["openai_tts"]["api_key_set"], false);
        assert_eq!(
            check["recommendations"][0],
            "Install either Claude Code (recommended) or OpenCode CLI tool"
        );
    }

    #[tokio::test]
    async fn test_file_content_with_range() {
        let app = app(true).await;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib.rs");
        std::fs::write(&file, "one\ntwo\nthree\nfour\n").unwrap();

        let uri = format!(
            "/api/v1/file-content?file_path={}&from_line=2&to_line=3",
            file.to_string_lossy()
        );
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let content = json(&body);
        assert_eq!(content["total_lines"], 4);
        assert_eq!(content["content"], "two\nthree\n");

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/v1/file-content?file_path=relative.rs",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
