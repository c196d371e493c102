//! System Handlers
//!
//! 健康检查、系统检查与根信息

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ListProviders, QuickSystemCheck, SystemCheck};
use crate::infrastructure::http::dto::{
    HealthResponse, ProvidersResponse, QuickSystemCheckDto, RootResponse, SystemCheckDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// 完整检查：CLI 版本与 TTS 服务连通性
pub async fn system_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SystemCheckDto>, ApiError> {
    let result = state.system_check_handler.handle(SystemCheck).await?;
    Ok(Json(result.into()))
}

/// 只做本地探测，不调用远程 API
pub async fn quick_system_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QuickSystemCheckDto>, ApiError> {
    let result = state.quick_check_handler.handle(QuickSystemCheck).await?;

    Ok(Json(QuickSystemCheckDto {
        system_ready: result.system_ready,
        has_ai_cli: result.has_ai_cli,
        has_tts: result.has_tts,
    }))
}

pub async fn root(State(state): State<Arc<AppState>>) -> Result<Json<RootResponse>, ApiError> {
    let providers = state.list_providers_handler.handle(ListProviders).await?;

    Ok(Json(RootResponse {
        name: "docc",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        providers: ProvidersResponse {
            ai_providers: providers.ai_providers,
            tts_providers: providers.tts_providers,
        },
    }))
}
