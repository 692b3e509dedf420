//! 路由与处理函数

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::api::error::ApiError;
use crate::api::types::{BaseResponse, TextRequest, TextResponse};
use crate::api::AppState;
use crate::service::{normalize_batch, pinyin_batch};

/// 创建路由
///
/// 业务接口挂载在 `{api_prefix}/text2pinyin` 下，健康检查固定为 `/health`
pub fn create_router(state: AppState) -> Router {
    let base = format!("{}/text2pinyin", state.config.server.normalized_prefix());
    tracing::info!("接口前缀: {}", base);

    Router::new()
        .route(&format!("{}/text-normalize", base), post(text_normalize))
        .route(&format!("{}/text-to-pinyin", base), post(text_to_pinyin))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 文本规范化
async fn text_normalize(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<BaseResponse<TextResponse>, ApiError> {
    let Json(request) = payload?;
    let batch = request.into_batch();
    tracing::debug!("文本规范化请求，共 {} 句", batch.len());

    let normalizer = state.frontend.normalizer.clone();
    let output = tokio::task::spawn_blocking(move || normalize_batch(normalizer.as_ref(), batch))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("规范化任务异常: {}", e)))??;

    Ok(BaseResponse::success(output.into()))
}

/// 文本转拼音
async fn text_to_pinyin(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<BaseResponse<TextResponse>, ApiError> {
    let Json(request) = payload?;
    let batch = request.into_batch();
    tracing::debug!("文本转拼音请求，共 {} 句", batch.len());

    let g2p = state.frontend.g2p.clone();
    let output = tokio::task::spawn_blocking(move || pinyin_batch(g2p.as_ref(), batch))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("拼音任务异常: {}", e)))?;

    Ok(BaseResponse::success(output.into()))
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

/// 健康检查
async fn health_check() -> BaseResponse<HealthStatus> {
    BaseResponse::success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
