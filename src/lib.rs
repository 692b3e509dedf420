pub mod api;
pub mod config;
pub mod frontend;
pub mod g2p;
pub mod service;
pub mod text;
pub mod tn;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

pub use api::{create_router, AppState};
use config::AppConfig;
use frontend::Frontend;

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// 初始化日志：先用 RUST_LOG（默认 info）启动，配置加载后再切换级别
///
/// 已初始化过（如测试中）时返回 None
fn init_tracing() -> Option<FilterHandle> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .ok()?;
    Some(handle)
}

/// 配置中的日志级别；设置了 RUST_LOG 时以环境变量为准，返回 None
fn configured_filter(rust_log_set: bool, log_level: &str) -> Option<EnvFilter> {
    if rust_log_set {
        return None;
    }
    Some(EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")))
}

fn apply_log_level(handle: Option<&FilterHandle>, log_level: &str) {
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    let (Some(handle), Some(filter)) = (handle, configured_filter(rust_log_set, log_level)) else {
        return;
    };
    if let Err(e) = handle.reload(filter) {
        tracing::warn!("切换日志级别失败: {}", e);
    }
}

/// 等待退出信号（Ctrl+C 或 SIGTERM）
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("监听 Ctrl+C 失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("监听 SIGTERM 失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("收到 Ctrl+C，开始退出"),
        _ = terminate => tracing::info!("收到 SIGTERM，开始退出"),
    }
}

/// 启动 HTTP 服务
pub async fn run() -> Result<()> {
    // 先初始化日志，配置加载过程中的输出才不会丢失
    let tracing_handle = init_tracing();
    let config = AppConfig::load()?;
    apply_log_level(tracing_handle.as_ref(), &config.log_level);
    tracing::info!("Text2Pinyin 服务 v{} 启动中", env!("CARGO_PKG_VERSION"));

    // 前端组件只构建一次，所有请求共享
    let frontend = Frontend::from_config(&config)?;
    let addr = config.server.bind_addr();
    let state = AppState::new(config, frontend);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {}", addr))?;
    tracing::info!("监听地址: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("服务已退出");
    Ok(())
}
