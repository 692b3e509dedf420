//! HTTP 接口层
//!
//! - types: 请求/响应结构与统一响应信封
//! - error: 错误到 HTTP 响应的映射
//! - routes: 路由与处理函数

mod error;
mod routes;
mod types;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::frontend::Frontend;

pub use error::ApiError;
pub use routes::create_router;
pub use types::{BaseResponse, SentenceInput, TextRequest, TextResponse};

/// 所有处理函数共享的状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub frontend: Frontend,
}

impl AppState {
    pub fn new(config: AppConfig, frontend: Frontend) -> Self {
        Self {
            config: Arc::new(config),
            frontend,
        }
    }
}
