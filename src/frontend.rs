//! 前端组件接口
//!
//! 文本规范化与字音转换均通过 trait 注入，进程启动时构建一次，
//! 之后以只读共享句柄的形式在所有请求间复用

use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::g2p::G2pModel;
use crate::tn::TextNormalizer;

/// 文本规范化：将数字、日期、单位等转为口语书面形式
pub trait TextNormalize: Send + Sync {
    /// 规范化单个句子，返回按子句切分后的结果
    fn normalize(&self, sentence: &str) -> Result<Vec<String>>;
}

/// 字音转换（grapheme-to-pinyin）
pub trait GraphemeToPinyin: Send + Sync {
    /// 将纯中文字符串转换为若干候选读音序列，第一个为首选结果
    fn convert(&self, text: &str) -> Result<Vec<Vec<String>>>;
}

/// 前端组件集合
#[derive(Clone)]
pub struct Frontend {
    pub normalizer: Arc<dyn TextNormalize>,
    pub g2p: Arc<dyn GraphemeToPinyin>,
}

impl Frontend {
    pub fn new(normalizer: Arc<dyn TextNormalize>, g2p: Arc<dyn GraphemeToPinyin>) -> Self {
        Self { normalizer, g2p }
    }

    /// 使用内置规则规范化器与拼音模型构建
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let normalizer = TextNormalizer::new()?;
        let g2p = G2pModel::new(&config.g2p);
        tracing::info!("前端组件已初始化");
        Ok(Self::new(Arc::new(normalizer), Arc::new(g2p)))
    }
}
