//! 批处理逻辑
//!
//! 与 HTTP 层解耦：输入已清洗的句子列表，输出与之逐项对应的结果列表。
//! 句子之间严格顺序处理。

use anyhow::{Context, Result};

use crate::frontend::{GraphemeToPinyin, TextNormalize};
use crate::text::{extract_chinese, SentenceBatch};

/// 批处理结果：`sentences` 与 `result` 长度始终一致
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    pub sentences: Vec<String>,
    pub result: Vec<Vec<String>>,
}

/// 文本规范化
///
/// 任一句子规范化失败则整批失败（不做逐句隔离）
pub fn normalize_batch(normalizer: &dyn TextNormalize, batch: SentenceBatch) -> Result<BatchOutput> {
    if batch.is_empty() {
        return Ok(BatchOutput::default());
    }

    let result = batch
        .iter()
        .map(|sentence| {
            normalizer
                .normalize(sentence)
                .with_context(|| format!("规范化句子失败: {}", sentence))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(BatchOutput {
        sentences: batch.into_inner(),
        result,
    })
}

/// 文本转拼音
///
/// 逐句隔离失败：单句转换出错时记录日志并返回空结果，继续处理后续句子
pub fn pinyin_batch(g2p: &dyn GraphemeToPinyin, batch: SentenceBatch) -> BatchOutput {
    if batch.is_empty() {
        return BatchOutput::default();
    }

    let mut result = Vec::with_capacity(batch.len());
    for sentence in batch.iter() {
        // 去除非中文字符
        let chinese = extract_chinese(sentence);
        if chinese.trim().is_empty() {
            result.push(Vec::new());
            continue;
        }

        match g2p.convert(&chinese) {
            Ok(candidates) => result.push(candidates.into_iter().next().unwrap_or_default()),
            Err(e) => {
                tracing::warn!("句子转拼音失败 {}: {:#}", sentence, e);
                result.push(Vec::new());
            }
        }
    }

    BatchOutput {
        sentences: batch.into_inner(),
        result,
    }
}
