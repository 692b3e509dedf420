//! 句子批处理与中文字符提取

use regex::Regex;

lazy_static::lazy_static! {
    /// CJK 统一表意文字（U+4E00 - U+9FFF）连续片段
    static ref CHINESE_RUN: Regex = Regex::new(r"[\u{4e00}-\u{9fff}]+").unwrap();
}

/// 获取字符串中文部分
///
/// 拼接所有中文连续片段，丢弃标点、数字、字母等其它字符
pub fn extract_chinese(text: &str) -> String {
    CHINESE_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .collect()
}

/// 已清洗的句子列表
///
/// 每个元素均已去除首尾空白且非空，保持原始顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceBatch(Vec<String>);

impl SentenceBatch {
    /// 从单个句子构建（等价于单元素列表）
    pub fn from_single(sentence: &str) -> Self {
        Self::from_many(std::iter::once(sentence))
    }

    /// 从句子序列构建：逐个 trim，丢弃空句
    pub fn from_many<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sentences = sentences
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self(sentences)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
