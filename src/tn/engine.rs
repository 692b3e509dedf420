//! 文本规范化主引擎
//!
//! 组合 Unicode 归一化、子句切分与规则链

use anyhow::Result;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::frontend::TextNormalize;
use crate::tn::rules::{SymbolTable, RULES};

lazy_static::lazy_static! {
    /// 子句切分点：标点（可带右引号）之后
    static ref SENTENCE_SPLITTER: Regex = Regex::new(r#"[：、，；。？！,;?!][”’"']?"#).unwrap();
}

/// 文本规范化器（可复用，规则预编译）
pub struct TextNormalizer {
    symbol_table: SymbolTable,
}

impl TextNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            symbol_table: SymbolTable::new()?,
        })
    }

    /// 规范化文本，返回逐子句结果
    pub fn normalize_text(&self, text: &str) -> Vec<String> {
        let cleaned = Self::unicode_normalize(text);
        if cleaned.is_empty() {
            return Vec::new();
        }

        Self::split(&cleaned)
            .into_iter()
            .map(|sentence| self.normalize_sentence(sentence))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// 对单个子句依次应用规则链与符号表
    fn normalize_sentence(&self, sentence: &str) -> String {
        let verbalized = RULES
            .iter()
            .fold(sentence.to_string(), |acc, rule| rule(&acc));
        self.symbol_table.replace(&verbalized).trim().to_string()
    }

    /// NFC 归一化 + 全角转半角 + 空白折叠
    fn unicode_normalize(text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut prev_whitespace = false;

        for ch in text.nfc().map(Self::full_to_half) {
            if ch.is_whitespace() {
                if !prev_whitespace {
                    result.push(' ');
                    prev_whitespace = true;
                }
            } else {
                result.push(ch);
                prev_whitespace = false;
            }
        }

        result.trim().to_string()
    }

    /// 全角字母、数字及数字相关符号转半角
    ///
    /// 全角标点保留，用于子句切分
    fn full_to_half(ch: char) -> char {
        match ch {
            '０'..='９' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' | '％' | '＋' | '－' | '．' | '／' | '～' => {
                char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch)
            }
            '\u{3000}' => ' ',
            _ => ch,
        }
    }

    /// 在标点之后切分子句，去除空白子句
    fn split(text: &str) -> Vec<&str> {
        let mut parts = Vec::new();
        let mut last = 0;
        for m in SENTENCE_SPLITTER.find_iter(text) {
            parts.push(&text[last..m.end()]);
            last = m.end();
        }
        parts.push(&text[last..]);

        parts
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl TextNormalize for TextNormalizer {
    fn normalize(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(self.normalize_text(sentence))
    }
}
