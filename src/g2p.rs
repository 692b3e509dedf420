//! 字音转换（grapheme-to-pinyin）
//!
//! 逐字取默认读音，多音字通过词组表按最长匹配覆盖

use std::collections::HashMap;

use anyhow::{bail, Result};
use pinyin::ToPinyin;

use crate::config::G2pConfig;
use crate::frontend::GraphemeToPinyin;

/// 内置常见多音词读音（轻声以 5 标注）
const BUILTIN_PHRASES: &[(&str, &[&str])] = &[
    ("银行", &["yin2", "hang2"]),
    ("行长", &["hang2", "zhang3"]),
    ("重庆", &["chong2", "qing4"]),
    ("重新", &["chong2", "xin1"]),
    ("长大", &["zhang3", "da4"]),
    ("音乐", &["yin1", "yue4"]),
    ("快乐", &["kuai4", "le4"]),
    ("梁朝伟", &["liang2", "chao2", "wei3"]),
    ("朝阳", &["chao2", "yang2"]),
    ("睡觉", &["shui4", "jiao4"]),
    ("觉得", &["jue2", "de5"]),
    ("调查", &["diao4", "cha2"]),
    ("还是", &["hai2", "shi4"]),
    ("还有", &["hai2", "you3"]),
    ("什么", &["shen2", "me5"]),
    ("为了", &["wei4", "le5"]),
    ("了解", &["liao3", "jie3"]),
    ("便宜", &["pian2", "yi5"]),
    ("数据", &["shu4", "ju4"]),
    ("地方", &["di4", "fang1"]),
];

/// 拼音模型
pub struct G2pModel {
    /// 词组 → 逐字读音
    phrases: HashMap<String, Vec<String>>,
    /// 词组表中最长词的字数
    max_phrase_len: usize,
    /// 轻声是否标注 5
    neutral_tone_with_five: bool,
}

impl G2pModel {
    pub fn new(config: &G2pConfig) -> Self {
        let mut model = Self {
            phrases: HashMap::new(),
            max_phrase_len: 0,
            neutral_tone_with_five: config.neutral_tone_with_five,
        };

        for (word, readings) in BUILTIN_PHRASES {
            model.insert_phrase(word, readings.iter().map(|r| r.to_string()).collect());
        }
        // 用户词组后插入，覆盖同名内置词组
        for (word, readings) in &config.phrases {
            model.insert_phrase(word, readings.clone());
        }

        tracing::debug!("拼音词组表已加载，共 {} 条", model.phrases.len());
        model
    }

    fn insert_phrase(&mut self, word: &str, readings: Vec<String>) {
        let word_len = word.chars().count();
        // 仅处理 ≥2 字且读音数与字数一致的词
        if word_len < 2 || readings.len() != word_len {
            tracing::warn!("忽略无效词组读音: {} -> {:?}", word, readings);
            return;
        }
        self.max_phrase_len = std::cmp::max(self.max_phrase_len, word_len);
        self.phrases.insert(word.to_string(), readings);
    }

    /// 转换为逐字拼音（声调数字在末尾，如 "zhong1"）
    ///
    /// 遇到无读音的字符时返回错误
    pub fn to_pinyin(&self, text: &str) -> Result<Vec<String>> {
        let chars: Vec<char> = text.chars().collect();
        let mut result = Vec::with_capacity(chars.len());
        let mut idx = 0;

        while idx < chars.len() {
            if let Some((readings, consumed)) = self.match_phrase(&chars[idx..]) {
                result.extend(readings.iter().map(|r| self.mark_tone(r)));
                idx += consumed;
                continue;
            }

            let ch = chars[idx];
            let Some(pinyin) = ch.to_pinyin() else {
                bail!("无法获取拼音: {}", ch);
            };
            result.push(self.mark_tone(pinyin.with_tone_num_end()));
            idx += 1;
        }

        Ok(result)
    }

    /// 词组最长匹配，返回 `(逐字读音, 消费字数)`
    fn match_phrase(&self, chars: &[char]) -> Option<(&[String], usize)> {
        let upper = std::cmp::min(self.max_phrase_len, chars.len());
        if upper < 2 {
            return None;
        }

        // 从长到短尝试匹配（最长匹配优先）
        (2..=upper).rev().find_map(|len| {
            let candidate: String = chars[..len].iter().collect();
            self.phrases
                .get(&candidate)
                .map(|readings| (readings.as_slice(), len))
        })
    }

    /// 统一轻声标注
    fn mark_tone(&self, token: &str) -> String {
        let has_tone = token.chars().last().is_some_and(|c| c.is_ascii_digit());
        match (has_tone, self.neutral_tone_with_five) {
            (false, true) => format!("{}5", token),
            (true, false) => match token.strip_suffix('5') {
                Some(bare) => bare.to_string(),
                None => token.to_string(),
            },
            _ => token.to_string(),
        }
    }
}

impl Default for G2pModel {
    fn default() -> Self {
        Self::new(&G2pConfig::default())
    }
}

impl GraphemeToPinyin for G2pModel {
    fn convert(&self, text: &str) -> Result<Vec<Vec<String>>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![self.to_pinyin(text)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_basic_conversion() {
        let model = G2pModel::default();
        let result = model.convert("中文").unwrap();
        assert_eq!(result, vec![strings(&["zhong1", "wen2"])]);
    }

    #[test]
    fn test_empty_input() {
        let model = G2pModel::default();
        assert!(model.convert("").unwrap().is_empty());
    }

    #[test]
    fn test_phrase_overrides_default_reading() {
        let model = G2pModel::default();
        let result = model.to_pinyin("中国银行").unwrap();
        assert_eq!(result, strings(&["zhong1", "guo2", "yin2", "hang2"]));
    }

    #[test]
    fn test_longest_phrase_wins() {
        let mut config = G2pConfig::default();
        config.phrases.insert("中文".to_string(), strings(&["a1", "b1"]));
        config
            .phrases
            .insert("中文字".to_string(), strings(&["x1", "y1", "z1"]));
        let model = G2pModel::new(&config);

        assert_eq!(model.to_pinyin("中文字").unwrap(), strings(&["x1", "y1", "z1"]));
        assert_eq!(model.to_pinyin("中文").unwrap(), strings(&["a1", "b1"]));
    }

    #[test]
    fn test_user_phrase_overrides_builtin() {
        let mut config = G2pConfig::default();
        config
            .phrases
            .insert("银行".to_string(), strings(&["yin2", "xing2"]));
        let model = G2pModel::new(&config);
        assert_eq!(model.to_pinyin("银行").unwrap(), strings(&["yin2", "xing2"]));
    }

    #[test]
    fn test_invalid_phrase_ignored() {
        let mut config = G2pConfig::default();
        // 读音数与字数不一致
        config.phrases.insert("中文".to_string(), strings(&["a1"]));
        let model = G2pModel::new(&config);
        assert_eq!(model.to_pinyin("中文").unwrap(), strings(&["zhong1", "wen2"]));
    }

    #[test]
    fn test_neutral_tone_marking() {
        let model = G2pModel::default();
        assert_eq!(model.to_pinyin("觉得").unwrap(), strings(&["jue2", "de5"]));
        assert_eq!(model.mark_tone("me"), "me5");

        let config = G2pConfig {
            neutral_tone_with_five: false,
            ..G2pConfig::default()
        };
        let model = G2pModel::new(&config);
        assert_eq!(model.to_pinyin("觉得").unwrap(), strings(&["jue2", "de"]));
        assert_eq!(model.mark_tone("zhong1"), "zhong1");
    }

    #[test]
    fn test_character_without_reading_is_error() {
        let model = G2pModel::default();
        assert!(model.convert("a").is_err());
        assert!(model.convert("中a").is_err());
    }
}
