//! 请求/响应类型定义

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::service::BatchOutput;
use crate::text::SentenceBatch;

/// 单个句子或句子列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SentenceInput {
    Single(String),
    Many(Vec<String>),
}

impl From<SentenceInput> for SentenceBatch {
    fn from(input: SentenceInput) -> Self {
        match input {
            SentenceInput::Single(sentence) => SentenceBatch::from_single(&sentence),
            SentenceInput::Many(sentences) => SentenceBatch::from_many(sentences),
        }
    }
}

/// 文本请求体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRequest {
    /// 句子（缺省或 null 视为空列表）
    #[serde(default)]
    pub sentence: Option<SentenceInput>,
}

impl TextRequest {
    pub fn into_batch(self) -> SentenceBatch {
        self.sentence.map(SentenceBatch::from).unwrap_or_default()
    }
}

/// 文本响应体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextResponse {
    /// 输入句子（已清洗）
    pub sentences: Vec<String>,
    /// 逐句输出
    pub result: Vec<Vec<String>>,
}

impl From<BatchOutput> for TextResponse {
    fn from(output: BatchOutput) -> Self {
        Self {
            sentences: output.sentences,
            result: output.result,
        }
    }
}

/// 统一响应信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseResponse<T> {
    /// 0 表示成功，其余为 HTTP 状态码
    pub code: i32,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for BaseResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_single_sentence() {
        let req: TextRequest = serde_json::from_str(r#"{"sentence": " 你好 "}"#).unwrap();
        assert_eq!(req.sentence, Some(SentenceInput::Single(" 你好 ".to_string())));
        assert_eq!(req.into_batch().into_inner(), vec!["你好"]);
    }

    #[test]
    fn test_request_sentence_list() {
        let req: TextRequest = serde_json::from_str(r#"{"sentence": ["a", "", "b"]}"#).unwrap();
        assert_eq!(req.into_batch().into_inner(), vec!["a", "b"]);
    }

    #[test]
    fn test_request_missing_or_null_sentence() {
        let missing: TextRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.into_batch().is_empty());
        let null: TextRequest = serde_json::from_str(r#"{"sentence": null}"#).unwrap();
        assert!(null.into_batch().is_empty());
    }

    #[test]
    fn test_request_rejects_other_shapes() {
        assert!(serde_json::from_str::<TextRequest>(r#"{"sentence": 12}"#).is_err());
        assert!(serde_json::from_str::<TextRequest>(r#"{"sentence": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_envelope_serialization() {
        let ok = BaseResponse::success(TextResponse::default());
        let v = serde_json::to_value(&ok).unwrap();
        assert_eq!(v["code"], 0);
        assert_eq!(v["msg"], "success");
        assert_eq!(v["data"]["sentences"], serde_json::json!([]));
        assert_eq!(v["data"]["result"], serde_json::json!([]));

        let err = BaseResponse::<TextResponse>::error(500, "boom");
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["code"], 500);
        assert!(v["data"].is_null());
    }
}
