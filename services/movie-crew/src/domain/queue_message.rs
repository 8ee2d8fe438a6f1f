/// キューメッセージのパーサー
///
/// SQSレコード本文をJSONとしてパースし、SNS通知エンベロープ
/// （`{"Message": "<JSON文字列>"}`）で包まれている場合は1段階だけ展開する。
use serde_json::{Map, Value};
use thiserror::Error;

/// SNSエンベロープの内側ペイロードを保持するキー
pub const ENVELOPE_MESSAGE_KEY: &str = "Message";

/// メッセージパースエラー
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MessageParseError {
    /// レコードに本文が存在しない
    #[error("message body is missing")]
    MissingBody,

    /// 本文がJSONとして解釈できない
    #[error("failed to parse message body: {0}")]
    InvalidJson(String),
}

/// 展開済みのキューメッセージ
///
/// ペイロードは任意形状のJSONであるため、フィールドアクセスは
/// すべて`Option`を返すアクセサー経由で行う。
#[derive(Debug, Clone, PartialEq)]
pub struct QueueMessage {
    payload: Value,
}

impl QueueMessage {
    /// SQSレコード本文からメッセージを生成
    ///
    /// # Arguments
    /// * `body` - SQSレコード本文（`None`は本文なし）
    ///
    /// # Returns
    /// * `Ok(QueueMessage)` - エンベロープ展開後のメッセージ
    /// * `Err(MessageParseError)` - 本文なし、または外側のJSONが不正
    ///
    /// # Notes
    /// - `Message`が偽値（欠落・null・false・0・空文字列）ならエンベロープとみなさず外側をそのまま使う
    /// - `Message`が文字列ならJSONとして再パースし、失敗した場合は文字列のまま使う
    /// - `Message`が文字列以外ならその値をそのまま使う
    pub fn parse(body: Option<&str>) -> Result<Self, MessageParseError> {
        let body = body.ok_or(MessageParseError::MissingBody)?;
        let outer: Value = serde_json::from_str(body)
            .map_err(|e| MessageParseError::InvalidJson(e.to_string()))?;

        Ok(Self {
            payload: Self::unwrap_envelope(outer),
        })
    }

    /// パース済みの値から直接メッセージを生成
    pub fn from_payload(payload: Value) -> Self {
        Self { payload }
    }

    fn unwrap_envelope(outer: Value) -> Value {
        match outer {
            Value::Object(mut map) if map.get(ENVELOPE_MESSAGE_KEY).is_some_and(is_truthy) => {
                match map.remove(ENVELOPE_MESSAGE_KEY) {
                    Some(Value::String(inner)) => {
                        serde_json::from_str(&inner).unwrap_or(Value::String(inner))
                    }
                    Some(inner) => inner,
                    None => Value::Object(map),
                }
            }
            other => other,
        }
    }

    /// ペイロード全体
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// ペイロードを取り出す
    pub fn into_payload(self) -> Value {
        self.payload
    }

    /// トップレベルのフィールド
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.as_object().and_then(|obj| obj.get(name))
    }

    /// `address`オブジェクト
    pub fn address(&self) -> Option<&Map<String, Value>> {
        self.field("address").and_then(Value::as_object)
    }

    /// `address.country`の文字列値
    pub fn country(&self) -> Option<&str> {
        self.address()
            .and_then(|address| address.get("country"))
            .and_then(Value::as_str)
    }

    /// `name`の値（偽値は欠落扱い、文字列以外もそのまま返す）
    pub fn name(&self) -> Option<&Value> {
        self.field("name").filter(|name| is_truthy(name))
    }
}

/// JSON値を真偽値として評価（null・false・0・空文字列は偽）
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
