// キューから取り込んだイベントの保存レコード
//
// キー属性はクルーテーブルと共有する（movieId: 取り込み時刻のエポックミリ秒、
// role: 固定プレフィックス + ISO 8601タイムスタンプ）。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::queue_message::QueueMessage;

/// 連絡先ありイベントのソートキープレフィックス
pub const INGESTED_ROLE_PREFIX: &str = "event-";
/// 連絡先ありイベントのソースタグ
pub const INGESTED_SOURCE: &str = "lambda-x";
/// 連絡先なしイベントのソートキープレフィックス
pub const CONTACTLESS_ROLE_PREFIX: &str = "no-email-";
/// 連絡先なしイベントのソースタグ
pub const CONTACTLESS_SOURCE: &str = "lambda-y";
/// 名前が欠落している場合のプレースホルダー
pub const UNKNOWN_NAME: &str = "Unknown";

/// 取り込み時刻（識別子とタイムスタンプは同じ時刻から導出する）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTime(DateTime<Utc>);

impl CaptureTime {
    /// 現在時刻
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// 生成識別子（エポックミリ秒）
    pub fn generated_id(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// ISO 8601（ミリ秒精度、UTC `Z`表記）
    pub fn iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// 連絡先ありイベントレコード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestedEventRecord {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub role: String,
    /// フィルター通過後のペイロード全体
    pub event: Value,
    pub source: String,
    pub timestamp: String,
}

impl IngestedEventRecord {
    pub fn new(message: QueueMessage, captured_at: CaptureTime) -> Self {
        let timestamp = captured_at.iso8601();
        Self {
            movie_id: captured_at.generated_id(),
            role: format!("{}{}", INGESTED_ROLE_PREFIX, timestamp),
            event: message.into_payload(),
            source: INGESTED_SOURCE.to_string(),
            timestamp,
        }
    }
}

/// 連絡先なしイベントレコード
///
/// ペイロード全体ではなく、正規化した名前と住所のみを保存する。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactlessEventRecord {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub role: String,
    /// 真値の`name`（文字列以外も保持する）。偽値・欠落時は`Unknown`
    pub name: Value,
    pub address: Map<String, Value>,
    pub source: String,
    pub timestamp: String,
}

impl ContactlessEventRecord {
    pub fn new(message: &QueueMessage, captured_at: CaptureTime) -> Self {
        let timestamp = captured_at.iso8601();
        Self {
            movie_id: captured_at.generated_id(),
            role: format!("{}{}", CONTACTLESS_ROLE_PREFIX, timestamp),
            name: message
                .name()
                .cloned()
                .unwrap_or_else(|| Value::String(UNKNOWN_NAME.to_string())),
            address: message.address().cloned().unwrap_or_default(),
            source: CONTACTLESS_SOURCE.to_string(),
            timestamp,
        }
    }
}

/// 保存対象のイベントレコード
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventRecord {
    Ingested(IngestedEventRecord),
    Contactless(ContactlessEventRecord),
}

impl EventRecord {
    /// パーティションキー（生成識別子）
    pub fn movie_id(&self) -> i64 {
        match self {
            EventRecord::Ingested(record) => record.movie_id,
            EventRecord::Contactless(record) => record.movie_id,
        }
    }

    /// ソートキー
    pub fn role(&self) -> &str {
        match self {
            EventRecord::Ingested(record) => &record.role,
            EventRecord::Contactless(record) => &record.role,
        }
    }
}
