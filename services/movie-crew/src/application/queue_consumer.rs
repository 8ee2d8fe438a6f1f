// キューコンシューマー
//
// SQSバッチの各メッセージを受信順にパースし、フィルターを通過したものを保存する。
// 1件の失敗はログに記録して次のメッセージへ進み、バッチ全体は中断しない。

use aws_lambda_events::event::sqs::SqsEvent;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::{
    CaptureTime, ContactFilter, ContactPolicy, ContactlessEventRecord, EventRecord,
    IngestedEventRecord, MessageParseError, QueueMessage, SkipReason,
};
use crate::infrastructure::{EventRecordRepository, RepositoryError};

/// メッセージ処理エラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConsumerError {
    /// メッセージ本文のパースに失敗
    #[error("Invalid message: {0}")]
    InvalidMessage(#[from] MessageParseError),

    /// 保存に失敗
    #[error("Failed to store message: {0}")]
    StoreFailed(#[from] RepositoryError),
}

/// 1メッセージの処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    /// レコードを保存した
    Stored(EventRecord),
    /// フィルター条件を満たさないためスキップした
    Skipped(SkipReason),
}

/// バッチ処理の集計結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// 保存したメッセージ数
    pub stored: usize,
    /// スキップしたメッセージ数
    pub skipped: usize,
    /// 処理に失敗したメッセージ数
    pub failed: usize,
}

impl BatchSummary {
    /// 処理結果を集計に加える
    pub fn record(&mut self, outcome: &Result<MessageOutcome, ConsumerError>) {
        match outcome {
            Ok(MessageOutcome::Stored(_)) => self.stored += 1,
            Ok(MessageOutcome::Skipped(_)) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// 受信したメッセージ総数
    pub fn total(&self) -> usize {
        self.stored + self.skipped + self.failed
    }
}

/// キューコンシューマー
///
/// 連絡先ポリシーにより保存するレコードの形が決まる:
/// - `Required`: ペイロード全体を保存する`IngestedEventRecord`
/// - `Absent`: 名前と住所のみを保存する`ContactlessEventRecord`
pub struct QueueConsumer<R>
where
    R: EventRecordRepository,
{
    /// イベントレコードリポジトリ
    repo: R,
    /// メッセージフィルター
    filter: ContactFilter,
}

impl<R> QueueConsumer<R>
where
    R: EventRecordRepository,
{
    /// 新しいQueueConsumerを作成
    pub fn new(repo: R, policy: ContactPolicy) -> Self {
        Self {
            repo,
            filter: ContactFilter::new(policy),
        }
    }

    /// SQSイベントのメッセージを受信順に処理
    ///
    /// # Returns
    /// * `BatchSummary` - 保存/スキップ/失敗の件数
    pub async fn process_event(&self, event: &SqsEvent) -> BatchSummary {
        info!(record_count = event.records.len(), "SQSイベント処理開始");

        let mut summary = BatchSummary::default();

        for record in &event.records {
            let message_id = record.message_id.as_deref().unwrap_or("unknown");
            let outcome = self
                .process_message(record.body.as_deref(), CaptureTime::now())
                .await;

            match &outcome {
                Ok(MessageOutcome::Stored(stored)) => {
                    info!(
                        message_id = message_id,
                        movie_id = stored.movie_id(),
                        role = stored.role(),
                        "メッセージを保存"
                    );
                }
                Ok(MessageOutcome::Skipped(reason)) => {
                    debug!(message_id = message_id, reason = %reason, "メッセージをスキップ");
                }
                Err(err) => {
                    error!(message_id = message_id, error = %err, "メッセージ処理に失敗");
                }
            }

            summary.record(&outcome);
        }

        info!(
            stored = summary.stored,
            skipped = summary.skipped,
            failed = summary.failed,
            "SQSイベント処理完了"
        );

        summary
    }

    /// 単一メッセージを処理
    ///
    /// # Arguments
    /// * `body` - SQSレコード本文
    /// * `captured_at` - 取り込み時刻（生成識別子とタイムスタンプの元）
    pub async fn process_message(
        &self,
        body: Option<&str>,
        captured_at: CaptureTime,
    ) -> Result<MessageOutcome, ConsumerError> {
        let message = QueueMessage::parse(body)?;

        if let Err(reason) = self.filter.evaluate(&message) {
            return Ok(MessageOutcome::Skipped(reason));
        }

        let record = self.build_record(message, captured_at);
        self.repo.save(&record).await?;

        Ok(MessageOutcome::Stored(record))
    }

    fn build_record(&self, message: QueueMessage, captured_at: CaptureTime) -> EventRecord {
        match self.filter.policy() {
            ContactPolicy::Required => {
                EventRecord::Ingested(IngestedEventRecord::new(message, captured_at))
            }
            ContactPolicy::Absent => {
                EventRecord::Contactless(ContactlessEventRecord::new(&message, captured_at))
            }
        }
    }
}
