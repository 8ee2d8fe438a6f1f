/// 連絡先なしメッセージ取り込みLambda関数（Consumer B）
///
/// SQSバッチを受信し、許可国かつ連絡先（email）を持たないメッセージを
/// `no-email-`プレフィックスのレコード（name・address付き）としてDynamoDBに保存する。
use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use movie_crew::application::QueueConsumer;
use movie_crew::domain::ContactPolicy;
use movie_crew::infrastructure::{init_logging, DynamoDbConfig, DynamoEventRecordRepository};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // Lambda関数を初期化して実行
    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. 共有のDynamoDB設定を取得（初回のみ環境変数から構築）
/// 2. 各メッセージをフィルターし、通過したものを保存
/// 3. 集計結果をログに記録
///
/// 個々のメッセージの失敗はバッチを失敗させない。
/// 設定の読み込みに失敗した場合のみエラーを返す（バッチ全体が再配信される）。
async fn handler(event: LambdaEvent<SqsEvent>) -> Result<(), Error> {
    let event = event.payload;

    info!(record_count = event.records.len(), "SQSイベントを受信");

    let config = match DynamoDbConfig::shared().await {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "DynamoDB設定読み込み失敗");
            return Err(err.into());
        }
    };

    let repo = DynamoEventRecordRepository::new(
        config.client().clone(),
        config.table_name().to_string(),
    );
    let consumer = QueueConsumer::new(repo, ContactPolicy::Absent);
    let summary = consumer.process_event(&event).await;

    info!(
        stored = summary.stored,
        skipped = summary.skipped,
        failed = summary.failed,
        "バッチ処理完了"
    );

    Ok(())
}
