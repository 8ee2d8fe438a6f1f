/// 連絡先付きメッセージ取り込みLambda関数（Consumer A）
///
/// SQSバッチを受信し、許可国かつ連絡先（email）を持つメッセージを
/// `event-`プレフィックスのレコードとしてDynamoDBに保存する。
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
    let consumer = QueueConsumer::new(repo, ContactPolicy::Required);
    let summary = consumer.process_event(&event).await;

    info!(
        stored = summary.stored,
        skipped = summary.skipped,
        failed = summary.failed,
        "バッチ処理完了"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::event::sqs::SqsMessage;
    use lambda_runtime::Context;
    use serial_test::serial;

    // 注: Rust 2024エディションでremove_varはunsafe
    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    #[tokio::test]
    #[serial(table_env)]
    async fn test_handler_fails_without_table_name() {
        init_logging();
        unsafe { remove_env("TABLE_NAME") };

        let payload = SqsEvent {
            records: vec![SqsMessage {
                message_id: Some("m-1".to_string()),
                body: Some(r#"{"address":{"country":"Ireland"},"email":"a@example.com"}"#.to_string()),
                ..Default::default()
            }],
        };

        let result = handler(LambdaEvent::new(payload, Context::default())).await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Missing environment variable: TABLE_NAME");
    }
}
