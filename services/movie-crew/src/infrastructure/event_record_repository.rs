/// キュー取り込みイベントの保存リポジトリ
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;

use super::repository_error::RepositoryError;
use crate::domain::EventRecord;

/// イベントレコード永続化用トレイト
#[async_trait]
pub trait EventRecordRepository: Send + Sync {
    /// レコードを無条件に保存（追記のみ）
    async fn save(&self, record: &EventRecord) -> Result<(), RepositoryError>;
}

/// EventRecordRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoEventRecordRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// テーブル名
    table_name: String,
}

impl DynamoEventRecordRepository {
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// レコードをDynamoDBアイテムに変換
    ///
    /// ペイロード内の空文字列やnullもそのまま属性として保存される。
    fn to_item(record: &EventRecord) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
        Ok(serde_dynamo::to_item(record)?)
    }
}

#[async_trait]
impl EventRecordRepository for DynamoEventRecordRepository {
    async fn save(&self, record: &EventRecord) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::to_item(record)?))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }
}
