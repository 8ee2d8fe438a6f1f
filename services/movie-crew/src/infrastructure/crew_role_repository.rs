/// DynamoDBでクルー役割レコードを管理するリポジトリ
///
/// テーブルはキュー取り込みレコードと共有されるため、読み取り系の操作は
/// アイテムを型付きレコードではなく汎用のJSONドキュメントとして返す。
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use serde_json::Value;

use super::repository_error::RepositoryError;
use crate::domain::{CrewRole, CrewRoleKey, MOVIE_ID_ATTR, ROLE_ATTR};

/// DynamoDBのアイテム
type Item = HashMap<String, AttributeValue>;

/// クルー役割レコード永続化用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替えられるように抽象化する。
#[async_trait]
pub trait CrewRoleRepository: Send + Sync {
    /// 複合キーで1件取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Value))`
    /// * 見つからなかった場合は`Ok(None)`
    async fn get(&self, key: &CrewRoleKey) -> Result<Option<Value>, RepositoryError>;

    /// 同じmovieIdを持つ全レコードを取得
    async fn query_by_movie(&self, movie_id: i64) -> Result<Vec<Value>, RepositoryError>;

    /// テーブルの全レコードを取得
    async fn scan_all(&self) -> Result<Vec<Value>, RepositoryError>;

    /// 同じキーが存在しない場合のみ保存
    ///
    /// # 戻り値
    /// * 既に存在する場合は`Err(RepositoryError::AlreadyExists)`
    ///   （存在判定はストレージの条件付き書き込みで行う）
    async fn create(&self, crew: &CrewRole) -> Result<(), RepositoryError>;

    /// 無条件に保存（既存レコードは上書き）
    async fn put(&self, crew: &CrewRole) -> Result<(), RepositoryError>;

    /// 複合キーで削除（存在しなくても成功）
    async fn delete(&self, key: &CrewRoleKey) -> Result<(), RepositoryError>;
}

/// CrewRoleRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoCrewRoleRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// テーブル名
    table_name: String,
}

impl DynamoCrewRoleRepository {
    /// 新しいDynamoCrewRoleRepositoryを作成
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn movie_id_attr(movie_id: i64) -> AttributeValue {
        AttributeValue::N(movie_id.to_string())
    }

    fn role_attr(role: &str) -> AttributeValue {
        AttributeValue::S(role.to_string())
    }

    fn to_documents(items: Vec<Item>) -> Result<Vec<Value>, RepositoryError> {
        items
            .into_iter()
            .map(|item| serde_dynamo::from_item(item).map_err(RepositoryError::from))
            .collect()
    }

    fn to_item(crew: &CrewRole) -> Result<Item, RepositoryError> {
        Ok(serde_dynamo::to_item(crew)?)
    }
}

#[async_trait]
impl CrewRoleRepository for DynamoCrewRoleRepository {
    async fn get(&self, key: &CrewRoleKey) -> Result<Option<Value>, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(MOVIE_ID_ATTR, Self::movie_id_attr(key.movie_id))
            .key(ROLE_ATTR, Self::role_attr(&key.role))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        match result.item {
            Some(item) => Ok(Some(serde_dynamo::from_item(item)?)),
            None => Ok(None),
        }
    }

    async fn query_by_movie(&self, movie_id: i64) -> Result<Vec<Value>, RepositoryError> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;

        // 1MB上限を超える結果はLastEvaluatedKeyで続きを取得
        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("movieId = :movieId")
                .expression_attribute_values(":movieId", Self::movie_id_attr(movie_id))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

            items.extend(result.items.unwrap_or_default());

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Self::to_documents(items)
    }

    async fn scan_all(&self) -> Result<Vec<Value>, RepositoryError> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

            items.extend(result.items.unwrap_or_default());

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Self::to_documents(items)
    }

    async fn create(&self, crew: &CrewRole) -> Result<(), RepositoryError> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::to_item(crew)?))
            .condition_expression("attribute_not_exists(movieId) AND attribute_not_exists(#r)")
            .expression_attribute_names("#r", ROLE_ATTR)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    return Err(RepositoryError::AlreadyExists(format!(
                        "movieId={}, role={}",
                        crew.movie_id, crew.role
                    )));
                }
                Err(RepositoryError::WriteError(service_error.to_string()))
            }
        }
    }

    async fn put(&self, crew: &CrewRole) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::to_item(crew)?))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &CrewRoleKey) -> Result<(), RepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(MOVIE_ID_ATTR, Self::movie_id_attr(key.movie_id))
            .key(ROLE_ATTR, Self::role_attr(&key.role))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }
}
