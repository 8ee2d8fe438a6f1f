/// DynamoDB接続設定
///
/// 環境変数からテーブル名とリージョンを読み込み、DynamoDBクライアントを構築する。
/// クライアントはプロセス内で一度だけ初期化し、以降の呼び出しで再利用する。
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tokio::sync::OnceCell;

/// テーブル名の環境変数
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";
/// リージョンの環境変数
pub const REGION_VAR: &str = "REGION";

/// DynamoDB設定のエラー型
#[derive(Debug, Error)]
pub enum DynamoDbConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// 環境変数から読み込んだテーブル設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSettings {
    /// テーブル名
    pub table_name: String,
    /// リージョン（未設定ならaws-configの既定の解決に任せる）
    pub region: Option<String>,
}

impl TableSettings {
    /// 環境変数から読み込む
    ///
    /// 環境変数:
    /// - TABLE_NAME: 必須
    /// - REGION: 任意（空文字列は未設定扱い）
    pub fn from_env() -> Result<Self, DynamoDbConfigError> {
        let table_name = std::env::var(TABLE_NAME_VAR)
            .ok()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DynamoDbConfigError::MissingEnvVar(TABLE_NAME_VAR.to_string()))?;

        let region = std::env::var(REGION_VAR).ok().filter(|r| !r.is_empty());

        Ok(Self { table_name, region })
    }
}

/// テーブル名とクライアントを持つDynamoDB設定
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// テーブル名
    table_name: String,
}

/// プロセス内で共有する設定（Lambda warm start時に再利用）
static SHARED_CONFIG: OnceCell<DynamoDbConfig> = OnceCell::const_new();

impl DynamoDbConfig {
    /// 環境変数から設定を読み込み、AWS設定をロードしてクライアントを作成
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        let settings = TableSettings::from_env()?;
        Ok(Self::load(settings).await)
    }

    /// テーブル設定からクライアントを作成
    pub async fn load(settings: TableSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = settings.region {
            loader = loader.region(Region::new(region));
        }
        let aws_config = loader.load().await;

        Self {
            client: DynamoDbClient::new(&aws_config),
            table_name: settings.table_name,
        }
    }

    /// プロセス共有の設定を取得（初回のみ初期化）
    ///
    /// # 戻り値
    /// * `Ok(&'static DynamoDbConfig)` - 初期化済みの設定
    /// * `Err(DynamoDbConfigError)` - 環境変数の不足（次回呼び出しで再試行される）
    pub async fn shared() -> Result<&'static DynamoDbConfig, DynamoDbConfigError> {
        SHARED_CONFIG.get_or_try_init(Self::from_env).await
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    unsafe fn cleanup() {
        unsafe {
            remove_env(TABLE_NAME_VAR);
            remove_env(REGION_VAR);
        }
    }

    #[test]
    fn test_missing_env_var_error_display() {
        let error = DynamoDbConfigError::MissingEnvVar("TABLE_NAME".to_string());
        assert_eq!(error.to_string(), "Missing environment variable: TABLE_NAME");
    }

    #[test]
    #[serial(table_env)]
    fn test_settings_missing_table_name() {
        unsafe { cleanup() };

        match TableSettings::from_env() {
            Err(DynamoDbConfigError::MissingEnvVar(var)) => assert_eq!(var, "TABLE_NAME"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    #[serial(table_env)]
    fn test_settings_empty_table_name_is_missing() {
        unsafe {
            cleanup();
            set_env(TABLE_NAME_VAR, "");
        }

        assert!(TableSettings::from_env().is_err());

        unsafe { cleanup() };
    }

    #[test]
    #[serial(table_env)]
    fn test_settings_table_only() {
        unsafe {
            cleanup();
            set_env(TABLE_NAME_VAR, "movie-crew");
        }

        let settings = TableSettings::from_env().unwrap();
        assert_eq!(settings.table_name, "movie-crew");
        assert_eq!(settings.region, None);

        unsafe { cleanup() };
    }

    #[test]
    #[serial(table_env)]
    fn test_settings_with_region() {
        unsafe {
            cleanup();
            set_env(TABLE_NAME_VAR, "movie-crew");
            set_env(REGION_VAR, "eu-west-1");
        }

        let settings = TableSettings::from_env().unwrap();
        assert_eq!(
            settings,
            TableSettings {
                table_name: "movie-crew".to_string(),
                region: Some("eu-west-1".to_string()),
            }
        );

        unsafe { cleanup() };
    }

    #[tokio::test]
    async fn test_load_applies_table_name() {
        let config = DynamoDbConfig::load(TableSettings {
            table_name: "test-table".to_string(),
            region: Some("eu-west-1".to_string()),
        })
        .await;

        assert_eq!(config.table_name(), "test-table");
        assert_eq!(
            config.client().config().region().map(|r| r.to_string()),
            Some("eu-west-1".to_string())
        );
    }
}
