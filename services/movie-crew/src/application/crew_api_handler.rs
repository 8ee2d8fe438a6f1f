/// クルー役割CRUDハンドラー
///
/// ルートを解決し、リポジトリへの単一の読み書きを実行してレスポンスを生成する。
/// 4xxに変換されなかったエラーはすべて500として応答する。
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::api_response::ApiResponse;
use super::crew_request::CrewRequest;
use super::crew_route::{CrewRoute, RouteError};
use crate::domain::{CrewRole, CrewRoleKey};
use crate::infrastructure::{CrewRoleRepository, RepositoryError};

/// 更新・取得対象が存在しない場合のメッセージ
const CREW_ROLE_NOT_FOUND: &str = "Crew role not found";

/// ハンドラー内部のエラー型（500として応答する）
#[derive(Debug, Error)]
pub enum CrewApiError {
    /// リクエストボディがJSONとして解釈できない
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// リポジトリ操作エラー
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// レスポンスのシリアライズに失敗
    #[error("Failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<RouteError> for ApiResponse {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::MethodNotAllowed => ApiResponse::method_not_allowed(),
            other => ApiResponse::bad_request(other.to_string()),
        }
    }
}

/// クルー役割CRUDハンドラー
pub struct CrewApiHandler<R>
where
    R: CrewRoleRepository,
{
    /// クルー役割リポジトリ
    repo: R,
}

impl<R> CrewApiHandler<R>
where
    R: CrewRoleRepository,
{
    /// 新しいCrewApiHandlerを作成
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// リクエストを処理してレスポンスを返す
    ///
    /// 失敗は常にレスポンスとして表現されるため、このメソッドはエラーを返さない。
    pub async fn handle(&self, request: &CrewRequest) -> ApiResponse {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                error!(
                    method = %request.method,
                    path = %request.path,
                    error = %err,
                    "リクエスト処理に失敗"
                );
                ApiResponse::internal_error(err.to_string())
            }
        }
    }

    async fn dispatch(&self, request: &CrewRequest) -> Result<ApiResponse, CrewApiError> {
        let route = match CrewRoute::resolve(request) {
            Ok(route) => route,
            Err(err) => {
                warn!(method = %request.method, path = %request.path, error = %err, "ルーティング失敗");
                return Ok(err.into());
            }
        };

        debug!(route = ?route, "ルート解決");

        match route {
            CrewRoute::CrewByRole { key, verbose: true } => self.list_by_movie(key.movie_id).await,
            CrewRoute::CrewByRole { key, verbose: false } => {
                let message = format!("No {} found for movie {}", key.role, key.movie_id);
                self.get_one(&key, &message).await
            }
            CrewRoute::ListAll => {
                let items = self.repo.scan_all().await?;
                Ok(ApiResponse::ok(Value::Array(items)))
            }
            CrewRoute::ListByMovie { movie_id } => self.list_by_movie(movie_id).await,
            CrewRoute::GetRole(key) => self.get_one(&key, CREW_ROLE_NOT_FOUND).await,
            CrewRoute::Create => self.create(request).await,
            CrewRoute::Update => self.update(request).await,
            CrewRoute::Delete(key) => {
                self.repo.delete(&key).await?;
                Ok(ApiResponse::no_content())
            }
        }
    }

    async fn list_by_movie(&self, movie_id: i64) -> Result<ApiResponse, CrewApiError> {
        let items = self.repo.query_by_movie(movie_id).await?;
        Ok(ApiResponse::ok(Value::Array(items)))
    }

    async fn get_one(
        &self,
        key: &CrewRoleKey,
        not_found_message: &str,
    ) -> Result<ApiResponse, CrewApiError> {
        match self.repo.get(key).await? {
            Some(item) => Ok(ApiResponse::ok(item)),
            None => Ok(ApiResponse::not_found(not_found_message)),
        }
    }

    /// POST: 同じキーが存在しない場合のみ作成
    ///
    /// 重複の判定はストレージの条件付き書き込みに任せる。
    async fn create(&self, request: &CrewRequest) -> Result<ApiResponse, CrewApiError> {
        let crew = match CrewRole::from_body(&Self::parse_body(request)?) {
            Ok(crew) => crew,
            Err(err) => return Ok(ApiResponse::bad_request(err.to_string())),
        };

        self.repo.create(&crew).await?;

        Ok(ApiResponse::created(serde_json::to_value(&crew)?))
    }

    /// PUT: 既存レコードを上書き
    ///
    /// 存在確認と書き込みは別リクエストであり、アトミックではない。
    async fn update(&self, request: &CrewRequest) -> Result<ApiResponse, CrewApiError> {
        let crew = match CrewRole::from_body(&Self::parse_body(request)?) {
            Ok(crew) => crew,
            Err(err) => return Ok(ApiResponse::bad_request(err.to_string())),
        };

        if self.repo.get(&crew.key()).await?.is_none() {
            return Ok(ApiResponse::not_found(CREW_ROLE_NOT_FOUND));
        }

        self.repo.put(&crew).await?;

        Ok(ApiResponse::ok(serde_json::to_value(&crew)?))
    }

    /// リクエストボディをJSONとしてパース（ボディなしは空オブジェクト）
    fn parse_body(request: &CrewRequest) -> Result<Value, CrewApiError> {
        if request.body.is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_slice(&request.body).map_err(|e| CrewApiError::InvalidBody(e.to_string()))
    }
}
