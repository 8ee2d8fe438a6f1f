/// クルー役割CRUD HTTP Lambdaエントリポイント
///
/// API Gateway経由のHTTPリクエストを処理し、
/// DynamoDBテーブル上のクルー役割レコードを作成・取得・更新・削除する。
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use movie_crew::application::{ApiResponse, CrewApiHandler, CrewRequest};
use movie_crew::infrastructure::{init_logging, DynamoCrewRoleRepository, DynamoDbConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("CRUD API Lambda関数を初期化");

    // Lambda関数を実行
    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// # Returns
/// JSONボディのHTTPレスポンス。処理中のエラーもステータスコード付きの
/// レスポンスとして返却し、ランタイムにはエラーを伝播しない。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let request = CrewRequest::from_http(&request);

    info!(method = %request.method, path = %request.path, "リクエスト受信");

    let response = match DynamoDbConfig::shared().await {
        Ok(config) => {
            let repo = DynamoCrewRoleRepository::new(
                config.client().clone(),
                config.table_name().to_string(),
            );
            CrewApiHandler::new(repo).handle(&request).await
        }
        Err(err) => {
            error!(error = %err, "DynamoDB設定読み込み失敗");
            ApiResponse::internal_error(err.to_string())
        }
    };

    info!(status = response.status().as_u16(), "レスポンス送信");

    Ok(response.into_http()?)
}
