//! APIレスポンス
//!
//! ステータスコードとJSONボディの組。すべてのレスポンスは
//! `content-type: application/json`で返却する。
//! クライアントエラーは`message`、サーバーエラーは`error`フィールドを持つ。

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::{json, Value};

/// APIレスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTPステータスコード
    status: StatusCode,
    /// レスポンスボディ（`None`はボディなし）
    body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// 200 OK
    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, Some(body))
    }

    /// 201 Created
    pub fn created(body: Value) -> Self {
        Self::new(StatusCode::CREATED, Some(body))
    }

    /// 204 No Content
    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, None)
    }

    /// `{"message": ...}`形式のレスポンス
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, Some(json!({ "message": message.into() })))
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::message(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::message(StatusCode::NOT_FOUND, message)
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed() -> Self {
        Self::message(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    /// 500 Internal Server Error（`{"error": ...}`形式）
    pub fn internal_error(error: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(json!({ "error": error.into() })),
        )
    }

    /// ステータスコードを取得
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// ボディを取得
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// lambda_httpのレスポンスに変換
    pub fn into_http(self) -> Result<Response<Body>, lambda_http::http::Error> {
        let body = match self.body {
            Some(value) => Body::Text(value.to_string()),
            None => Body::Empty,
        };

        Response::builder()
            .status(self.status)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(response: &Response<Body>) -> String {
        match response.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
            Body::Empty => String::new(),
            _ => panic!("予期しないBody型"),
        }
    }

    #[test]
    fn test_constructors_status_codes() {
        assert_eq!(ApiResponse::ok(json!([])).status(), StatusCode::OK);
        assert_eq!(ApiResponse::created(json!({})).status(), StatusCode::CREATED);
        assert_eq!(ApiResponse::no_content().status(), StatusCode::NO_CONTENT);
        assert_eq!(ApiResponse::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiResponse::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiResponse::method_not_allowed().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiResponse::internal_error("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_error_uses_message_field() {
        let response = ApiResponse::not_found("Crew role not found");
        assert_eq!(response.body(), Some(&json!({"message": "Crew role not found"})));
    }

    #[test]
    fn test_server_error_uses_error_field() {
        let response = ApiResponse::internal_error("Read error: timeout");
        assert_eq!(response.body(), Some(&json!({"error": "Read error: timeout"})));
    }

    #[test]
    fn test_into_http_sets_json_content_type() {
        let response = ApiResponse::ok(json!({"movieId": 1})).into_http().unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(body_text(&response), r#"{"movieId":1}"#);
    }

    #[test]
    fn test_no_content_has_empty_body() {
        let response = ApiResponse::no_content().into_http().unwrap();

        assert_eq!(response.status(), 204);
        assert!(matches!(response.body(), Body::Empty));
    }
}
