/// CRUD APIリクエスト
///
/// lambda_httpのリクエストから、ルーティングと処理に必要な値だけを取り出す。
use lambda_http::http::Method;
use lambda_http::{Request, RequestExt};

/// movieIdパスパラメータ名
pub const MOVIE_ID_PARAM: &str = "movieId";
/// roleパスパラメータ名
pub const ROLE_PARAM: &str = "role";
/// verboseクエリパラメータ名
pub const VERBOSE_PARAM: &str = "verbose";

/// CRUD APIリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct CrewRequest {
    /// HTTPメソッド
    pub method: Method,
    /// リクエストパス（ステージプレフィックスを含みうる）
    pub path: String,
    /// movieIdパスパラメータ（未検証の文字列）
    pub movie_id: Option<String>,
    /// roleパスパラメータ
    pub role: Option<String>,
    /// verboseクエリパラメータ
    pub verbose: Option<String>,
    /// リクエストボディ（空はボディなし）
    pub body: Vec<u8>,
}

impl CrewRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            movie_id: None,
            role: None,
            verbose: None,
            body: Vec::new(),
        }
    }

    pub fn with_movie_id(mut self, movie_id: impl Into<String>) -> Self {
        self.movie_id = Some(movie_id.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_verbose(mut self, verbose: impl Into<String>) -> Self {
        self.verbose = Some(verbose.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// lambda_httpのリクエストから変換
    pub fn from_http(request: &Request) -> Self {
        let path_params = request.path_parameters();
        let query_params = request.query_string_parameters();
        let body: &[u8] = request.body();

        Self {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            movie_id: path_params.first(MOVIE_ID_PARAM).map(str::to_string),
            role: path_params.first(ROLE_PARAM).map(str::to_string),
            verbose: query_params.first(VERBOSE_PARAM).map(str::to_string),
            body: body.to_vec(),
        }
    }

    /// verbose=trueが指定されているか
    pub fn is_verbose(&self) -> bool {
        self.verbose.as_deref() == Some("true")
    }
}
