// CRUD APIのルーティング
//
// HTTPメソッド → パス形状 → パスパラメータの有無の順に判定し、
// 実行する操作を決定する。パラメータの検証はストレージアクセス前にここで行う。

use lambda_http::http::Method;
use thiserror::Error;

use super::crew_request::CrewRequest;
use crate::domain::CrewRoleKey;

/// 全件取得用のコレクションパス（`dev`ステージ経由のパスも受け付ける）
pub const COLLECTION_PATHS: [&str; 2] = ["/patha", "/dev/patha"];

/// 解決済みのルート
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrewRoute {
    /// GET /crew/{role}/movies/{movieId}
    ///
    /// verbose=trueなら同じmovieIdの全レコード、それ以外はキー指定の1件
    CrewByRole { key: CrewRoleKey, verbose: bool },
    /// GET コレクションパス: テーブル全件
    ListAll,
    /// GET /{movieId}: 同じmovieIdの全レコード
    ListByMovie { movie_id: i64 },
    /// GET /{movieId}/{role}: キー指定の1件
    GetRole(CrewRoleKey),
    /// POST: 新規作成
    Create,
    /// PUT: 既存レコードの更新
    Update,
    /// DELETE /{movieId}/{role}
    Delete(CrewRoleKey),
}

/// ルーティングエラー（クライアントエラーとして応答する）
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// /crew/{role}/movies/{movieId} のパラメータが不正
    #[error("Invalid parameters. Role and movieId are required.")]
    InvalidCrewParameters,

    /// movieIdが整数でない
    #[error("Invalid movieId: {0}")]
    InvalidMovieId(String),

    /// DELETEのパスパラメータが不足
    #[error("Missing required path parameters: movieId and role")]
    MissingDeleteParameters,

    /// 未対応のメソッド（GETでどのパスにも一致しない場合を含む）
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl CrewRoute {
    /// リクエストからルートを解決
    pub fn resolve(request: &CrewRequest) -> Result<Self, RouteError> {
        match request.method {
            Method::GET => Self::resolve_get(request),
            Method::POST => Ok(CrewRoute::Create),
            Method::PUT => Ok(CrewRoute::Update),
            Method::DELETE => Self::resolve_delete(request),
            _ => Err(RouteError::MethodNotAllowed),
        }
    }

    fn resolve_get(request: &CrewRequest) -> Result<Self, RouteError> {
        let path = request.path.as_str();
        let role = non_empty(&request.role);
        let movie_id = non_empty(&request.movie_id);

        if path.contains("/crew/") && path.contains("/movies/") {
            let movie_id = movie_id.and_then(parse_movie_id);
            return match (role, movie_id) {
                (Some(role), Some(movie_id)) => Ok(CrewRoute::CrewByRole {
                    key: CrewRoleKey::new(movie_id, role),
                    verbose: request.is_verbose(),
                }),
                _ => Err(RouteError::InvalidCrewParameters),
            };
        }

        if COLLECTION_PATHS.contains(&path) {
            return Ok(CrewRoute::ListAll);
        }

        if let Some(raw) = movie_id {
            let movie_id =
                parse_movie_id(raw).ok_or_else(|| RouteError::InvalidMovieId(raw.to_string()))?;
            return Ok(match role {
                Some(role) => CrewRoute::GetRole(CrewRoleKey::new(movie_id, role)),
                None => CrewRoute::ListByMovie { movie_id },
            });
        }

        Err(RouteError::MethodNotAllowed)
    }

    fn resolve_delete(request: &CrewRequest) -> Result<Self, RouteError> {
        let (Some(raw), Some(role)) = (non_empty(&request.movie_id), non_empty(&request.role))
        else {
            return Err(RouteError::MissingDeleteParameters);
        };

        let movie_id =
            parse_movie_id(raw).ok_or_else(|| RouteError::InvalidMovieId(raw.to_string()))?;
        Ok(CrewRoute::Delete(CrewRoleKey::new(movie_id, role)))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_movie_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> CrewRequest {
        CrewRequest::new(Method::GET, path)
    }

    #[test]
    fn test_crew_path_exact_lookup() {
        let request = get("/crew/Director/movies/1")
            .with_role("Director")
            .with_movie_id("1");

        assert_eq!(
            CrewRoute::resolve(&request),
            Ok(CrewRoute::CrewByRole {
                key: CrewRoleKey::new(1, "Director"),
                verbose: false
            })
        );
    }

    #[test]
    fn test_crew_path_verbose() {
        let request = get("/crew/Director/movies/1")
            .with_role("Director")
            .with_movie_id("1")
            .with_verbose("true");

        assert!(matches!(
            CrewRoute::resolve(&request),
            Ok(CrewRoute::CrewByRole { verbose: true, .. })
        ));
    }

    #[test]
    fn test_crew_path_invalid_parameters() {
        let cases = [
            get("/crew/Director/movies/abc")
                .with_role("Director")
                .with_movie_id("abc"),
            get("/crew/Director/movies/1").with_movie_id("1"),
            get("/crew/Director/movies/1").with_role("Director"),
            get("/crew//movies/1").with_role("").with_movie_id("1"),
        ];

        for request in cases {
            assert_eq!(
                CrewRoute::resolve(&request),
                Err(RouteError::InvalidCrewParameters),
                "request: {:?}",
                request
            );
        }
    }

    #[test]
    fn test_collection_paths() {
        for path in COLLECTION_PATHS {
            assert_eq!(CrewRoute::resolve(&get(path)), Ok(CrewRoute::ListAll));
        }
    }

    #[test]
    fn test_movie_id_only_lists_partition() {
        let request = get("/42").with_movie_id("42");

        assert_eq!(
            CrewRoute::resolve(&request),
            Ok(CrewRoute::ListByMovie { movie_id: 42 })
        );
    }

    #[test]
    fn test_movie_id_and_role_gets_single() {
        let request = get("/42/Writer").with_movie_id("42").with_role("Writer");

        assert_eq!(
            CrewRoute::resolve(&request),
            Ok(CrewRoute::GetRole(CrewRoleKey::new(42, "Writer")))
        );
    }

    #[test]
    fn test_non_integer_movie_id_is_rejected() {
        let request = get("/forty-two").with_movie_id("forty-two");

        assert_eq!(
            CrewRoute::resolve(&request),
            Err(RouteError::InvalidMovieId("forty-two".to_string()))
        );
    }

    #[test]
    fn test_unmatched_get_is_method_not_allowed() {
        assert_eq!(
            CrewRoute::resolve(&get("/unknown")),
            Err(RouteError::MethodNotAllowed)
        );
    }

    #[test]
    fn test_post_and_put_routes() {
        assert_eq!(
            CrewRoute::resolve(&CrewRequest::new(Method::POST, "/patha")),
            Ok(CrewRoute::Create)
        );
        assert_eq!(
            CrewRoute::resolve(&CrewRequest::new(Method::PUT, "/patha")),
            Ok(CrewRoute::Update)
        );
    }

    #[test]
    fn test_delete_requires_both_parameters() {
        let missing_role = CrewRequest::new(Method::DELETE, "/1").with_movie_id("1");
        let missing_movie = CrewRequest::new(Method::DELETE, "/Director").with_role("Director");

        assert_eq!(
            CrewRoute::resolve(&missing_role),
            Err(RouteError::MissingDeleteParameters)
        );
        assert_eq!(
            CrewRoute::resolve(&missing_movie),
            Err(RouteError::MissingDeleteParameters)
        );

        let valid = CrewRequest::new(Method::DELETE, "/1/Director")
            .with_movie_id("1")
            .with_role("Director");
        assert_eq!(
            CrewRoute::resolve(&valid),
            Ok(CrewRoute::Delete(CrewRoleKey::new(1, "Director")))
        );
    }

    #[test]
    fn test_other_methods_not_allowed() {
        for method in [Method::PATCH, Method::HEAD, Method::OPTIONS] {
            assert_eq!(
                CrewRoute::resolve(&CrewRequest::new(method, "/patha")),
                Err(RouteError::MethodNotAllowed)
            );
        }
    }

    #[test]
    fn test_route_error_messages() {
        assert_eq!(
            RouteError::InvalidCrewParameters.to_string(),
            "Invalid parameters. Role and movieId are required."
        );
        assert_eq!(
            RouteError::InvalidMovieId("x".to_string()).to_string(),
            "Invalid movieId: x"
        );
        assert_eq!(RouteError::MethodNotAllowed.to_string(), "Method not allowed");
    }
}
