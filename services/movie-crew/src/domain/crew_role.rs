// 映画クルー役割レコード
//
// (movieId, role) の複合キーで一意に識別され、担当者名のリストを持つ。
// リクエストボディからの構築時に必須フィールドを検証する。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// パーティションキー属性名
pub const MOVIE_ID_ATTR: &str = "movieId";
/// ソートキー属性名
pub const ROLE_ATTR: &str = "role";

/// クルー役割レコードの検証エラー
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CrewRoleValidationError {
    /// movieId・role・namesのいずれかが欠落、または型が不正
    #[error("Missing required fields: movieId, role, and names are required")]
    MissingFields,
}

/// 複合キー
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrewRoleKey {
    pub movie_id: i64,
    pub role: String,
}

impl CrewRoleKey {
    pub fn new(movie_id: i64, role: impl Into<String>) -> Self {
        Self {
            movie_id,
            role: role.into(),
        }
    }
}

/// クルー役割レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewRole {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub role: String,
    pub names: Vec<String>,
}

impl CrewRole {
    pub fn new(movie_id: i64, role: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            movie_id,
            role: role.into(),
            names,
        }
    }

    /// レコードのキー
    pub fn key(&self) -> CrewRoleKey {
        CrewRoleKey::new(self.movie_id, self.role.clone())
    }

    /// パース済みリクエストボディからレコードを構築
    ///
    /// # Notes
    /// - movieId: 0以外の整数
    /// - role: 空でない文字列
    /// - names: 文字列の配列（空配列は許可）
    pub fn from_body(body: &Value) -> Result<Self, CrewRoleValidationError> {
        let movie_id = body
            .get(MOVIE_ID_ATTR)
            .and_then(Value::as_i64)
            .filter(|id| *id != 0)
            .ok_or(CrewRoleValidationError::MissingFields)?;

        let role = body
            .get(ROLE_ATTR)
            .and_then(Value::as_str)
            .filter(|role| !role.is_empty())
            .ok_or(CrewRoleValidationError::MissingFields)?;

        let names = body
            .get("names")
            .and_then(Value::as_array)
            .ok_or(CrewRoleValidationError::MissingFields)?
            .iter()
            .map(|name| name.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or(CrewRoleValidationError::MissingFields)?;

        Ok(Self::new(movie_id, role, names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_valid() {
        let body = json!({"movieId": 1, "role": "Director", "names": ["Jane Doe"]});

        let crew = CrewRole::from_body(&body).unwrap();

        assert_eq!(crew, CrewRole::new(1, "Director", vec!["Jane Doe".to_string()]));
        assert_eq!(crew.key(), CrewRoleKey::new(1, "Director"));
    }

    #[test]
    fn test_from_body_ignores_extra_fields() {
        let body = json!({"movieId": 7, "role": "Writer", "names": [], "extra": true});

        let crew = CrewRole::from_body(&body).unwrap();

        assert_eq!(crew.movie_id, 7);
        assert!(crew.names.is_empty());
    }

    #[test]
    fn test_from_body_missing_fields() {
        let cases = [
            json!({}),
            json!({"role": "Director", "names": ["A"]}),
            json!({"movieId": 1, "names": ["A"]}),
            json!({"movieId": 1, "role": "Director"}),
            json!({"movieId": 0, "role": "Director", "names": ["A"]}),
            json!({"movieId": 1, "role": "", "names": ["A"]}),
        ];

        for body in cases {
            assert_eq!(
                CrewRole::from_body(&body),
                Err(CrewRoleValidationError::MissingFields),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_from_body_wrong_types() {
        let cases = [
            json!({"movieId": "1", "role": "Director", "names": ["A"]}),
            json!({"movieId": 1.5, "role": "Director", "names": ["A"]}),
            json!({"movieId": 1, "role": 3, "names": ["A"]}),
            json!({"movieId": 1, "role": "Director", "names": "A"}),
            json!({"movieId": 1, "role": "Director", "names": ["A", 2]}),
        ];

        for body in cases {
            assert!(CrewRole::from_body(&body).is_err(), "body: {}", body);
        }
    }

    #[test]
    fn test_serialization_uses_camel_case_movie_id() {
        let crew = CrewRole::new(42, "Producer", vec!["A".to_string(), "B".to_string()]);

        let value = serde_json::to_value(&crew).unwrap();

        assert_eq!(
            value,
            json!({"movieId": 42, "role": "Producer", "names": ["A", "B"]})
        );
        assert_eq!(serde_json::from_value::<CrewRole>(value).unwrap(), crew);
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            CrewRoleValidationError::MissingFields.to_string(),
            "Missing required fields: movieId, role, and names are required"
        );
    }
}
