/// リポジトリ操作の共通エラー型
use thiserror::Error;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// 条件付き書き込みが拒否された（同じキーのレコードが既に存在）
    #[error("Conditional check failed: item already exists ({0})")]
    AlreadyExists(String),

    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for RepositoryError {
    fn from(err: serde_dynamo::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        assert_eq!(
            RepositoryError::AlreadyExists("movieId=1, role=Director".to_string()).to_string(),
            "Conditional check failed: item already exists (movieId=1, role=Director)"
        );
        assert_eq!(
            RepositoryError::WriteError("throttled".to_string()).to_string(),
            "Write error: throttled"
        );
        assert_eq!(
            RepositoryError::ReadError("timeout".to_string()).to_string(),
            "Read error: timeout"
        );
        assert_eq!(
            RepositoryError::SerializationError("invalid format".to_string()).to_string(),
            "Serialization error: invalid format"
        );
    }

    #[test]
    fn test_repository_error_equality() {
        assert_eq!(
            RepositoryError::WriteError("test".to_string()),
            RepositoryError::WriteError("test".to_string())
        );
        assert_ne!(
            RepositoryError::WriteError("test".to_string()),
            RepositoryError::ReadError("test".to_string())
        );
    }
}
