//! エラーハンドリング
//!
//! 全レイヤーで共通の `Error` を使い、終了コードは `exit_code()` で sysexits 相当に写す。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// HTTP 通信・ステータスエラー
    #[error("{0}")]
    Http(String),
    /// JSON のパース・シリアライズ失敗
    #[error("{0}")]
    Json(String),
    #[error("{0}")]
    Io(String),
    /// 環境変数の解決失敗
    #[error("{0}")]
    Env(String),
    /// config.json の不正
    #[error("Invalid config: {0}")]
    Config(String),
    /// 一覧エンドポイントが使えない
    #[error("Failed to fetch Pokémon list: {0}")]
    ListUnavailable(String),
    /// 個別ポケモン（または依存リソース）が取れない
    #[error("Failed to fetch Pokémon '{name}': {message}")]
    EntityUnavailable { name: String, message: String },
    /// 呼び出し側が指定した期限を過ぎた
    #[error("Fetch deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// usage を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード（sysexits.h 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) => 65,
            Self::Http(_) | Self::ListUnavailable(_) | Self::EntityUnavailable { .. } => 69,
            Self::Env(_) => 70,
            Self::Io(_) => 74,
            Self::DeadlineExceeded => 75,
            Self::Config(_) => 78,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::http("HTTP 500");
        assert_eq!(err.exit_code(), 69);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_entity_unavailable_keeps_message() {
        let err = Error::EntityUnavailable {
            name: "pikachu".to_string(),
            message: "HTTP 404 Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch Pokémon 'pikachu': HTTP 404 Not Found"
        );
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn test_from_serde_json_error() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = e.into();
        assert_eq!(err.exit_code(), 65);
    }
}
