//! config.json 用の設定型
//!
//! `$POKEDEX_HOME/config.json` の値を既定値に重ねる。ファイルが無ければ既定値のみ。
//! CLI フラグによる上書きは呼び出し側（pokedex の wiring）で行う。

use crate::domain::Dirs;
use crate::error::Error;
use crate::ports::outbound::FileSystem;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIMIT: u32 = 600;
pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// 解決済みの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokedexConfig {
    /// 末尾の `/` は取り除いて保持する
    pub base_url: String,
    pub limit: u32,
    pub concurrency: usize,
    /// 1 リクエストあたりのタイムアウト。0 は無制限。
    pub timeout_secs: u64,
    pub page_size: usize,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// serde 用の内部構造（すべて省略可）
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PokedexConfigRaw {
    base_url: Option<String>,
    limit: Option<u32>,
    concurrency: Option<usize>,
    timeout_secs: Option<u64>,
    page_size: Option<usize>,
}

pub fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl PokedexConfig {
    /// JSON 文字列からパース（ファイル読みは load で行う）
    pub fn parse(json: &str) -> Result<Self, Error> {
        let raw: PokedexConfigRaw =
            serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))?;
        let defaults = Self::default();
        let config = Self {
            base_url: raw
                .base_url
                .map(|u| trim_base_url(&u))
                .unwrap_or(defaults.base_url),
            limit: raw.limit.unwrap_or(defaults.limit),
            concurrency: raw.concurrency.unwrap_or(defaults.concurrency),
            timeout_secs: raw.timeout_secs.unwrap_or(defaults.timeout_secs),
            page_size: raw.page_size.unwrap_or(defaults.page_size),
        };
        config.validate()?;
        Ok(config)
    }

    /// config.json を読む。存在しなければ既定値。
    pub fn load(fs: &dyn FileSystem, dirs: &Dirs) -> Result<Self, Error> {
        let path = dirs.config_path();
        if !fs.exists(&path) {
            return Ok(Self::default());
        }
        let body = fs.read_to_string(&path)?;
        Self::parse(&body).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.base_url.is_empty() {
            return Err(Error::config("base_url must not be empty"));
        }
        if self.limit == 0 {
            return Err(Error::config("limit must be a positive integer"));
        }
        if self.concurrency == 0 {
            return Err(Error::config("concurrency must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(Error::config("page_size must be at least 1"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use crate::domain::HomeDir;

    #[test]
    fn test_parse_empty_object_uses_defaults() {
        let config = PokedexConfig::parse("{}").unwrap();
        assert_eq!(config, PokedexConfig::default());
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.limit, 600);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_parse_overrides_and_trims_base_url() {
        let config = PokedexConfig::parse(
            r#"{"base_url": "http://localhost:8080/api/v2/", "limit": 151, "concurrency": 4, "timeout_secs": 0}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.limit, 151);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_parse_rejects_unknown_field_and_zero_values() {
        let err = PokedexConfig::parse(r#"{"limt": 10}"#).unwrap_err();
        assert_eq!(err.exit_code(), 78);
        let err = PokedexConfig::parse(r#"{"concurrency": 0}"#).unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = Dirs::new(HomeDir::new(dir.path()));
        let config = PokedexConfig::load(&StdFileSystem, &dirs).unwrap();
        assert_eq!(config, PokedexConfig::default());
    }

    #[test]
    fn test_load_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{not json").unwrap();
        let dirs = Dirs::new(HomeDir::new(dir.path()));
        let err = PokedexConfig::load(&StdFileSystem, &dirs).unwrap_err();
        assert_eq!(err.exit_code(), 78);
        assert!(err.to_string().contains("config.json"));
    }
}
