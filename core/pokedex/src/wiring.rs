//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;
use std::time::Duration;

use common::adapter::{
    FileJsonLog, ReqwestJsonSource, StdEnvResolver, StdFileSystem, StderrLog, TeeLog,
};
use common::config::{trim_base_url, PokedexConfig};
use common::domain::Dirs;
use common::error::Error;
use common::pokeapi::Fetcher;
use common::ports::outbound::{EnvResolver, FileSystem, HttpJsonSource, Log};

use crate::cli::Config;
use crate::domain::FetchOverrides;
use crate::usecase::PokedexUseCase;

/// 組み立て済みのアプリ（main の Runner が保持する）
pub struct App {
    pub use_case: PokedexUseCase,
    pub logger: Arc<dyn Log>,
}

/// config.json（既定値込み）に環境変数・CLI フラグを重ねる
///
/// 優先順位: CLI フラグ > POKEDEX_BASE_URL > config.json > 既定値
pub fn apply_overrides(
    mut config: PokedexConfig,
    env_base_url: Option<String>,
    overrides: &FetchOverrides,
) -> Result<PokedexConfig, Error> {
    if let Some(url) = overrides.base_url.clone().or(env_base_url) {
        config.base_url = trim_base_url(&url);
    }
    if let Some(limit) = overrides.limit {
        config.limit = limit;
    }
    if let Some(concurrency) = overrides.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(timeout) = overrides.timeout_secs {
        config.timeout_secs = timeout;
    }
    if let Some(page_size) = overrides.page_size {
        config.page_size = page_size;
    }
    config.validate().map_err(|e| match e {
        Error::Config(msg) => Error::invalid_argument(msg),
        other => other,
    })?;
    Ok(config)
}

/// 配線: 標準アダプタ（reqwest / std::fs / std::env）で App を組み立てる
pub fn wire_pokedex(cli: &Config) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver = StdEnvResolver;
    let dirs = Dirs::new(env_resolver.resolve_home_dir()?);

    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), dirs.log_file()));
    let logger: Arc<dyn Log> = if cli.verbose {
        let stderr_log: Arc<dyn Log> = Arc::new(StderrLog::new());
        Arc::new(TeeLog::new(vec![file_log, stderr_log]))
    } else {
        file_log
    };

    let file_config = PokedexConfig::load(fs.as_ref(), &dirs)?;
    let config = apply_overrides(file_config, env_resolver.base_url_override(), &cli.overrides)?;
    let source: Arc<dyn HttpJsonSource> =
        Arc::new(ReqwestJsonSource::new(config.request_timeout())?);

    Ok(wire_with(config, cli.overrides.deadline, source, logger))
}

/// 任意の HttpJsonSource / Log で App を組み立てる（テストは Stub を渡す）
pub fn wire_with(
    config: PokedexConfig,
    deadline: Option<Duration>,
    source: Arc<dyn HttpJsonSource>,
    logger: Arc<dyn Log>,
) -> App {
    let fetcher = Fetcher::new(source, Arc::clone(&logger), &config.base_url);
    let use_case = PokedexUseCase::new(fetcher, config, deadline, Arc::clone(&logger));
    App { use_case, logger }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_precedence() {
        let file = PokedexConfig {
            base_url: "http://from-file".to_string(),
            ..Default::default()
        };
        let overrides = FetchOverrides::default();
        let c = apply_overrides(file.clone(), Some("http://from-env/".to_string()), &overrides)
            .unwrap();
        assert_eq!(c.base_url, "http://from-env");

        let overrides = FetchOverrides {
            base_url: Some("http://from-cli".to_string()),
            limit: Some(151),
            page_size: Some(20),
            ..Default::default()
        };
        let c = apply_overrides(file, Some("http://from-env".to_string()), &overrides).unwrap();
        assert_eq!(c.base_url, "http://from-cli");
        assert_eq!(c.limit, 151);
        assert_eq!(c.page_size, 20);
        assert_eq!(c.concurrency, common::config::DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_apply_overrides_invalid_is_usage_error() {
        let overrides = FetchOverrides {
            base_url: Some("/".to_string()),
            ..Default::default()
        };
        let err = apply_overrides(PokedexConfig::default(), None, &overrides).unwrap_err();
        assert!(err.is_usage());
    }
}
