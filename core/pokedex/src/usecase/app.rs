//! 一覧 / 単体表示 / 進化表示のユースケース
//!
//! Fetcher で取得した EntityRecord 列をカタログ条件で絞り込み、ページに切って返す。
//! 表示は cli::render が担当する。

use crate::domain::catalog::{filter, paginate};
use crate::domain::{CatalogQuery, Page};
use common::config::PokedexConfig;
use common::domain::{DetailLevel, EntityName, EntityRecord};
use common::error::Error;
use common::pokeapi::{FetchOptions, Fetcher};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;
use std::time::{Duration, Instant};

const LOG_LAYER: &str = "usecase";

pub struct PokedexUseCase {
    fetcher: Fetcher,
    config: PokedexConfig,
    /// セッション全体の期限（呼び出し時点から数える）
    deadline: Option<Duration>,
    log: Arc<dyn Log>,
}

impl PokedexUseCase {
    pub fn new(
        fetcher: Fetcher,
        config: PokedexConfig,
        deadline: Option<Duration>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            fetcher,
            config,
            deadline,
            log,
        }
    }

    fn session_deadline(&self) -> Option<Instant> {
        self.deadline.map(|d| Instant::now() + d)
    }

    /// 全件取得 → 絞り込み → ページ切り出し
    pub fn list(
        &self,
        detail_level: DetailLevel,
        query: &CatalogQuery,
    ) -> Result<Page<EntityRecord>, Error> {
        let page_size = query.page_size.unwrap_or(self.config.page_size);
        if query.page == 0 {
            return Err(Error::invalid_argument("Page numbers start at 1"));
        }
        let mut opts = FetchOptions::new(self.config.limit, detail_level)
            .with_concurrency(self.config.concurrency);
        if let Some(deadline) = self.session_deadline() {
            opts = opts.with_deadline(deadline);
        }
        let records = self.fetcher.fetch_all(&opts)?;
        let fetched = records.len();
        let page = paginate(filter(records, query), query.page, page_size)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "catalog page built")
                .layer(LOG_LAYER)
                .kind("usecase")
                .field("fetched", fetched)
                .field("matches", page.total)
                .field("page", page.page)
                .field("page_count", page.page_count),
        );
        Ok(page)
    }

    /// 1 件の詳細
    pub fn show(&self, name: &EntityName, detail_level: DetailLevel) -> Result<EntityRecord, Error> {
        Ok(self
            .fetcher
            .fetch_one(name, detail_level, self.session_deadline())?)
    }

    /// 平坦化した進化チェーン
    pub fn evolutions(&self, name: &EntityName) -> Result<Vec<String>, Error> {
        let record = self.show(name, DetailLevel::WithEvolutions)?;
        Ok(record.evolutions.unwrap_or_default())
    }
}
