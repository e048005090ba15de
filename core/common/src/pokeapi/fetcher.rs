//! PokéAPI Fetcher
//!
//! 一覧を 1 回取得し、summary ごとに詳細（と必要なら species → evolution-chain）をファンアウトする。
//! ワーカー数は `FetchOptions::concurrency` で上限を付け、結果は完了順ではなく summary 順に並べる。
//! どれか 1 件でも失敗したらセッション全体を失敗にし、部分結果は返さない。

use crate::config::DEFAULT_CONCURRENCY;
use crate::domain::{DetailLevel, EntityName, EntityRecord, EntitySummary, EvolutionNode};
use crate::error::Error;
use crate::pokeapi::evolution::flatten;
use crate::pokeapi::normalize::{normalize, normalize_named};
use crate::pokeapi::wire::{RawEvolutionChain, RawPokemonDetail, RawPokemonList, RawSpecies};
use crate::ports::outbound::{HttpJsonSource, Log, LogLevel, LogRecord};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

const LOG_LAYER: &str = "fetcher";

/// 取得セッションのエラー（どれも終端。リトライしない）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// 一覧エンドポイントに到達できない、または 2xx 以外
    #[error("Failed to fetch Pokémon list: {message}")]
    ListUnavailable { message: String },
    /// あるエンティティの詳細・依存リソースが取れない
    #[error("Failed to fetch Pokémon '{name}': {message}")]
    EntityUnavailable { name: String, message: String },
    /// 呼び出し側の期限を過ぎた
    #[error("Fetch deadline exceeded")]
    DeadlineExceeded,
}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::ListUnavailable { message } => Error::ListUnavailable(message),
            FetchError::EntityUnavailable { name, message } => {
                Error::EntityUnavailable { name, message }
            }
            FetchError::DeadlineExceeded => Error::DeadlineExceeded,
        }
    }
}

/// fetch_all の入力
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// 一覧に渡す件数（上限は API 側が丸める）
    pub limit: u32,
    pub detail_level: DetailLevel,
    /// 同時に走らせるエンティティ単位のパイプライン数
    pub concurrency: usize,
    /// これを過ぎたら DeadlineExceeded（実行中のリクエストも残り時間で打ち切る）
    pub deadline: Option<Instant>,
}

impl FetchOptions {
    pub fn new(limit: u32, detail_level: DetailLevel) -> Self {
        Self {
            limit,
            detail_level,
            concurrency: DEFAULT_CONCURRENCY,
            deadline: None,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// 今から `timeout` 後を期限にする
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }
}

/// PokéAPI の取得と正規化を行う
pub struct Fetcher {
    source: Arc<dyn HttpJsonSource>,
    log: Arc<dyn Log>,
    base_url: String,
}

impl Fetcher {
    pub fn new(source: Arc<dyn HttpJsonSource>, log: Arc<dyn Log>, base_url: &str) -> Self {
        Self {
            source,
            log,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn list_url(&self, limit: u32) -> String {
        format!("{}/pokemon?limit={}", self.base_url, limit)
    }

    pub fn detail_url(&self, name: &EntityName) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    /// 一覧 → 詳細ファンアウトを行い、summary 順の EntityRecord 列を返す
    pub fn fetch_all(&self, opts: &FetchOptions) -> Result<Vec<EntityRecord>, FetchError> {
        let started = Instant::now();
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "fetch started")
                .layer(LOG_LAYER)
                .kind("lifecycle")
                .field("limit", opts.limit)
                .field("detail_level", opts.detail_level.as_str())
                .field("concurrency", opts.concurrency),
        );

        let summaries = self.fetch_summaries(opts.limit, opts.deadline)?;
        let records = self.fan_out(&summaries, opts)?;

        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "fetch finished")
                .layer(LOG_LAYER)
                .kind("perf")
                .field("count", records.len())
                .field("elapsed_ms", started.elapsed().as_millis() as u64),
        );
        Ok(records)
    }

    /// 一覧エンドポイントから summary 列を取得する
    pub fn fetch_summaries(
        &self,
        limit: u32,
        deadline: Option<Instant>,
    ) -> Result<Vec<EntitySummary>, FetchError> {
        let list: RawPokemonList = self
            .get_json(&self.list_url(limit), deadline)
            .map_err(|e| match e {
                Error::DeadlineExceeded => FetchError::DeadlineExceeded,
                other => {
                    let _ = self.log.log(
                        &LogRecord::new(LogLevel::Error, other.to_string())
                            .layer(LOG_LAYER)
                            .kind("error"),
                    );
                    FetchError::ListUnavailable {
                        message: other.to_string(),
                    }
                }
            })?;
        Ok(list
            .results
            .into_iter()
            .map(|r| EntitySummary::new(r.name, r.url))
            .collect())
    }

    /// 名前（または図鑑番号）で 1 件だけ取得する。名前は詳細側の値を使う。
    pub fn fetch_one(
        &self,
        name: &EntityName,
        level: DetailLevel,
        deadline: Option<Instant>,
    ) -> Result<EntityRecord, FetchError> {
        self.get_json::<RawPokemonDetail>(&self.detail_url(name), deadline)
            .and_then(|raw| {
                let display_name = if raw.name.is_empty() {
                    name.to_string()
                } else {
                    raw.name.clone()
                };
                let record = normalize_named(&display_name, &raw, level);
                self.complete_record(record, &raw, level, deadline)
            })
            .map_err(|e| self.entity_error(name, e))
    }

    /// 有界ワーカーで summary ごとのパイプラインを回し、summary 順に組み立てる
    fn fan_out(
        &self,
        summaries: &[EntitySummary],
        opts: &FetchOptions,
    ) -> Result<Vec<EntityRecord>, FetchError> {
        if summaries.is_empty() {
            return Ok(Vec::new());
        }
        let workers = opts.concurrency.clamp(1, summaries.len());
        let next = AtomicUsize::new(0);
        let failed = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel::<(usize, Result<EntityRecord, FetchError>)>();

        thread::scope(|s| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                let failed = &failed;
                s.spawn(move || loop {
                    // 失敗後は新しいパイプラインを始めない
                    if failed.load(Ordering::SeqCst) {
                        break;
                    }
                    let i = next.fetch_add(1, Ordering::SeqCst);
                    let Some(summary) = summaries.get(i) else {
                        break;
                    };
                    let result = self.fetch_entity(summary, opts.detail_level, opts.deadline);
                    if result.is_err() {
                        failed.store(true, Ordering::SeqCst);
                    }
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                });
            }
        });
        drop(tx);

        let mut slots: Vec<Option<EntityRecord>> = vec![None; summaries.len()];
        let mut first_err: Option<(usize, FetchError)> = None;
        for (i, result) in rx {
            match result {
                Ok(record) => slots[i] = Some(record),
                Err(e) => {
                    if first_err.as_ref().map_or(true, |(j, _)| i < *j) {
                        first_err = Some((i, e));
                    }
                }
            }
        }
        if let Some((_, e)) = first_err {
            return Err(e);
        }

        slots
            .into_iter()
            .zip(summaries)
            .map(|(slot, summary)| {
                slot.ok_or_else(|| FetchError::EntityUnavailable {
                    name: summary.name.clone(),
                    message: "no result".to_string(),
                })
            })
            .collect()
    }

    /// summary 1 件分のパイプライン（詳細 → 必要なら species → evolution-chain）
    fn fetch_entity(
        &self,
        summary: &EntitySummary,
        level: DetailLevel,
        deadline: Option<Instant>,
    ) -> Result<EntityRecord, FetchError> {
        self.get_json::<RawPokemonDetail>(&summary.detail_url, deadline)
            .and_then(|raw| {
                let record = normalize(summary, &raw, level);
                self.complete_record(record, &raw, level, deadline)
            })
            .map_err(|e| self.entity_error(&summary.name, e))
    }

    /// 詳細レベルに応じて依存リソース（進化）を埋める
    fn complete_record(
        &self,
        mut record: EntityRecord,
        raw: &RawPokemonDetail,
        level: DetailLevel,
        deadline: Option<Instant>,
    ) -> Result<EntityRecord, Error> {
        if level.includes_evolutions() {
            record.evolutions = Some(self.fetch_evolutions(raw, deadline)?);
        }
        Ok(record)
    }

    /// species → evolution-chain を辿って平坦化した種族名列を返す
    ///
    /// species に evolution_chain が無い場合はその種族だけの列にする。
    fn fetch_evolutions(
        &self,
        raw: &RawPokemonDetail,
        deadline: Option<Instant>,
    ) -> Result<Vec<String>, Error> {
        let species_ref = raw
            .species
            .as_ref()
            .ok_or_else(|| Error::json("Detail response has no species reference"))?;
        let species: RawSpecies = self.get_json(&species_ref.url, deadline)?;
        let Some(chain_ref) = species.evolution_chain else {
            return Ok(vec![species_ref.name.clone()]);
        };
        let chain: RawEvolutionChain = self.get_json(&chain_ref.url, deadline)?;
        Ok(flatten(&EvolutionNode::from(&chain.chain)))
    }

    fn entity_error(&self, name: &str, e: Error) -> FetchError {
        if e == Error::DeadlineExceeded {
            return FetchError::DeadlineExceeded;
        }
        let message = e.to_string();
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Error, format!("entity fetch failed: {}", message))
                .layer(LOG_LAYER)
                .kind("error")
                .field("name", name),
        );
        FetchError::EntityUnavailable {
            name: name.to_string(),
            message,
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        deadline: Option<Instant>,
    ) -> Result<T, Error> {
        let remaining = match deadline {
            Some(d) => match d.checked_duration_since(Instant::now()) {
                Some(left) if !left.is_zero() => Some(left),
                _ => return Err(Error::DeadlineExceeded),
            },
            None => None,
        };
        // 実行中のリクエストも残り時間で打ち切る。期限を過ぎての失敗は DeadlineExceeded に揃える。
        let body = self.source.get(url, remaining).map_err(|e| {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                Error::DeadlineExceeded
            } else {
                e
            }
        })?;
        serde_json::from_str(&body)
            .map_err(|e| Error::json(format!("Failed to parse response JSON from {}: {}", url, e)))
    }
}
