//! pokedex コマンドの enum（Command Pattern）
//!
//! 一覧 / 単体表示 / 進化表示の分岐を enum で明示する。

use crate::domain::CatalogQuery;
use common::domain::{DetailLevel, EntityName};
use std::time::Duration;

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// CLI フラグによる設定の上書き（None は config.json / 既定値に従う）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchOverrides {
    pub base_url: Option<String>,
    pub limit: Option<u32>,
    pub concurrency: Option<usize>,
    /// 1 リクエストあたりのタイムアウト（秒）
    pub timeout_secs: Option<u64>,
    /// セッション全体の期限
    pub deadline: Option<Duration>,
    pub page_size: Option<usize>,
}

/// pokedex の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum PokedexCommand {
    /// ヘルプ表示
    Help,
    /// 一覧を取得して絞り込み・ページ分けして表示
    List {
        detail_level: DetailLevel,
        query: CatalogQuery,
        format: OutputFormat,
    },
    /// 1 件の詳細表示
    Show {
        name: EntityName,
        detail_level: DetailLevel,
        format: OutputFormat,
    },
    /// 進化チェーン（平坦化済み）の表示
    Evolutions { name: EntityName },
}
