//! 実行時ディレクトリ（POKEDEX_HOME / XDG 解決結果）
//!
//! EnvResolver::resolve_home_dir() の結果から設定・ログのパスを計算する。

use super::HomeDir;
use std::path::PathBuf;

/// 解決済みの config / log パス
#[derive(Debug, Clone)]
pub struct Dirs {
    pub home_dir: HomeDir,
}

impl Dirs {
    pub fn new(home_dir: HomeDir) -> Self {
        Self { home_dir }
    }

    /// 設定ファイル（$POKEDEX_HOME/config.json）
    pub fn config_path(&self) -> PathBuf {
        self.home_dir.join("config.json")
    }

    /// ログ格納ディレクトリ
    pub fn logs_dir(&self) -> PathBuf {
        self.home_dir.join("log")
    }

    /// JSONL ログファイル
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("pokedex.jsonl")
    }
}
