//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリと上流 URL の上書きを環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. POKEDEX_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/pokedex（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/pokedex
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// POKEDEX_BASE_URL（API のベース URL 上書き）
    fn base_url_override(&self) -> Option<String>;
}
