//! HTTP JSON 取得 Outbound ポート
//!
//! Fetcher はこの trait 経由でのみ上流 API に触れる。ファンアウトのワーカー間で共有するため Send + Sync。

use crate::error::Error;
use std::time::Duration;

/// URL から JSON 本文を取得する抽象
///
/// 実装は `common::adapter::ReqwestJsonSource` やテスト用の `StubJsonSource` など。
pub trait HttpJsonSource: Send + Sync {
    /// GET して 2xx なら本文を返す。2xx 以外・通信失敗は `Error::Http`。
    ///
    /// `timeout` が Some のとき、このリクエストはその時間で打ち切る（クライアント既定より優先）。
    fn get(&self, url: &str, timeout: Option<Duration>) -> Result<String, Error>;
}
