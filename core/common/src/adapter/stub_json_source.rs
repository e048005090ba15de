//! メモリ上の固定レスポンスを返す HttpJsonSource（テスト・オフライン確認用）
//!
//! URL ごとに本文・失敗・遅延を登録できる。未登録の URL は HTTP 404 扱い。

use crate::error::Error;
use crate::ports::outbound::HttpJsonSource;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum StubResponse {
    Body(String),
    Status(u16),
}

/// 固定レスポンスを返す Stub
#[derive(Debug, Default)]
pub struct StubJsonSource {
    responses: HashMap<String, StubResponse>,
    delays: HashMap<String, Duration>,
    requested: Mutex<Vec<String>>,
}

impl StubJsonSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// url に対して 200 + body を返す
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), StubResponse::Body(body.into()));
        self
    }

    /// url に対して失敗ステータスを返す
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), StubResponse::Status(status));
        self
    }

    /// url の応答前に待つ時間（完了順を入れ替えるテスト用）
    pub fn with_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// これまでに要求された URL（要求順）
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl HttpJsonSource for StubJsonSource {
    fn get(&self, url: &str, timeout: Option<Duration>) -> Result<String, Error> {
        if let Ok(mut r) = self.requested.lock() {
            r.push(url.to_string());
        }
        if let Some(&delay) = self.delays.get(url) {
            // 遅延がタイムアウトを超えるなら、タイムアウト分だけ待って失敗する
            if let Some(t) = timeout.filter(|t| *t < delay) {
                std::thread::sleep(t);
                return Err(Error::http(format!("HTTP request failed: timed out after {:?}", t)));
            }
            std::thread::sleep(delay);
        }
        match self.responses.get(url) {
            Some(StubResponse::Body(body)) => Ok(body.clone()),
            Some(StubResponse::Status(status)) => Err(Error::http(format!("HTTP {}", status))),
            None => Err(Error::http("HTTP 404 Not Found")),
        }
    }
}
