//! reqwest（blocking）による HttpJsonSource 実装

use crate::error::Error;
use crate::ports::outbound::HttpJsonSource;
use std::time::Duration;

const USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));
const ERROR_BODY_MAX: usize = 200;

/// reqwest::blocking::Client を包んだ HttpJsonSource
///
/// Client は内部でコネクションプールを共有するので、ワーカー間で 1 つを使い回す。
pub struct ReqwestJsonSource {
    client: reqwest::blocking::Client,
    timeout: Option<Duration>,
}

impl ReqwestJsonSource {
    /// * `timeout` - 1 リクエストあたりのタイムアウト（None のとき無制限）
    pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    /// リクエスト単位の打ち切り時間。クライアント既定と呼び出し側の短い方。
    fn effective_timeout(&self, requested: Option<Duration>) -> Option<Duration> {
        match (self.timeout, requested) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

fn body_excerpt(body: &str) -> String {
    if body.len() <= ERROR_BODY_MAX {
        return body.to_string();
    }
    let truncated = body.chars().take(ERROR_BODY_MAX).collect::<String>();
    format!("{}...", truncated)
}

impl HttpJsonSource for ReqwestJsonSource {
    fn get(&self, url: &str, timeout: Option<Duration>) -> Result<String, Error> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(t) = self.effective_timeout(timeout) {
            request = request.timeout(t);
        }
        let response = request
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::http(format!(
                "HTTP {}: {}",
                status,
                body_excerpt(&response_text)
            )));
        }

        Ok(response_text)
    }
}
