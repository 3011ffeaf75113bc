//! HTTP fetcher
//!
//! 1エンドポイントにつき1回だけGETを送り、結果を `FetchOutcome` として返す。
//! 通信失敗・2xx以外・JSON以外のボディはすべて失敗結果として記録し、
//! この境界より外にエラーを伝播させない。リトライはしない。

use std::error::Error as StdError;
use std::time::Duration;

use chrono::Local;
use nina_status_common::{FetchError, FetchOutcome, Operation};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// リクエストごとのタイムアウト
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// デバイスAPIへのGETクライアント
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// 新しいフェッチャーを作成
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// 既存のHTTPクライアントを使って作成
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout: FETCH_TIMEOUT,
        }
    }

    /// タイムアウトを設定
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// ベースURL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 適用するタイムアウト
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch one endpoint
    ///
    /// Never fails: every error is captured in the returned outcome.
    pub async fn fetch(&self, endpoint: &Operation) -> FetchOutcome {
        let url = endpoint.url(&self.base_url);
        debug!(url = %url, "Fetching endpoint");

        let result = self.get_json(&url).await;
        let fetched_at = Local::now();

        match result {
            Ok((status, data)) => {
                debug!(url = %url, status, "Fetch succeeded");
                FetchOutcome::succeeded(endpoint.clone(), url, status, data, &fetched_at)
            }
            Err(err) => {
                debug!(url = %url, error = %err, "Fetch failed");
                FetchOutcome::failed(endpoint.clone(), url, err.to_string(), &fetched_at)
            }
        }
    }

    async fn get_json(&self, url: &str) -> Result<(u16, Value), FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify_error(url, e))?;
        let data = serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok((status.as_u16(), data))
    }

    fn classify_error(&self, url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if err.is_connect() {
            FetchError::Connect {
                url: url.to_string(),
                reason: root_cause(&err),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                reason: root_cause(&err),
            }
        }
    }
}

/// エラーチェーンの最も内側のメッセージ
fn root_cause(err: &(dyn StdError + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
