//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! - `SnapshotError`: 実行全体を中断する致命的エラー（仕様書の読込失敗・書込失敗）
//! - `FetchError`: 1エンドポイント単位の取得失敗。結果データとして記録され、実行は継続する

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Run-level error type
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// 仕様書に `paths` や `info.version` が無い、またはJSONとして不正
    #[error("Malformed spec {origin}: {reason}")]
    MalformedSpec {
        /// 仕様書の出所（ファイルパス等）
        origin: String,
        /// 不正の内容
        reason: String,
    },

    /// 仕様書ファイルを読めない
    #[error("Failed to read spec {}: {source}", .path.display())]
    SpecRead {
        /// 仕様書のパス
        path: PathBuf,
        /// 原因
        #[source]
        source: std::io::Error,
    },

    /// 出力ファイルの書き込み失敗
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// 出力先パス
        path: PathBuf,
        /// 原因
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SnapshotError {
    /// `MalformedSpec` を作成
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSpec {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// `Write` を作成
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Per-endpoint fetch failure
///
/// `Display` の出力がそのまま結果の `error` メッセージになる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// タイムアウト
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout {
        /// リクエストURL
        url: String,
        /// 適用したタイムアウト
        timeout: Duration,
    },

    /// 接続失敗（名前解決・接続拒否など）
    #[error("Connection to {url} failed: {reason}")]
    Connect {
        /// リクエストURL
        url: String,
        /// 原因
        reason: String,
    },

    /// その他のトランスポートエラー
    #[error("Request to {url} failed: {reason}")]
    Transport {
        /// リクエストURL
        url: String,
        /// 原因
        reason: String,
    },

    /// 2xx以外のステータス
    #[error("HTTP {status} for url: {url}")]
    Status {
        /// HTTPステータスコード
        status: u16,
        /// リクエストURL
        url: String,
    },

    /// レスポンスボディがJSONではない
    #[error("Invalid JSON response from {url}: {reason}")]
    Decode {
        /// リクエストURL
        url: String,
        /// 原因
        reason: String,
    },
}
