//! N.I.N.A. status snapshot
//!
//! OpenAPI仕様書から読み取り専用のステータスエンドポイントを選び出し、
//! デバイスから取得した結果をファイルに保存する。

#![warn(missing_docs)]

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// HTTP取得
pub mod fetch;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 取得パイプライン
pub mod pipeline;

/// 結果の書き出し
pub mod report;

/// 仕様書の読み込みとエンドポイント分類
pub mod spec;

pub use fetch::{HttpFetcher, FETCH_TIMEOUT};
pub use pipeline::{Pipeline, RunReport};
