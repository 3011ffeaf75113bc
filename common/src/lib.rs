//! NINA Status Common
//!
//! fetcher本体とテストで共有する型・設定・エラー定義

#![warn(missing_docs)]

/// 実行設定
pub mod config;

/// エラー型定義
pub mod error;

/// コアデータ型
pub mod types;

pub use config::{OutputMode, RunConfig};
pub use error::{FetchError, SnapshotError};
pub use types::{FetchOutcome, Operation, RunSummary};
