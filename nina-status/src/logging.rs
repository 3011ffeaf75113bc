//! ロギング初期化ユーティリティ
//!
//! 診断ログは `tracing` で標準エラーへ出力する。進捗表示（標準出力）とは分離する。

use tracing_subscriber::EnvFilter;

use crate::config::{get_env_with_fallback_or, is_env_flag_set};

/// ログレベルを指定する環境変数
pub const LOG_LEVEL_ENV: &str = "NINA_STATUS_LOG_LEVEL";

/// デフォルトのログレベル（進捗表示を妨げないよう warn）
const DEFAULT_LOG_LEVEL: &str = "warn";

/// `--verbose` 指定時のフィルタ
const VERBOSE_FILTER: &str = "warn,nina_status=debug";

/// 使用するフィルタ文字列を決定
pub fn resolve_filter(verbose: bool) -> String {
    if verbose {
        return VERBOSE_FILTER.to_string();
    }
    get_env_with_fallback_or(LOG_LEVEL_ENV, "RUST_LOG", DEFAULT_LOG_LEVEL)
}

/// グローバルなtracing subscriberを初期化
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_new(resolve_filter(verbose))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!is_env_flag_set("NO_COLOR"))
        .try_init()
}
