//! 結果の書き出し
//!
//! - combined: 1つの結合JSON + カテゴリ別テキストレポート
//! - per-endpoint: エンドポイントごとのJSON + サマリーマニフェスト
//!
//! 書き込み失敗は `SnapshotError::Write` として実行全体を中断する。

pub mod combined;
pub mod per_endpoint;
pub mod text;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use nina_status_common::{FetchOutcome, RunConfig, RunSummary, SnapshotError};
use serde::Serialize;
use tracing::debug;

/// 同一実行内で重複しない名前を払い出す
///
/// 既に使われた名前には `_2`, `_3`, ... を付けて区別する。
#[derive(Debug, Default)]
pub struct UniqueNames {
    used: HashSet<String>,
}

impl UniqueNames {
    /// 予約済みの名前を指定して作成
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            used: reserved.into_iter().map(Into::into).collect(),
        }
    }

    /// 名前を確保して返す
    pub fn claim(&mut self, name: &str) -> String {
        if self.used.insert(name.to_string()) {
            return name.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{}_{}", name, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// JSONを2スペースインデントで書き出す
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SnapshotError> {
    let body = serde_json::to_string_pretty(value)?;
    write_text(path, &body)
}

/// テキストを書き出す
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<(), SnapshotError> {
    std::fs::write(path, contents).map_err(|e| SnapshotError::write(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}

/// 設定された出力モードで結果を書き出し、書き込んだファイルのパスを返す
pub fn write_reports(
    config: &RunConfig,
    summary: &RunSummary,
    outcomes: &[FetchOutcome],
    generated_at: &DateTime<Local>,
) -> Result<Vec<PathBuf>, SnapshotError> {
    let dir = config.output_dir.as_path();
    std::fs::create_dir_all(dir).map_err(|e| SnapshotError::write(dir, e))?;

    let mut written = Vec::new();

    if config.mode.writes_combined() {
        written.push(combined::write(dir, summary, outcomes)?);
        written.push(text::write(dir, summary, outcomes, generated_at)?);
    }

    if config.mode.writes_per_endpoint() {
        let reserved = combined::reserved_stems(&summary.device_name);
        written.extend(per_endpoint::write(dir, summary, outcomes, reserved)?);
    }

    Ok(written)
}
