//! エンドポイント別出力
//!
//! 各エンドポイントの結果を `<パスを_で連結>.json` に書き、
//! 全体の集計を `fetch_summary.json` にまとめる。

use std::path::{Path, PathBuf};

use nina_status_common::{FetchOutcome, RunSummary, SnapshotError};
use serde::Serialize;
use serde_json::{json, Value};

use super::{write_json, UniqueNames};

/// サマリーマニフェストのファイル名
pub const SUMMARY_FILE: &str = "fetch_summary.json";

const SUMMARY_STEM: &str = "fetch_summary";

/// マニフェスト内の1エンドポイント分の記録
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointRecord {
    /// APIパス
    pub endpoint: String,
    /// "success" または "error"
    pub status: &'static str,
    /// 書き出したファイル名
    pub filename: String,
    /// HTTPステータス（成功時のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// エラーメッセージ（失敗時のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `fetch_summary.json` の内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchManifest {
    /// 仕様書のGETエンドポイント数
    pub total_get_endpoints: usize,
    /// 取得対象のステータスエンドポイント数
    pub total_status_endpoints: usize,
    /// 成功数
    pub successful_fetches: usize,
    /// 失敗数
    pub failed_fetches: usize,
    /// エンドポイントごとの記録（取得順）
    pub results: Vec<EndpointRecord>,
}

impl FetchManifest {
    fn new(summary: &RunSummary, results: Vec<EndpointRecord>) -> Self {
        Self {
            total_get_endpoints: summary.total_get_endpoints,
            total_status_endpoints: summary.total_status_endpoints,
            successful_fetches: summary.successful_fetches,
            failed_fetches: summary.failed_fetches,
            results,
        }
    }
}

/// 各結果のファイル名を決める
///
/// 異なるパスが同じ名前になる場合、および `reserved` と衝突する場合は
/// `_2`, `_3`, ... を付ける。戻り値は `outcomes` と同じ順序。
pub fn plan_file_names<I, S>(outcomes: &[FetchOutcome], reserved: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names = UniqueNames::with_reserved(reserved);
    names.claim(SUMMARY_STEM);
    outcomes
        .iter()
        .map(|outcome| format!("{}.json", names.claim(&outcome.endpoint().file_stem())))
        .collect()
}

/// エンドポイントファイルの中身
///
/// 成功時はレスポンスボディそのもの、失敗時はエラー記録。
fn endpoint_body(outcome: &FetchOutcome) -> Value {
    match outcome.data() {
        Some(data) if outcome.is_success() => data.clone(),
        _ => json!({
            "endpoint": outcome.endpoint().path,
            "status": outcome.status_label(),
            "error": outcome.error_message().unwrap_or("Unknown error"),
            "fetch_time": outcome.fetch_timestamp(),
        }),
    }
}

fn record(outcome: &FetchOutcome, filename: String) -> EndpointRecord {
    EndpointRecord {
        endpoint: outcome.endpoint().path.clone(),
        status: outcome.status_label(),
        filename,
        status_code: outcome.status_code(),
        error: outcome.error_message().map(str::to_string),
    }
}

/// エンドポイント別ファイルとマニフェストを書き出す
///
/// 戻り値はエンドポイントファイル（取得順）の後にマニフェストが続く。
pub fn write<I, S>(
    dir: &Path,
    summary: &RunSummary,
    outcomes: &[FetchOutcome],
    reserved: I,
) -> Result<Vec<PathBuf>, SnapshotError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let file_names = plan_file_names(outcomes, reserved);
    let mut written = Vec::with_capacity(outcomes.len() + 1);
    let mut results = Vec::with_capacity(outcomes.len());

    for (outcome, file_name) in outcomes.iter().zip(file_names) {
        let path = dir.join(&file_name);
        write_json(&path, &endpoint_body(outcome))?;
        written.push(path);
        results.push(record(outcome, file_name));
    }

    let manifest_path = dir.join(SUMMARY_FILE);
    write_json(&manifest_path, &FetchManifest::new(summary, results))?;
    written.push(manifest_path);

    Ok(written)
}
