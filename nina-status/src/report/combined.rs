//! 結合ドキュメント
//!
//! 全エンドポイントの結果を1つのJSONにまとめる。
//!
//! ```text
//! {
//!   "_metadata": { ... 集計 ... },
//!   "_endpoint_categories": { ... カテゴリ説明 ... },
//!   "endpoints": {
//!     "equipment/camera/info": {
//!       "_endpoint_info": { ... },
//!       "_fetch_status": { ... },
//!       "data": ...
//!     }
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use nina_status_common::{FetchOutcome, RunSummary, SnapshotError};
use serde_json::{json, Map, Value};

use super::{write_json, UniqueNames};

/// `_metadata.note` に記録する注記
pub const READ_ONLY_NOTE: &str =
    "This file contains READ-ONLY status data. No control commands were executed.";

/// `_endpoint_info.method`
pub const METHOD_LABEL: &str = "GET (READ-ONLY)";

/// `_endpoint_info.purpose`
pub const PURPOSE_LABEL: &str = "Status/Information retrieval - does not modify equipment state";

/// エンドポイントカテゴリの説明
pub const ENDPOINT_CATEGORIES: &[(&str, &str)] = &[
    (
        "application",
        "General application information, version, plugins, settings",
    ),
    (
        "equipment",
        "Connected equipment status (camera, mount, focuser, etc.)",
    ),
    ("astronomy", "Astronomical calculations and utilities"),
    ("framing", "Field of view and framing information"),
    ("imaging", "Image history and statistics"),
    ("profile", "NINA profile settings and horizon data"),
    ("sequence", "Sequence state and available sequences"),
    ("events", "Event history and logs"),
    ("livestack", "Live stacking status and available stacks"),
    ("flats", "Flat frame configuration and status"),
];

/// 結合JSONのファイル名の基底部分
pub fn file_stem(device_name: &str) -> String {
    format!("{}_status_combined", device_name)
}

/// 結合JSONのファイル名
pub fn file_name(device_name: &str) -> String {
    format!("{}.json", file_stem(device_name))
}

/// エンドポイント別ファイルと衝突させない名前
pub(crate) fn reserved_stems(device_name: &str) -> Vec<String> {
    vec![file_stem(device_name)]
}

/// 結合ドキュメントを構築
///
/// キーはパスの前後の `/` を除いたもの。異なるパスが同じキーになる場合は
/// 後のエントリに連番を付ける。
pub fn build_document(summary: &RunSummary, outcomes: &[FetchOutcome]) -> Value {
    let mut keys = UniqueNames::default();
    let mut endpoints = Map::new();
    for outcome in outcomes {
        let key = keys.claim(outcome.endpoint().endpoint_key());
        endpoints.insert(key, endpoint_entry(outcome));
    }

    let categories: Map<String, Value> = ENDPOINT_CATEGORIES
        .iter()
        .map(|(name, description)| (name.to_string(), Value::from(*description)))
        .collect();

    json!({
        "_metadata": {
            "device_name": summary.device_name,
            "device_url": summary.device_url,
            "fetch_timestamp": summary.fetch_timestamp,
            "api_version": summary.api_version,
            "total_endpoints_in_api": summary.total_get_endpoints,
            "status_endpoints_fetched": summary.total_status_endpoints,
            "note": READ_ONLY_NOTE,
            "successful_fetches": summary.successful_fetches,
            "failed_fetches": summary.failed_fetches,
        },
        "_endpoint_categories": categories,
        "endpoints": endpoints,
    })
}

fn endpoint_entry(outcome: &FetchOutcome) -> Value {
    let endpoint = outcome.endpoint();
    let fetch_status = match (outcome.status_code(), outcome.error_message()) {
        (Some(status_code), _) => json!({
            "success": true,
            "status_code": status_code,
            "fetch_time": outcome.fetch_timestamp(),
        }),
        (None, error) => json!({
            "success": false,
            "error": error.unwrap_or("Unknown error"),
            "fetch_time": outcome.fetch_timestamp(),
        }),
    };

    json!({
        "_endpoint_info": {
            "path": endpoint.path,
            "full_url": outcome.url(),
            "summary": endpoint.summary,
            "description": endpoint.description,
            "tags": endpoint.tags,
            "method": METHOD_LABEL,
            "purpose": PURPOSE_LABEL,
        },
        "_fetch_status": fetch_status,
        "data": outcome.data().cloned().unwrap_or(Value::Null),
    })
}

/// 結合JSONを書き出す
pub fn write(
    dir: &Path,
    summary: &RunSummary,
    outcomes: &[FetchOutcome],
) -> Result<PathBuf, SnapshotError> {
    let path = dir.join(file_name(&summary.device_name));
    write_json(&path, &build_document(summary, outcomes))?;
    Ok(path)
}
