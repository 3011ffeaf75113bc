//! 仕様書ローダー
//!
//! OpenAPI形式のJSONを読み込み、`paths` と `info.version` を取り出す。
//! どちらかが欠けている場合は `SnapshotError::MalformedSpec` を返す。

use std::path::Path;

use nina_status_common::SnapshotError;
use serde_json::{Map, Value};
use tracing::debug;

/// 読み込み済みの仕様書
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    origin: String,
    version: String,
    paths: Map<String, Value>,
}

impl SpecDocument {
    /// ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::SpecRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, &path.display().to_string())
    }

    /// JSON文字列から読み込む
    ///
    /// `origin` はエラーメッセージに使う出所の表示名。
    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| SnapshotError::malformed(origin, format!("invalid JSON: {}", e)))?;
        Self::from_value(value, origin)
    }

    /// パース済みのJSON値から読み込む
    pub fn from_value(value: Value, origin: &str) -> Result<Self, SnapshotError> {
        let Value::Object(mut root) = value else {
            return Err(SnapshotError::malformed(
                origin,
                "top-level value is not an object",
            ));
        };

        let version = match root.get("info").and_then(|info| info.get("version")) {
            Some(Value::String(version)) => version.clone(),
            Some(Value::Number(version)) => version.to_string(),
            Some(_) => {
                return Err(SnapshotError::malformed(
                    origin,
                    "`info.version` is not a string",
                ))
            }
            None => return Err(SnapshotError::malformed(origin, "missing `info.version`")),
        };

        let paths = match root.remove("paths") {
            Some(Value::Object(paths)) => paths,
            Some(_) => return Err(SnapshotError::malformed(origin, "`paths` is not an object")),
            None => return Err(SnapshotError::malformed(origin, "missing `paths` object")),
        };

        debug!(origin = %origin, version = %version, paths = paths.len(), "Loaded API spec");

        Ok(Self {
            origin: origin.to_string(),
            version,
            paths,
        })
    }

    /// 出所の表示名
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `info.version`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `paths` マッピング（仕様書内の順序を保持）
    pub fn paths(&self) -> &Map<String, Value> {
        &self.paths
    }
}
