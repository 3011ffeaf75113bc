//! 設定管理
//!
//! RunConfig, OutputMode等の設定構造体

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::SnapshotError;

/// デフォルトの仕様書パス
pub const DEFAULT_SPEC_PATH: &str = "api-1.json";

/// デフォルトのデバイスURL
pub const DEFAULT_BASE_URL: &str = "http://astromele3.lan:1888/v2/api";

/// デフォルトのデバイス名
pub const DEFAULT_DEVICE_NAME: &str = "astromele3";

/// 出力モード
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// 1つの結合JSON + テキストレポート
    #[default]
    Combined,
    /// エンドポイントごとのJSON + サマリーマニフェスト
    PerEndpoint,
    /// 両方
    Both,
}

impl OutputMode {
    /// OutputModeを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combined => "combined",
            Self::PerEndpoint => "per-endpoint",
            Self::Both => "both",
        }
    }

    /// 結合出力を書くか
    pub fn writes_combined(&self) -> bool {
        matches!(self, Self::Combined | Self::Both)
    }

    /// エンドポイント別出力を書くか
    pub fn writes_per_endpoint(&self) -> bool {
        matches!(self, Self::PerEndpoint | Self::Both)
    }
}

impl FromStr for OutputMode {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "combined" => Ok(Self::Combined),
            "per-endpoint" | "per_endpoint" => Ok(Self::PerEndpoint),
            "both" => Ok(Self::Both),
            other => Err(SnapshotError::Config(format!(
                "unknown output mode '{}' (expected combined, per-endpoint or both)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 実行設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    /// 仕様書のパス (デフォルト: "api-1.json")
    #[serde(default = "default_spec_path")]
    pub spec_path: PathBuf,

    /// デバイスのベースURL (デフォルト: "http://astromele3.lan:1888/v2/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// デバイス名（出力ファイル名とレポートに使用）(デフォルト: "astromele3")
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// 出力ディレクトリ (デフォルト: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 出力モード (デフォルト: combined)
    #[serde(default)]
    pub mode: OutputMode,
}

fn default_spec_path() -> PathBuf {
    PathBuf::from(DEFAULT_SPEC_PATH)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_device_name() -> String {
    DEFAULT_DEVICE_NAME.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            spec_path: default_spec_path(),
            base_url: default_base_url(),
            device_name: default_device_name(),
            output_dir: default_output_dir(),
            mode: OutputMode::default(),
        }
    }
}

impl RunConfig {
    /// JSON設定ファイルから読み込む（未指定の項目はデフォルト値）
    pub fn from_json_file(path: &Path) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SnapshotError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| SnapshotError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    /// 設定値を検証し、ベースURL末尾の `/` を取り除いた設定を返す
    pub fn validated(mut self) -> Result<Self, SnapshotError> {
        let base_url = self.base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SnapshotError::Config(format!(
                "base URL must start with http:// or https://: '{}'",
                self.base_url
            )));
        }
        self.base_url = base_url.to_string();

        let device_name = self.device_name.trim();
        if device_name.is_empty() {
            return Err(SnapshotError::Config("device name must not be empty".into()));
        }
        if device_name.contains(['/', '\\']) {
            return Err(SnapshotError::Config(format!(
                "device name must not contain path separators: '{}'",
                device_name
            )));
        }
        self.device_name = device_name.to_string();

        Ok(self)
    }
}
