//! fetch サブコマンド
//!
//! ステータスエンドポイントを取得して結果を書き出します。

use std::path::PathBuf;

use clap::Args;
use nina_status_common::{OutputMode, RunConfig, SnapshotError};

use crate::pipeline::Pipeline;

/// 仕様書とデバイスの指定（fetch / list 共通）
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// OpenAPI spec file
    #[arg(short, long, env = "NINA_STATUS_SPEC")]
    pub spec: Option<PathBuf>,

    /// Device API base URL
    #[arg(short, long, env = "NINA_STATUS_BASE_URL")]
    pub base_url: Option<String>,

    /// JSON run configuration file (flags and env override its values)
    #[arg(short, long, env = "NINA_STATUS_CONFIG")]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// 設定ファイル（またはデフォルト）に指定値を重ねた設定
    pub fn base_config(&self) -> Result<RunConfig, SnapshotError> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)?,
            None => RunConfig::default(),
        };
        if let Some(spec) = &self.spec {
            config.spec_path = spec.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        Ok(config)
    }
}

/// fetch サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Spec and device selection
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory
    #[arg(short, long, env = "NINA_STATUS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output mode: combined, per-endpoint or both
    // list も同じ環境変数を読むため、検証は fetch 実行時に行う
    #[arg(short, long, env = "NINA_STATUS_MODE")]
    pub mode: Option<String>,

    /// Device name used in output file names and reports
    #[arg(short, long, env = "NINA_STATUS_DEVICE_NAME")]
    pub device_name: Option<String>,

    /// Suppress progress output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl FetchArgs {
    /// 実行設定を組み立てて検証する
    pub fn to_config(&self) -> Result<RunConfig, SnapshotError> {
        let mut config = self.source.base_config()?;
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(mode) = &self.mode {
            config.mode = mode.parse::<OutputMode>()?;
        }
        if let Some(device_name) = &self.device_name {
            config.device_name = device_name.clone();
        }
        config.validated()
    }
}

/// Execute the fetch command
pub async fn execute(args: &FetchArgs) -> Result<(), anyhow::Error> {
    let config = args.to_config()?;
    Pipeline::new(config).quiet(args.quiet).run().await?;
    Ok(())
}
