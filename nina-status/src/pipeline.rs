//! 取得パイプライン
//!
//! 仕様書読み込み → 分類 → 逐次取得 → 集計 → 書き出し の順で1回だけ実行する。
//! 個々のエンドポイントの失敗では中断しない。中断するのは仕様書の読み込み失敗と
//! 書き込み失敗のみ。

use std::fmt::Display;
use std::path::PathBuf;

use chrono::Local;
use nina_status_common::{FetchOutcome, RunConfig, RunSummary, SnapshotError};
use tracing::info;

use crate::fetch::HttpFetcher;
use crate::report::write_reports;
use crate::spec::{classify, extract_get_operations, SpecDocument};

const RULE: &str = "================================================================================";

/// 1回の実行結果
#[derive(Debug, Clone)]
pub struct RunReport {
    /// 集計
    pub summary: RunSummary,
    /// 取得結果（取得順）
    pub outcomes: Vec<FetchOutcome>,
    /// 書き出したファイル
    pub written: Vec<PathBuf>,
}

/// 取得パイプライン
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: RunConfig,
    fetcher: HttpFetcher,
    quiet: bool,
}

impl Pipeline {
    /// 設定からパイプラインを作成
    pub fn new(config: RunConfig) -> Self {
        let fetcher = HttpFetcher::new(config.base_url.clone());
        Self {
            config,
            fetcher,
            quiet: false,
        }
    }

    /// フェッチャーを差し替える
    pub fn with_fetcher(mut self, fetcher: HttpFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// 進捗表示を抑止する
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn say(&self, line: impl Display) {
        if !self.quiet {
            println!("{}", line);
        }
    }

    /// パイプラインを実行
    pub async fn run(&self) -> Result<RunReport, SnapshotError> {
        let spec = SpecDocument::load(&self.config.spec_path)?;
        let operations = extract_get_operations(spec.paths());
        self.say(format!("Found {} GET endpoints\n", operations.len()));

        let targets = classify(&operations);
        self.say(format!(
            "Identified {} status endpoints to fetch (READ-ONLY)\n",
            targets.len()
        ));
        info!(
            spec = %spec.origin(),
            api_version = %spec.version(),
            get_endpoints = operations.len(),
            status_endpoints = targets.len(),
            "Starting status fetch"
        );

        self.say(RULE);
        self.say(format!(
            "FETCHING DATA FROM {}...",
            self.config.device_name.to_uppercase()
        ));
        self.say(RULE);

        let mut outcomes = Vec::with_capacity(targets.len());
        for operation in &targets {
            self.say(format!("\nFetching: {}", operation.path));
            let outcome = self.fetcher.fetch(operation).await;
            match (outcome.status_code(), outcome.error_message()) {
                (Some(code), _) => self.say(format!("  ✓ Success (HTTP {})", code)),
                (None, error) => self.say(format!(
                    "  ✗ Failed: {}",
                    error.unwrap_or("Unknown error")
                )),
            }
            outcomes.push(outcome);
        }

        let finished_at = Local::now();
        let summary = RunSummary::from_outcomes(
            &self.config.device_name,
            self.fetcher.base_url(),
            spec.version(),
            operations.len(),
            &outcomes,
            &finished_at,
        );

        let written = write_reports(&self.config, &summary, &outcomes, &finished_at)?;
        info!(
            successful = summary.successful_fetches,
            failed = summary.failed_fetches,
            files = written.len(),
            "Status fetch finished"
        );

        self.print_summary(&summary, &written);

        Ok(RunReport {
            summary,
            outcomes,
            written,
        })
    }

    fn print_summary(&self, summary: &RunSummary, written: &[PathBuf]) {
        self.say(format!("\n{}", RULE));
        self.say("SUMMARY:");
        self.say(RULE);
        self.say(format!("Device: {} ({})", summary.device_name, summary.device_url));
        self.say(format!("API version: {}", summary.api_version));
        self.say(format!(
            "Total GET endpoints in API: {}",
            summary.total_get_endpoints
        ));
        self.say(format!(
            "Status endpoints fetched: {}",
            summary.total_status_endpoints
        ));
        self.say(format!("Successful: {}", summary.successful_fetches));
        self.say(format!("Failed: {}", summary.failed_fetches));
        self.say("\nFiles written:");
        for path in written {
            self.say(format!("  {}", path.display()));
        }
    }
}
