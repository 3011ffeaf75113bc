//! カテゴリ別テキストレポート

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use nina_status_common::{FetchOutcome, RunSummary, SnapshotError};

use super::write_text;

const RULE: &str = "================================================================================";

const IMPORTANT_NOTES: &[&str] = &[
    "All endpoints listed are READ-ONLY GET requests",
    "No control commands were executed",
    "No equipment state was modified",
    "Endpoints with parameters (e.g., {index}) were excluded",
    "Control endpoints (connect, move, set, etc.) were excluded",
    "This represents a snapshot of the system state at fetch time",
];

/// テキストレポートのファイル名
pub fn file_name(device_name: &str) -> String {
    format!("{}_endpoint_summary.txt", device_name)
}

/// ベースURLから `host:port` 部分を取り出す
fn device_host(base_url: &str) -> &str {
    let rest = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    rest.split('/').next().unwrap_or(rest)
}

/// レポート本文を生成
///
/// 先頭タグでグルーピングし、カテゴリ名の昇順、カテゴリ内はパスの昇順に並べる。
pub fn render(
    summary: &RunSummary,
    outcomes: &[FetchOutcome],
    generated_at: &DateTime<Local>,
) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    let _ = render_into(&mut out, summary, outcomes, generated_at);
    out
}

fn render_into(
    out: &mut String,
    summary: &RunSummary,
    outcomes: &[FetchOutcome],
    generated_at: &DateTime<Local>,
) -> std::fmt::Result {
    let mut by_category: BTreeMap<&str, Vec<&FetchOutcome>> = BTreeMap::new();
    for outcome in outcomes {
        by_category
            .entry(outcome.endpoint().category())
            .or_default()
            .push(outcome);
    }

    write_header(out, summary, generated_at)?;
    for (category, mut entries) in by_category {
        entries.sort_by(|a, b| a.endpoint().path.cmp(&b.endpoint().path));
        write_category(out, category, &entries)?;
    }
    write_notes(out)
}

fn write_header(
    out: &mut String,
    summary: &RunSummary,
    generated_at: &DateTime<Local>,
) -> std::fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "{} STATUS ENDPOINTS - DETAILED SUMMARY",
        summary.device_name.to_uppercase()
    )?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Device: {}", device_host(&summary.device_url))?;
    writeln!(out, "Fetch Time: {}", generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Total Endpoints: {}", summary.total_status_endpoints)?;
    writeln!(out, "Successful: {}", summary.successful_fetches)?;
    writeln!(out, "Failed: {}", summary.failed_fetches)?;
    writeln!(out, "{}\n", RULE)
}

fn write_category(out: &mut String, category: &str, entries: &[&FetchOutcome]) -> std::fmt::Result {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "CATEGORY: {}", category.to_uppercase())?;
    writeln!(out, "{}\n", RULE)?;

    for outcome in entries {
        let endpoint = outcome.endpoint();
        writeln!(out, "Endpoint: {}", endpoint.path)?;
        writeln!(out, "  Full URL: {}", outcome.url())?;
        writeln!(out, "  Summary: {}", endpoint.summary)?;
        writeln!(out, "  Description: {}", endpoint.description)?;
        writeln!(out, "  Method: GET (READ-ONLY - Status/Information Only)")?;
        match outcome.status_code() {
            Some(code) => writeln!(out, "  Status: ✓ SUCCESS (HTTP {})", code)?,
            None => writeln!(
                out,
                "  Status: ✗ FAILED ({})",
                outcome.error_message().unwrap_or("Unknown error")
            )?,
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_notes(out: &mut String) -> std::fmt::Result {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "IMPORTANT NOTES:")?;
    writeln!(out, "{}", RULE)?;
    for (n, note) in IMPORTANT_NOTES.iter().enumerate() {
        writeln!(out, "{}. {}", n + 1, note)?;
    }
    Ok(())
}

/// テキストレポートを書き出す
pub fn write(
    dir: &Path,
    summary: &RunSummary,
    outcomes: &[FetchOutcome],
    generated_at: &DateTime<Local>,
) -> Result<PathBuf, SnapshotError> {
    let path = dir.join(file_name(&summary.device_name));
    write_text(&path, &render(summary, outcomes, generated_at))?;
    Ok(path)
}
