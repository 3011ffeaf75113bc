//! list サブコマンド
//!
//! 仕様書を読み込んで分類結果を表示します。デバイスには接続しません。

use clap::Args;
use nina_status_common::Operation;

use super::fetch::SourceArgs;
use crate::spec::{exclusion_reason, extract_get_operations, SpecDocument};

/// list サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Spec and device selection
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show only the endpoints that would be fetched
    #[arg(long, default_value_t = false)]
    pub status_only: bool,
}

/// 分類結果の表を組み立てる
///
/// 1行目はヘッダ。取得対象はURL、除外対象は除外理由を3列目に出す。
pub fn render_table(operations: &[Operation], base_url: &str, status_only: bool) -> Vec<String> {
    let mut lines = vec!["CLASS\tPATH\tDETAIL".to_string()];
    for op in operations {
        match exclusion_reason(&op.path) {
            None => lines.push(format!("status\t{}\t{}", op.path, op.url(base_url))),
            Some(reason) if !status_only => {
                lines.push(format!("skip\t{}\t{}", op.path, reason));
            }
            Some(_) => {}
        }
    }
    lines
}

/// Execute the list command
pub fn execute(args: &ListArgs) -> Result<(), anyhow::Error> {
    let config = args.source.base_config()?.validated()?;
    let spec = SpecDocument::load(&config.spec_path)?;
    let operations = extract_get_operations(spec.paths());
    let status_count = operations
        .iter()
        .filter(|op| exclusion_reason(&op.path).is_none())
        .count();

    println!(
        "{} (API version {}): {} GET endpoints, {} status, {} excluded\n",
        spec.origin(),
        spec.version(),
        operations.len(),
        status_count,
        operations.len() - status_count
    );
    for line in render_table(&operations, &config.base_url, args.status_only) {
        println!("{}", line);
    }
    Ok(())
}
