//! 共通型定義
//!
//! Operation, FetchOutcome, RunSummary等のコアデータ型

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

/// タグを持たないエンドポイントのカテゴリ名
pub const OTHER_CATEGORY: &str = "Other";

/// ファイル名に使える文字が残らないパスの代替名
const ROOT_FILE_STEM: &str = "root";

/// ISO 8601形式のローカル時刻文字列（マイクロ秒精度）
pub fn iso_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// OpenAPI仕様書から抽出したGETオペレーション
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    /// APIパス（例: "/equipment/camera/info"）
    pub path: String,
    /// 概要
    pub summary: String,
    /// 詳細説明
    pub description: String,
    /// カテゴリタグ（宣言順）
    pub tags: Vec<String>,
}

impl Operation {
    /// パスのみを持つオペレーションを作成
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            summary: String::new(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    /// 概要を設定
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// 詳細説明を設定
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// タグを設定
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// レポートのグルーピングに使うカテゴリ（先頭タグ、無ければ "Other"）
    pub fn category(&self) -> &str {
        self.tags
            .first()
            .map(String::as_str)
            .unwrap_or(OTHER_CATEGORY)
    }

    /// 結合ドキュメントのキー（前後の `/` を除去したパス）
    pub fn endpoint_key(&self) -> &str {
        self.path.trim_matches('/')
    }

    /// エンドポイント別ファイルの基底名
    ///
    /// `/` を `_` に置換し、前後の `_` を除去する。
    /// 例: `/equipment/camera/info` → `equipment_camera_info`
    pub fn file_stem(&self) -> String {
        let stem = self.path.replace('/', "_");
        let stem = stem.trim_matches('_');
        if stem.is_empty() {
            ROOT_FILE_STEM.to_string()
        } else {
            stem.to_string()
        }
    }

    /// ベースURLと連結した完全なURL
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.path)
    }
}

/// 1エンドポイントに対する取得結果
///
/// `succeeded` / `failed` からのみ生成できる。成功時はエラーを持たず2xxの
/// ステータスを持ち、失敗時はデータを持たない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchOutcome {
    endpoint: Operation,
    url: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    fetch_timestamp: String,
}

impl FetchOutcome {
    /// 成功結果を作成
    pub fn succeeded(
        endpoint: Operation,
        url: impl Into<String>,
        status_code: u16,
        data: Value,
        fetched_at: &DateTime<Local>,
    ) -> Self {
        debug_assert!(
            (200..300).contains(&status_code),
            "successful outcome requires a 2xx status, got {status_code}"
        );
        Self {
            endpoint,
            url: url.into(),
            success: true,
            status_code: Some(status_code),
            error_message: None,
            data: Some(data),
            fetch_timestamp: iso_timestamp(fetched_at),
        }
    }

    /// 失敗結果を作成
    pub fn failed(
        endpoint: Operation,
        url: impl Into<String>,
        error_message: impl Into<String>,
        fetched_at: &DateTime<Local>,
    ) -> Self {
        Self {
            endpoint,
            url: url.into(),
            success: false,
            status_code: None,
            error_message: Some(error_message.into()),
            data: None,
            fetch_timestamp: iso_timestamp(fetched_at),
        }
    }

    /// 対象オペレーション
    pub fn endpoint(&self) -> &Operation {
        &self.endpoint
    }

    /// リクエストしたURL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 取得に成功したか
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// HTTPステータスコード（成功時のみ）
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// エラーメッセージ（失敗時のみ）
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// レスポンスボディ（成功時のみ、JSONの `null` もあり得る）
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// 取得時刻
    pub fn fetch_timestamp(&self) -> &str {
        &self.fetch_timestamp
    }

    /// サマリー用の状態ラベル
    pub fn status_label(&self) -> &'static str {
        if self.success {
            "success"
        } else {
            "error"
        }
    }
}

/// 1回の実行の集計
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// デバイス名
    pub device_name: String,
    /// デバイスのベースURL
    pub device_url: String,
    /// 仕様書の `info.version`
    pub api_version: String,
    /// 実行時刻
    pub fetch_timestamp: String,
    /// 仕様書に宣言されたGETエンドポイント数
    pub total_get_endpoints: usize,
    /// 分類後のステータスエンドポイント数
    pub total_status_endpoints: usize,
    /// 成功数
    pub successful_fetches: usize,
    /// 失敗数
    pub failed_fetches: usize,
}

impl RunSummary {
    /// 取得結果の列から集計を作成
    pub fn from_outcomes(
        device_name: &str,
        device_url: &str,
        api_version: &str,
        total_get_endpoints: usize,
        outcomes: &[FetchOutcome],
        fetched_at: &DateTime<Local>,
    ) -> Self {
        let successful_fetches = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            device_name: device_name.to_string(),
            device_url: device_url.to_string(),
            api_version: api_version.to_string(),
            fetch_timestamp: iso_timestamp(fetched_at),
            total_get_endpoints,
            total_status_endpoints: outcomes.len(),
            successful_fetches,
            failed_fetches: outcomes.len() - successful_fetches,
        }
    }
}
