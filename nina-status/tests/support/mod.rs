//! テスト共通ユーティリティ

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nina_status_common::{OutputMode, RunConfig};
use serde_json::{json, Value};

/// テスト用のAPIバージョン
pub const API_VERSION: &str = "2.1.7.0";

/// `paths` を持つOpenAPI仕様書を書き出す
pub fn write_spec(dir: &Path, paths: Value) -> PathBuf {
    let spec = json!({
        "openapi": "3.0.1",
        "info": {"title": "Advanced API", "version": API_VERSION},
        "paths": paths,
    });
    let path = dir.join("api-1.json");
    std::fs::write(&path, serde_json::to_string_pretty(&spec).unwrap()).unwrap();
    path
}

/// 分類シナリオ用の `paths`
///
/// 取得対象は `/equipment/camera/info` と `/sequence/state` の2つ。
pub fn scenario_paths() -> Value {
    json!({
        "/equipment/camera/info": {
            "get": {
                "summary": "Camera info",
                "description": "Information about the connected camera",
                "tags": ["Camera"]
            }
        },
        "/mount/slew/{ra}/{dec}": {"get": {"tags": ["Mount"]}},
        "/mount/park": {"get": {"tags": ["Mount"]}},
        "/sequence/state": {
            "get": {"summary": "Sequence state", "tags": ["Sequence"]}
        },
        "/profile/change-value": {"post": {}}
    })
}

/// Advanced APIの標準的なレスポンス形式
pub fn nina_response(response: Value) -> Value {
    json!({
        "Response": response,
        "Error": "",
        "StatusCode": 200,
        "Success": true,
        "Type": "API"
    })
}

/// テスト用の実行設定
pub fn run_config(spec_path: PathBuf, output_dir: &Path, base_url: &str, mode: OutputMode) -> RunConfig {
    RunConfig {
        spec_path,
        base_url: base_url.to_string(),
        device_name: "astromele3".to_string(),
        output_dir: output_dir.to_path_buf(),
        mode,
    }
}

/// ファイルをJSONとして読む
pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// 何も待ち受けていないローカルのベースURL
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to reserve test port");
    let port = listener
        .local_addr()
        .expect("failed to read test port")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}/v2/api", port)
}
