//! End-to-end pipeline tests: spec file → mock device → output files

use std::time::Duration;

use nina_status::{HttpFetcher, Pipeline};
use nina_status_common::OutputMode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{nina_response, read_json, run_config, scenario_paths, write_spec, API_VERSION};

async fn mount_scenario(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/api/equipment/camera/info"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(nina_response(json!({"Connected": true}))),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/api/sequence/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nina_response(json!([]))))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn pipeline_fetches_only_status_endpoints_in_order() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), scenario_paths());
    let base_url = format!("{}/v2/api", server.uri());
    let config = run_config(spec, dir.path(), &base_url, OutputMode::Combined);

    let report = Pipeline::new(config).quiet(true).run().await.unwrap();

    let fetched: Vec<&str> = report
        .outcomes
        .iter()
        .map(|o| o.endpoint().path.as_str())
        .collect();
    assert_eq!(fetched, vec!["/equipment/camera/info", "/sequence/state"]);

    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        requested,
        vec!["/v2/api/equipment/camera/info", "/v2/api/sequence/state"]
    );

    assert_eq!(report.summary.total_get_endpoints, 4);
    assert_eq!(report.summary.total_status_endpoints, 2);
    assert_eq!(report.summary.successful_fetches, 2);
    assert_eq!(report.summary.failed_fetches, 0);
    assert_eq!(report.summary.api_version, API_VERSION);
}

#[tokio::test]
async fn pipeline_combined_mode_writes_json_and_text() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), scenario_paths());
    let out = dir.path().join("out");
    let base_url = format!("{}/v2/api", server.uri());
    let config = run_config(spec, &out, &base_url, OutputMode::Combined);

    let report = Pipeline::new(config).quiet(true).run().await.unwrap();

    assert_eq!(
        report.written,
        vec![
            out.join("astromele3_status_combined.json"),
            out.join("astromele3_endpoint_summary.txt"),
        ]
    );
    assert!(!out.join("fetch_summary.json").exists());

    let combined = read_json(&out.join("astromele3_status_combined.json"));
    assert_eq!(combined["_metadata"]["device_url"], base_url.as_str());
    assert_eq!(combined["_metadata"]["total_endpoints_in_api"], 4);
    assert_eq!(combined["_metadata"]["status_endpoints_fetched"], 2);
    let camera = &combined["endpoints"]["equipment/camera/info"];
    assert_eq!(camera["_endpoint_info"]["summary"], "Camera info");
    assert_eq!(camera["_endpoint_info"]["tags"], json!(["Camera"]));
    assert_eq!(camera["data"]["Response"]["Connected"], true);

    let text = std::fs::read_to_string(out.join("astromele3_endpoint_summary.txt")).unwrap();
    assert!(text.contains("CATEGORY: CAMERA"));
    assert!(text.contains("CATEGORY: SEQUENCE"));
    assert!(text.contains("Endpoint: /sequence/state"));
}

#[tokio::test]
async fn pipeline_per_endpoint_mode_writes_files_and_manifest() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), scenario_paths());
    let out = dir.path().join("out");
    let base_url = format!("{}/v2/api", server.uri());
    let config = run_config(spec, &out, &base_url, OutputMode::PerEndpoint);

    let report = Pipeline::new(config).quiet(true).run().await.unwrap();

    assert_eq!(
        report.written,
        vec![
            out.join("equipment_camera_info.json"),
            out.join("sequence_state.json"),
            out.join("fetch_summary.json"),
        ]
    );
    assert!(!out.join("astromele3_status_combined.json").exists());

    let camera = read_json(&out.join("equipment_camera_info.json"));
    assert_eq!(camera["Response"]["Connected"], true);

    let manifest = read_json(&out.join("fetch_summary.json"));
    assert_eq!(manifest["total_get_endpoints"], 4);
    assert_eq!(manifest["total_status_endpoints"], 2);
    assert_eq!(manifest["results"][1]["filename"], "sequence_state.json");
}

#[tokio::test]
async fn pipeline_both_mode_writes_everything() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), scenario_paths());
    let base_url = format!("{}/v2/api", server.uri());
    let config = run_config(spec, dir.path(), &base_url, OutputMode::Both);

    let report = Pipeline::new(config).quiet(true).run().await.unwrap();

    assert_eq!(report.written.len(), 5);
    assert!(report.written.iter().all(|p| p.exists()));
}

#[tokio::test]
async fn pipeline_timeout_is_recorded_and_run_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/equipment/camera/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/api/sequence/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nina_response(json!("Running"))))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), scenario_paths());
    let base_url = format!("{}/v2/api", server.uri());
    let config = run_config(spec, dir.path(), &base_url, OutputMode::Both);
    let fetcher = HttpFetcher::new(base_url.clone()).with_timeout(Duration::from_millis(200));

    let report = Pipeline::new(config)
        .with_fetcher(fetcher)
        .quiet(true)
        .run()
        .await
        .unwrap();

    assert_eq!(report.summary.failed_fetches, 1);
    assert_eq!(report.summary.successful_fetches, 1);
    assert!(!report.outcomes[0].is_success());
    assert!(report.outcomes[0]
        .error_message()
        .unwrap()
        .contains("timed out"));
    assert!(report.outcomes[1].is_success());

    let combined = read_json(&dir.path().join("astromele3_status_combined.json"));
    let camera = &combined["endpoints"]["equipment/camera/info"];
    assert_eq!(camera["_fetch_status"]["success"], false);
    assert!(camera["data"].is_null());

    let failed_file = read_json(&dir.path().join("equipment_camera_info.json"));
    assert_eq!(failed_file["status"], "error");

    let manifest = read_json(&dir.path().join("fetch_summary.json"));
    assert_eq!(manifest["failed_fetches"], 1);
    assert_eq!(manifest["results"][0]["status"], "error");
}

#[tokio::test]
async fn pipeline_unreachable_device_records_every_failure() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), scenario_paths());
    let base_url = crate::support::unreachable_base_url();
    let config = run_config(spec, dir.path(), &base_url, OutputMode::PerEndpoint);

    let report = Pipeline::new(config).quiet(true).run().await.unwrap();

    assert_eq!(report.summary.total_status_endpoints, 2);
    assert_eq!(report.summary.failed_fetches, 2);
    assert_eq!(
        report.summary.successful_fetches + report.summary.failed_fetches,
        report.summary.total_status_endpoints
    );
}

#[tokio::test]
async fn pipeline_write_failure_is_fatal() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), scenario_paths());
    // 出力先に通常ファイルを置いてディレクトリ作成を失敗させる
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, "").unwrap();
    let base_url = format!("{}/v2/api", server.uri());
    let config = run_config(spec, &blocked, &base_url, OutputMode::Combined);

    let err = Pipeline::new(config).quiet(true).run().await.unwrap_err();
    assert!(matches!(err, nina_status_common::SnapshotError::Write { .. }));
}
