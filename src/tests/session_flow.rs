// Full path through the production wiring:
//  - yaml config pointing the vendor at a mock ChatKit API
//  - credential read from the environment
//  - POST /api/chatkit/session relays the mock's client secret

#[cfg(test)]
mod test {

use anyhow::Result;
use httpmock::Method::POST;
use httpmock::MockServer;
use http::StatusCode;
use serde_json::{json, Value};
use serial_test::serial;

use crate::config::proc_loader::parse_config;
use crate::server::server::{build_state, router};
use crate::tests::common::{build_reqwest_client, spawn_axum};
use crate::utils::constants::{METADATA_SOURCE_VALUE, SESSION_ROUTE, WORKFLOW_ID};

const KEY_VAR: &str = "CHATKIT_FLOW_TEST_API_KEY";

async fn config_for(vendor: &MockServer) -> Result<crate::config::service::ServiceConfig> {
    let yaml = format!(
        r#"
settings:
  server:
    host: 127.0.0.1
    port: "8000"
vendor:
  base_url: "{}"
  api_key_env: {}
  timeout_ms: 2000
"#,
        vendor.url("/v1"),
        KEY_VAR
    );
    // the configured port is unused, the test binds its own listener
    parse_config(yaml).await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn session_endpoint_relays_vendor_secret() -> Result<()> {
    std::env::set_var(KEY_VAR, "sk-flow-test");
    let vendor = MockServer::start_async().await;
    let mock = vendor
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chatkit/sessions")
                .header("authorization", "Bearer sk-flow-test")
                .json_body(json!({
                    "workflow": {"id": WORKFLOW_ID},
                    "metadata": {"source": METADATA_SOURCE_VALUE}
                }));
            then.status(200).json_body(json!({
                "id": "cksess_flow",
                "object": "chatkit.session",
                "client_secret": "ek_flow_secret",
                "expires_at": 1893456000
            }));
        })
        .await;

    let cfg = config_for(&vendor).await?;
    let state = build_state(&cfg).await?;
    let (handle, addr) = spawn_axum(router(state, &cfg.settings.metrics)).await;

    let response = build_reqwest_client()
        .post(format!("http://{}{}", addr, SESSION_ROUTE))
        .json(&json!({"workflow": {"id": "wf_ignored"}}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({"client_secret": "ek_flow_secret"}));
    mock.assert_async().await;

    handle.abort();
    std::env::remove_var(KEY_VAR);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn vendor_rejection_becomes_server_error() -> Result<()> {
    std::env::set_var(KEY_VAR, "sk-flow-test");
    let vendor = MockServer::start_async().await;
    let mock = vendor
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chatkit/sessions");
            then.status(404)
                .json_body(json!({"error": {"message": "Workflow not found"}}));
        })
        .await;

    let cfg = config_for(&vendor).await?;
    let state = build_state(&cfg).await?;
    let (handle, addr) = spawn_axum(router(state, &cfg.settings.metrics)).await;

    let response = build_reqwest_client()
        .post(format!("http://{}{}", addr, SESSION_ROUTE))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await?;
    assert!(!body.contains("client_secret"));
    mock.assert_hits_async(1).await;

    handle.abort();
    std::env::remove_var(KEY_VAR);
    Ok(())
}

}
