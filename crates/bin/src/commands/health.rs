//! Health command - probes `/health` on a running Kiwi server.

use std::time::Duration;

use serde_json::{Value, json};

use crate::cli::HealthArgs;

/// The only body a healthy server answers with.
fn expected_body() -> Value {
    json!({ "status": "OK" })
}

/// Resolve the probe URL, accepting either a base URL or the full endpoint.
fn health_url(url: &str) -> String {
    let base = url.trim_end_matches('/');
    if base.ends_with("/health") {
        base.to_string()
    } else {
        format!("{base}/health")
    }
}

/// Exits non-zero (through the returned error) unless the server answers
/// 200 with exactly `{"status":"OK"}`.
pub async fn run(args: &HealthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let url = health_url(&args.url);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("unhealthy: failed to reach {url}: {e}"))?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("unhealthy: {url} answered HTTP {status}").into());
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| format!("unhealthy: {url} answered a non-JSON body: {e}"))?;
    if body != expected_body() {
        return Err(format!("unhealthy: {url} answered {body}").into());
    }

    println!("healthy: {url}");
    Ok(())
}
