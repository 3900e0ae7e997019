//! Demonstrates tracing at the adapter boundary
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::time::Duration;

use tracing::Instrument;
use verdict::{attempt, from_future, from_json, Fault, Outcome};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting tracing demo");

    let fetched = from_future(fetch(503))
        .instrument(tracing::info_span!("fetch", status = 503))
        .await
        .map_err(|status| Fault::new("HttpError").with("status", status))
        .annotate("LoadDashboard");

    match &fetched {
        Outcome::Success(body) => tracing::info!("Fetched: {}", body),
        Outcome::Failure(fault) => tracing::error!("Fetch failed: {}", fault),
    }

    let crashed = attempt(|| -> u32 { panic!("renderer crashed") });
    tracing::info!("Renderer outcome failed: {}", crashed.is_failure());

    let rejected = from_json::<u32, String>(r#"{"ok":true,"value":1,"error":"x"}"#);
    tracing::info!("Record accepted: {}", rejected.is_ok());
}

async fn fetch(status: u16) -> Result<String, u16> {
    tokio::time::sleep(Duration::from_millis(10)).await;
    if status == 200 {
        Ok("dashboard".to_string())
    } else {
        Err(status)
    }
}
