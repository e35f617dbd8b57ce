use axum::Json;
use serde_json::{Value, json};

use crate::prelude::Result;

pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Pathfinder API! Use /jobs/search to find jobs and /generate to talk to the career advisor."
    }))
}

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}

pub async fn healthz() -> Result<()> {
    tracing::debug!("service is healthy");
    Ok(())
}
