//! Job listing reader: one JSON file per listing in the configured directory.

use std::path::Path;

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::{info, warn};

use crate::state::AppState;

/// GET /jobs
pub async fn get_jobs(State(state): State<AppState>) -> Json<Vec<Value>> {
    let jobs = list_jobs(&state.config.jobs_dir);
    info!(count = jobs.len(), "retrieved job listings");
    Json(jobs)
}

/// Collects every parseable `*.json` file in `dir`, in filesystem
/// enumeration order. An unreadable or malformed file is logged and skipped
/// without aborting the rest of the listing. A missing directory yields an
/// empty list.
pub fn list_jobs(dir: &Path) -> Vec<Value> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "jobs directory unavailable");
            return Vec::new();
        }
    };

    let mut jobs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let parsed = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| serde_json::from_str::<Value>(&raw).map_err(anyhow::Error::from));
        match parsed {
            Ok(job) => jobs.push(job),
            Err(e) => warn!(file = %path.display(), error = %e, "skipping unparseable job listing"),
        }
    }
    jobs
}
