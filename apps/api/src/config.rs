use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default matching the conventional on-disk layout,
/// so a bare `cargo run` works out of a fresh checkout.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON document mapping email -> password.
    pub users_file: PathBuf,
    /// JSON document mapping email -> profile record.
    pub profiles_file: PathBuf,
    /// Directory holding one JSON file per job listing.
    pub jobs_dir: PathBuf,
    /// Directory receiving uploaded resume files.
    pub resumes_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            users_file: env_path("USERS_FILE", "users.json"),
            profiles_file: env_path("PROFILES_FILE", "profile_info.json"),
            jobs_dir: env_path("JOBS_DIR", "JDs"),
            resumes_dir: env_path("RESUMES_DIR", "CandidateResumes"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key).unwrap_or_else(|_| default.to_string()).into()
}
