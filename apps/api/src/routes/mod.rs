pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{accounts, jobs, profiles, uploads};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/signup", post(accounts::signup))
        .route("/login", post(accounts::login))
        .route("/profile/:email", get(profiles::get_profile))
        .route("/apply_job", post(profiles::apply_job))
        .route("/update_profile", post(profiles::update_profile))
        .route("/jobs", get(jobs::get_jobs))
        .route("/upload_resume", post(uploads::upload_resume))
        .with_state(state)
}
