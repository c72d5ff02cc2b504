//! Profile directory: retrieval, job applications, and partial updates.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{Application, ApplicationStatus, Profile};
use crate::state::AppState;

/// GET /profile/:email
pub async fn get_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let profiles = state.profiles.read().await;
    match profiles.get(&email) {
        Some(profile) => Ok(Json(profile.clone())),
        None => Err(AppError::NotFound("Profile not found".to_string())),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyJobRequest {
    pub email: Option<String>,
    pub job_title: Option<String>,
}

/// POST /apply_job
///
/// Appends a `Pending` application to the profile. The whole profile
/// document is rewritten for the single append; the store lock makes two
/// concurrent applies serialize instead of losing one.
pub async fn apply_job(
    State(state): State<AppState>,
    Json(req): Json<ApplyJobRequest>,
) -> Result<Json<Value>, AppError> {
    let (email, job_title) = match (req.email, req.job_title) {
        (Some(e), Some(j)) if !e.is_empty() && !j.is_empty() => (e, j),
        _ => {
            return Err(AppError::Validation(
                "Email and job title are required".to_string(),
            ))
        }
    };

    state
        .profiles
        .update(|profiles| {
            let profile = profiles
                .get_mut(&email)
                .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;
            profile.applications.push(Application {
                job: job_title.clone(),
                status: ApplicationStatus::Pending,
            });
            Ok(())
        })
        .await?;

    info!(%email, job = %job_title, "application submitted");
    Ok(Json(json!({
        "message": format!("Application for \"{job_title}\" submitted successfully")
    })))
}

/// Recognized optional fields for a profile update. Anything else in the
/// request body is ignored silently.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub education: Option<String>,
    pub previous_experience: Option<String>,
    pub about: Option<String>,
    pub resume_file_name: Option<String>,
    pub linkedin_verified: Option<bool>,
}

/// POST /update_profile
///
/// Replaces only the fields present in the request; omitted fields keep
/// their stored values. The creation-time defaults never reapply here.
pub async fn update_profile(
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let email = match &req.email {
        Some(e) if !e.is_empty() => e.clone(),
        _ => return Err(AppError::Validation("Email is required".to_string())),
    };

    state
        .profiles
        .update(|profiles| {
            let profile = profiles
                .get_mut(&email)
                .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
            apply_updates(profile, &req);
            Ok(())
        })
        .await?;

    info!(%email, "profile updated");
    Ok(Json(json!({ "message": "Profile updated successfully" })))
}

fn apply_updates(profile: &mut Profile, req: &UpdateProfileRequest) {
    if let Some(v) = &req.full_name {
        profile.full_name = v.clone();
    }
    if let Some(v) = &req.linkedin_url {
        profile.linkedin_url = v.clone();
    }
    if let Some(v) = &req.education {
        profile.education = v.clone();
    }
    if let Some(v) = &req.previous_experience {
        profile.previous_experience = v.clone();
    }
    if let Some(v) = &req.about {
        profile.about = v.clone();
    }
    if let Some(v) = &req.resume_file_name {
        profile.resume_file_name = v.clone();
    }
    if let Some(v) = req.linkedin_verified {
        profile.linkedin_verified = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{DEFAULT_ABOUT, NO_RESUME_SENTINEL};
    use crate::state::testing::temp_state;

    async fn seed_profile(state: &AppState, email: &str) {
        state
            .profiles
            .update(|profiles| {
                profiles.insert(email.to_string(), Profile::new_for(email));
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn apply_appends_exactly_one_pending_entry() {
        let (state, _dir) = temp_state().await;
        seed_profile(&state, "cand@b.com").await;

        apply_job(
            State(state.clone()),
            Json(ApplyJobRequest {
                email: Some("cand@b.com".to_string()),
                job_title: Some("Backend Engineer".to_string()),
            }),
        )
        .await
        .unwrap();

        let Json(profile) = get_profile(State(state), Path("cand@b.com".to_string()))
            .await
            .unwrap();
        assert_eq!(profile.applications.len(), 1);
        assert_eq!(profile.applications[0].job, "Backend Engineer");
        assert_eq!(profile.applications[0].status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn apply_for_unknown_profile_is_not_found() {
        let (state, _dir) = temp_state().await;

        let err = apply_job(
            State(state),
            Json(ApplyJobRequest {
                email: Some("nobody@b.com".to_string()),
                job_title: Some("Anything".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn partial_update_leaves_omitted_fields_untouched() {
        let (state, _dir) = temp_state().await;
        seed_profile(&state, "upd@b.com").await;

        update_profile(
            State(state.clone()),
            Json(UpdateProfileRequest {
                email: Some("upd@b.com".to_string()),
                full_name: Some("Ada Lovelace".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let Json(profile) = get_profile(State(state), Path("upd@b.com".to_string()))
            .await
            .unwrap();
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.about, DEFAULT_ABOUT);
        assert_eq!(profile.education, "");
        assert_eq!(profile.resume_file_name, NO_RESUME_SENTINEL);
        assert!(!profile.linkedin_verified);
    }

    #[tokio::test]
    async fn update_can_flip_verification_and_link_resume() {
        let (state, _dir) = temp_state().await;
        seed_profile(&state, "link@b.com").await;

        update_profile(
            State(state.clone()),
            Json(UpdateProfileRequest {
                email: Some("link@b.com".to_string()),
                resume_file_name: Some("link@b.com_resume.pdf".to_string()),
                linkedin_verified: Some(true),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let Json(profile) = get_profile(State(state), Path("link@b.com".to_string()))
            .await
            .unwrap();
        assert_eq!(profile.resume_file_name, "link@b.com_resume.pdf");
        assert!(profile.linkedin_verified);
    }

    #[tokio::test]
    async fn update_without_email_is_rejected() {
        let (state, _dir) = temp_state().await;

        let err = update_profile(State(state), Json(UpdateProfileRequest::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
