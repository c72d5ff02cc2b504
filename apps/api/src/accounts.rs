//! User directory: signup and login against the email -> password document.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::state::AppState;

/// Request body shared by signup and login. Both fields are optional at the
/// serde level so a missing field surfaces as our own 400/401 rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /signup
///
/// Inserts the user, then creates the default profile as a side effect. The
/// two documents are written independently; if the profile write fails after
/// the user write succeeded, they diverge and nothing rolls back.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (email, password) = match (req.email, req.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ))
        }
    };

    state
        .users
        .update(|users| {
            if users.contains_key(&email) {
                return Err(AppError::Conflict(
                    "User with this email already exists".to_string(),
                ));
            }
            users.insert(email.clone(), password.clone());
            Ok(())
        })
        .await?;

    state
        .profiles
        .update(|profiles| {
            profiles.insert(email.clone(), Profile::new_for(&email));
            Ok(())
        })
        .await?;

    info!(%email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// POST /login
///
/// Succeeds only on exact key presence and exact password match. Unknown
/// email and wrong password produce the same generic 401, so the endpoint
/// leaks nothing about which emails are registered.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    let users = state.users.read().await;

    match (&req.email, &req.password) {
        (Some(email), Some(password)) if users.get(email) == Some(password) => {
            info!(%email, "login successful");
            Ok(Json(json!({ "message": "Login successful", "email": email })))
        }
        _ => Err(AppError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::temp_state;

    fn creds(email: &str, password: &str) -> Json<Credentials> {
        Json(Credentials {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        })
    }

    #[tokio::test]
    async fn signup_creates_user_and_default_profile() {
        let (state, _dir) = temp_state().await;

        let (status, _) = signup(State(state.clone()), creds("new@b.com", "hunter2"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let users = state.users.read().await;
        assert_eq!(users.get("new@b.com").map(String::as_str), Some("hunter2"));

        let profiles = state.profiles.read().await;
        let profile = profiles.get("new@b.com").unwrap();
        assert!(profile.applications.is_empty());
        assert_eq!(profile.full_name, "");
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts_and_keeps_original_password() {
        let (state, _dir) = temp_state().await;

        signup(State(state.clone()), creds("dup@b.com", "first"))
            .await
            .unwrap();
        let err = signup(State(state.clone()), creds("dup@b.com", "second"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let users = state.users.read().await;
        assert_eq!(users.get("dup@b.com").map(String::as_str), Some("first"));
    }

    #[tokio::test]
    async fn signup_requires_both_fields() {
        let (state, _dir) = temp_state().await;

        let err = signup(
            State(state),
            Json(Credentials {
                email: Some("x@b.com".to_string()),
                password: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_email_alike() {
        let (state, _dir) = temp_state().await;
        signup(State(state.clone()), creds("known@b.com", "right"))
            .await
            .unwrap();

        let wrong = login(State(state.clone()), creds("known@b.com", "wrong"))
            .await
            .unwrap_err();
        let unknown = login(State(state.clone()), creds("nobody@b.com", "right"))
            .await
            .unwrap_err();
        assert!(matches!(wrong, AppError::Unauthorized));
        assert!(matches!(unknown, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn login_succeeds_after_signup() {
        let (state, _dir) = temp_state().await;
        signup(State(state.clone()), creds("login@b.com", "pw"))
            .await
            .unwrap();

        let Json(body) = login(State(state), creds("login@b.com", "pw"))
            .await
            .unwrap();
        assert_eq!(body["email"], "login@b.com");
    }
}
