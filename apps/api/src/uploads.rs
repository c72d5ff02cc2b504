//! Resume upload: multipart extraction, extension allow-list, sanitized
//! storage names.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::AppError;
use crate::state::AppState;

/// File extensions accepted for resume uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// POST /upload_resume (multipart: `resume` file part + `email` text field)
///
/// Two-step protocol: this handler only stores the bytes and returns the
/// derived filename; the client links it into the profile with a follow-up
/// /update_profile call. A crash between the two steps leaves an orphaned
/// file or a dangling `resumeFileName` reference (known gap, kept for
/// compatibility with existing clients).
pub async fn upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut email: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        // Own the part name up front; reading the body consumes the field.
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume = Some((original_name, data));
            }
            "email" => {
                email = field.text().await.ok().filter(|e| !e.is_empty());
            }
            _ => {}
        }
    }

    let (original_name, data) = resume.ok_or_else(|| {
        AppError::Validation("No resume file part in the request".to_string())
    })?;
    if original_name.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    if !has_allowed_extension(&original_name) {
        return Err(AppError::UnsupportedMedia(
            "File type not allowed. Only PDF files are accepted.".to_string(),
        ));
    }
    let email = email.ok_or_else(|| {
        AppError::Validation("User email not provided for resume upload".to_string())
    })?;

    // email + original name makes the stored name collision-resistant per
    // user; a re-upload of the same filename overwrites the previous copy.
    let stored_name = format!("{email}_{}", sanitize_filename(&original_name));
    let path = state.config.resumes_dir.join(&stored_name);
    if let Err(e) = std::fs::write(&path, &data) {
        error!(path = %path.display(), error = %e, "failed to save resume");
        return Err(AppError::Storage(format!(
            "saving resume to {}: {e}",
            path.display()
        )));
    }

    info!(%stored_name, bytes = data.len(), "resume saved");
    Ok(Json(json!({
        "message": "Resume uploaded successfully",
        "fileName": stored_name
    })))
}

/// Case-insensitive check of the text after the last `.`.
fn has_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Strips path components and unsafe characters from a client-supplied
/// filename. Keeps ASCII alphanumerics plus `.`, `-`, `_`; maps whitespace
/// to `_`; drops everything else, then trims leading dots so the result can
/// never climb out of the uploads directory.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}
