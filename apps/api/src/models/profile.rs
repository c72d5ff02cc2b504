use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sentinel stored in `resumeFileName` until a resume has been uploaded and
/// linked.
pub const NO_RESUME_SENTINEL: &str = "No file uploaded";

/// About text every freshly created profile starts with.
pub const DEFAULT_ABOUT: &str = "New user, excited to explore opportunities!";

/// The profile directory document: email -> profile record.
pub type Profiles = HashMap<String, Profile>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Rejected,
}

/// One job application. The list on a profile is append-only; insertion
/// order is application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub job: String,
    pub status: ApplicationStatus,
}

/// A candidate profile as stored on disk and returned on the wire.
///
/// Field names serialize in camelCase to match the JSON document format.
/// Struct-level serde defaults keep older records loadable: a profile
/// written before a field existed (an absent `applications` list, say)
/// still parses, picking up the default for the missing key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub email: String,
    pub about: String,
    pub applications: Vec<Application>,
    pub full_name: String,
    pub linkedin_url: String,
    pub education: String,
    pub previous_experience: String,
    pub resume_file_name: String,
    pub linkedin_verified: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            email: String::new(),
            about: String::new(),
            applications: Vec::new(),
            full_name: String::new(),
            linkedin_url: String::new(),
            education: String::new(),
            previous_experience: String::new(),
            resume_file_name: NO_RESUME_SENTINEL.to_string(),
            linkedin_verified: false,
        }
    }
}

impl Profile {
    /// The default profile created as a side effect of signup: empty
    /// optional fields, no applications, resume sentinel in place.
    pub fn new_for(email: &str) -> Self {
        Profile {
            email: email.to_string(),
            about: DEFAULT_ABOUT.to_string(),
            ..Default::default()
        }
    }
}
