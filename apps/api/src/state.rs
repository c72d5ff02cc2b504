use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::models::profile::{Application, ApplicationStatus, Profile, Profiles};
use crate::models::user::Users;
use crate::store::JsonStore;

/// Demo account seeded on first boot so a fresh instance is immediately
/// usable from the frontend.
pub const DEMO_EMAIL: &str = "test@example.com";
const DEMO_PASSWORD: &str = "password123";

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<JsonStore<Users>>,
    pub profiles: Arc<JsonStore<Profiles>>,
    pub config: Config,
}

impl AppState {
    /// Builds the state, creating the listing/upload directories and seeding
    /// the demo account into any data file that does not exist yet.
    pub async fn initialize(config: Config) -> Result<Self> {
        std::fs::create_dir_all(&config.jobs_dir)
            .with_context(|| format!("creating jobs dir {}", config.jobs_dir.display()))?;
        std::fs::create_dir_all(&config.resumes_dir)
            .with_context(|| format!("creating resumes dir {}", config.resumes_dir.display()))?;

        let state = AppState {
            users: Arc::new(JsonStore::new(&config.users_file)),
            profiles: Arc::new(JsonStore::new(&config.profiles_file)),
            config,
        };

        if !state.users.path().exists() {
            info!(path = %state.users.path().display(), "initializing user directory");
            state
                .users
                .update(|users| {
                    users.insert(DEMO_EMAIL.to_string(), DEMO_PASSWORD.to_string());
                    Ok(())
                })
                .await?;
        }

        if !state.profiles.path().exists() {
            info!(path = %state.profiles.path().display(), "initializing profile directory");
            state
                .profiles
                .update(|profiles| {
                    profiles.insert(DEMO_EMAIL.to_string(), demo_profile());
                    Ok(())
                })
                .await?;
        }

        Ok(state)
    }
}

/// Fully filled-in profile for the demo account, applications in all three
/// states so the frontend has something to render.
fn demo_profile() -> Profile {
    Profile {
        email: DEMO_EMAIL.to_string(),
        about: "Passionate about innovation and building impactful products. Always looking \
                for new challenges and learning opportunities in the startup ecosystem."
            .to_string(),
        applications: vec![
            Application {
                job: "Software Engineer at Acme Corp".to_string(),
                status: ApplicationStatus::Pending,
            },
            Application {
                job: "Product Manager at Innovate Solutions".to_string(),
                status: ApplicationStatus::Reviewed,
            },
            Application {
                job: "Marketing Specialist at Growth Hub Inc.".to_string(),
                status: ApplicationStatus::Rejected,
            },
        ],
        full_name: "Test User".to_string(),
        linkedin_url: "https://linkedin.com/in/testuser".to_string(),
        education: "B.S. Computer Science, University of Example".to_string(),
        previous_experience: "Software Engineer at TechCorp (2020-2023)\nProduct Intern at StartupX (2019)"
            .to_string(),
        resume_file_name: "test_resume.pdf".to_string(),
        linkedin_verified: false,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_boot_seeds_demo_account() {
        let (state, _dir) = testing::temp_state().await;

        let users = state.users.read().await;
        assert_eq!(users.get(DEMO_EMAIL).map(String::as_str), Some(DEMO_PASSWORD));

        let profiles = state.profiles.read().await;
        let demo = profiles.get(DEMO_EMAIL).unwrap();
        assert_eq!(demo.full_name, "Test User");
        assert_eq!(demo.applications.len(), 3);
    }

    #[tokio::test]
    async fn existing_data_files_are_not_reseeded() {
        let (state, dir) = testing::temp_state().await;

        // Wipe the demo account, then re-initialize over the same files.
        state
            .users
            .update(|users| {
                users.clear();
                Ok(())
            })
            .await
            .unwrap();

        let reopened = AppState::initialize(state.config.clone()).await.unwrap();
        assert!(reopened.users.read().await.is_empty());
        drop(dir);
    }
}
