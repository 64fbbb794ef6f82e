//! Profile persistence
//!
//! Stores the display name, cycle length and subscription state in
//! `<data_dir>/users/<user>/profile.json`.

use anyhow::{Context, Result};
use cyclewise_types::{Profile, SubscriptionStatus};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::store::StoreConfig;

const PROFILE_FILE: &str = "profile.json";

fn profile_path(config: &StoreConfig, user_id: &str) -> Result<PathBuf, CoreError> {
    Ok(config.user_dir(user_id)?.join(PROFILE_FILE))
}

/// Load a user's profile.
/// Returns defaults on any I/O or parse error (graceful degradation).
///
/// # Errors
/// Fails only for user ids that cannot name a directory under the data dir
pub fn load_profile(config: &StoreConfig, user_id: &str) -> Result<Profile, CoreError> {
    Ok(load_profile_from(&profile_path(config, user_id)?))
}

fn load_profile_from(path: &Path) -> Profile {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Invalid profile, using defaults");
            Profile::default()
        }),
        Err(_) => Profile::default(),
    }
}

/// Persist a user's profile, creating the user directory if needed
pub fn save_profile(config: &StoreConfig, user_id: &str, profile: &Profile) -> Result<()> {
    let dir = config.user_dir(user_id)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create profile directory {}", dir.display()))?;
    let path = dir.join(PROFILE_FILE);
    let content = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write profile to {}", path.display()))
}

/// Changes requested for a profile; `None` fields are left alone
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub cycle_length: Option<u8>,
    pub subscription_status: Option<SubscriptionStatus>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.cycle_length.is_none()
            && self.subscription_status.is_none()
    }

    pub fn apply(self, profile: &mut Profile) {
        if let Some(name) = self.display_name {
            profile.display_name = name;
        }
        if let Some(length) = self.cycle_length {
            profile.cycle_length = length;
        }
        if let Some(status) = self.subscription_status {
            profile.subscription_status = status;
        }
    }
}
