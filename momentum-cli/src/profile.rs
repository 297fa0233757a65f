//! Local identity and data directory.
//!
//! All stores are keyed by the profile's user id, so a machine can hold
//! several independent profiles by pointing HOME elsewhere.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub fn momentum_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".momentum"))
}

pub fn ensure_momentum_home() -> Result<PathBuf> {
    let dir = momentum_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub created_at_utc: Option<String>,
}

pub fn profile_path() -> Result<PathBuf> {
    Ok(ensure_momentum_home()?.join("profile.json"))
}

/// Read the profile, generating one on first run.
pub fn load_or_create_profile() -> Result<Profile> {
    let p = profile_path()?;
    if p.exists() {
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        return serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()));
    }

    let profile = Profile {
        user_id: Uuid::new_v4().to_string(),
        created_at_utc: Some(chrono::Utc::now().to_rfc3339()),
    };
    let json = serde_json::to_string_pretty(&profile)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(profile)
}
