//! Durable homes for the stats record.
//!
//! One JSON document per user. A missing file is a fresh profile; an
//! unreadable one is reported as an error and the engine falls back to
//! defaults on its own.

use anyhow::{Context, Result};
use momentum_core::{StatsBackend, UserStats};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

pub struct JsonStatsFile {
    path: PathBuf,
}

impl JsonStatsFile {
    pub fn for_user(dir: &Path, user_id: &str) -> Self {
        Self {
            path: dir.join(format!("stats-{user_id}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsBackend for JsonStatsFile {
    fn load(&self) -> Result<Option<UserStats>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let stats =
            serde_json::from_str(&raw).with_context(|| format!("parse {}", self.path.display()))?;
        Ok(Some(stats))
    }

    fn save(&self, stats: &UserStats) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        debug!(path = %self.path.display(), "stats written");
        Ok(())
    }
}

/// In-memory backend for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStats(Mutex<Option<UserStats>>);

impl StatsBackend for MemoryStats {
    fn load(&self) -> Result<Option<UserStats>> {
        Ok(self.0.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, stats: &UserStats) -> Result<()> {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = Some(stats.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonStatsFile::for_user(dir.path(), "u1");
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonStatsFile::for_user(dir.path(), "u1");

        let mut stats = UserStats::default();
        stats.apply_completion(
            Some(momentum_core::Priority::Urgent),
            chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );
        backend.save(&stats).unwrap();

        let loaded = backend.load().unwrap().unwrap();
        assert_eq!(loaded, stats);
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonStatsFile::for_user(dir.path(), "u1");
        fs::write(backend.path(), "{not json").unwrap();
        assert!(backend.load().is_err());
    }

    #[test]
    fn users_get_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = JsonStatsFile::for_user(dir.path(), "alice");
        let b = JsonStatsFile::for_user(dir.path(), "bob");

        let mut stats = UserStats::default();
        stats.total_points = 99;
        a.save(&stats).unwrap();

        assert!(b.load().unwrap().is_none());
        assert_eq!(a.load().unwrap().unwrap().total_points, 99);
    }
}
