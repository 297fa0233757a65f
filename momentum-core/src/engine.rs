//! Progression engine.
//!
//! Owns the single `UserStats` record behind a mutex, applies completion
//! rewards, evaluates achievement unlocks as a separate pass, and writes the
//! record through an injected backend after every mutation. Mutations build
//! on a copy and commit only after the save succeeds, so memory and storage
//! never diverge.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::achievements::newly_earned;
use crate::events::GameEvent;
use crate::stats::UserStats;
use crate::streak;
use crate::task::Priority;
use crate::time::local_day;

/// Durable home for one user's stats record.
///
/// `load` distinguishes "nothing stored yet" (`Ok(None)`) from unreadable
/// data (`Err`); the engine falls back to defaults for both, but only the
/// latter is worth a log line.
pub trait StatsBackend {
    fn load(&self) -> Result<Option<UserStats>>;
    fn save(&self, stats: &UserStats) -> Result<()>;
}

pub struct Progression<B: StatsBackend> {
    backend: B,
    tz: Tz,
    stats: Mutex<UserStats>,
}

impl<B: StatsBackend> Progression<B> {
    /// Load stored stats, substituting defaults for a missing or corrupt
    /// record. Never fails: an unreadable record is logged and replaced.
    pub fn load(backend: B, tz: Tz) -> Self {
        let stats = match backend.load() {
            Ok(Some(stats)) => stats,
            Ok(None) => UserStats::default(),
            Err(err) => {
                warn!("stored stats unreadable, starting fresh: {err:#}");
                UserStats::default()
            }
        };
        Self {
            backend,
            tz,
            stats: Mutex::new(stats),
        }
    }

    fn lock(&self) -> MutexGuard<'_, UserStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current record, with a lapsed streak zeroed first.
    /// The lapse write-back is best effort; a failed save only logs.
    pub fn stats(&self, now: DateTime<Utc>) -> UserStats {
        let mut stats = self.lock();
        if streak::apply_lapse(&mut stats, local_day(now, self.tz)) {
            if let Err(err) = self.backend.save(&stats) {
                warn!("could not persist streak lapse: {err:#}");
            }
        }
        stats.clone()
    }

    /// Record one completed task: rewards, counters, streak, level. Returns
    /// the completion event, followed by a level-up event when the curve was
    /// crossed. The updated record is persisted before the events are
    /// returned; on a failed save nothing changes and the error propagates.
    pub fn record_completion(
        &self,
        priority: Option<Priority>,
        now: DateTime<Utc>,
    ) -> Result<Vec<GameEvent>> {
        let day = local_day(now, self.tz);
        let mut stats = self.lock();

        let mut next = stats.clone();
        let reward = next.apply_completion(priority, day);

        self.backend.save(&next).context("persist stats")?;
        *stats = next;
        debug!(
            points = reward.points,
            experience = reward.experience,
            total = stats.tasks_completed,
            "completion recorded"
        );

        let mut events = vec![GameEvent::task_completed(reward.points, reward.experience)];
        if let Some(level) = reward.new_level {
            events.push(GameEvent::LevelUp { level });
        }
        Ok(events)
    }

    /// Separate unlock pass over the achievement catalog. Idempotent: ids
    /// already on the record are skipped, so a second run with unchanged
    /// stats yields nothing.
    pub fn evaluate_achievements(&self, now: DateTime<Utc>) -> Result<Vec<GameEvent>> {
        let mut stats = self.lock();

        let earned = newly_earned(&stats);
        if earned.is_empty() {
            return Ok(Vec::new());
        }

        let mut next = stats.clone();
        let mut events = Vec::with_capacity(earned.len());
        for spec in earned {
            let achievement = spec.unlock(now);
            debug!(id = %achievement.id, "achievement unlocked");
            next.achievements.push(achievement.clone());
            events.push(GameEvent::AchievementUnlocked { achievement });
        }

        self.backend.save(&next).context("persist stats")?;
        *stats = next;
        Ok(events)
    }
}
