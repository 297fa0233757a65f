//! Cumulative progression state for one user.
//!
//! Field names on the wire are camelCase so documents written by earlier
//! versions of the tracker load unchanged; the two day-tracking fields are
//! additions and default when absent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::achievements::Achievement;
use crate::levels::{calculate_level, experience_for_task, points_for_task};
use crate::streak;
use crate::task::Priority;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub total_points: u32,
    pub streak: u32,
    pub longest_streak: u32,
    pub tasks_completed: u32,
    pub achievements: Vec<Achievement>,

    /// Local calendar day of the most recent completion.
    #[serde(default)]
    pub last_completion_day: Option<NaiveDate>,
    /// Completions per local calendar day; one entry per active day.
    #[serde(default)]
    pub daily_completions: BTreeMap<NaiveDate, u32>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: 100,
            total_points: 0,
            streak: 0,
            longest_streak: 0,
            tasks_completed: 0,
            achievements: Vec::new(),
            last_completion_day: None,
            daily_completions: BTreeMap::new(),
        }
    }
}

/// What a single completion earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionReward {
    pub points: u32,
    pub experience: u32,
    /// Set when this completion pushed the level up.
    pub new_level: Option<u32>,
}

impl UserStats {
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    /// Highest completion count on any single calendar day.
    pub fn best_day_completions(&self) -> u32 {
        self.daily_completions.values().copied().max().unwrap_or(0)
    }

    /// Fold one completed task into the record: rewards, counters, streak,
    /// per-day count, then the level recomputation. This is the only place
    /// experience, points and the completion count change.
    pub fn apply_completion(&mut self, priority: Option<Priority>, day: NaiveDate) -> CompletionReward {
        let points = points_for_task(priority);
        let experience = experience_for_task(priority);

        self.experience += experience;
        self.total_points += points;
        self.tasks_completed += 1;
        *self.daily_completions.entry(day).or_insert(0) += 1;
        streak::record_completion(self, day);

        let before = self.level;
        let progress = calculate_level(self.experience);
        self.level = progress.level;
        self.experience_to_next = progress.experience_to_next;

        CompletionReward {
            points,
            experience,
            new_level: (self.level > before).then_some(self.level),
        }
    }
}
