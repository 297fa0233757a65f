//! Achievement catalog and unlock evaluation.
//!
//! The catalog is a fixed process-wide constant. Unlocking copies an entry
//! into `UserStats` with a timestamp; entries are never removed or unlocked
//! twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::UserStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// Catalog entry. Rarity is cosmetic only; it never affects reward math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
    pub max_progress: u32,
}

/// An unlocked achievement as stored on the user's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub rarity: Rarity,
    pub unlocked_at: DateTime<Utc>,
    pub progress: u32,
    pub max_progress: u32,
}

pub const ACHIEVEMENTS: [AchievementSpec; 8] = [
    AchievementSpec {
        id: "first_task",
        title: "Getting Started",
        description: "Complete your first task",
        icon: "🎯",
        rarity: Rarity::Common,
        max_progress: 1,
    },
    AchievementSpec {
        id: "productive_day",
        title: "Productive Day",
        description: "Complete 5 tasks in one day",
        icon: "💪",
        rarity: Rarity::Common,
        max_progress: 5,
    },
    AchievementSpec {
        id: "task_master",
        title: "Task Master",
        description: "Complete 50 tasks",
        icon: "👑",
        rarity: Rarity::Rare,
        max_progress: 50,
    },
    AchievementSpec {
        id: "streak_warrior",
        title: "Streak Warrior",
        description: "Maintain a 7-day streak",
        icon: "🔥",
        rarity: Rarity::Rare,
        max_progress: 7,
    },
    AchievementSpec {
        id: "consistency_king",
        title: "Consistency King",
        description: "Maintain a 30-day streak",
        icon: "⚡",
        rarity: Rarity::Epic,
        max_progress: 30,
    },
    AchievementSpec {
        id: "legendary_achiever",
        title: "Legendary Achiever",
        description: "Complete 100 tasks",
        icon: "🏆",
        rarity: Rarity::Legendary,
        max_progress: 100,
    },
    AchievementSpec {
        id: "speed_demon",
        title: "Speed Demon",
        description: "Complete 10 tasks in one day",
        icon: "⚡",
        rarity: Rarity::Epic,
        max_progress: 10,
    },
    AchievementSpec {
        id: "perfectionist",
        title: "Perfectionist",
        description: "Complete 20 tasks without skipping a day",
        icon: "💎",
        rarity: Rarity::Legendary,
        max_progress: 20,
    },
];

impl AchievementSpec {
    /// Unlock predicate over cumulative stats. The two daily achievements
    /// check the best single calendar day, not lifetime totals.
    pub fn is_earned(&self, stats: &UserStats) -> bool {
        match self.id {
            "first_task" => stats.tasks_completed >= 1,
            "productive_day" => stats.best_day_completions() >= 5,
            "task_master" => stats.tasks_completed >= 50,
            "streak_warrior" => stats.streak >= 7,
            "consistency_king" => stats.streak >= 30,
            "legendary_achiever" => stats.tasks_completed >= 100,
            "speed_demon" => stats.best_day_completions() >= 10,
            "perfectionist" => stats.tasks_completed >= 20 && stats.streak >= 20,
            _ => false,
        }
    }

    /// Stamp an unlocked copy at full progress.
    pub fn unlock(&self, now: DateTime<Utc>) -> Achievement {
        Achievement {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            rarity: self.rarity,
            unlocked_at: now,
            progress: self.max_progress,
            max_progress: self.max_progress,
        }
    }
}

/// Catalog entries earned but not yet present on the record, in catalog
/// order. Running this twice against unchanged stats returns nothing the
/// second time once the unlocks have been appended.
pub fn newly_earned(stats: &UserStats) -> Vec<&'static AchievementSpec> {
    ACHIEVEMENTS
        .iter()
        .filter(|spec| !stats.has_achievement(spec.id) && spec.is_earned(stats))
        .collect()
}
