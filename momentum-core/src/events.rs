//! Ordered progression events.
//!
//! One completion produces events in a fixed order: the completion itself,
//! then a level-up if the curve was crossed, then any achievement unlocks.
//! Presentation decides pacing; the engine never sleeps between them.

use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    TaskCompleted {
        points: u32,
        experience: u32,
        message: String,
    },
    LevelUp {
        level: u32,
    },
    AchievementUnlocked {
        achievement: Achievement,
    },
}

impl GameEvent {
    pub fn task_completed(points: u32, experience: u32) -> Self {
        GameEvent::TaskCompleted {
            points,
            experience,
            message: format!("Task completed! +{points} points, +{experience} XP"),
        }
    }
}
