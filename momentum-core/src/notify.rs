//! One-way notification sink.
//!
//! Progression events are rendered into small toast-shaped payloads and
//! handed to a `Notifier`. Delivery is fire-and-forget: the sink has no
//! return channel and its failures stay inside the sink.

use serde::{Deserialize, Serialize};

use crate::events::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub body: String,
    pub duration_ms: u64,
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl Notification {
    pub fn from_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::TaskCompleted { message, .. } => Self {
                severity: Severity::Success,
                title: "🎉 Task Completed!".to_string(),
                body: message.clone(),
                duration_ms: 3_000,
            },
            GameEvent::LevelUp { level } => Self {
                severity: Severity::Success,
                title: "🎉 Level Up!".to_string(),
                body: format!("Congratulations! You've reached level {level}!"),
                duration_ms: 4_000,
            },
            GameEvent::AchievementUnlocked { achievement } => Self {
                severity: Severity::Success,
                title: format!("{} Achievement Unlocked!", achievement.icon),
                body: format!("{}: {}", achievement.title, achievement.description),
                duration_ms: 5_000,
            },
        }
    }

    pub fn failure(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            body: body.into(),
            duration_ms: 5_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::ACHIEVEMENTS;
    use chrono::TimeZone;

    #[test]
    fn level_up_toast_names_the_new_level() {
        let n = Notification::from_event(&GameEvent::LevelUp { level: 4 });
        assert_eq!(n.severity, Severity::Success);
        assert_eq!(n.body, "Congratulations! You've reached level 4!");
        assert_eq!(n.duration_ms, 4_000);
    }

    #[test]
    fn unlock_toast_leads_with_the_icon() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let achievement = ACHIEVEMENTS[0].unlock(now);
        let n = Notification::from_event(&GameEvent::AchievementUnlocked { achievement });
        assert_eq!(n.title, "🎯 Achievement Unlocked!");
        assert_eq!(n.body, "Getting Started: Complete your first task");
        assert_eq!(n.duration_ms, 5_000);
    }

    #[test]
    fn completion_toast_reuses_the_event_message() {
        let n = Notification::from_event(&GameEvent::task_completed(50, 100));
        assert_eq!(n.body, "Task completed! +50 points, +100 XP");
        assert_eq!(n.duration_ms, 3_000);
    }
}
