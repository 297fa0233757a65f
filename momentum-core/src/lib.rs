//! momentum-core: domain logic for the Momentum task tracker.
//!
//! Tasks, reward rules, the level curve, streaks, achievements, and the
//! progression engine that ties them together. No I/O lives here; stats
//! persistence is injected through `StatsBackend`.

pub mod achievements;
pub mod engine;
pub mod events;
pub mod levels;
pub mod notify;
pub mod stats;
pub mod streak;
pub mod task;
pub mod time;

pub use achievements::{ACHIEVEMENTS, Achievement, AchievementSpec, Rarity};
pub use engine::{Progression, StatsBackend};
pub use events::GameEvent;
pub use levels::{
    LEVEL_THRESHOLDS, LevelProgress, calculate_level, experience_for_task, points_for_task,
};
pub use notify::{Notification, Notifier, Severity};
pub use stats::{CompletionReward, UserStats};
pub use streak::{apply_lapse, highlight_days};
pub use task::{
    Category, NewTask, Priority, Task, TaskPatch, TaskStatus, is_completion,
};
pub use time::{local_day, parse_local_due_to_utc, parse_tz};
