//! Level curve and reward rules.
//!
//! Both are pure tables: experience maps onto a fixed ascending threshold
//! sequence, and priorities map onto point values. Experience is always twice
//! the points for the same task.

use crate::task::Priority;

/// Cumulative experience required to *reach* each level (index 0 = level 1).
pub const LEVEL_THRESHOLDS: [u32; 20] = [
    0, 100, 250, 450, 700, 1000, 1350, 1750, 2200, 2700, 3250, 3850, 4500, 5200, 5950, 6750, 7600,
    8500, 9450, 10450,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    /// Experience still missing for the next level; 0 once the last threshold
    /// is reached (max-level plateau).
    pub experience_to_next: u32,
}

/// Level for a cumulative experience total: the count of thresholds at or
/// below it, never less than 1. Pure and idempotent.
pub fn calculate_level(experience: u32) -> LevelProgress {
    let mut level = 1u32;
    for (i, threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if experience >= *threshold {
            level = i as u32 + 1;
        } else {
            break;
        }
    }

    let experience_to_next = match LEVEL_THRESHOLDS.get(level as usize) {
        Some(next) => next - experience,
        None => 0,
    };

    LevelProgress {
        level,
        experience_to_next,
    }
}

/// Point reward for completing a task. Total over any input: a task without
/// a priority still earns the default reward.
pub fn points_for_task(priority: Option<Priority>) -> u32 {
    match priority {
        Some(Priority::Urgent) => 50,
        Some(Priority::High) => 30,
        Some(Priority::Medium) => 20,
        Some(Priority::Low) => 10,
        None => 15,
    }
}

/// Experience reward: always double the points.
pub fn experience_for_task(priority: Option<Priority>) -> u32 {
    points_for_task(priority) * 2
}
