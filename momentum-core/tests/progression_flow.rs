//! End-to-end progression scenarios through the public engine API.

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use momentum_core::{GameEvent, Priority, Progression, StatsBackend, UserStats};
use std::sync::Mutex;

#[derive(Default)]
struct MemoryBackend(Mutex<Option<UserStats>>);

impl StatsBackend for MemoryBackend {
    fn load(&self) -> Result<Option<UserStats>> {
        Ok(self.0.lock().unwrap().clone())
    }
    fn save(&self, stats: &UserStats) -> Result<()> {
        *self.0.lock().unwrap() = Some(stats.clone());
        Ok(())
    }
}

// Lets two engines share one backend in the restart test below.
impl StatsBackend for &MemoryBackend {
    fn load(&self) -> Result<Option<UserStats>> {
        Ok(self.0.lock().unwrap().clone())
    }
    fn save(&self, stats: &UserStats) -> Result<()> {
        *self.0.lock().unwrap() = Some(stats.clone());
        Ok(())
    }
}

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, 0, 0).unwrap()
}

fn unlock_ids(events: &[GameEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::AchievementUnlocked { achievement } => Some(achievement.id.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn a_busy_day_unlocks_count_and_daily_achievements_in_order() {
    let engine = Progression::load(MemoryBackend::default(), chrono_tz::UTC);

    for _ in 0..60 {
        engine.record_completion(Some(Priority::Low), at(3, 10, 9)).unwrap();
    }
    let events = engine.evaluate_achievements(at(3, 10, 10)).unwrap();

    assert_eq!(
        unlock_ids(&events),
        vec!["first_task", "productive_day", "task_master", "speed_demon"]
    );

    // A second pass unlocks nothing more.
    assert!(engine.evaluate_achievements(at(3, 10, 11)).unwrap().is_empty());
    assert_eq!(engine.stats(at(3, 10, 12)).achievements.len(), 4);
}

#[test]
fn spreading_the_same_work_over_days_builds_a_streak_instead() {
    let engine = Progression::load(MemoryBackend::default(), chrono_tz::UTC);

    for day in 10..15 {
        engine.record_completion(Some(Priority::Low), at(3, day, 9)).unwrap();
    }
    let events = engine.evaluate_achievements(at(3, 14, 10)).unwrap();
    let ids = unlock_ids(&events);

    assert!(ids.contains(&"first_task".to_string()));
    assert!(!ids.contains(&"productive_day".to_string()));

    let stats = engine.stats(at(3, 14, 11));
    assert_eq!(stats.streak, 5);
    assert_eq!(stats.tasks_completed, 5);
}

#[test]
fn a_week_long_streak_earns_streak_warrior() {
    let engine = Progression::load(MemoryBackend::default(), chrono_tz::UTC);

    for day in 1..=7 {
        engine.record_completion(None, at(3, day, 20)).unwrap();
    }
    let events = engine.evaluate_achievements(at(3, 7, 21)).unwrap();

    assert!(unlock_ids(&events).contains(&"streak_warrior".to_string()));
    assert_eq!(engine.stats(at(3, 7, 22)).longest_streak, 7);
}

#[test]
fn rewards_and_levels_accumulate_across_many_completions() {
    let engine = Progression::load(MemoryBackend::default(), chrono_tz::UTC);

    // 5 urgent completions: 500 XP total, crossing 100, 250 and 450.
    let mut level_ups = Vec::new();
    for _ in 0..5 {
        let events = engine.record_completion(Some(Priority::Urgent), at(3, 10, 9)).unwrap();
        assert!(matches!(events[0], GameEvent::TaskCompleted { .. }));
        for e in &events[1..] {
            if let GameEvent::LevelUp { level } = e {
                level_ups.push(*level);
            }
        }
    }

    assert_eq!(level_ups, vec![2, 3, 4]);

    let stats = engine.stats(at(3, 10, 10));
    assert_eq!(stats.experience, 500);
    assert_eq!(stats.total_points, 250);
    assert_eq!(stats.level, 4);
    assert_eq!(stats.experience_to_next, 200);
}

#[test]
fn restart_resumes_from_the_persisted_record() {
    let backend = MemoryBackend::default();
    {
        let engine = Progression::load(&backend, chrono_tz::UTC);
        engine.record_completion(Some(Priority::High), at(3, 10, 9)).unwrap();
        engine.evaluate_achievements(at(3, 10, 9)).unwrap();
    }

    let engine = Progression::load(&backend, chrono_tz::UTC);
    let stats = engine.stats(at(3, 10, 10));
    assert_eq!(stats.total_points, 30);
    assert_eq!(stats.experience, 60);
    assert_eq!(stats.tasks_completed, 1);
    assert_eq!(stats.achievements.len(), 1);
}
