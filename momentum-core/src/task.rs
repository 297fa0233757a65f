//! Task model shared by the local and remote stores.
//!
//! The gamification side only ever reads `status` and `priority`; everything
//! else exists for listing and editing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            other => Err(anyhow::anyhow!("unknown status: {other}")),
        }
    }
}

/// Reward-relevant transition check: only moving *into* completed from a
/// non-completed state counts. Re-saving an already completed task does not.
pub fn is_completion(old: TaskStatus, new: TaskStatus) -> bool {
    new == TaskStatus::Completed && old != TaskStatus::Completed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(anyhow::anyhow!("unknown priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Health,
    Education,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Education => "education",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Category::Work),
            "personal" => Ok(Category::Personal),
            "shopping" => Ok(Category::Shopping),
            "health" => Ok(Category::Health),
            "education" => Ok(Category::Education),
            "other" => Ok(Category::Other),
            unknown => Err(anyhow::anyhow!("unknown category: {unknown}")),
        }
    }
}

/// Core task record.
///
/// Note: kept small + serializable. Where it lives (JSON file, remote
/// service) is the store layer's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,

    pub status: TaskStatus,
    pub priority: Option<Priority>,
    pub category: Option<Category>,

    /// Optional due date (UTC).
    pub due_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            priority: None,
            category: None,
            due_date: None,
            created_at,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Due strictly before `today` (calendar days, not instants).
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due.date_naive() < today,
            None => false,
        }
    }

    /// Due within the next two days, today included.
    pub fn is_due_soon(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => {
                let days = (due.date_naive() - today).num_days();
                (0..=2).contains(&days)
            }
            None => false,
        }
    }
}

/// Input for creating a task; the store fills in id, owner and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
    }

    pub fn apply(&self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(ref title) = self.title {
            task.title = title.clone();
        }
        if let Some(ref description) = self.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
        if let Some(category) = self.category {
            task.category = Some(category);
        }
        if let Some(due) = self.due_date {
            task.due_date = Some(due);
        }
        task.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn completion_only_counts_into_completed() {
        assert!(is_completion(TaskStatus::Pending, TaskStatus::Completed));
        assert!(is_completion(TaskStatus::InProgress, TaskStatus::Completed));
        assert!(!is_completion(TaskStatus::Completed, TaskStatus::Completed));
        assert!(!is_completion(TaskStatus::Completed, TaskStatus::Pending));
        assert!(!is_completion(TaskStatus::Pending, TaskStatus::InProgress));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for s in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed] {
            assert_eq!(s.as_str().parse::<TaskStatus>().unwrap(), s);
        }
        assert!("paused".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn due_date_helpers_use_calendar_days() {
        let today = t0().date_naive();
        let overdue = Task::new("t1", "u1", "late", t0())
            .with_due_date(Utc.with_ymd_and_hms(2026, 3, 9, 23, 0, 0).unwrap());
        let soon = Task::new("t2", "u1", "soon", t0())
            .with_due_date(Utc.with_ymd_and_hms(2026, 3, 12, 1, 0, 0).unwrap());
        let far = Task::new("t3", "u1", "later", t0())
            .with_due_date(Utc.with_ymd_and_hms(2026, 3, 20, 1, 0, 0).unwrap());

        assert!(overdue.is_overdue(today));
        assert!(!overdue.is_due_soon(today));
        assert!(soon.is_due_soon(today));
        assert!(!soon.is_overdue(today));
        assert!(!far.is_due_soon(today));

        let undated = Task::new("t4", "u1", "whenever", t0());
        assert!(!undated.is_overdue(today));
        assert!(!undated.is_due_soon(today));
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut task = Task::new("t1", "u1", "draft", t0()).with_priority(Priority::Low);
        let later = t0() + chrono::Duration::hours(1);

        let patch = TaskPatch {
            status: Some(TaskStatus::InProgress),
            category: Some(Category::Work),
            ..TaskPatch::default()
        };
        patch.apply(&mut task, later);

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.category, Some(Category::Work));
        assert_eq!(task.priority, Some(Priority::Low));
        assert_eq!(task.title, "draft");
        assert_eq!(task.updated_at, Some(later));
    }

    #[test]
    fn task_serializes_with_wire_names() {
        let task = Task::new("t1", "u1", "ship it", t0())
            .with_status(TaskStatus::InProgress)
            .with_priority(Priority::Urgent)
            .with_category(Category::Work);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["priority"], "urgent");
        assert_eq!(json["category"], "work");
    }
}
