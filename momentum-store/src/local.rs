//! Local JSON-file task store.
//!
//! One document per user under the data dir. Every operation reads the full
//! document and writes it back; task counts here are small enough that
//! anything smarter would be noise.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use momentum_core::{NewTask, Task, TaskPatch, TaskStatus};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::filter::{Page, TaskFilter, TaskSort, select};

pub struct LocalTaskStore {
    path: PathBuf,
    user_id: String,
}

impl LocalTaskStore {
    pub fn open(dir: &Path, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            path: dir.join(format!("tasks-{user_id}.json")),
            user_id,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parse {}", self.path.display()))
    }

    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(tasks)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        debug!(count = tasks.len(), "task document written");
        Ok(())
    }

    pub fn create(&self, new: NewTask, now: DateTime<Utc>) -> Result<Task> {
        let mut task = Task::new(Uuid::new_v4().to_string(), &self.user_id, new.title, now);
        task.description = new.description;
        task.status = new.status.unwrap_or(TaskStatus::Pending);
        task.priority = new.priority;
        task.category = new.category;
        task.due_date = new.due_date;

        let mut tasks = self.read_all()?;
        tasks.push(task.clone());
        self.write_all(&tasks)?;
        Ok(task)
    }

    pub fn get(&self, id: &str) -> Result<Task> {
        self.read_all()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| anyhow!("no task with id {id}"))
    }

    pub fn list(&self, filter: &TaskFilter, sort: TaskSort, page: Page) -> Result<Vec<Task>> {
        select(&self.read_all()?, filter, sort, page)
    }

    pub fn update(&self, id: &str, patch: &TaskPatch, now: DateTime<Utc>) -> Result<Task> {
        let mut tasks = self.read_all()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| anyhow!("no task with id {id}"))?;
        patch.apply(task, now);
        let updated = task.clone();
        self.write_all(&tasks)?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut tasks = self.read_all()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(anyhow!("no task with id {id}"));
        }
        self.write_all(&tasks)
    }
}
