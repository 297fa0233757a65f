//! momentum-store: persistence for tasks and stats.
//!
//! Tasks live either in a local JSON document or behind a remote task
//! service; `TaskStore` dispatches between the two so the CLI does not care
//! which one the config picked. Stats backends implement the core engine's
//! `StatsBackend` trait.

pub mod filter;
pub mod local;
pub mod remote;
pub mod stats;

pub use filter::{Page, SortKey, TaskFilter, TaskSort, select};
pub use local::LocalTaskStore;
pub use remote::RemoteTaskStore;
pub use stats::{JsonStatsFile, MemoryStats};

use anyhow::Result;
use chrono::{DateTime, Utc};
use momentum_core::{NewTask, Task, TaskPatch};

/// Config-selected task storage.
pub enum TaskStore {
    Local(LocalTaskStore),
    Remote(RemoteTaskStore),
}

impl TaskStore {
    /// The remote service stamps ids and timestamps itself; the local store
    /// uses `now`.
    pub async fn create(&self, new: NewTask, now: DateTime<Utc>) -> Result<Task> {
        match self {
            TaskStore::Local(s) => s.create(new, now),
            TaskStore::Remote(s) => s.create(&new).await,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Task> {
        match self {
            TaskStore::Local(s) => s.get(id),
            TaskStore::Remote(s) => s.get(id).await,
        }
    }

    pub async fn list(&self, filter: &TaskFilter, sort: TaskSort, page: Page) -> Result<Vec<Task>> {
        match self {
            TaskStore::Local(s) => s.list(filter, sort, page),
            TaskStore::Remote(s) => s.list(filter, sort, page).await,
        }
    }

    pub async fn update(&self, id: &str, patch: &TaskPatch, now: DateTime<Utc>) -> Result<Task> {
        match self {
            TaskStore::Local(s) => s.update(id, patch, now),
            TaskStore::Remote(s) => s.update(id, patch).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        match self {
            TaskStore::Local(s) => s.delete(id),
            TaskStore::Remote(s) => s.delete(id).await,
        }
    }
}
