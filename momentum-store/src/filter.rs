//! Listing options shared by the local and remote task stores.
//!
//! Filtering, sorting and pagination are applied in-process for the local
//! store; the remote store translates the same types into query parameters.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use momentum_core::{Category, Priority, Task, TaskStatus};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    /// Case-insensitive regex matched against titles.
    pub search: Option<String>,
    pub due_before: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedAt,
    DueDate,
    Priority,
    Title,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::DueDate => "due_date",
            SortKey::Priority => "priority",
            SortKey::Title => "title",
        }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" | "created_at" => Ok(SortKey::CreatedAt),
            "due" | "due_date" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "title" => Ok(SortKey::Title),
            other => Err(anyhow::anyhow!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSort {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for TaskSort {
    /// Newest first, matching the default task list view.
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            descending: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

impl TaskFilter {
    /// Compile the search pattern once per listing.
    fn matcher(&self) -> Result<Option<Regex>> {
        match &self.search {
            Some(pattern) => {
                let re = Regex::new(&format!("(?i){pattern}"))
                    .with_context(|| format!("invalid search pattern: {pattern}"))?;
                Ok(Some(re))
            }
            None => Ok(None),
        }
    }
}

/// Filter, sort and paginate a task slice.
pub fn select(tasks: &[Task], filter: &TaskFilter, sort: TaskSort, page: Page) -> Result<Vec<Task>> {
    let matcher = filter.matcher()?;

    let mut selected: Vec<Task> = tasks
        .iter()
        .filter(|t| filter.status.is_none_or(|s| t.status == s))
        .filter(|t| filter.priority.is_none_or(|p| t.priority == Some(p)))
        .filter(|t| filter.category.is_none_or(|c| t.category == Some(c)))
        .filter(|t| {
            filter
                .due_before
                .is_none_or(|cutoff| t.due_date.is_some_and(|due| due < cutoff))
        })
        .filter(|t| matcher.as_ref().is_none_or(|re| re.is_match(&t.title)))
        .cloned()
        .collect();

    selected.sort_by(|a, b| {
        let ord = match sort.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            // Undated tasks sort after dated ones regardless of direction.
            SortKey::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Priority => a.priority.cmp(&b.priority),
            SortKey::Title => a.title.cmp(&b.title),
        };
        if sort.descending && sort.key != SortKey::DueDate {
            ord.reverse()
        } else if sort.descending {
            // Flip only the dated comparison, keep undated at the end.
            match (a.due_date, b.due_date) {
                (Some(_), Some(_)) => ord.reverse(),
                _ => ord,
            }
        } else {
            ord
        }
    });

    Ok(selected
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect())
}
