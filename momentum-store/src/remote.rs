//! Remote task service client.
//!
//! Thin REST wrapper: tasks live in a managed service and every request is
//! keyed to the owning user. The caller decides what to do with errors; in
//! particular a failed completion update must reach the user *instead of*
//! any reward being applied.

use anyhow::{Context, Result};
use momentum_core::{NewTask, Task, TaskPatch};
use serde::Serialize;

use crate::filter::{Page, TaskFilter, TaskSort};

pub struct RemoteTaskStore {
    base_url: String,
    user_id: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    task: &'a NewTask,
}

impl RemoteTaskStore {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            user_id: user_id.into(),
            client: reqwest::Client::new(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }

    pub async fn create(&self, new: &NewTask) -> Result<Task> {
        let url = self.tasks_url();
        let body = CreateBody {
            user_id: &self.user_id,
            task: new,
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?
            .error_for_status()
            .with_context(|| format!("POST {url}"))?;
        resp.json().await.context("decode created task")
    }

    pub async fn get(&self, id: &str) -> Result<Task> {
        let url = self.task_url(id);
        let resp = self
            .client
            .get(&url)
            .query(&[("user_id", self.user_id.as_str())])
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        resp.json().await.context("decode task")
    }

    pub async fn list(&self, filter: &TaskFilter, sort: TaskSort, page: Page) -> Result<Vec<Task>> {
        let url = self.tasks_url();
        let resp = self
            .client
            .get(&url)
            .query(&list_params(&self.user_id, filter, sort, page))
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        resp.json().await.context("decode task list")
    }

    pub async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let url = self.task_url(id);
        let resp = self
            .client
            .patch(&url)
            .query(&[("user_id", self.user_id.as_str())])
            .json(patch)
            .send()
            .await
            .with_context(|| format!("PATCH {url}"))?
            .error_for_status()
            .with_context(|| format!("PATCH {url}"))?;
        resp.json().await.context("decode updated task")
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let url = self.task_url(id);
        self.client
            .delete(&url)
            .query(&[("user_id", self.user_id.as_str())])
            .send()
            .await
            .with_context(|| format!("DELETE {url}"))?
            .error_for_status()
            .with_context(|| format!("DELETE {url}"))?;
        Ok(())
    }
}

fn list_params(
    user_id: &str,
    filter: &TaskFilter,
    sort: TaskSort,
    page: Page,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("user_id", user_id.to_string())];
    if let Some(status) = filter.status {
        params.push(("status", status.as_str().to_string()));
    }
    if let Some(priority) = filter.priority {
        params.push(("priority", priority.as_str().to_string()));
    }
    if let Some(category) = filter.category {
        params.push(("category", category.as_str().to_string()));
    }
    if let Some(ref search) = filter.search {
        params.push(("search", search.clone()));
    }
    if let Some(due_before) = filter.due_before {
        params.push(("due_before", due_before.to_rfc3339()));
    }
    params.push(("sort", sort.key.as_str().to_string()));
    params.push(("order", if sort.descending { "desc" } else { "asc" }.to_string()));
    params.push(("offset", page.offset.to_string()));
    params.push(("limit", page.limit.to_string()));
    params
}
