//! Bearer-token HTTP client against the Todoist endpoints.
//!
//! Wire structs mirror the JSON payloads; decoding into the public types
//! in the parent module is factored into free functions so the format can
//! be tested without a live server.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::time::Duration;

use super::{CompletedTask, Project, Task, TodoistError};

const REST_BASE: &str = "https://api.todoist.com/rest/v2";
const SYNC_BASE: &str = "https://api.todoist.com/sync/v9";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------- Wire types ----------

#[derive(Debug, Deserialize)]
struct TaskRaw {
    #[serde(default)]
    id: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    priority: Option<u8>,
    #[serde(default)]
    due: Option<DueRaw>,
    #[serde(default)]
    is_completed: bool,
}

#[derive(Debug, Deserialize)]
struct DueRaw {
    #[serde(default)]
    date: String,
}

#[derive(Debug, Deserialize)]
struct ProjectRaw {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CompletedResponseRaw {
    #[serde(default)]
    items: Vec<CompletedItemRaw>,
}

#[derive(Debug, Deserialize)]
struct CompletedItemRaw {
    #[serde(default)]
    task_id: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    project_id: Option<String>,
    completed_at: String,
}

// ---------- Client ----------

pub struct TodoistClient {
    http: reqwest::Client,
    token: String,
}

impl TodoistClient {
    /// Build a client for the given API token. An empty or blank token is
    /// rejected here, before any network call.
    pub fn new(token: &str) -> Result<Self, TodoistError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TodoistError::Authentication(
                "The Todoist API token must not be empty.".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TodoistError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            token: token.to_string(),
        })
    }

    /// Fetch all open tasks.
    pub async fn active_tasks(&self) -> Result<Vec<Task>, TodoistError> {
        let body = self.get(&format!("{REST_BASE}/tasks"), &[]).await?;
        decode_tasks(&body)
    }

    /// Fetch all projects.
    pub async fn projects(&self) -> Result<Vec<Project>, TodoistError> {
        let body = self.get(&format!("{REST_BASE}/projects"), &[]).await?;
        decode_projects(&body)
    }

    /// Fetch tasks completed on or after `since`.
    pub async fn completed_tasks(
        &self,
        since: NaiveDate,
    ) -> Result<Vec<CompletedTask>, TodoistError> {
        let since = format!("{since}T00:00:00");
        let url = format!("{SYNC_BASE}/completed/get_all");
        let body = self.get(&url, &[("since", since.as_str())]).await?;
        decode_completed(&body)
    }

    /// Single-attempt GET. Returns the response body on 2xx, otherwise the
    /// classified error.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TodoistError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        if !(200..300).contains(&status) {
            return Err(status_error(status, &body));
        }
        Ok(body)
    }
}

// ---------- Error classification ----------

fn transport_error(err: reqwest::Error) -> TodoistError {
    if err.is_timeout() {
        TodoistError::Network("The request to Todoist timed out.".to_string())
    } else {
        TodoistError::Network(format!("Todoist could not be reached: {err}"))
    }
}

/// Map a non-2xx status to the matching error kind. Only 401/403 mean the
/// token is bad; anything else reachable-but-failing stays a network kind.
pub fn status_error(status: u16, body: &str) -> TodoistError {
    match status {
        401 | 403 => TodoistError::Authentication(
            "Todoist rejected the API token. It may be invalid or expired.".to_string(),
        ),
        _ => TodoistError::Network(format!(
            "Todoist returned HTTP {status}: {}",
            snippet(body)
        )),
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > 200 {
        let cut: String = trimmed.chars().take(200).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}

// ---------- Decoding ----------

pub fn decode_tasks(body: &str) -> Result<Vec<Task>, TodoistError> {
    let raw: Vec<TaskRaw> = serde_json::from_str(body).map_err(decode_error)?;
    Ok(raw
        .into_iter()
        .map(|t| Task {
            id: t.id,
            title: t.content,
            project_id: t.project_id,
            priority: t.priority.filter(|p| (1..=4).contains(p)),
            due: t
                .due
                .and_then(|d| NaiveDate::parse_from_str(&d.date, "%Y-%m-%d").ok()),
            is_completed: t.is_completed,
        })
        .collect())
}

pub fn decode_projects(body: &str) -> Result<Vec<Project>, TodoistError> {
    let raw: Vec<ProjectRaw> = serde_json::from_str(body).map_err(decode_error)?;
    Ok(raw
        .into_iter()
        .map(|p| Project {
            id: p.id,
            name: p.name,
        })
        .collect())
}

pub fn decode_completed(body: &str) -> Result<Vec<CompletedTask>, TodoistError> {
    let raw: CompletedResponseRaw = serde_json::from_str(body).map_err(decode_error)?;
    raw.items
        .into_iter()
        .map(|item| {
            let completed_at = DateTime::parse_from_rfc3339(&item.completed_at)
                .map_err(|e| {
                    TodoistError::MalformedResponse(format!(
                        "Unexpected completion timestamp {:?}: {e}",
                        item.completed_at
                    ))
                })?
                .with_timezone(&Utc);
            Ok(CompletedTask {
                id: item.task_id,
                title: item.content,
                project_id: item.project_id,
                completed_at,
            })
        })
        .collect()
}

fn decode_error(err: serde_json::Error) -> TodoistError {
    TodoistError::MalformedResponse(format!("Unexpected payload from Todoist: {err}"))
}
