//! Thin client for the Todoist API.
//!
//! Covers exactly what the dashboard page needs: open tasks and projects
//! from the REST v2 API, completed history from the Sync v9 endpoint.
//! Every call is a single attempt with a bounded timeout; failures are
//! folded into the three [`TodoistError`] kinds and surfaced to the page
//! for the user to retry.

pub mod client;

pub use client::TodoistClient;

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

// ---------- Types ----------

/// An open task, as returned by the REST `/tasks` endpoint.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub project_id: Option<String>,
    /// Stored ordinal 1–4, where 4 is the highest (Todoist's "p1").
    /// Absent or out-of-range values are normalized to `None`.
    pub priority: Option<u8>,
    pub due: Option<NaiveDate>,
    pub is_completed: bool,
}

/// A named grouping of tasks.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// A task from the completed-history endpoint. Always carries its
/// completion timestamp.
#[derive(Debug, Clone)]
pub struct CompletedTask {
    pub id: String,
    pub title: String,
    pub project_id: Option<String>,
    pub completed_at: DateTime<Utc>,
}

// ---------- Error ----------

#[derive(Debug)]
pub enum TodoistError {
    /// The token was rejected (HTTP 401/403) or is empty.
    Authentication(String),
    /// Todoist was unreachable, timed out, or returned a non-auth error
    /// status.
    Network(String),
    /// The response arrived but could not be decoded.
    MalformedResponse(String),
}

impl fmt::Display for TodoistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoistError::Authentication(msg) => write!(f, "{msg}"),
            TodoistError::Network(msg) => write!(f, "{msg}"),
            TodoistError::MalformedResponse(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TodoistError {}
