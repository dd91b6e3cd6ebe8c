//! Todoist client tests — wire decoding and error classification.
//!
//! The client is exercised without a live server: decoding is factored
//! into free functions fed with representative payloads, and status
//! classification is a pure mapping.

use chrono::NaiveDate;

use glance::todoist::client::{decode_completed, decode_projects, decode_tasks, status_error};
use glance::todoist::{TodoistClient, TodoistError};

const TASKS_BODY: &str = r#"[
  {
    "id": "7001",
    "content": "Water the plants",
    "project_id": "2201",
    "priority": 4,
    "due": { "date": "2024-05-10", "is_recurring": false },
    "is_completed": false,
    "labels": ["home"]
  },
  {
    "id": "7002",
    "content": "File taxes",
    "project_id": "2202",
    "priority": 1,
    "due": null,
    "is_completed": false
  }
]"#;

const PROJECTS_BODY: &str = r#"[
  { "id": "2201", "name": "Home", "color": "teal", "is_favorite": false },
  { "id": "2202", "name": "Admin", "color": "red", "is_favorite": true }
]"#;

const COMPLETED_BODY: &str = r#"{
  "items": [
    {
      "task_id": "7003",
      "content": "Renew passport",
      "project_id": "2202",
      "completed_at": "2024-05-02T09:30:00.000000Z"
    }
  ],
  "projects": {}
}"#;

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[test]
fn test_decode_tasks_full_payload() {
    let tasks = decode_tasks(TASKS_BODY).expect("decode tasks");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Water the plants");
    assert_eq!(tasks[0].priority, Some(4));
    assert_eq!(
        tasks[0].due,
        Some(NaiveDate::from_ymd_opt(2024, 5, 10).expect("valid date"))
    );
    assert_eq!(tasks[1].due, None);
    assert!(!tasks[1].is_completed);
}

#[test]
fn test_decode_tasks_tolerates_sparse_fields() {
    let tasks = decode_tasks(r#"[{ "id": "1", "content": "Bare" }]"#).expect("decode tasks");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].project_id, None);
    assert_eq!(tasks[0].priority, None);
    assert_eq!(tasks[0].due, None);
}

#[test]
fn test_decode_tasks_normalizes_bad_priority_and_due() {
    let body = r#"[{ "id": "1", "content": "Odd", "priority": 9, "due": { "date": "soon" } }]"#;
    let tasks = decode_tasks(body).expect("decode tasks");

    assert_eq!(tasks[0].priority, None, "out-of-range priority becomes unspecified");
    assert_eq!(tasks[0].due, None, "unparseable due date becomes unspecified");
}

#[test]
fn test_decode_projects() {
    let projects = decode_projects(PROJECTS_BODY).expect("decode projects");

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].id, "2201");
    assert_eq!(projects[0].name, "Home");
}

#[test]
fn test_decode_completed_parses_timestamp() {
    let completed = decode_completed(COMPLETED_BODY).expect("decode completed");

    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, "7003");
    assert_eq!(
        completed[0].completed_at.date_naive(),
        NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date")
    );
}

#[test]
fn test_decode_rejects_junk_payloads() {
    assert!(matches!(
        decode_tasks("<html>Service Unavailable</html>"),
        Err(TodoistError::MalformedResponse(_))
    ));
    assert!(matches!(
        decode_tasks(r#"{ "unexpected": "shape" }"#),
        Err(TodoistError::MalformedResponse(_))
    ));
    assert!(matches!(
        decode_projects("null"),
        Err(TodoistError::MalformedResponse(_))
    ));
    assert!(matches!(
        decode_completed(r#"{ "items": [{ "task_id": "1", "content": "x", "completed_at": "yesterday" }] }"#),
        Err(TodoistError::MalformedResponse(_))
    ));
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

#[test]
fn test_status_classification() {
    assert!(matches!(
        status_error(401, "Unauthorized"),
        TodoistError::Authentication(_)
    ));
    assert!(matches!(
        status_error(403, "Forbidden"),
        TodoistError::Authentication(_)
    ));
    assert!(matches!(status_error(429, "Too Many Requests"), TodoistError::Network(_)));
    assert!(matches!(status_error(500, "Server Error"), TodoistError::Network(_)));
}

#[test]
fn test_client_rejects_blank_token() {
    assert!(matches!(
        TodoistClient::new(""),
        Err(TodoistError::Authentication(_))
    ));
    assert!(matches!(
        TodoistClient::new("   "),
        Err(TodoistError::Authentication(_))
    ));
    assert!(TodoistClient::new("a-real-looking-token").is_ok());
}
