//! Shared fixtures for dashboard and client tests.

use chrono::NaiveDate;

use glance::models::dashboard::{TaskRecord, TaskStatus};
use glance::todoist::{Project, Task};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A minimal record; tests adjust fields as needed.
pub fn record(title: &str, status: TaskStatus) -> TaskRecord {
    TaskRecord {
        id: title.to_string(),
        title: title.to_string(),
        project_name: "Inbox".to_string(),
        status,
        priority: None,
        due_date: None,
        completed_date: None,
    }
}

pub fn completed_record(title: &str, completed_on: NaiveDate) -> TaskRecord {
    let mut r = record(title, TaskStatus::Completed);
    r.completed_date = Some(completed_on);
    r
}

/// An open task as the client would hand it to the aggregator.
pub fn open_task(id: &str, project_id: Option<&str>, priority: Option<u8>) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        project_id: project_id.map(String::from),
        priority,
        due: None,
        is_completed: false,
    }
}

pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
    }
}
