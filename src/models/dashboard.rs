//! Pure aggregation over fetched task data.
//!
//! Everything here is a stateless transformation of its inputs: no
//! network, no persistence, recomputed on every request. Tasks with a
//! dangling project reference group under "Unassigned"; tasks without a
//! priority or due date group under "unspecified" rather than being
//! dropped.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

use crate::todoist::{CompletedTask, Project, Task};

pub const UNASSIGNED_PROJECT: &str = "Unassigned";
pub const UNSPECIFIED: &str = "unspecified";

// ---------- Types ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskStatus {
    Active,
    Overdue,
    Completed,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Active => "Active",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// A normalized task row: project reference resolved to a display name,
/// status derived. Lives only for the duration of one render.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub project_name: String,
    pub status: TaskStatus,
    pub priority: Option<u8>,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendBucket {
    Daily,
    Weekly,
}

// ---------- Normalization ----------

/// Merge open tasks and completed history into normalized records.
///
/// Status rules: completed tasks are Completed; an open task due strictly
/// before `today` is Overdue; everything else is Active.
pub fn build_records(
    tasks: &[Task],
    completed: &[CompletedTask],
    projects: &[Project],
    today: NaiveDate,
) -> Vec<TaskRecord> {
    let project_names: HashMap<&str, &str> = projects
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();
    let resolve = |project_id: &Option<String>| -> String {
        project_id
            .as_deref()
            .and_then(|id| project_names.get(id).copied())
            .unwrap_or(UNASSIGNED_PROJECT)
            .to_string()
    };

    let mut records = Vec::with_capacity(tasks.len() + completed.len());

    for task in tasks {
        let status = if task.is_completed {
            TaskStatus::Completed
        } else if task.due.is_some_and(|due| due < today) {
            TaskStatus::Overdue
        } else {
            TaskStatus::Active
        };
        records.push(TaskRecord {
            id: task.id.clone(),
            title: task.title.clone(),
            project_name: resolve(&task.project_id),
            status,
            priority: task.priority,
            due_date: task.due,
            completed_date: None,
        });
    }

    for item in completed {
        records.push(TaskRecord {
            id: item.id.clone(),
            title: item.title.clone(),
            project_name: resolve(&item.project_id),
            status: TaskStatus::Completed,
            // The completed-history endpoint does not report priority or
            // due date; these group under "unspecified".
            priority: None,
            due_date: None,
            completed_date: Some(item.completed_at.date_naive()),
        });
    }

    records
}

// ---------- Grouping ----------

/// Count records per key. Empty input yields an empty map; every record
/// lands in exactly one bucket, so the counts sum to the input length.
pub fn count_by<K, F>(records: &[TaskRecord], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&TaskRecord) -> K,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

pub fn counts_by_status(records: &[TaskRecord]) -> BTreeMap<TaskStatus, usize> {
    count_by(records, |r| r.status)
}

pub fn counts_by_project(records: &[TaskRecord]) -> BTreeMap<String, usize> {
    count_by(records, |r| r.project_name.clone())
}

pub fn counts_by_priority(records: &[TaskRecord]) -> BTreeMap<String, usize> {
    count_by(records, |r| priority_label(r.priority))
}

/// Display label for a stored priority. Todoist stores 4 as the highest
/// and shows it as "p1"; missing or out-of-range values are "unspecified".
pub fn priority_label(priority: Option<u8>) -> String {
    match priority {
        Some(4) => "p1 (urgent)".to_string(),
        Some(3) => "p2 (high)".to_string(),
        Some(2) => "p3 (medium)".to_string(),
        Some(1) => "p4 (normal)".to_string(),
        _ => UNSPECIFIED.to_string(),
    }
}

// ---------- Trend ----------

/// Completions per bucket over `from..=to`, in chronological order.
///
/// Zero-count buckets are included for continuity across the whole range,
/// so an empty input still yields the full bucket sequence. Weekly buckets
/// align to Monday. An inverted range yields an empty sequence.
pub fn completion_trend(
    records: &[TaskRecord],
    from: NaiveDate,
    to: NaiveDate,
    bucket: TrendBucket,
) -> Vec<(NaiveDate, usize)> {
    if from > to {
        return Vec::new();
    }

    let bucket_of = |date: NaiveDate| match bucket {
        TrendBucket::Daily => date,
        TrendBucket::Weekly => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
    };
    let step = match bucket {
        TrendBucket::Daily => 1,
        TrendBucket::Weekly => 7,
    };

    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut cursor = bucket_of(from);
    let last = bucket_of(to);
    while cursor <= last {
        counts.insert(cursor, 0);
        cursor = cursor + Duration::days(step);
    }

    for record in records {
        if let Some(done) = record.completed_date {
            if done >= from && done <= to {
                if let Some(slot) = counts.get_mut(&bucket_of(done)) {
                    *slot += 1;
                }
            }
        }
    }

    counts.into_iter().collect()
}

// ---------- Panels ----------

/// Active tasks with a due date, soonest first, capped at `limit`.
pub fn upcoming_tasks(records: &[TaskRecord], limit: usize) -> Vec<TaskRecord> {
    let mut upcoming: Vec<TaskRecord> = records
        .iter()
        .filter(|r| r.status == TaskStatus::Active && r.due_date.is_some())
        .cloned()
        .collect();
    upcoming.sort_by_key(|r| r.due_date);
    upcoming.truncate(limit);
    upcoming
}
