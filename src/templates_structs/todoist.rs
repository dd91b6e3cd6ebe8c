use askama::Template;

use super::PageContext;

/// One row of a grouped count, with a precomputed bar width (percent of
/// the largest count in the group).
pub struct CountRow {
    pub label: String,
    pub count: usize,
    pub bar_width: u8,
}

pub struct TrendRow {
    pub date: String,
    pub count: usize,
    pub bar_width: u8,
}

pub struct UpcomingRow {
    pub title: String,
    pub project: String,
    pub due: String,
}

pub struct TaskRow {
    pub title: String,
    pub project: String,
    pub status: &'static str,
    pub priority: String,
    pub due: String,
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Current filter selections plus the options each select renders.
pub struct FilterState {
    pub project_options: Vec<SelectOption>,
    pub status_options: Vec<SelectOption>,
    pub priority_options: Vec<SelectOption>,
    pub day_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "todoist/connect.html")]
pub struct ConnectTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "todoist/dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    /// Set when a fetch failed; the page renders empty with this notice.
    pub error: Option<String>,
    pub history_days: i64,
    pub active_count: usize,
    pub overdue_count: usize,
    pub completed_count: usize,
    pub status_rows: Vec<CountRow>,
    pub project_rows: Vec<CountRow>,
    pub priority_rows: Vec<CountRow>,
    pub trend_rows: Vec<TrendRow>,
    pub upcoming_rows: Vec<UpcomingRow>,
    pub task_rows: Vec<TaskRow>,
    pub filters: FilterState,
}
