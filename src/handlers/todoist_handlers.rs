use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;

use crate::auth::csrf;
use crate::auth::session::{api_token, forget_api_token, remember_api_token, set_flash};
use crate::errors::{render, AppError};
use crate::models::dashboard::{
    build_records, completion_trend, counts_by_priority, counts_by_project, counts_by_status,
    priority_label, upcoming_tasks, TaskRecord, TaskStatus, TrendBucket, UNSPECIFIED,
};
use crate::templates_structs::{
    ConnectTemplate, CountRow, DashboardTemplate, FilterState, PageContext, SelectOption, TaskRow,
    TrendRow, UpcomingRow,
};
use crate::todoist::{CompletedTask, Project, Task, TodoistClient, TodoistError};

const HISTORY_WINDOWS: &[i64] = &[7, 30, 90];
const DEFAULT_HISTORY_DAYS: i64 = 30;
const UPCOMING_LIMIT: usize = 10;
const ALL: &str = "All";

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub project: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub days: Option<i64>,
}

#[derive(Deserialize)]
pub struct TokenForm {
    pub api_token: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// GET /todoist — the task dashboard, re-rendered from a fresh fetch on
/// every request. Without a session token this is the connect form.
pub async fn page(
    session: Session,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(token) = api_token(&session) else {
        let ctx = PageContext::build(&session, "/todoist");
        return render(ConnectTemplate { ctx, error: None });
    };

    let today = Local::now().date_naive();
    let history_days = query
        .days
        .filter(|d| HISTORY_WINDOWS.contains(d))
        .unwrap_or(DEFAULT_HISTORY_DAYS);
    let since = today - Duration::days(history_days);

    let fetched = match TodoistClient::new(&token) {
        Ok(client) => fetch_dashboard_data(&client, since).await,
        Err(err) => Err(err),
    };

    match fetched {
        Ok((projects, tasks, completed)) => {
            let records = build_records(&tasks, &completed, &projects, today);
            let ctx = PageContext::build(&session, "/todoist");
            render(dashboard_template(
                ctx,
                &records,
                &query,
                history_days,
                since,
                today,
                None,
            ))
        }
        Err(TodoistError::Authentication(msg)) => {
            // Bad token: forget it and re-prompt rather than rendering a
            // half-broken dashboard.
            log::warn!("Todoist authentication failed: {msg}");
            forget_api_token(&session);
            let ctx = PageContext::build(&session, "/todoist");
            render(ConnectTemplate {
                ctx,
                error: Some(msg),
            })
        }
        Err(err) => {
            log::warn!("Todoist fetch failed: {err}");
            let ctx = PageContext::build(&session, "/todoist");
            render(dashboard_template(
                ctx,
                &[],
                &query,
                history_days,
                since,
                today,
                Some(err.to_string()),
            ))
        }
    }
}

/// POST /todoist/token — store the pasted token in the session.
pub async fn token_submit(
    session: Session,
    form: web::Form<TokenForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    if form.api_token.trim().is_empty() {
        set_flash(&session, "Enter a Todoist API token to connect.");
    } else {
        remember_api_token(&session, &form.api_token);
    }

    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/todoist"))
        .finish())
}

/// POST /todoist/disconnect — forget the session token.
pub async fn disconnect(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    forget_api_token(&session);
    set_flash(&session, "Disconnected from Todoist.");

    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/todoist"))
        .finish())
}

// ---------- Fetch ----------

/// One render cycle's worth of data, fetched sequentially. Any failure
/// aborts the whole fetch; the page never renders partially.
async fn fetch_dashboard_data(
    client: &TodoistClient,
    since: NaiveDate,
) -> Result<(Vec<Project>, Vec<Task>, Vec<CompletedTask>), TodoistError> {
    let projects = client.projects().await?;
    let tasks = client.active_tasks().await?;
    let completed = client.completed_tasks(since).await?;
    Ok((projects, tasks, completed))
}

// ---------- Presentation ----------

fn dashboard_template(
    ctx: PageContext,
    records: &[TaskRecord],
    query: &DashboardQuery,
    history_days: i64,
    since: NaiveDate,
    today: NaiveDate,
    error: Option<String>,
) -> DashboardTemplate {
    let status_counts = counts_by_status(records);
    let active_count = status_counts.get(&TaskStatus::Active).copied().unwrap_or(0);
    let overdue_count = status_counts
        .get(&TaskStatus::Overdue)
        .copied()
        .unwrap_or(0);
    let completed_count = status_counts
        .get(&TaskStatus::Completed)
        .copied()
        .unwrap_or(0);

    let status_rows = count_rows(
        [TaskStatus::Active, TaskStatus::Overdue, TaskStatus::Completed]
            .iter()
            .map(|s| {
                (
                    s.label().to_string(),
                    status_counts.get(s).copied().unwrap_or(0),
                )
            })
            .collect(),
    );
    let project_counts = counts_by_project(records);
    let project_rows = count_rows(project_counts.clone().into_iter().collect());
    let priority_rows = count_rows(counts_by_priority(records).into_iter().collect());

    let bucket = if history_days > 31 {
        TrendBucket::Weekly
    } else {
        TrendBucket::Daily
    };
    let trend = completion_trend(records, since, today, bucket);
    let trend_max = trend.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let trend_rows = trend
        .into_iter()
        .map(|(date, count)| TrendRow {
            date: match bucket {
                TrendBucket::Daily => date.format("%Y-%m-%d").to_string(),
                TrendBucket::Weekly => format!("Week of {}", date.format("%Y-%m-%d")),
            },
            count,
            bar_width: bar_width(count, trend_max),
        })
        .collect();

    let upcoming_rows = upcoming_tasks(records, UPCOMING_LIMIT)
        .into_iter()
        .map(|r| UpcomingRow {
            due: format_due(&r),
            project: r.project_name,
            title: r.title,
        })
        .collect();

    // Filters narrow the task table; the overview counts above always
    // describe the full fetch.
    let selected_project = selection(&query.project);
    let selected_status = selection(&query.status);
    let selected_priority = selection(&query.priority);

    let task_rows = records
        .iter()
        .filter(|r| selected_project == ALL || r.project_name == selected_project)
        .filter(|r| selected_status == ALL || r.status.label() == selected_status)
        .filter(|r| selected_priority == ALL || priority_label(r.priority) == selected_priority)
        .map(|r| TaskRow {
            title: r.title.clone(),
            project: r.project_name.clone(),
            status: r.status.label(),
            priority: priority_label(r.priority),
            due: format_due(r),
        })
        .collect();

    let filters = FilterState {
        project_options: select_options(
            std::iter::once(ALL.to_string()).chain(project_counts.into_keys()),
            &selected_project,
        ),
        status_options: select_options(
            [
                ALL.to_string(),
                TaskStatus::Active.label().to_string(),
                TaskStatus::Overdue.label().to_string(),
                TaskStatus::Completed.label().to_string(),
            ],
            &selected_status,
        ),
        priority_options: select_options(
            std::iter::once(ALL.to_string())
                .chain((1..=4).rev().map(|p| priority_label(Some(p))))
                .chain(std::iter::once(UNSPECIFIED.to_string())),
            &selected_priority,
        ),
        day_options: HISTORY_WINDOWS
            .iter()
            .map(|d| SelectOption {
                value: d.to_string(),
                label: format!("Last {d} days"),
                selected: *d == history_days,
            })
            .collect(),
    };

    DashboardTemplate {
        ctx,
        error,
        history_days,
        active_count,
        overdue_count,
        completed_count,
        status_rows,
        project_rows,
        priority_rows,
        trend_rows,
        upcoming_rows,
        task_rows,
        filters,
    }
}

fn selection(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ALL)
        .to_string()
}

fn select_options<I>(values: I, selected: &str) -> Vec<SelectOption>
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .map(|value| SelectOption {
            selected: value == selected,
            label: value.clone(),
            value,
        })
        .collect()
}

fn count_rows(rows: Vec<(String, usize)>) -> Vec<CountRow> {
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0);
    rows.into_iter()
        .map(|(label, count)| CountRow {
            label,
            count,
            bar_width: bar_width(count, max),
        })
        .collect()
}

fn bar_width(count: usize, max: usize) -> u8 {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count * 100 / max).clamp(2, 100)) as u8
}

fn format_due(record: &TaskRecord) -> String {
    record
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
