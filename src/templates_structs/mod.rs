// Template context structures for Askama templates, organized by page.

pub mod todoist;

pub use todoist::{
    ConnectTemplate, CountRow, DashboardTemplate, FilterState, SelectOption, TaskRow, TrendRow,
    UpcomingRow,
};

use actix_session::Session;
use askama::Template;

use crate::auth::csrf;
use crate::auth::session::{api_token, take_flash};
use crate::models::nav_item::{self, NavItem};

/// Common context shared by all pages. Templates access these as
/// `ctx.app_name`, `ctx.nav_items`, etc.
pub struct PageContext {
    pub app_name: String,
    pub nav_items: Vec<NavItem>,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub todoist_connected: bool,
}

impl PageContext {
    pub fn build(session: &Session, current_path: &str) -> Self {
        let app_name =
            std::env::var("APP_NAME").unwrap_or_else(|_| "Glance".to_string());
        Self {
            app_name,
            nav_items: nav_item::find_navigation(current_path),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            todoist_connected: api_token(session).is_some(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
}
