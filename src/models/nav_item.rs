// ---------- Types ----------

/// One top-level page in the template shell.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Registered pages, in display order. Adding a page to the template means
/// adding a row here next to its handler and route.
const PAGES: &[(&str, &str)] = &[("/", "Getting started"), ("/todoist", "Todoist tasks")];

// ---------- Queries ----------

pub fn find_navigation(current_path: &str) -> Vec<NavItem> {
    PAGES
        .iter()
        .map(|&(href, label)| NavItem {
            href,
            label,
            active: href == current_path,
        })
        .collect()
}
