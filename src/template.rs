use crate::dto::SensorReading;
use crate::pagination::{PageWindow, Pagination};
use askama::Template;
use chrono::NaiveDateTime;

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub rows: Vec<SensorReading>,
    pub pagination: Pagination,
    pub window: PageWindow,
    pub error: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub db_host: String,
    pub db_name: String,
}

impl IndexTemplate {
    /// Link to a page, carrying the active filter bounds along so paging
    /// never drops the search.
    pub fn page_href(&self, page: &u32) -> String {
        let mut href = format!("/?page={}", page);
        if let Some(date_from) = &self.date_from {
            href.push_str("&date_from=");
            href.push_str(date_from);
        }
        if let Some(date_to) = &self.date_to {
            href.push_str("&date_to=");
            href.push_str(date_to);
        }
        href
    }

    pub fn first_href(&self) -> String {
        self.page_href(&1)
    }

    pub fn prev_href(&self) -> String {
        self.page_href(&self.pagination.page.saturating_sub(1).max(1))
    }

    pub fn next_href(&self) -> String {
        self.page_href(&self.pagination.page.saturating_add(1))
    }

    pub fn last_href(&self) -> String {
        self.page_href(&self.pagination.total_pages)
    }
}

fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_value(value: &Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "N/A".to_string(),
    }
}

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
