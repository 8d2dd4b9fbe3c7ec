pub mod blog_posts;
pub mod experiences;
pub mod projects;
pub mod settings;
pub mod tools;
pub mod users;

use chrono::NaiveDate;
use sea_orm::*;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::Page;

/// Open a SeaORM connection pool for `database_url`.
pub async fn create_pool(database_url: &str) -> std::result::Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Every connection to `sqlite::memory:` sees its own empty database.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    Database::connect(options).await
}

/// Fetch one 1-based page of `select`.
///
/// Pages below 1, and pages past the end of a non-empty listing, are not found.
/// An empty listing still has a (blank) first page.
pub async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    page: i64,
    per_page: u64,
) -> Result<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync,
{
    if page < 1 {
        return Err(AppError::NotFound(format!("page {page}")));
    }
    let page = page as u64;

    let paginator = select.paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    if page > 1 && page > totals.number_of_pages {
        return Err(AppError::NotFound(format!("page {page}")));
    }

    let items = paginator.fetch_page(page - 1).await?;
    Ok(Page::new(
        items,
        page,
        per_page,
        totals.number_of_items,
        totals.number_of_pages,
    ))
}

/// Parse an optional `YYYY-MM-DD` form value.
///
/// Blank input is `None`; anything else must be a valid date.
pub fn parse_form_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid {field} '{raw}': expected YYYY-MM-DD."))),
    }
}

/// Trim an optional form value, treating blank as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse the display-order field; blank or garbage means 0.
pub fn parse_order(value: Option<&str>) -> i32 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// A required text field, trimmed.
pub fn required(value: &str, message: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(message.to_owned()));
    }
    Ok(value.to_owned())
}
