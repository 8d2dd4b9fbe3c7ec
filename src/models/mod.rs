pub mod blog_posts;
pub mod experiences;
pub mod project_images;
pub mod projects;
pub mod site_settings;
pub mod tools;
pub mod users;

use serde::{Deserialize, Serialize};

/// Query string accepted by every listing page, plus the flash banner values
/// carried across redirects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ListQuery {
    /// Requested 1-based page. Unparsable values fall back to 1; values below
    /// 1 are kept so the listing can reject them.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }

    pub fn flash(&self) -> FlashQuery {
        FlashQuery {
            message: self.message.clone(),
            error: self.error.clone(),
        }
    }
}

/// Flash banner values passed back to a page through the query string.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlashQuery {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// One page of a listing, shaped for templates.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_num: Option<u64>,
    pub next_num: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total_items: u64, total_pages: u64) -> Self {
        let has_prev = page > 1;
        let has_next = page < total_pages;
        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
            has_prev,
            has_next,
            prev_num: has_prev.then(|| page - 1),
            next_num: has_next.then(|| page + 1),
        }
    }
}
