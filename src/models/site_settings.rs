use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The fixed primary key of the one settings row.
pub const SETTINGS_ID: i32 = 1;

/// Platforms accepted in the `social_links` map, in form order.
pub const SOCIAL_PLATFORMS: [&str; 4] = ["github", "linkedin", "twitter", "email"];

pub const DEFAULT_SITE_TITLE: &str = "My Portfolio";
pub const DEFAULT_OWNER_NAME: &str = "Developer";
pub const DEFAULT_BIO: &str = "Welcome to my portfolio";
pub const DEFAULT_HERO_TEXT: &str = "Full Stack Developer";

/// SeaORM entity for the `site_settings` singleton table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub site_title: String,
    pub owner_name: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    #[sea_orm(column_type = "Text")]
    pub hero_text: String,
    pub contact_email: Option<String>,
    pub resume_url: Option<String>,
    pub social_links: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /admin/settings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub site_title: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub hero_text: String,
    #[serde(default)]
    pub bio: String,
    pub contact_email: Option<String>,
    pub resume_url: Option<String>,
    pub social_github: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_twitter: Option<String>,
    pub social_email: Option<String>,
}

impl SettingsForm {
    /// Build the social-links map, keeping only platforms with a value.
    pub fn social_links(&self) -> serde_json::Map<String, serde_json::Value> {
        let values = [
            &self.social_github,
            &self.social_linkedin,
            &self.social_twitter,
            &self.social_email,
        ];

        SOCIAL_PLATFORMS
            .iter()
            .zip(values)
            .filter_map(|(platform, value)| {
                let value = value.as_deref()?.trim();
                (!value.is_empty()).then(|| ((*platform).to_owned(), serde_json::Value::from(value)))
            })
            .collect()
    }
}
