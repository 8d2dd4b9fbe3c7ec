use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `experiences` table (work and internship history).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "experiences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<Date>,
    /// Ignored by the templates while `ongoing` is set.
    pub end_date: Option<Date>,
    pub ongoing: bool,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,
    pub certificate_image_path: Option<String>,
    pub display_order: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceForm {
    #[serde(default)]
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub order: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub ongoing: Option<String>,
}

impl ExperienceForm {
    pub fn is_ongoing(&self) -> bool {
        self.ongoing.as_deref() == Some("on")
    }
}
