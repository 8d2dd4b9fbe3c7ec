use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `tools` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tools")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub details: Option<String>,
    /// Free-form label such as "Advanced".
    pub proficiency: Option<String>,
    pub display_order: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolForm {
    #[serde(default)]
    pub name: String,
    pub category: Option<String>,
    pub details: Option<String>,
    pub proficiency: Option<String>,
    pub order: Option<String>,
}
