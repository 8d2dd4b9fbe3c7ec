use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `blog_posts` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: Option<String>,
    pub project_id: Option<i32>,
    pub published: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_delete = "SetNull"
    )]
    Project,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid slug regex"));
static SEPARATOR_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));

/// Turn a title into its URL slug.
///
/// Lower-cases, drops anything that is not a word character, whitespace or a
/// hyphen, collapses whitespace/hyphen runs into a single `-` and trims hyphens
/// from both ends. Uniqueness is handled by the caller.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = SEPARATOR_RUNS.replace_all(&stripped, "-");
    hyphenated.trim_matches('-').to_string()
}

// ── DTOs ──

/// Body of the admin post form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    pub content: Option<String>,
    /// Checkbox; `"on"` when ticked.
    pub published: Option<String>,
    /// Select value; empty string means "no project".
    pub project_id: Option<String>,
}

impl PostForm {
    pub fn is_published(&self) -> bool {
        self.published.as_deref() == Some("on")
    }
}

/// A post and the project it mentions, if that project still exists.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithProject {
    #[serde(flatten)]
    pub post: Model,
    pub project: Option<super::projects::Model>,
}
