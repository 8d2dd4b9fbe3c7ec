use chrono::Utc;
use sea_orm::*;

use crate::error::{AppError, Result};
use crate::models::Page;
use crate::models::tools::{self, ToolForm};

use super::{fetch_page, non_empty, parse_order, required};

/// Admin list page size.
pub const ADMIN_PAGE_SIZE: u64 = 20;

/// Fetch a single tool by ID.
pub async fn get_tool_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> std::result::Result<Option<tools::Model>, DbErr> {
    tools::Entity::find_by_id(id).one(db).await
}

fn ordered() -> Select<tools::Entity> {
    tools::Entity::find()
        .order_by_asc(tools::Column::DisplayOrder)
        .order_by_asc(tools::Column::Name)
        .order_by_asc(tools::Column::Id)
}

/// Every tool, by display order then name.
pub async fn get_all_tools(db: &DatabaseConnection) -> std::result::Result<Vec<tools::Model>, DbErr> {
    ordered().all(db).await
}

pub async fn get_admin_page(db: &DatabaseConnection, page: i64) -> Result<Page<tools::Model>> {
    fetch_page(db, ordered(), page, ADMIN_PAGE_SIZE).await
}

pub async fn count_tools(db: &DatabaseConnection) -> std::result::Result<u64, DbErr> {
    tools::Entity::find().count(db).await
}

/// Create a tool (`id = None`) or update an existing one.
pub async fn save_tool(db: &DatabaseConnection, id: Option<i32>, input: ToolForm) -> Result<tools::Model> {
    let mut active: tools::ActiveModel = match id {
        Some(id) => get_tool_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tool {id}")))?
            .into(),
        None => tools::ActiveModel {
            created_at: Set(Utc::now()),
            ..Default::default()
        },
    };

    active.name = Set(required(&input.name, "Tool name is required.")?);
    active.category = Set(non_empty(input.category));
    active.details = Set(non_empty(input.details));
    active.proficiency = Set(non_empty(input.proficiency));
    active.display_order = Set(parse_order(input.order.as_deref()));

    let tool = match id {
        Some(_) => active.update(db).await?,
        None => active.insert(db).await?,
    };
    tracing::info!(
        "{} tool {} ('{}')",
        if id.is_some() { "Updated" } else { "Created" },
        tool.id,
        tool.name
    );
    Ok(tool)
}

/// Delete a tool by ID.
pub async fn delete_tool(db: &DatabaseConnection, id: i32) -> Result<()> {
    let result = tools::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Tool {id}")));
    }
    tracing::info!("Deleted tool {id}");
    Ok(())
}
