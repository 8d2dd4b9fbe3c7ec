use chrono::Utc;
use sea_orm::sea_query::NullOrdering;
use sea_orm::*;

use crate::error::{AppError, Result};
use crate::models::Page;
use crate::models::experiences::{self, ExperienceForm};
use crate::uploads::{UploadStore, UploadedFile};

use super::{fetch_page, non_empty, parse_form_date, parse_order, required};

/// Fetch a single experience by ID.
pub async fn get_experience_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> std::result::Result<Option<experiences::Model>, DbErr> {
    experiences::Entity::find_by_id(id).one(db).await
}

/// Every experience in home-page order: explicit order first, then most
/// recent start, undated entries last.
pub async fn get_all_experiences(
    db: &DatabaseConnection,
) -> std::result::Result<Vec<experiences::Model>, DbErr> {
    experiences::Entity::find()
        .order_by_asc(experiences::Column::DisplayOrder)
        .order_by_with_nulls(experiences::Column::StartDate, Order::Desc, NullOrdering::Last)
        .order_by_asc(experiences::Column::Id)
        .all(db)
        .await
}

/// Admin list, most recent start first.
pub async fn get_admin_page(
    db: &DatabaseConnection,
    page: i64,
    per_page: u64,
) -> Result<Page<experiences::Model>> {
    let select = experiences::Entity::find()
        .order_by_with_nulls(experiences::Column::StartDate, Order::Desc, NullOrdering::Last)
        .order_by_asc(experiences::Column::Id);
    fetch_page(db, select, page, per_page).await
}

pub async fn count_experiences(db: &DatabaseConnection) -> std::result::Result<u64, DbErr> {
    experiences::Entity::find().count(db).await
}

/// Create an experience (`id = None`) or update an existing one.
///
/// An acceptable `certificate` replaces the stored path; the file it replaces
/// stays on disk.
pub async fn save_experience(
    db: &DatabaseConnection,
    uploads: &UploadStore,
    id: Option<i32>,
    input: ExperienceForm,
    certificate: Option<&UploadedFile>,
) -> Result<experiences::Model> {
    let mut active: experiences::ActiveModel = match id {
        Some(id) => get_experience_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Experience {id}")))?
            .into(),
        None => experiences::ActiveModel {
            created_at: Set(Utc::now()),
            ..Default::default()
        },
    };

    active.title = Set(required(&input.title, "Experience title is required.")?);
    active.start_date = Set(parse_form_date(input.start_date.as_deref(), "start date")?);
    active.end_date = Set(parse_form_date(input.end_date.as_deref(), "end date")?);
    active.ongoing = Set(input.is_ongoing());
    active.display_order = Set(parse_order(input.order.as_deref()));
    active.company = Set(non_empty(input.company));
    active.location = Set(non_empty(input.location));
    active.role = Set(non_empty(input.role));
    active.description = Set(non_empty(input.description));

    if let Some(file) = certificate {
        if let Some(path) = uploads.save(file).await? {
            active.certificate_image_path = Set(Some(path));
        }
    }

    let experience = match id {
        Some(_) => active.update(db).await?,
        None => active.insert(db).await?,
    };

    tracing::info!(
        "{} experience {} ('{}')",
        if id.is_some() { "Updated" } else { "Created" },
        experience.id,
        experience.title
    );
    Ok(experience)
}

/// Delete an experience and, best-effort, its certificate file.
pub async fn delete_experience(
    db: &DatabaseConnection,
    uploads: &UploadStore,
    id: i32,
) -> Result<()> {
    let experience = get_experience_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Experience {id}")))?;

    if let Some(path) = &experience.certificate_image_path {
        uploads.remove(path).await;
    }

    experiences::Entity::delete_by_id(id).exec(db).await?;
    tracing::info!("Deleted experience {id} ('{}')", experience.title);
    Ok(())
}
