use chrono::Utc;
use sea_orm::*;

use crate::error::{AppError, Result};
use crate::models::projects::{self, ProjectForm, ProjectWithImages};
use crate::models::{Page, blog_posts, project_images};
use crate::uploads::{UploadStore, UploadedFile};

use super::{fetch_page, non_empty, parse_form_date, required};

/// Number of projects shown on the home page.
pub const FEATURED_LIMIT: u64 = 6;

/// Public listing page size.
pub const PUBLIC_PAGE_SIZE: u64 = 12;

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> std::result::Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// A project's gallery in display order.
pub async fn get_images(
    db: &DatabaseConnection,
    project_id: i32,
) -> std::result::Result<Vec<project_images::Model>, DbErr> {
    project_images::Entity::find()
        .filter(project_images::Column::ProjectId.eq(project_id))
        .order_by_asc(project_images::Column::DisplayOrder)
        .order_by_asc(project_images::Column::Id)
        .all(db)
        .await
}

/// Fetch a project together with its gallery.
pub async fn get_project_with_images(
    db: &DatabaseConnection,
    id: i32,
) -> std::result::Result<Option<ProjectWithImages>, DbErr> {
    let Some(project) = get_project_by_id(db, id).await? else {
        return Ok(None);
    };
    let images = get_images(db, id).await?;
    Ok(Some(ProjectWithImages { project, images }))
}

/// Projects for the home page.
pub async fn get_featured_projects(
    db: &DatabaseConnection,
) -> std::result::Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .order_by_asc(projects::Column::Id)
        .limit(FEATURED_LIMIT)
        .all(db)
        .await
}

/// Every project, by title; feeds the post form's project picker.
pub async fn get_all_projects(
    db: &DatabaseConnection,
) -> std::result::Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .order_by_asc(projects::Column::Title)
        .all(db)
        .await
}

/// Public project grid.
pub async fn get_public_page(db: &DatabaseConnection, page: i64) -> Result<Page<projects::Model>> {
    let select = projects::Entity::find().order_by_asc(projects::Column::Id);
    fetch_page(db, select, page, PUBLIC_PAGE_SIZE).await
}

/// Admin list, newest first.
pub async fn get_admin_page(
    db: &DatabaseConnection,
    page: i64,
    per_page: u64,
) -> Result<Page<projects::Model>> {
    let select = projects::Entity::find()
        .order_by_desc(projects::Column::CreatedAt)
        .order_by_desc(projects::Column::Id);
    fetch_page(db, select, page, per_page).await
}

pub async fn count_projects(db: &DatabaseConnection) -> std::result::Result<u64, DbErr> {
    projects::Entity::find().count(db).await
}

pub async fn count_images(db: &DatabaseConnection) -> std::result::Result<u64, DbErr> {
    project_images::Entity::find().count(db).await
}

/// Create a project (`id = None`) or update an existing one, attaching any
/// acceptable uploaded images.
///
/// Blank dates leave an existing project's dates untouched. Each stored image
/// takes its position in `files` as its display order; files with disallowed
/// extensions are skipped without error. Files are written before the commit,
/// so a failed commit can leave them orphaned on disk.
pub async fn save_project(
    db: &DatabaseConnection,
    uploads: &UploadStore,
    id: Option<i32>,
    input: ProjectForm,
    files: &[UploadedFile],
) -> Result<projects::Model> {
    let txn = db.begin().await?;
    let now = Utc::now();

    let mut active: projects::ActiveModel = match id {
        Some(id) => projects::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {id}")))?
            .into(),
        None => projects::ActiveModel {
            created_at: Set(now),
            ..Default::default()
        },
    };

    active.title = Set(required(&input.title, "Project title is required.")?);
    active.description = Set(non_empty(input.description));
    active.category = Set(non_empty(input.category));
    active.live_link = Set(non_empty(input.live_link));
    active.repo_link = Set(non_empty(input.repo_link));
    if let Some(start) = parse_form_date(input.start_date.as_deref(), "start date")? {
        active.start_date = Set(Some(start));
    }
    if let Some(end) = parse_form_date(input.end_date.as_deref(), "end date")? {
        active.end_date = Set(Some(end));
    }
    active.updated_at = Set(now);

    // A new project needs its id before images can point at it.
    let project = match id {
        Some(_) => active.update(&txn).await?,
        None => active.insert(&txn).await?,
    };

    let mut stored = 0usize;
    for (position, file) in files.iter().enumerate() {
        let Some(image_path) = uploads.save(file).await? else {
            continue;
        };

        project_images::ActiveModel {
            project_id: Set(project.id),
            image_path: Set(image_path),
            alt_text: Set(None),
            display_order: Set(i32::try_from(position).unwrap_or(i32::MAX)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        stored += 1;
    }

    txn.commit().await?;
    tracing::info!(
        "{} project {} ('{}') with {stored} new image(s)",
        if id.is_some() { "Updated" } else { "Created" },
        project.id,
        project.title
    );
    Ok(project)
}

/// Delete a project, its images (rows and files) and detach its blog posts.
pub async fn delete_project(db: &DatabaseConnection, uploads: &UploadStore, id: i32) -> Result<()> {
    let project = get_project_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id}")))?;

    let images = get_images(db, id).await?;
    for image in &images {
        uploads.remove(&image.image_path).await;
    }

    let txn = db.begin().await?;

    // Mirrors ON DELETE CASCADE / SET NULL for connections without FK enforcement.
    project_images::Entity::delete_many()
        .filter(project_images::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;

    let posts = blog_posts::Entity::find()
        .filter(blog_posts::Column::ProjectId.eq(id))
        .all(&txn)
        .await?;
    for post in posts {
        let mut active: blog_posts::ActiveModel = post.into();
        active.project_id = Set(None);
        active.update(&txn).await?;
    }

    projects::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        "Deleted project {id} ('{}') and {} image(s)",
        project.title,
        images.len()
    );
    Ok(())
}

/// Delete one image from a project's gallery.
///
/// An image that belongs to a different project is refused with
/// [`AppError::Forbidden`] and left in place.
pub async fn delete_image(
    db: &DatabaseConnection,
    uploads: &UploadStore,
    project_id: i32,
    image_id: i32,
) -> Result<()> {
    get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {project_id}")))?;

    let image = project_images::Entity::find_by_id(image_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Image {image_id}")))?;

    if image.project_id != project_id {
        tracing::warn!(
            "Refused to delete image {image_id} via project {project_id}; it belongs to project {}",
            image.project_id
        );
        return Err(AppError::Forbidden("Unauthorized".to_string()));
    }

    uploads.remove(&image.image_path).await;
    project_images::Entity::delete_by_id(image_id).exec(db).await?;
    tracing::info!("Deleted image {image_id} from project {project_id}");
    Ok(())
}
