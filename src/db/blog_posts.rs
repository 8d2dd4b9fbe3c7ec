use chrono::Utc;
use sea_orm::*;

use crate::error::{AppError, Result};
use crate::models::blog_posts::{self, PostForm, PostWithProject, slugify};
use crate::models::{Page, projects};

use super::{fetch_page, non_empty, required};

/// Public feed page size.
pub const FEED_PAGE_SIZE: u64 = 10;

/// Used when a title has no slug-worthy characters at all.
const FALLBACK_SLUG: &str = "post";

/// Fetch a single post by ID.
pub async fn get_post_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> std::result::Result<Option<blog_posts::Model>, DbErr> {
    blog_posts::Entity::find_by_id(id).one(db).await
}

/// Fetch a post by slug, published or not, with its project.
pub async fn get_post_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> std::result::Result<Option<PostWithProject>, DbErr> {
    let found = blog_posts::Entity::find()
        .filter(blog_posts::Column::Slug.eq(slug))
        .find_also_related(projects::Entity)
        .one(db)
        .await?;

    Ok(found.map(|(post, project)| PostWithProject { post, project }))
}

/// Published posts that mention a project, newest first.
pub async fn get_published_for_project(
    db: &DatabaseConnection,
    project_id: i32,
) -> std::result::Result<Vec<blog_posts::Model>, DbErr> {
    blog_posts::Entity::find()
        .filter(blog_posts::Column::ProjectId.eq(project_id))
        .filter(blog_posts::Column::Published.eq(true))
        .order_by_desc(blog_posts::Column::CreatedAt)
        .all(db)
        .await
}

/// Public blog feed: published posts only, newest first.
pub async fn get_feed_page(db: &DatabaseConnection, page: i64) -> Result<Page<blog_posts::Model>> {
    let select = blog_posts::Entity::find()
        .filter(blog_posts::Column::Published.eq(true))
        .order_by_desc(blog_posts::Column::CreatedAt)
        .order_by_desc(blog_posts::Column::Id);
    fetch_page(db, select, page, FEED_PAGE_SIZE).await
}

/// Admin list: every post, newest first.
pub async fn get_admin_page(
    db: &DatabaseConnection,
    page: i64,
    per_page: u64,
) -> Result<Page<blog_posts::Model>> {
    let select = blog_posts::Entity::find()
        .order_by_desc(blog_posts::Column::CreatedAt)
        .order_by_desc(blog_posts::Column::Id);
    fetch_page(db, select, page, per_page).await
}

pub async fn count_posts(db: &DatabaseConnection) -> std::result::Result<u64, DbErr> {
    blog_posts::Entity::find().count(db).await
}

async fn slug_taken<C: ConnectionTrait>(db: &C, slug: &str) -> std::result::Result<bool, DbErr> {
    Ok(blog_posts::Entity::find()
        .filter(blog_posts::Column::Slug.eq(slug))
        .one(db)
        .await?
        .is_some())
}

/// Slug for a new post titled `title`: `slugify(title)`, or the first free
/// `<slug>-1`, `<slug>-2`, … when taken.
pub async fn unique_slug<C: ConnectionTrait>(db: &C, title: &str) -> std::result::Result<String, DbErr> {
    let mut base = slugify(title);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_owned();
    }

    let mut candidate = base.clone();
    let mut counter = 1u32;
    while slug_taken(db, &candidate).await? {
        candidate = format!("{base}-{counter}");
        counter += 1;
    }
    Ok(candidate)
}

/// Resolve the project picker value; blank means no project.
async fn parse_project_id<C: ConnectionTrait>(db: &C, value: Option<String>) -> Result<Option<i32>> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };

    let project_id: i32 = raw
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid project '{raw}'.")))?;

    if projects::Entity::find_by_id(project_id).one(db).await?.is_none() {
        return Err(AppError::Validation(format!("Project {project_id} does not exist.")));
    }
    Ok(Some(project_id))
}

/// Create a post (`id = None`) or update an existing one.
///
/// The slug is derived from the title when the post is created and is never
/// touched again, so published URLs stay stable across title edits.
pub async fn save_post(
    db: &DatabaseConnection,
    id: Option<i32>,
    input: PostForm,
) -> Result<blog_posts::Model> {
    let txn = db.begin().await?;
    let now = Utc::now();

    let existing = match id {
        Some(id) => Some(
            blog_posts::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Post {id}")))?,
        ),
        None => None,
    };

    let title = required(&input.title, "Post title is required.")?;
    let published = input.is_published();
    let project_id = parse_project_id(&txn, input.project_id).await?;

    let post = match existing {
        Some(post) => {
            let mut active: blog_posts::ActiveModel = post.into();
            active.title = Set(title);
            active.content = Set(input.content);
            active.published = Set(published);
            active.project_id = Set(project_id);
            active.updated_at = Set(now);
            active.update(&txn).await?
        }
        None => {
            let slug = unique_slug(&txn, &title).await?;
            blog_posts::ActiveModel {
                title: Set(title),
                slug: Set(slug),
                content: Set(input.content),
                published: Set(published),
                project_id: Set(project_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;
    tracing::info!(
        "{} post {} ('{}')",
        if id.is_some() { "Updated" } else { "Created" },
        post.id,
        post.slug
    );
    Ok(post)
}

/// Delete a post. Posts own no files.
pub async fn delete_post(db: &DatabaseConnection, id: i32) -> Result<()> {
    let result = blog_posts::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Post {id}")));
    }
    tracing::info!("Deleted post {id}");
    Ok(())
}
