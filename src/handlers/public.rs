use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::db::{blog_posts as posts_db, experiences as experiences_db, projects as projects_db};
use crate::db::{settings as settings_db, tools as tools_db};
use crate::error::{AppError, Result};
use crate::models::{FlashQuery, ListQuery};
use crate::templates::render;

use super::page_context;

/// GET /: the home page with settings, featured projects, experience timeline, tools.
pub async fn index(
    db: web::Data<DatabaseConnection>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let db = db.get_ref();
    let settings = settings_db::get_settings(db).await?;
    let projects = projects_db::get_featured_projects(db).await?;
    let experiences = experiences_db::get_all_experiences(db).await?;
    let tools = tools_db::get_all_tools(db).await?;

    let mut context = page_context(&query);
    context.insert("settings", &settings);
    context.insert("projects", &projects);
    context.insert("experiences", &experiences);
    context.insert("tools", &tools);
    render("index.html", &context)
}

/// GET /projects: paginated project listing.
pub async fn projects(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let db = db.get_ref();
    let settings = settings_db::get_settings(db).await?;
    let page = projects_db::get_public_page(db, query.page()).await?;

    let mut context = page_context(&query.flash());
    context.insert("settings", &settings);
    context.insert("projects", &page);
    render("projects.html", &context)
}

/// GET /project/{id}: one project with its gallery and published posts about it.
pub async fn project_detail(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let db = db.get_ref();
    let id = path.into_inner();
    let project = projects_db::get_project_with_images(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id}")))?;
    let related_posts = posts_db::get_published_for_project(db, id).await?;
    let settings = settings_db::get_settings(db).await?;

    let mut context = page_context(&FlashQuery::default());
    context.insert("settings", &settings);
    context.insert("project", &project);
    context.insert("related_posts", &related_posts);
    render("project_detail.html", &context)
}

/// GET /blog: published posts, newest first.
pub async fn blog(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let db = db.get_ref();
    let settings = settings_db::get_settings(db).await?;
    let page = posts_db::get_feed_page(db, query.page()).await?;

    let mut context = page_context(&query.flash());
    context.insert("settings", &settings);
    context.insert("posts", &page);
    render("blog.html", &context)
}

/// GET /blog/{slug}: a single post. Unpublished posts stay reachable by URL.
pub async fn blog_post(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let db = db.get_ref();
    let slug = path.into_inner();
    let post = posts_db::get_post_by_slug(db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{slug}'")))?;
    let settings = settings_db::get_settings(db).await?;

    let mut context = page_context(&FlashQuery::default());
    context.insert("settings", &settings);
    context.insert("post", &post);
    render("post.html", &context)
}
