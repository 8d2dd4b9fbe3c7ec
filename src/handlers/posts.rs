use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::AdminUser;
use crate::config::Config;
use crate::db::{blog_posts as posts_db, projects as projects_db};
use crate::error::{AppError, Result};
use crate::models::blog_posts::PostForm;
use crate::models::{FlashQuery, ListQuery};
use crate::templates::render;

use super::{Flash, admin_context, redirect_with};

const LIST_PATH: &str = "/admin/posts";

/// GET /admin/posts: every post, drafts included, newest first.
pub async fn list_posts(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let page = posts_db::get_admin_page(db.get_ref(), query.page(), config.items_per_page).await?;

    let mut context = admin_context(&admin, &query.flash());
    context.insert("posts", &page);
    render("admin/posts_list.html", &context)
}

/// GET /admin/post/new: empty post form with the project picker.
pub async fn new_post(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let projects = projects_db::get_all_projects(db.get_ref()).await?;

    let mut context = admin_context(&admin, &query);
    context.insert("post", &None::<()>);
    context.insert("projects", &projects);
    render("admin/post_form.html", &context)
}

/// GET /admin/post/{id}/edit
pub async fn edit_post(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let post = posts_db::get_post_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id}")))?;
    let projects = projects_db::get_all_projects(db.get_ref()).await?;

    let mut context = admin_context(&admin, &query);
    context.insert("post", &post);
    context.insert("projects", &projects);
    render("admin/post_form.html", &context)
}

/// POST /admin/post/new
pub async fn create_post(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    posts_db::save_post(db.get_ref(), None, form.into_inner()).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Post created successfully!")))
}

/// POST /admin/post/{id}/edit: the slug is kept even when the title changes.
pub async fn update_post(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    posts_db::save_post(db.get_ref(), Some(path.into_inner()), form.into_inner()).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Post updated successfully!")))
}

/// POST /admin/post/{id}/delete
pub async fn delete_post(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    posts_db::delete_post(db.get_ref(), path.into_inner()).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Post deleted successfully!")))
}
