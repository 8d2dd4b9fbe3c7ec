use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::AdminUser;
use crate::config::Config;
use crate::db::projects as projects_db;
use crate::error::{AppError, Result};
use crate::models::projects::ProjectForm;
use crate::models::{FlashQuery, ListQuery};
use crate::templates::render;
use crate::uploads::UploadStore;

use super::multipart::MultipartForm;
use super::{Flash, admin_context, redirect_with};

const LIST_PATH: &str = "/admin/projects";

/// Multipart field carrying gallery images.
const IMAGES_FIELD: &str = "images";

/// GET /admin/projects: newest first.
pub async fn list_projects(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let page = projects_db::get_admin_page(db.get_ref(), query.page(), config.items_per_page).await?;

    let mut context = admin_context(&admin, &query.flash());
    context.insert("projects", &page);
    render("admin/projects_list.html", &context)
}

/// GET /admin/project/new: empty project form.
pub async fn new_project(
    admin: AdminUser,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let mut context = admin_context(&admin, &query);
    context.insert("project", &None::<()>);
    render("admin/project_form.html", &context)
}

/// GET /admin/project/{id}/edit: project form with its gallery.
pub async fn edit_project(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let project = projects_db::get_project_with_images(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id}")))?;

    let mut context = admin_context(&admin, &query);
    context.insert("project", &project);
    render("admin/project_form.html", &context)
}

/// POST /admin/project/new: multipart body of text fields plus any number of `images`.
pub async fn create_project(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    uploads: web::Data<UploadStore>,
    config: web::Data<Config>,
    payload: Multipart,
) -> Result<HttpResponse> {
    save(&db, &uploads, &config, None, payload).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Project created successfully!")))
}

/// POST /admin/project/{id}/edit: new images are appended to the gallery.
pub async fn update_project(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    uploads: web::Data<UploadStore>,
    config: web::Data<Config>,
    path: web::Path<i32>,
    payload: Multipart,
) -> Result<HttpResponse> {
    save(&db, &uploads, &config, Some(path.into_inner()), payload).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Project updated successfully!")))
}

async fn save(
    db: &DatabaseConnection,
    uploads: &UploadStore,
    config: &Config,
    id: Option<i32>,
    payload: Multipart,
) -> Result<()> {
    let form = MultipartForm::read(payload, config.max_content_length).await?;
    let input: ProjectForm = form.parse()?;
    let files = form.files_named(IMAGES_FIELD);
    projects_db::save_project(db, uploads, id, input, &files).await?;
    Ok(())
}

/// POST /admin/project/{id}/delete: removes the project, its images and their files.
pub async fn delete_project(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    uploads: web::Data<UploadStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    projects_db::delete_project(db.get_ref(), uploads.get_ref(), path.into_inner()).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Project deleted successfully!")))
}

/// POST /admin/project/{project_id}/image/{image_id}/delete: JSON endpoint used
/// by the edit form's gallery.
pub async fn delete_project_image(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    uploads: web::Data<UploadStore>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse> {
    let (project_id, image_id) = path.into_inner();
    projects_db::delete_image(db.get_ref(), uploads.get_ref(), project_id, image_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
    })))
}
