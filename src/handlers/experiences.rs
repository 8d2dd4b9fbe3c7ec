use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::AdminUser;
use crate::config::Config;
use crate::db::experiences as experiences_db;
use crate::error::{AppError, Result};
use crate::models::experiences::ExperienceForm;
use crate::models::{FlashQuery, ListQuery};
use crate::templates::render;
use crate::uploads::UploadStore;

use super::multipart::MultipartForm;
use super::{Flash, admin_context, redirect_with};

const LIST_PATH: &str = "/admin/experiences";

/// Multipart field carrying the optional certificate image.
const CERTIFICATE_FIELD: &str = "certificate";

/// GET /admin/experiences
pub async fn list_experiences(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let page =
        experiences_db::get_admin_page(db.get_ref(), query.page(), config.items_per_page).await?;

    let mut context = admin_context(&admin, &query.flash());
    context.insert("experiences", &page);
    render("admin/experiences_list.html", &context)
}

/// GET /admin/experience/new
pub async fn new_experience(
    admin: AdminUser,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let mut context = admin_context(&admin, &query);
    context.insert("experience", &None::<()>);
    render("admin/experience_form.html", &context)
}

/// GET /admin/experience/{id}/edit
pub async fn edit_experience(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let experience = experiences_db::get_experience_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Experience {id}")))?;

    let mut context = admin_context(&admin, &query);
    context.insert("experience", &experience);
    render("admin/experience_form.html", &context)
}

/// POST /admin/experience/new: multipart with an optional `certificate` file.
pub async fn create_experience(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    uploads: web::Data<UploadStore>,
    config: web::Data<Config>,
    payload: Multipart,
) -> Result<HttpResponse> {
    save(&db, &uploads, &config, None, payload).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Experience created successfully!")))
}

/// POST /admin/experience/{id}/edit
pub async fn update_experience(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    uploads: web::Data<UploadStore>,
    config: web::Data<Config>,
    path: web::Path<i32>,
    payload: Multipart,
) -> Result<HttpResponse> {
    save(&db, &uploads, &config, Some(path.into_inner()), payload).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Experience updated successfully!")))
}

async fn save(
    db: &DatabaseConnection,
    uploads: &UploadStore,
    config: &Config,
    id: Option<i32>,
    payload: Multipart,
) -> Result<()> {
    let form = MultipartForm::read(payload, config.max_content_length).await?;
    let input: ExperienceForm = form.parse()?;
    let certificate = form.file_named(CERTIFICATE_FIELD);
    experiences_db::save_experience(db, uploads, id, input, certificate.as_ref()).await?;
    Ok(())
}

/// POST /admin/experience/{id}/delete
pub async fn delete_experience(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    uploads: web::Data<UploadStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    experiences_db::delete_experience(db.get_ref(), uploads.get_ref(), path.into_inner()).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Experience deleted successfully!")))
}
