pub mod auth;
pub mod dashboard;
pub mod experiences;
pub mod multipart;
pub mod posts;
pub mod projects;
pub mod public;
pub mod settings;
pub mod tools;

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use chrono::{Datelike, Utc};
use tera::Context;

use crate::auth::AdminUser;
use crate::models::FlashQuery;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Public site ──
    cfg.route("/", web::get().to(public::index))
        .route("/projects", web::get().to(public::projects))
        .route("/project/{id}", web::get().to(public::project_detail))
        .route("/blog", web::get().to(public::blog))
        .route("/blog/{slug}", web::get().to(public::blog_post));

    // ── Admin (every handler below takes the AdminUser guard, except login) ──
    cfg.service(
        web::scope("/admin")
            .route("", web::get().to(dashboard::dashboard))
            .route("/dashboard", web::get().to(dashboard::dashboard))
            .route("/login", web::get().to(auth::login_page))
            .route("/login", web::post().to(auth::login_submit))
            .route("/logout", web::get().to(auth::logout))
            .route("/settings", web::get().to(settings::edit_settings))
            .route("/settings", web::post().to(settings::update_settings))
            // projects
            .route("/projects", web::get().to(projects::list_projects))
            .route("/project/new", web::get().to(projects::new_project))
            .route("/project/new", web::post().to(projects::create_project))
            .route("/project/{id}/edit", web::get().to(projects::edit_project))
            .route("/project/{id}/edit", web::post().to(projects::update_project))
            .route("/project/{id}/delete", web::post().to(projects::delete_project))
            .route(
                "/project/{project_id}/image/{image_id}/delete",
                web::post().to(projects::delete_project_image),
            )
            // posts
            .route("/posts", web::get().to(posts::list_posts))
            .route("/post/new", web::get().to(posts::new_post))
            .route("/post/new", web::post().to(posts::create_post))
            .route("/post/{id}/edit", web::get().to(posts::edit_post))
            .route("/post/{id}/edit", web::post().to(posts::update_post))
            .route("/post/{id}/delete", web::post().to(posts::delete_post))
            // experiences
            .route("/experiences", web::get().to(experiences::list_experiences))
            .route("/experience/new", web::get().to(experiences::new_experience))
            .route("/experience/new", web::post().to(experiences::create_experience))
            .route("/experience/{id}/edit", web::get().to(experiences::edit_experience))
            .route("/experience/{id}/edit", web::post().to(experiences::update_experience))
            .route("/experience/{id}/delete", web::post().to(experiences::delete_experience))
            // tools
            .route("/tools", web::get().to(tools::list_tools))
            .route("/tool/new", web::get().to(tools::new_tool))
            .route("/tool/new", web::post().to(tools::create_tool))
            .route("/tool/{id}/edit", web::get().to(tools::edit_tool))
            .route("/tool/{id}/edit", web::post().to(tools::update_tool))
            .route("/tool/{id}/delete", web::post().to(tools::delete_tool)),
    );
}

/// One-shot banner carried to the next page in its query string.
#[derive(Debug, Clone, Copy)]
pub enum Flash<'a> {
    Message(&'a str),
    Error(&'a str),
}

/// `302 Found` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `302 Found` to `location` with a flash banner attached as `?message=` or `?error=`.
pub fn redirect_with(location: &str, flash: Flash<'_>) -> HttpResponse {
    let pair = match flash {
        Flash::Message(text) => ("message", text),
        Flash::Error(text) => ("error", text),
    };

    match serde_urlencoded::to_string([pair].as_slice()) {
        Ok(query) => redirect(&format!("{location}?{query}")),
        Err(e) => {
            tracing::warn!("Dropping flash that could not be encoded: {e}");
            redirect(location)
        }
    }
}

/// Context every page starts from: flash banners and the footer year.
pub(crate) fn page_context(flash: &FlashQuery) -> Context {
    let mut context = Context::new();
    context.insert("message", &flash.message);
    context.insert("error", &flash.error);
    context.insert("current_year", &Utc::now().year());
    context
}

/// [`page_context`] plus the logged-in admin, for pages under `/admin`.
pub(crate) fn admin_context(admin: &AdminUser, flash: &FlashQuery) -> Context {
    let mut context = page_context(flash);
    context.insert("current_user", admin.username());
    context
}
