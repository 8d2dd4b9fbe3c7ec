use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::AdminUser;
use crate::db::settings as settings_db;
use crate::error::Result;
use crate::models::FlashQuery;
use crate::models::site_settings::{SOCIAL_PLATFORMS, SettingsForm};
use crate::templates::render;

use super::{Flash, admin_context, redirect_with};

/// GET /admin/settings: the site settings form.
pub async fn edit_settings(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let settings = settings_db::get_settings(db.get_ref()).await?;

    // One input per known platform, blank when no link is stored.
    let social_fields: Vec<_> = SOCIAL_PLATFORMS
        .iter()
        .map(|platform| {
            let value = settings
                .social_links
                .get(*platform)
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            serde_json::json!({ "platform": platform, "value": value })
        })
        .collect();

    let mut context = admin_context(&admin, &query);
    context.insert("settings", &settings);
    context.insert("social_fields", &social_fields);
    render("admin/settings.html", &context)
}

/// POST /admin/settings: overwrite the settings row.
pub async fn update_settings(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<SettingsForm>,
) -> Result<HttpResponse> {
    settings_db::update_settings(db.get_ref(), form.into_inner()).await?;
    tracing::info!("Site settings updated by '{}'", admin.username());
    Ok(redirect_with(
        "/admin/settings",
        Flash::Message("Settings updated successfully!"),
    ))
}
