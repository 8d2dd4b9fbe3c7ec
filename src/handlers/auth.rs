use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::{AdminUser, SessionStore};
use crate::config::Config;
use crate::db::users as users_db;
use crate::error::Result;
use crate::models::FlashQuery;
use crate::models::users::LoginForm;
use crate::templates::render;

use super::{Flash, page_context, redirect, redirect_with};

const DASHBOARD_PATH: &str = "/admin/dashboard";

/// GET /admin/login: login form. Already logged-in admins go to the dashboard.
pub async fn login_page(
    admin: Option<AdminUser>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    if admin.is_some() {
        return Ok(redirect(DASHBOARD_PATH));
    }
    render("admin/login.html", &page_context(&query))
}

/// POST /admin/login: check credentials and open a session.
///
/// Unknown usernames and wrong passwords get the same answer.
pub async fn login_submit(
    db: web::Data<DatabaseConnection>,
    sessions: web::Data<SessionStore>,
    config: web::Data<Config>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();

    let Some(user) = users_db::authenticate(db.get_ref(), &form.username, &form.password).await?
    else {
        tracing::warn!("Failed login attempt for username '{}'", form.username);
        let mut context = page_context(&FlashQuery {
            message: None,
            error: Some("Invalid username or password.".to_string()),
        });
        context.insert("username", &form.username);
        return render("admin/login.html", &context);
    };

    let remember = form.remember();
    let session_id = sessions.create(&user, remember).await;
    tracing::info!("Admin '{}' logged in (remember: {remember})", user.username);

    let mut response = redirect(DASHBOARD_PATH);
    response.add_cookie(&sessions.cookie(&config, &session_id, remember))?;
    Ok(response)
}

/// GET /admin/logout: close the session and forget the cookie.
pub async fn logout(
    admin: AdminUser,
    sessions: web::Data<SessionStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    sessions.remove(&admin.session_id).await;
    tracing::info!("Admin '{}' logged out", admin.username());

    let mut response = redirect_with("/", Flash::Message("You have been logged out."));
    response.add_cookie(&SessionStore::removal_cookie(&config))?;
    Ok(response)
}
