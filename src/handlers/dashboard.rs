use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::AdminUser;
use crate::db::{blog_posts, experiences, projects, tools};
use crate::error::Result;
use crate::models::FlashQuery;
use crate::templates::render;

use super::admin_context;

/// GET /admin, /admin/dashboard: entity counts.
pub async fn dashboard(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let db = db.get_ref();

    let mut context = admin_context(&admin, &query);
    context.insert("total_projects", &projects::count_projects(db).await?);
    context.insert("total_posts", &blog_posts::count_posts(db).await?);
    context.insert("total_images", &projects::count_images(db).await?);
    context.insert("total_experiences", &experiences::count_experiences(db).await?);
    context.insert("total_tools", &tools::count_tools(db).await?);
    render("admin/dashboard.html", &context)
}
