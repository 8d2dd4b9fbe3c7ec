use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::AdminUser;
use crate::db::tools as tools_db;
use crate::error::{AppError, Result};
use crate::models::tools::ToolForm;
use crate::models::{FlashQuery, ListQuery};
use crate::templates::render;

use super::{Flash, admin_context, redirect_with};

const LIST_PATH: &str = "/admin/tools";

/// GET /admin/tools
pub async fn list_tools(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let page = tools_db::get_admin_page(db.get_ref(), query.page()).await?;

    let mut context = admin_context(&admin, &query.flash());
    context.insert("tools", &page);
    render("admin/tools_list.html", &context)
}

/// GET /admin/tool/new
pub async fn new_tool(admin: AdminUser, query: web::Query<FlashQuery>) -> Result<HttpResponse> {
    let mut context = admin_context(&admin, &query);
    context.insert("tool", &None::<()>);
    render("admin/tool_form.html", &context)
}

/// GET /admin/tool/{id}/edit
pub async fn edit_tool(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    query: web::Query<FlashQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let tool = tools_db::get_tool_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tool {id}")))?;

    let mut context = admin_context(&admin, &query);
    context.insert("tool", &tool);
    render("admin/tool_form.html", &context)
}

/// POST /admin/tool/new
pub async fn create_tool(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<ToolForm>,
) -> Result<HttpResponse> {
    tools_db::save_tool(db.get_ref(), None, form.into_inner()).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Tool created successfully!")))
}

/// POST /admin/tool/{id}/edit
pub async fn update_tool(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<ToolForm>,
) -> Result<HttpResponse> {
    tools_db::save_tool(db.get_ref(), Some(path.into_inner()), form.into_inner()).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Tool updated successfully!")))
}

/// POST /admin/tool/{id}/delete
pub async fn delete_tool(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    tools_db::delete_tool(db.get_ref(), path.into_inner()).await?;
    Ok(redirect_with(LIST_PATH, Flash::Message("Tool deleted successfully!")))
}
