//! Page templates, embedded into the binary at compile time.

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use tera::{Context, Tera};

use crate::error::AppError;

macro_rules! embedded {
    ($($name:literal),* $(,)?) => {
        vec![$(($name, include_str!(concat!("../templates/", $name)))),*]
    };
}

/// Global template engine instance.
pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();

    tera.add_raw_templates(embedded![
        "base.html",
        "index.html",
        "projects.html",
        "project_detail.html",
        "blog.html",
        "post.html",
        "pagination.html",
        "404.html",
        "500.html",
        "error.html",
        "admin/base.html",
        "admin/login.html",
        "admin/dashboard.html",
        "admin/settings.html",
        "admin/projects_list.html",
        "admin/project_form.html",
        "admin/posts_list.html",
        "admin/post_form.html",
        "admin/experiences_list.html",
        "admin/experience_form.html",
        "admin/tools_list.html",
        "admin/tool_form.html",
    ])
    .expect("Failed to load templates");

    tera
});

/// Render a template to a string.
pub fn render_string(template: &str, context: &Context) -> Result<String, tera::Error> {
    TEMPLATES.render(template, context)
}

/// Render a template into a `200 OK` HTML response.
pub fn render(template: &str, context: &Context) -> Result<HttpResponse, AppError> {
    let html = render_string(template, context)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
