use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use tera::Context;

use crate::handlers::{Flash, redirect_with};
use crate::templates;

/// Where the route guard sends anonymous visitors.
pub const LOGIN_PATH: &str = "/admin/login";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Cross-entity ownership mismatch; answered as JSON.
    #[error("{0}")]
    Forbidden(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::Multipart(err.to_string())
    }
}

impl From<actix_web::error::HttpError> for AppError {
    fn from(err: actix_web::error::HttpError) -> Self {
        AppError::Internal(format!("Failed to build response: {err}"))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Password hashing failed: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthenticated => StatusCode::FOUND,
            AppError::Validation(_) | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database(_)
            | AppError::Io(_)
            | AppError::Template(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Unauthenticated => redirect_with(
                LOGIN_PATH,
                Flash::Error("Please log in to access this page."),
            ),
            AppError::Forbidden(message) => HttpResponse::build(status).json(serde_json::json!({
                "error": message,
            })),
            AppError::NotFound(what) => {
                tracing::debug!("Not found: {what}");
                error_page(status, "404.html", None)
            }
            AppError::Validation(message) | AppError::Multipart(message) => {
                error_page(status, "error.html", Some(message))
            }
            AppError::PayloadTooLarge(_) => {
                error_page(status, "error.html", Some(&self.to_string()))
            }
            _ => {
                // Details stay in the log; visitors get the generic page.
                tracing::error!("{self}");
                error_page(status, "500.html", None)
            }
        }
    }
}

fn error_page(status: StatusCode, template: &str, message: Option<&str>) -> HttpResponse {
    let mut context = Context::new();
    context.insert("status", &status.as_u16());
    if let Some(message) = message {
        context.insert("reason", message);
    }

    match templates::render_string(template, &context) {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            tracing::error!("Template error while rendering {template}: {e}");
            HttpResponse::build(status).body(status.to_string())
        }
    }
}
