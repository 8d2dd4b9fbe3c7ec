use actix_web::FromRequest;
use actix_web::{HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::session::{SESSION_COOKIE, Session, SessionStore};
use crate::db::users::get_user_by_id;
use crate::error::AppError;

/// Route guard for the admin area.
///
/// Taking `AdminUser` as a handler argument makes the handler reachable only
/// with a live session for an existing user; otherwise extraction fails with
/// [`AppError::Unauthenticated`], which answers with a redirect to the login
/// page before the handler body runs.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub session_id: String,
    pub session: Session,
}

impl AdminUser {
    pub fn username(&self) -> &str {
        &self.session.username
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Session id from the cookie.
            let session_id = req
                .cookie(SESSION_COOKIE)
                .map(|c| c.value().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or(AppError::Unauthenticated)?;

            // 2. Session store from app data.
            let store = req
                .app_data::<web::Data<SessionStore>>()
                .ok_or_else(|| AppError::Internal("Session store not configured".into()))?;

            let session = store
                .get(&session_id)
                .await
                .ok_or(AppError::Unauthenticated)?;

            // 3. The account behind the session must still exist.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| AppError::Internal("Database not configured".into()))?;

            if get_user_by_id(db.get_ref(), session.user_id).await?.is_none() {
                store.remove(&session_id).await;
                return Err(AppError::Unauthenticated);
            }

            Ok(AdminUser {
                session_id,
                session,
            })
        })
    }
}
