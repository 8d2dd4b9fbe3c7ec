use actix_web::cookie::{Cookie, time};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::time::Duration;
use uuid::Uuid;

use crate::config::Config;
use crate::models::users;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "portfolio_session";

/// What the server remembers about a logged-in admin.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
    pub remember: bool,
    pub created_at: DateTime<Utc>,
}

/// Process-wide, in-memory session store.
///
/// Entries expire after the configured lifetime; restarting the process logs
/// everybody out.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<String, Session>,
    lifetime: Duration,
}

impl SessionStore {
    pub fn new(lifetime: Duration) -> Self {
        let cache = Cache::builder()
            .time_to_live(lifetime)
            .max_capacity(1_000)
            .build();

        Self { cache, lifetime }
    }

    /// Open a session for `user` and return its id.
    pub async fn create(&self, user: &users::Model, remember: bool) -> String {
        let session_id = Uuid::new_v4().simple().to_string();
        let session = Session {
            user_id: user.id,
            username: user.username.clone(),
            remember,
            created_at: Utc::now(),
        };

        self.cache.insert(session_id.clone(), session).await;
        session_id
    }

    pub async fn get(&self, session_id: &str) -> Option<Session> {
        self.cache.get(session_id).await
    }

    pub async fn remove(&self, session_id: &str) {
        self.cache.invalidate(session_id).await;
    }

    /// Cookie handing `session_id` to the browser.
    ///
    /// "Remember me" sessions get a persistent cookie; others end with the
    /// browser session.
    pub fn cookie(&self, config: &Config, session_id: &str, remember: bool) -> Cookie<'static> {
        let mut builder = Cookie::build(SESSION_COOKIE, session_id.to_owned())
            .path("/")
            .http_only(config.session_cookie_http_only)
            .secure(config.session_cookie_secure)
            .same_site(config.session_cookie_same_site);

        if remember {
            let seconds = i64::try_from(self.lifetime.as_secs()).unwrap_or(i64::MAX);
            builder = builder.max_age(time::Duration::seconds(seconds));
        }

        builder.finish()
    }

    /// Cookie that makes the browser forget its session id.
    pub fn removal_cookie(config: &Config) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(config.session_cookie_http_only)
            .secure(config.session_cookie_secure)
            .same_site(config.session_cookie_same_site)
            .finish();
        cookie.make_removal();
        cookie
    }
}
