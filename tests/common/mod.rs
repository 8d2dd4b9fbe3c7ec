//! Shared fixtures for the integration tests: an in-memory SQLite database with
//! every migration applied, a throwaway upload directory, and request helpers.
#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test::TestRequest;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use portfolio_site::auth::{SESSION_COOKIE, SessionStore};
use portfolio_site::config::Config;
use portfolio_site::create_pool;
use portfolio_site::db::users::ensure_admin;
use portfolio_site::uploads::UploadStore;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

const BOUNDARY: &str = "----portfolio-test-boundary";

/// Everything a test app needs. The upload directory lives as long as this value.
pub struct TestContext {
    pub db: DatabaseConnection,
    pub config: Config,
    pub uploads: UploadStore,
    pub sessions: SessionStore,
    pub upload_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = create_pool("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        Migrator::up(&db, None).await.expect("Migrations failed");

        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let config = Config {
            upload_dir: upload_dir.path().to_path_buf(),
            // Lowest cost bcrypt accepts; keeps the suite fast.
            bcrypt_cost: 4,
            ..Config::default()
        };

        ensure_admin(&db, ADMIN_USERNAME, ADMIN_PASSWORD, config.bcrypt_cost)
            .await
            .expect("Failed to create admin");

        let uploads = UploadStore::from_config(&config);
        let sessions = SessionStore::new(config.session_lifetime);

        Self {
            db,
            config,
            uploads,
            sessions,
            upload_dir,
        }
    }

    /// Names of the files currently in the upload directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to list upload dir")
            .map(|entry| {
                entry
                    .expect("Bad dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

/// Build the application the way `main` does, on top of a [`TestContext`].
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.db.clone()))
                .app_data(actix_web::web::Data::new($ctx.config.clone()))
                .app_data(actix_web::web::Data::new($ctx.uploads.clone()))
                .app_data(actix_web::web::Data::new($ctx.sessions.clone()))
                .configure(portfolio_site::handlers::init_routes),
        )
        .await
    };
}

/// POST /admin/login with the seeded admin's credentials.
pub fn login_request() -> TestRequest {
    TestRequest::post()
        .uri("/admin/login")
        .set_form([("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)].as_slice())
}

/// The session cookie a login response handed out.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("Login response did not set a session cookie")
}

/// Value of the `Location` header.
pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("Response has no Location header")
        .to_str()
        .expect("Location is not ASCII")
        .to_owned()
}

/// One part of a hand-built `multipart/form-data` body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        field: &'a str,
        filename: &'a str,
        content: &'a [u8],
    },
}

/// POST `uri` with a multipart body made of `parts`.
pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> TestRequest {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                field,
                filename,
                content,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    TestRequest::post()
        .uri(uri)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}
