use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use portfolio_site::auth::SessionStore;
use portfolio_site::config::Config;
use portfolio_site::db::{settings, users};
use portfolio_site::handlers;
use portfolio_site::uploads::UploadStore;
use portfolio_site::{create_pool, error::AppError};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::from_env();
    tracing::info!("Starting in {:?} mode", config.environment);

    let db = create_pool(&config.database_url)
        .await
        .map_err(|e| startup_error("Failed to connect to the database", e))?;

    Migrator::up(&db, None)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;
    tracing::info!("Database migrations applied");

    users::ensure_admin(
        &db,
        &config.admin_username,
        &config.admin_password,
        config.bcrypt_cost,
    )
    .await
    .map_err(|e| startup_error("Failed to bootstrap the admin user", e))?;
    settings::get_settings(&db)
        .await
        .map_err(|e| startup_error("Failed to bootstrap site settings", e))?;

    let uploads = UploadStore::from_config(&config);
    uploads
        .ensure_dir()
        .await
        .map_err(|e| startup_error("Failed to create the upload directory", e))?;

    let sessions = SessionStore::new(config.session_lifetime);

    let bind_addr = config.bind_addr();
    let upload_dir = uploads.dir().to_path_buf();
    let max_body = config.max_content_length;

    let db_data = web::Data::new(db);
    let config_data = web::Data::new(config);
    let uploads_data = web::Data::new(uploads);
    let sessions_data = web::Data::new(sessions);

    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .app_data(uploads_data.clone())
            .app_data(sessions_data.clone())
            .app_data(web::FormConfig::default().limit(max_body))
            .service(Files::new("/static/uploads", upload_dir.clone()))
            .configure(handlers::init_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}

fn startup_error(context: &str, err: impl Into<AppError>) -> std::io::Error {
    let err = err.into();
    tracing::error!("{context}: {err}");
    std::io::Error::other(format!("{context}: {err}"))
}
