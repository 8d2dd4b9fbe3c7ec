use actix_web::cookie::SameSite;
use std::path::PathBuf;
use std::time::Duration;

/// Deployment profile selected with `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl Environment {
    fn from_env_value(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Directory that backs the `/static/uploads` URL prefix.
    pub upload_dir: PathBuf,
    /// Upper bound on a request body, in bytes.
    pub max_content_length: usize,
    /// Lower-case file extensions accepted for image uploads.
    pub allowed_extensions: Vec<String>,
    pub session_cookie_secure: bool,
    pub session_cookie_http_only: bool,
    pub session_cookie_same_site: SameSite,
    pub session_lifetime: Duration,
    pub admin_username: String,
    pub admin_password: String,
    /// Page size of the admin project, post and experience lists.
    pub items_per_page: u64,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "sqlite://portfolio.db?mode=rwc".to_string(),
            upload_dir: PathBuf::from("static/uploads"),
            max_content_length: 16 * 1024 * 1024,
            allowed_extensions: ["png", "jpg", "jpeg", "gif", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
            session_cookie_secure: false,
            session_cookie_http_only: true,
            session_cookie_same_site: SameSite::Lax,
            session_lifetime: Duration::from_secs(7 * 24 * 60 * 60),
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            items_per_page: 10,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = std::env::var("APP_ENV")
            .map(|v| Environment::from_env_value(&v))
            .unwrap_or(defaults.environment);

        // Production always sends the session cookie over HTTPS only.
        let session_cookie_secure = environment == Environment::Production
            || parse_bool("SESSION_COOKIE_SECURE", defaults.session_cookie_secure);

        Self {
            environment,
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", defaults.port),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            upload_dir: std::env::var("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_content_length: parse_or("MAX_CONTENT_LENGTH", defaults.max_content_length),
            allowed_extensions: std::env::var("ALLOWED_EXTENSIONS")
                .map(|v| parse_extensions(&v))
                .unwrap_or(defaults.allowed_extensions),
            session_cookie_secure,
            session_cookie_http_only: parse_bool(
                "SESSION_COOKIE_HTTPONLY",
                defaults.session_cookie_http_only,
            ),
            session_cookie_same_site: std::env::var("SESSION_COOKIE_SAMESITE")
                .map(|v| parse_same_site(&v))
                .unwrap_or(defaults.session_cookie_same_site),
            session_lifetime: std::env::var("SESSION_LIFETIME_DAYS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(|days| Duration::from_secs(days * 24 * 60 * 60))
                .unwrap_or(defaults.session_lifetime),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            items_per_page: parse_or("ITEMS_PER_PAGE", defaults.items_per_page).max(1),
            bcrypt_cost: parse_or("BCRYPT_COST", defaults.bcrypt_cost),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool(env_var: &str, default: bool) -> bool {
    std::env::var(env_var)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn parse_extensions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn parse_same_site(value: &str) -> SameSite {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_normalised() {
        assert_eq!(parse_extensions(" PNG, .jpg,,webp "), vec!["png", "jpg", "webp"]);
    }

    #[test]
    fn unknown_same_site_falls_back_to_lax() {
        assert_eq!(parse_same_site("Strict"), SameSite::Strict);
        assert_eq!(parse_same_site("bogus"), SameSite::Lax);
    }

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_env_value("PRODUCTION"), Environment::Production);
        assert_eq!(Environment::from_env_value("test"), Environment::Testing);
        assert_eq!(Environment::from_env_value(""), Environment::Development);
    }
}
