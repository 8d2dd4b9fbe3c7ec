//! Local-filesystem storage for uploaded images.
//!
//! Files live flat inside the configured upload directory and are referenced
//! from the database by their public URL, `/static/uploads/<stored name>`.

use actix_web::web::Bytes;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

/// URL prefix under which the upload directory is served.
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads/";

/// A file part pulled out of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    /// Client-supplied name, untrusted.
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            allowed_extensions,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.upload_dir.clone(), config.allowed_extensions.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Whether the name carries one of the allowed extensions (case-insensitive).
    pub fn is_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_ascii_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }

    /// Store an upload and return its public path.
    ///
    /// Returns `Ok(None)` without touching the disk when the file is not an
    /// acceptable image or its name sanitises to nothing.
    pub async fn save(&self, file: &UploadedFile) -> Result<Option<String>> {
        self.save_at(file, Utc::now()).await
    }

    pub async fn save_at(&self, file: &UploadedFile, now: DateTime<Utc>) -> Result<Option<String>> {
        if !self.is_allowed(&file.filename) {
            tracing::debug!("Skipping upload with disallowed name {:?}", file.filename);
            return Ok(None);
        }

        let safe = secure_filename(&file.filename);
        if safe.is_empty() {
            tracing::debug!("Skipping upload whose name sanitises to nothing: {:?}", file.filename);
            return Ok(None);
        }

        let stored = timestamped_filename(&safe, now);
        tokio::fs::write(self.dir.join(&stored), &file.bytes).await?;
        tracing::debug!("Stored upload {stored} ({} bytes)", file.bytes.len());

        Ok(Some(format!("{UPLOAD_URL_PREFIX}{stored}")))
    }

    /// Map a stored public path back to a file inside the upload directory.
    ///
    /// Anything outside `/static/uploads/`, or containing separators or `..`,
    /// maps to nothing.
    pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let name = public_path.strip_prefix(UPLOAD_URL_PREFIX)?;
        if name.is_empty()
            || name == "."
            || name.contains("..")
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
        {
            return None;
        }
        Some(self.dir.join(name))
    }

    /// Best-effort removal of a stored file. Failures are logged, never returned.
    pub async fn remove(&self, public_path: &str) {
        let Some(path) = self.resolve(public_path) else {
            tracing::warn!("Refusing to remove file outside the upload directory: {public_path}");
            return;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!("Removed upload {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove upload {}: {e}", path.display()),
        }
    }
}

/// Reduce a client filename to a safe, flat ASCII name.
///
/// Path separators become spaces, non-ASCII characters are dropped, whitespace
/// runs become `_`, and only `[A-Za-z0-9_.-]` survive. Leading and trailing
/// dots and underscores are stripped, so `../../etc/passwd` becomes
/// `etc_passwd`.
pub fn secure_filename(filename: &str) -> String {
    let flattened: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .filter(char::is_ascii)
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Prefix a sanitised name with `YYYYMMDD_HHMMSS_`.
pub fn timestamped_filename(safe_name: &str, now: DateTime<Utc>) -> String {
    format!("{}{safe_name}", now.format("%Y%m%d_%H%M%S_"))
}
