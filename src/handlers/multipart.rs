use actix_multipart::Multipart;
use actix_web::web::BytesMut;
use futures_util::TryStreamExt;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::uploads::UploadedFile;

/// A fully buffered `multipart/form-data` body: text fields by name, file
/// parts in submission order.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Drain `payload`, failing with [`AppError::PayloadTooLarge`] once more
    /// than `max_len` bytes of part content have arrived.
    pub async fn read(mut payload: Multipart, max_len: usize) -> Result<Self> {
        let mut form = MultipartForm::default();
        let mut total = 0usize;

        while let Some(mut field) = payload.try_next().await? {
            let (name, filename) = match field.content_disposition() {
                Some(cd) => (
                    cd.get_name().unwrap_or_default().to_owned(),
                    cd.get_filename().map(str::to_owned),
                ),
                None => (String::new(), None),
            };

            let mut bytes = BytesMut::new();
            while let Some(chunk) = field.try_next().await? {
                total += chunk.len();
                if total > max_len {
                    return Err(AppError::PayloadTooLarge(max_len));
                }
                bytes.extend_from_slice(&chunk);
            }

            match filename {
                Some(filename) => form.files.push(UploadedFile {
                    field: name,
                    filename,
                    bytes: bytes.freeze(),
                }),
                None => {
                    form.fields
                        .insert(name, String::from_utf8_lossy(&bytes).into_owned());
                }
            }
        }

        Ok(form)
    }

    /// Deserialize the text fields into a form struct.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        let value = serde_json::to_value(&self.fields)
            .map_err(|e| AppError::Internal(format!("Failed to collect form fields: {e}")))?;
        serde_json::from_value(value).map_err(|e| AppError::Validation(format!("Invalid form: {e}")))
    }

    /// Every file part submitted under `field`, in order. Empty file inputs
    /// arrive with a blank filename and are kept so positions stay stable.
    pub fn files_named(&self, field: &str) -> Vec<UploadedFile> {
        self.files
            .iter()
            .filter(|f| f.field == field)
            .cloned()
            .collect()
    }

    /// First non-empty file part under `field`.
    pub fn file_named(&self, field: &str) -> Option<UploadedFile> {
        self.files
            .iter()
            .find(|f| f.field == field && !f.filename.is_empty())
            .cloned()
    }
}
