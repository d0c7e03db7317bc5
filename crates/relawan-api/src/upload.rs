//! Multipart form reading and image storage for uploaded files

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::{info, warn};
use uuid::Uuid;

use relawan_shared::constants::{ALLOWED_IMAGE_EXTENSIONS, FILE_ROUTE_PREFIX};

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Text fields and file parts of a `multipart/form-data` body, keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, FilePart>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }

            match field.file_name().map(|s| s.to_string()) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file {}: {}", name, e)))?;
                    // Browsers send an empty part for an untouched file input.
                    if !bytes.is_empty() {
                        form.files.insert(name, FilePart { file_name, bytes });
                    }
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Invalid field {}: {}", name, e)))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field value, or an empty string when the field was not sent.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    pub fn take_file(&mut self, name: &str) -> Option<FilePart> {
        self.files.remove(name)
    }
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: PathBuf,
    /// Public reference stored in the database, e.g. `/api/file/<uuid>.png`.
    pub public_url: String,
}

pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn save_image(&self, file: &FilePart) -> Result<StoredFile, ApiError> {
        let ext = image_extension(&file.file_name)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ApiError::InternalError(format!("Failed to create upload directory: {}", e)))?;

        let name = format!("{}.{}", Uuid::new_v4(), ext);
        let path = self.root.join(&name);
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|e| ApiError::InternalError(format!("Failed to store {}: {}", name, e)))?;

        info!("Stored upload {} ({} bytes)", name, file.bytes.len());
        Ok(StoredFile {
            path,
            public_url: format!("{}/{}", FILE_ROUTE_PREFIX, name),
        })
    }

    /// Removes files written for a request that did not go through.
    pub async fn discard(&self, files: &[StoredFile]) {
        for file in files {
            if let Err(e) = tokio::fs::remove_file(&file.path).await {
                warn!("Failed to remove upload {}: {}", file.path.display(), e);
            }
        }
    }
}

fn image_extension(file_name: &str) -> Result<String, ApiError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| ApiError::BadRequest(format!("File {} has no extension", file_name)))?;

    let is_image = mime_guess::from_ext(&ext)
        .first()
        .map(|m| m.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false);

    if !is_image || !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Only image files are allowed ({})",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(ext)
}
