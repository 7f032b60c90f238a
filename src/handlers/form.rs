//! Multipart form collection.
//!
//! Registration and the video handlers both receive multipart forms mixing
//! text fields with file parts, so the field walk lives here instead of
//! being repeated in every handler.

use axum::extract::Multipart;
use bytes::Bytes;
use std::collections::HashMap;

use crate::error::{AppError, Result};

/// A file part received in a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-provided filename
    pub filename: String,
    /// Client-provided MIME type
    pub content_type: String,
    /// File contents
    pub data: Bytes,
}

/// Collected multipart form: text fields plus file parts
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Drain a multipart stream into memory
    ///
    /// Parts with a filename are treated as files, everything else as text.
    /// Any single file larger than `max_file_size` rejects the request.
    pub async fn read(mut multipart: Multipart, max_file_size: u64) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart data: {}", e)))?
        {
            let name = match field.name() {
                Some(name) => name.to_string(),
                None => continue,
            };

            if let Some(filename) = field.file_name() {
                let filename = filename.to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file: {}", e)))?;

                if data.len() as u64 > max_file_size {
                    return Err(AppError::validation(format!(
                        "File size {} exceeds maximum allowed size {}",
                        data.len(),
                        max_file_size
                    )));
                }

                // Browsers send an empty part for file inputs left blank
                if data.is_empty() {
                    continue;
                }

                form.files.insert(
                    name,
                    UploadedFile {
                        filename,
                        content_type,
                        data,
                    },
                );
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read field: {}", e)))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Get a text field by name
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Get a text field, trimmed, treating blank values as absent
    pub fn trimmed(&self, name: &str) -> Option<&str> {
        self.text(name).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Get a file part by name
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}
