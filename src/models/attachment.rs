//! Image attachments read from disk and sent as the multipart `image` part.

use std::path::Path;

use bytes::Bytes;

use crate::error::PreconditionError;

/// A pending image held in memory until the next submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    /// File name shown in the composer preview and sent with the part.
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl ImageAttachment {
    /// Read an image file from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PreconditionError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PreconditionError::ImageUnreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::from_bytes(file_name, Bytes::from(bytes)))
    }

    /// Build an attachment from bytes already in memory.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Bytes) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for_path(Path::new(&file_name));
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Preview label, e.g. `cat.png (12.3 KB)`.
    pub fn preview_label(&self) -> String {
        let size = self.size();
        let human = if size >= 1024 * 1024 {
            format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
        } else if size >= 1024 {
            format!("{:.1} KB", size as f64 / 1024.0)
        } else {
            format!("{} B", size)
        };
        format!("{} ({})", self.file_name, human)
    }
}

/// Guess a mime type from the file extension, falling back to
/// `application/octet-stream`.
pub fn mime_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
