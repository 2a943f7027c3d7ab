//! Image payloads for multimodal completions
//!
//! An [`ImageData`] is the loaded form of the screenshot the pipeline
//! starts from: raw bytes plus the MIME type the model service needs to
//! interpret them. MIME is inferred from the file extension; the bytes are
//! not sniffed.

use crate::error::ModelError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::path::Path;

/// A loaded image ready for upload to the model service
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// MIME type (e.g. `image/png`)
    pub mime_type: String,
    /// Display name shown in logs (the source file name)
    pub display_name: String,
}

impl ImageData {
    /// Load an image from disk, inferring MIME type from the extension
    ///
    /// # Errors
    /// - [`ModelError::Image`] if the file cannot be read
    /// - [`ModelError::UnsupportedImageFormat`] for unknown extensions
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime_type = mime_for_extension(&extension)
            .ok_or_else(|| ModelError::UnsupportedImageFormat(extension.clone()))?;

        let bytes = std::fs::read(path).map_err(|source| ModelError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("screenshot")
            .to_string();

        Ok(Self {
            bytes,
            mime_type: mime_type.to_string(),
            display_name,
        })
    }

    /// Base64 encoding of the bytes, as inline request payloads expect
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn infers_mime_from_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("login.PNG");
        fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let image = ImageData::from_path(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.display_name, "login.PNG");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.bmp");
        fs::write(&path, [0u8; 4]).unwrap();

        let err = ImageData::from_path(&path).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedImageFormat(ext) if ext == "bmp"));
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let err = ImageData::from_path(Path::new("/nonexistent/login.png")).unwrap_err();
        assert!(err.is_image_error());
    }

    #[test]
    fn encodes_bytes_as_base64() {
        let image = ImageData {
            bytes: b"abc".to_vec(),
            mime_type: "image/png".to_string(),
            display_name: "x.png".to_string(),
        };
        assert_eq!(image.to_base64(), "YWJj");
    }
}
