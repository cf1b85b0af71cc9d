//! Local image files as `data:` URLs for the photo journey.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::path::Path;

use gratia_core::error::{GratiaError, Result};

/// Image bytes read from disk with their guessed MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Encodes bytes as `data:<mime>;base64,<bytes>`.
pub fn data_url(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, BASE64_STANDARD.encode(bytes))
}

/// Reads an image file. Only image types are accepted.
pub async fn read_image(path: &Path) -> Result<ImageFile> {
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    if mime_type.type_() != mime_guess::mime::IMAGE {
        return Err(GratiaError::InvalidInput(format!(
            "{} is not an image ({})",
            path.display(),
            mime_type
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    Ok(ImageFile {
        bytes,
        mime_type: mime_type.essence_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_png_data_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bump.png");
        std::fs::write(&path, b"ABC").unwrap();
        let image = read_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(data_url(&image.bytes, &image.mime_type), "data:image/png;base64,QUJD");
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();
        assert!(matches!(
            read_image(&path).await,
            Err(GratiaError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_image(&dir.path().join("gone.jpg")).await.unwrap_err();
        assert!(matches!(err, GratiaError::Io { .. }));
    }
}
