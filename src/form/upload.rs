//! Payment-proof images
//!
//! Images live in memory for exactly one submission: they are checked when
//! they arrive, base64-encoded once validation passes, then dropped.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::path::Path;
use thiserror::Error;

/// File types offered by the picker
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

const ACCEPTED_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("'{0}' is not a jpg, jpeg or png image")]
    UnsupportedType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        if !is_accepted(&file_name) {
            return Err(UploadError::UnsupportedType(file_name));
        }
        Ok(Self { file_name, bytes })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

fn is_accepted(file_name: &str) -> bool {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let Some(extension) = extension else {
        return false;
    };
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return false;
    }
    mime_guess::from_path(file_name)
        .first()
        .is_some_and(|mime| ACCEPTED_MEDIA_TYPES.contains(&mime.essence_str()))
}

/// Encode a submission's images for the wire.
///
/// `None` when nothing was uploaded, so the payload carries `null` rather
/// than an empty list.
pub fn encode_images(images: Vec<UploadedImage>) -> Option<Vec<String>> {
    if images.is_empty() {
        return None;
    }
    Some(
        images
            .into_iter()
            .map(|image| BASE64.encode(image.bytes))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_types() {
        for name in ["recu.jpg", "RECU.JPEG", "sms.png"] {
            assert!(UploadedImage::new(name, vec![1]).is_ok(), "{name}");
        }
        for name in ["recu.gif", "recu.pdf", "recu", "png"] {
            assert_eq!(
                UploadedImage::new(name, vec![1]),
                Err(UploadError::UnsupportedType(name.to_string()))
            );
        }
    }

    #[test]
    fn test_encode_images() {
        assert_eq!(encode_images(Vec::new()), None);

        let images = vec![
            UploadedImage::new("a.png", b"hello".to_vec()).unwrap(),
            UploadedImage::new("b.jpg", vec![0xff, 0xd8, 0xff]).unwrap(),
        ];
        assert_eq!(
            encode_images(images),
            Some(vec!["aGVsbG8=".to_string(), "/9j/".to_string()])
        );
    }
}
