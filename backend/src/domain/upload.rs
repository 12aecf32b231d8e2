//! Image uploads attached to events and profiles.

use std::fmt;

/// Largest accepted decoded image, in bytes.
pub const IMAGE_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageExtension {
    Png,
    Jpg,
    Jpeg,
    Gif,
    Webp,
}

impl ImageExtension {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Parse an extension, tolerating a leading dot and any case.
    pub fn parse(raw: &str) -> Result<Self, UploadValidationError> {
        let normalised = raw.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalised.as_str() {
            "png" => Ok(Self::Png),
            "jpg" => Ok(Self::Jpg),
            "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            "webp" => Ok(Self::Webp),
            _ => Err(UploadValidationError::UnsupportedExtension {
                value: raw.to_owned(),
            }),
        }
    }
}

/// Validation errors for uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadValidationError {
    Empty,
    TooLarge { max: usize },
    UnsupportedExtension { value: String },
}

impl fmt::Display for UploadValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "image data must not be empty"),
            Self::TooLarge { max } => write!(f, "image must be at most {max} bytes"),
            Self::UnsupportedExtension { value } => write!(
                f,
                "image extension must be one of png, jpg, jpeg, gif, webp; got '{value}'"
            ),
        }
    }
}

impl std::error::Error for UploadValidationError {}

/// Decoded image bytes plus their extension.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    bytes: Vec<u8>,
    extension: ImageExtension,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, extension: &str) -> Result<Self, UploadValidationError> {
        let extension = ImageExtension::parse(extension)?;
        if bytes.is_empty() {
            return Err(UploadValidationError::Empty);
        }
        if bytes.len() > IMAGE_MAX_BYTES {
            return Err(UploadValidationError::TooLarge {
                max: IMAGE_MAX_BYTES,
            });
        }
        Ok(Self { bytes, extension })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn extension(&self) -> ImageExtension {
        self.extension
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("len", &self.bytes.len())
            .field("extension", &self.extension)
            .finish()
    }
}
