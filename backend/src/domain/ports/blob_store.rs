//! Uploaded file storage port.

use async_trait::async_trait;

use crate::domain::ImageUpload;

use super::define_port_error;

define_port_error! {
    /// Errors raised by blob store adapters.
    pub enum BlobStoreError {
        /// Writing the blob failed.
        Write { message: String } => "blob write failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist the upload and return the public URL it is served from.
    async fn save(&self, upload: &ImageUpload) -> Result<String, BlobStoreError>;
}
