//! Filesystem [`BlobStore`] rooted in a capability directory.
//!
//! Uploads are named by the SHA-256 of their bytes, so saving the same image
//! twice yields the same URL and a single file. Writes go to a staging name
//! first and are renamed into place.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ImageUpload;
use crate::domain::ports::{BlobStore, BlobStoreError};

pub struct DirBlobStore {
    dir: Arc<Dir>,
    public_base: String,
}

impl DirBlobStore {
    /// Open (creating if needed) `root` and serve files under `public_base`.
    pub fn open(root: &Path, public_base: impl Into<String>) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            public_base: public_base.into().trim_end_matches('/').to_owned(),
        })
    }

    fn file_name(upload: &ImageUpload) -> String {
        let digest = Sha256::digest(upload.bytes());
        format!("{}.{}", hex::encode(digest), upload.extension().as_str())
    }
}

fn write_once(dir: &Dir, name: &str, bytes: &[u8]) -> io::Result<()> {
    if dir.exists(name) {
        return Ok(());
    }
    let staging = format!(".tmp-{}", Uuid::new_v4().simple());
    dir.write(&staging, bytes)?;
    dir.rename(&staging, dir, name).inspect_err(|_| {
        let _cleanup = dir.remove_file(&staging);
    })
}

#[async_trait]
impl BlobStore for DirBlobStore {
    async fn save(&self, upload: &ImageUpload) -> Result<String, BlobStoreError> {
        let name = Self::file_name(upload);
        let dir = Arc::clone(&self.dir);
        let bytes = upload.bytes().to_vec();
        let target = name.clone();
        tokio::task::spawn_blocking(move || write_once(&dir, &target, &bytes))
            .await
            .map_err(|err| BlobStoreError::write(err.to_string()))?
            .map_err(|err| BlobStoreError::write(err.to_string()))?;
        debug!(file = %name, "stored upload");
        Ok(format!("{}/{}", self.public_base, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn upload(bytes: &[u8], ext: &str) -> ImageUpload {
        ImageUpload::new(bytes.to_vec(), ext).expect("upload")
    }

    #[rstest]
    #[tokio::test]
    async fn saves_under_content_hash_and_returns_public_url() {
        let root = TempDir::new().expect("tempdir");
        let store = DirBlobStore::open(root.path(), "/uploads/").expect("open");

        let url = store.save(&upload(b"abc", "png")).await.expect("save");

        let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad.png";
        assert_eq!(url, format!("/uploads/{expected}"));
        let written = std::fs::read(root.path().join(expected)).expect("file written");
        assert_eq!(written, b"abc");
    }

    #[rstest]
    #[tokio::test]
    async fn identical_uploads_share_one_file() {
        let root = TempDir::new().expect("tempdir");
        let store = DirBlobStore::open(root.path(), "https://cdn.example.org").expect("open");

        let first = store.save(&upload(b"same", "gif")).await.expect("save");
        let second = store.save(&upload(b"same", "gif")).await.expect("save");

        assert_eq!(first, second);
        let entries = std::fs::read_dir(root.path()).expect("list").count();
        assert_eq!(entries, 1);
    }

    #[rstest]
    fn open_creates_missing_directories() {
        let root = TempDir::new().expect("tempdir");
        let nested = root.path().join("a/b/uploads");

        DirBlobStore::open(&nested, "/uploads").expect("open");

        assert!(nested.is_dir());
    }
}
