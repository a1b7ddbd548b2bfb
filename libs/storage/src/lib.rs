use std::fmt::Debug;

use async_trait::async_trait;
use entity::image::ImageRef;
use tracing::warn;

pub mod memory;
pub mod s3;
pub mod upload;

pub use memory::InMemoryImageStore;
pub use s3::{S3Config, S3ImageStore};
pub use upload::{ImageKind, ImageUpload, UploadError, MAX_IMAGE_BYTES};

/// Prefix shared by every object this service writes.
pub const ROOT_FOLDER: &str = "internal-management";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Folder {
    Artists,
    Events,
}

/// Where artist and event images live.
#[async_trait]
pub trait ImageStore: Send + Sync + Debug {
    async fn upload(
        &self,
        folder: Folder,
        image: ImageUpload,
    ) -> anyhow::Result<ImageRef>;

    /// Deleting an empty id is a no-op.
    async fn delete(&self, public_id: &str) -> anyhow::Result<()>;
}

/// Deletes a stored image without failing the caller. Errors are logged.
pub async fn delete_quietly(store: &dyn ImageStore, image: &ImageRef) {
    if image.public_id.is_empty() {
        return;
    }

    if let Err(e) = store.delete(&image.public_id).await {
        warn!(
            task = "delete image",
            public_id = %image.public_id,
            error = ?e
        );
    }
}

pub fn object_key(folder: Folder, kind: ImageKind) -> String {
    format!(
        "{}/{}/{}.{}",
        ROOT_FOLDER,
        folder,
        uuid::Uuid::new_v4(),
        kind.extension()
    )
}

pub fn public_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        let key = object_key(Folder::Artists, ImageKind::Png);

        assert!(key.starts_with("internal-management/artists/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_public_url_joins_without_double_slash() {
        assert_eq!(
            public_url("https://cdn.example.com/", "a/b.jpg"),
            "https://cdn.example.com/a/b.jpg"
        );
    }

    #[tokio::test]
    async fn test_delete_quietly_swallows_errors() {
        let store = InMemoryImageStore::failing_deletes("https://cdn.test");
        let image = ImageRef::new("internal-management/events/x.png", "u");

        // does not panic or propagate
        delete_quietly(&store, &image).await;

        assert_eq!(store.deleted(), Vec::<String>::new());
    }
}
