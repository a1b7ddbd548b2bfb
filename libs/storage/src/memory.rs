use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::bail;
use async_trait::async_trait;
use entity::image::ImageRef;

use crate::{object_key, public_url, Folder, ImageStore, ImageUpload};

/// Keeps images in process memory. Used when no object store credentials
/// are configured, and by tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryImageStore {
    base_url: String,
    objects: Arc<Mutex<HashMap<String, ImageUpload>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    fail_deletes: bool,
}

impl InMemoryImageStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Every delete returns an error, for exercising best-effort cleanup.
    pub fn failing_deletes(base_url: impl Into<String>) -> Self {
        Self {
            fail_deletes: true,
            ..Self::new(base_url)
        }
    }

    pub fn contains(&self, public_id: &str) -> bool {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(public_id)
    }

    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids passed to successful deletes, oldest first.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload(
        &self,
        folder: Folder,
        image: ImageUpload,
    ) -> anyhow::Result<ImageRef> {
        let key = object_key(folder, image.kind);
        let url = public_url(&self.base_url, &key);

        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), image);

        Ok(ImageRef::new(key, url))
    }

    async fn delete(&self, public_id: &str) -> anyhow::Result<()> {
        if public_id.is_empty() {
            return Ok(());
        }
        if self.fail_deletes {
            bail!("delete refused for {}", public_id);
        }

        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(public_id);
        self.deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(public_id.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use bytes::Bytes;

    use crate::ImageKind;

    use super::*;

    #[tokio::test]
    async fn test_upload_then_delete() {
        // Arrange
        let store = InMemoryImageStore::new("https://cdn.test");
        let image = ImageUpload {
            bytes: Bytes::from_static(b"gif"),
            kind: ImageKind::Gif,
        };

        // Act
        let image = store.upload(Folder::Events, image).await.unwrap();

        // Assert
        assert!(store.contains(&image.public_id));
        assert_eq!(image.url, format!("https://cdn.test/{}", image.public_id));

        store.delete(&image.public_id).await.unwrap();
        assert!(store.is_empty());
        assert_eq!(store.deleted(), vec![image.public_id]);
    }

    #[tokio::test]
    async fn test_delete_empty_id_is_noop() {
        let store = InMemoryImageStore::failing_deletes("https://cdn.test");

        assert!(store.delete("").await.is_ok());
    }
}
