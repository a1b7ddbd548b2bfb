use anyhow::Context;
use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::{config::Credentials, primitives::ByteStream};
use entity::image::ImageRef;
use serde::Deserialize;
use tracing::info;

use crate::{object_key, public_url, Folder, ImageStore, ImageUpload};

#[derive(Clone, Debug, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    /// Public base url objects are served from, without trailing key.
    pub public_url: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Set for S3-compatible stores such as R2 or MinIO.
    pub endpoint_url: Option<String>,
}

fn default_region() -> String {
    "auto".to_string()
}

#[derive(Clone, Debug)]
pub struct S3ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3ImageStore {
    pub fn new(client: aws_sdk_s3::Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            public_url: config.public_url.clone(),
        }
    }

    pub async fn connect(
        config: &S3Config,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Self {
        let credentials =
            Credentials::new(access_key_id, secret_access_key, None, None, "");
        let mut loader = aws_config::from_env()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let cfg = loader.load().await;

        info!(task = "connect object store", bucket = %config.bucket);

        Self::new(aws_sdk_s3::Client::new(&cfg), config)
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn upload(
        &self,
        folder: Folder,
        image: ImageUpload,
    ) -> anyhow::Result<ImageRef> {
        let key = object_key(folder, image.kind);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .content_type(image.kind.content_type())
            .key(&key)
            .body(ByteStream::from(image.bytes))
            .send()
            .await
            .context("failed to put object")?;

        let url = public_url(&self.public_url, &key);

        Ok(ImageRef::new(key, url))
    }

    async fn delete(&self, public_id: &str) -> anyhow::Result<()> {
        if public_id.is_empty() {
            return Ok(());
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(public_id)
            .send()
            .await
            .context("failed to delete object")?;

        Ok(())
    }
}
