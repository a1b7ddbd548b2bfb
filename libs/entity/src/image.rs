use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Points at an image hosted by the object store.
///
/// `public_id` is the storage key, `url` is where clients fetch it from.
/// Both empty means the record has no image.
#[derive(
    Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema,
)]
pub struct ImageRef {
    pub public_id: String,
    pub url: String,
}

impl ImageRef {
    pub fn new(public_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            url: url.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.public_id.is_empty() && self.url.is_empty()
    }
}
