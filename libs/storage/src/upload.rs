use bytes::Bytes;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("No file provided")]
    Missing,

    #[error("File size too large. Maximum size is 5MB.")]
    TooLarge,

    #[error(
        "Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed."
    )]
    UnsupportedType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl ImageKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Gif => "gif",
            ImageKind::WebP => "webp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
            ImageKind::WebP => "image/webp",
        }
    }

    fn sniff(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            image::ImageFormat::Jpeg => Some(ImageKind::Jpeg),
            image::ImageFormat::Png => Some(ImageKind::Png),
            image::ImageFormat::Gif => Some(ImageKind::Gif),
            image::ImageFormat::WebP => Some(ImageKind::WebP),
            _ => None,
        }
    }
}

/// An image that passed the type and size checks.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub kind: ImageKind,
}

impl ImageUpload {
    /// Both the declared content type and the payload's magic bytes must
    /// name an accepted format.
    pub fn new(
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<Self, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Missing);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge);
        }

        let declared = content_type
            .map(|c| c.trim().to_ascii_lowercase())
            .ok_or(UploadError::UnsupportedType)?;
        if !ALLOWED_CONTENT_TYPES.contains(&declared.as_str()) {
            return Err(UploadError::UnsupportedType);
        }

        let kind =
            ImageKind::sniff(&bytes).ok_or(UploadError::UnsupportedType)?;

        Ok(Self { bytes, kind })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_accepts_png() {
        let upload =
            ImageUpload::new(Some("image/png"), Bytes::from_static(PNG_HEADER));

        assert_eq!(upload.unwrap().kind, ImageKind::Png);
    }

    #[test]
    fn test_rejects_empty_payload() {
        let upload = ImageUpload::new(Some("image/png"), Bytes::new());

        assert_eq!(upload.unwrap_err(), UploadError::Missing);
    }

    #[test]
    fn test_rejects_oversized_payload() {
        let mut bytes = PNG_HEADER.to_vec();
        bytes.resize(MAX_IMAGE_BYTES + 1, 0);

        let upload = ImageUpload::new(Some("image/png"), Bytes::from(bytes));

        assert_eq!(upload.unwrap_err(), UploadError::TooLarge);
    }

    #[test]
    fn test_rejects_disallowed_content_type() {
        let upload = ImageUpload::new(
            Some("image/svg+xml"),
            Bytes::from_static(PNG_HEADER),
        );

        assert_eq!(upload.unwrap_err(), UploadError::UnsupportedType);
    }

    #[test]
    fn test_rejects_payload_that_is_not_an_image() {
        let upload = ImageUpload::new(
            Some("image/jpeg"),
            Bytes::from_static(b"definitely not a jpeg"),
        );

        assert_eq!(upload.unwrap_err(), UploadError::UnsupportedType);
    }
}
