use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::image::ImageRef;
use crate::validation::{required, required_patch, Validation};

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub image: ImageRef,
    pub genre: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub social_media: SocialMedia,
    pub status: ArtistStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The part of an artist embedded in event payloads.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub genre: String,
    pub image: ImageRef,
}

impl From<Artist> for ArtistSummary {
    fn from(value: Artist) -> Self {
        Self {
            id: value.id,
            name: value.name,
            bio: value.bio,
            genre: value.genre,
            image: value.image,
        }
    }
}

#[derive(
    Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema,
)]
#[serde(default)]
pub struct SocialMedia {
    pub instagram: String,
    pub twitter: String,
    pub youtube: String,
}

#[derive(
    Debug,
    Default,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArtistStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct NewArtist {
    pub name: String,
    pub bio: String,
    pub genre: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub social_media: SocialMedia,
    pub status: ArtistStatus,
}

impl NewArtist {
    pub fn validate(&mut self) -> Validation {
        required(&mut self.name, "Artist name")
    }
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub genre: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub social_media: Option<SocialMedia>,
    pub status: Option<ArtistStatus>,
}

impl ArtistPatch {
    pub fn validate(&mut self) -> Validation {
        required_patch(&mut self.name, "Artist name")
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use crate::validation::ValidationError;

    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        assert_eq!(ArtistStatus::Inactive.to_string(), "inactive");
        assert_eq!(
            ArtistStatus::from_str("pending").unwrap(),
            ArtistStatus::Pending
        );
        assert!(ArtistStatus::from_str("retired").is_err());
    }

    #[test]
    fn test_new_artist_requires_name() {
        let mut artist = NewArtist {
            name: "   ".to_string(),
            ..Default::default()
        };

        assert_eq!(
            artist.validate(),
            Err(ValidationError::Required("Artist name"))
        );
    }

    #[test]
    fn test_patch_without_name_is_valid() {
        let mut patch = ArtistPatch {
            bio: Some("".to_string()),
            ..Default::default()
        };

        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_patch_trims_name() {
        let mut patch = ArtistPatch {
            name: Some(" Nils Frahm ".to_string()),
            ..Default::default()
        };

        patch.validate().unwrap();

        assert_eq!(patch.name.as_deref(), Some("Nils Frahm"));
    }
}
