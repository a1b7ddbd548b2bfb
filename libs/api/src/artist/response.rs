use chrono::{DateTime, Utc};
use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::util::response::PaginationResp;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub bio: String,
    pub image_url: ImageRef,
    pub genre: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub social_media: SocialMedia,
    pub status: ArtistStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArtistEntity> for Artist {
    fn from(value: ArtistEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            bio: value.bio,
            image_url: value.image,
            genre: value.genre,
            contact_email: value.contact_email,
            contact_phone: value.contact_phone,
            social_media: value.social_media,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetArtistsResp {
    pub data: Vec<Artist>,
    pub pagination: PaginationResp,
}

#[derive(Serialize, ToSchema)]
pub struct GetArtistResp {
    pub data: Artist,
}
