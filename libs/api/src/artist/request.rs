use entity::prelude::*;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use utoipa::{IntoParams, ToSchema};

#[serde_as]
#[derive(Deserialize, IntoParams)]
pub struct GetArtistsParam {
    pub status: Option<ArtistStatus>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub page: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<u64>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub status: ArtistStatus,
}

impl From<CreateArtistRequest> for NewArtist {
    fn from(value: CreateArtistRequest) -> Self {
        Self {
            name: value.name,
            bio: value.bio,
            genre: value.genre,
            contact_email: value.contact_email,
            contact_phone: value.contact_phone,
            social_media: value.social_media,
            status: value.status,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArtistRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub genre: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub social_media: Option<SocialMedia>,
    pub status: Option<ArtistStatus>,
}

impl From<UpdateArtistRequest> for ArtistPatch {
    fn from(value: UpdateArtistRequest) -> Self {
        Self {
            name: value.name,
            bio: value.bio,
            genre: value.genre,
            contact_email: value.contact_email,
            contact_phone: value.contact_phone,
            social_media: value.social_media,
            status: value.status,
        }
    }
}
