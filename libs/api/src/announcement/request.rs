use chrono::{DateTime, Utc};
use entity::prelude::*;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use utoipa::{IntoParams, ToSchema};

use crate::util::request::{
    deserialize_optional_datetime, deserialize_patch_datetime,
};

#[serde_as]
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GetAnnouncementsParam {
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<CreateAnnouncementRequest> for NewAnnouncement {
    fn from(value: CreateAnnouncementRequest) -> Self {
        Self {
            title: value.title,
            content: value.content,
            author: value.author,
            priority: value.priority,
            is_active: value.is_active,
            expires_at: value.expires_at,
        }
    }
}

/// `expiresAt: null` removes the expiry.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub priority: Option<Priority>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_patch_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl From<UpdateAnnouncementRequest> for AnnouncementPatch {
    fn from(value: UpdateAnnouncementRequest) -> Self {
        Self {
            title: value.title,
            content: value.content,
            author: value.author,
            priority: value.priority,
            is_active: value.is_active,
            expires_at: value.expires_at,
        }
    }
}
