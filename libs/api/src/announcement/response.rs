use chrono::{DateTime, Utc};
use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub priority: Priority,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AnnouncementEntity> for Announcement {
    fn from(value: AnnouncementEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            author: value.author,
            priority: value.priority,
            is_active: value.is_active,
            expires_at: value.expires_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetAnnouncementsResp {
    pub data: Vec<Announcement>,
}

#[derive(Serialize, ToSchema)]
pub struct GetAnnouncementResp {
    pub data: Announcement,
}
