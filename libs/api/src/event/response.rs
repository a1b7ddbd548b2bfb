use chrono::{DateTime, Utc};
use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::util::response::PaginationResp;

/// An artist as embedded in an event lineup.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineupArtist {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub bio: String,
    pub genre: String,
    pub image_url: ImageRef,
}

impl From<ArtistSummary> for LineupArtist {
    fn from(value: ArtistSummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
            bio: value.bio,
            genre: value.genre,
            image_url: value.image,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: ImageRef,
    pub status: EventStatus,
    pub artists: Vec<LineupArtist>,
    pub capacity: i32,
    pub ticket_price: f64,
    pub tickets_sold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(value: EventEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            venue: value.venue,
            location: value.location,
            start_date: value.start_date,
            end_date: value.end_date,
            image_url: value.image,
            status: value.status,
            artists: value.artists.into_iter().map(Into::into).collect(),
            capacity: value.capacity,
            ticket_price: value.ticket_price,
            tickets_sold: value.tickets_sold,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetEventsResp {
    pub data: Vec<Event>,
    pub pagination: PaginationResp,
}

#[derive(Serialize, ToSchema)]
pub struct GetUpcomingEventsResp {
    pub data: Vec<Event>,
}

#[derive(Serialize, ToSchema)]
pub struct GetEventResp {
    pub data: Event,
}
