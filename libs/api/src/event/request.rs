use chrono::{DateTime, Utc};
use entity::prelude::*;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use utoipa::{IntoParams, ToSchema};

use crate::util::request::{
    deserialize_datetime, deserialize_optional_datetime,
    deserialize_patch_datetime,
};

#[serde_as]
#[derive(Deserialize, IntoParams)]
pub struct GetEventsParam {
    pub status: Option<EventStatus>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub page: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<u64>,
}

/// Dates accept RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD` (UTC).
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub location: String,
    #[serde(deserialize_with = "deserialize_datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub start_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: EventStatus,
    /// Artist ids, in lineup order.
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub ticket_price: f64,
    #[serde(default)]
    pub tickets_sold: i32,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(value: CreateEventRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            venue: value.venue,
            location: value.location,
            start_date: value.start_date,
            end_date: value.end_date,
            status: value.status,
            artists: value.artists,
            capacity: value.capacity,
            ticket_price: value.ticket_price,
            tickets_sold: value.tickets_sold,
        }
    }
}

/// `endDate: null` clears the end date.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_patch_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<EventStatus>,
    pub artists: Option<Vec<String>>,
    pub capacity: Option<i32>,
    pub ticket_price: Option<f64>,
    pub tickets_sold: Option<i32>,
}

impl From<UpdateEventRequest> for EventPatch {
    fn from(value: UpdateEventRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            venue: value.venue,
            location: value.location,
            start_date: value.start_date,
            end_date: value.end_date,
            status: value.status,
            artists: value.artists,
            capacity: value.capacity,
            ticket_price: value.ticket_price,
            tickets_sold: value.tickets_sold,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_create_event_request_defaults() {
        let body = r#"{"title":"Night","venue":"Hall","startDate":"2024-11-02"}"#;

        let request: CreateEventRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.status, EventStatus::Upcoming);
        assert!(request.artists.is_empty());
        assert!(request.end_date.is_none());
        assert_eq!(request.ticket_price, 0.0);
    }

    #[test]
    fn test_create_event_request_rejects_bad_date() {
        let body = r#"{"title":"Night","venue":"Hall","startDate":"soon"}"#;

        let request = serde_json::from_str::<CreateEventRequest>(body);

        assert!(request.is_err());
    }

    #[test]
    fn test_update_event_request_clears_end_date() {
        let request: UpdateEventRequest =
            serde_json::from_str(r#"{"endDate":null}"#).unwrap();

        let patch = EventPatch::from(request);

        assert_eq!(patch.end_date, Some(None));
        assert_eq!(patch.start_date, None);
    }
}
