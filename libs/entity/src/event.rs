use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::artist::ArtistSummary;
use crate::image::ImageRef;
use crate::validation::{
    non_negative, non_negative_price, required, required_patch, Validation,
    ValidationError,
};

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub image: ImageRef,
    pub status: EventStatus,
    pub artists: Vec<ArtistSummary>,
    pub capacity: i32,
    pub ticket_price: f64,
    pub tickets_sold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: EventStatus,
    pub artists: Vec<String>,
    pub capacity: i32,
    pub ticket_price: f64,
    pub tickets_sold: i32,
}

impl NewEvent {
    pub fn validate(&mut self) -> Validation {
        required(&mut self.title, "Event title")?;
        required(&mut self.venue, "Venue")?;
        non_negative(self.capacity, "Capacity")?;
        non_negative_price(self.ticket_price, "Ticket price")?;
        non_negative(self.tickets_sold, "Tickets sold")?;
        check_date_range(self.start_date, self.end_date)?;
        dedup_artists(&mut self.artists);

        Ok(())
    }
}

/// Fields left as `None` keep their stored value. `end_date` is doubly
/// optional so a patch can clear it with `Some(None)`.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<EventStatus>,
    pub artists: Option<Vec<String>>,
    pub capacity: Option<i32>,
    pub ticket_price: Option<f64>,
    pub tickets_sold: Option<i32>,
}

impl EventPatch {
    /// Field-level checks only. The date range needs the stored event and
    /// is checked with [`check_date_range`] once the patch is merged.
    pub fn validate(&mut self) -> Validation {
        required_patch(&mut self.title, "Event title")?;
        required_patch(&mut self.venue, "Venue")?;
        if let Some(capacity) = self.capacity {
            non_negative(capacity, "Capacity")?;
        }
        if let Some(price) = self.ticket_price {
            non_negative_price(price, "Ticket price")?;
        }
        if let Some(sold) = self.tickets_sold {
            non_negative(sold, "Tickets sold")?;
        }
        if let Some(artists) = self.artists.as_mut() {
            dedup_artists(artists);
        }

        Ok(())
    }
}

pub fn check_date_range(
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
) -> Validation {
    match end_date {
        Some(end_date) if end_date < start_date => {
            Err(ValidationError::EndBeforeStart)
        }
        _ => Ok(()),
    }
}

// keeps first occurrence order
fn dedup_artists(artists: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    artists.retain(|id| seen.insert(id.clone()));
}

#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn new_event() -> NewEvent {
        NewEvent {
            title: "Summer Fest".to_string(),
            venue: "Main Hall".to_string(),
            start_date: Utc.with_ymd_and_hms(2030, 7, 1, 18, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_event() {
        let mut event = new_event();

        assert!(event.validate().is_ok());
        assert_eq!(event.status, EventStatus::Upcoming);
    }

    #[test]
    fn test_venue_is_required() {
        let mut event = NewEvent {
            venue: "".to_string(),
            ..new_event()
        };

        assert_eq!(event.validate(), Err(ValidationError::Required("Venue")));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut event = new_event();
        event.end_date = Some(event.start_date - Duration::hours(1));

        assert_eq!(event.validate(), Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn test_negative_numbers_are_rejected() {
        let mut event = NewEvent {
            capacity: -1,
            ..new_event()
        };
        assert_eq!(
            event.validate(),
            Err(ValidationError::Negative("Capacity"))
        );

        let mut patch = EventPatch {
            ticket_price: Some(-10.0),
            ..Default::default()
        };
        assert_eq!(
            patch.validate(),
            Err(ValidationError::Negative("Ticket price"))
        );
    }

    #[test]
    fn test_artists_are_deduplicated_in_order() {
        let mut event = NewEvent {
            artists: vec!["b".into(), "a".into(), "b".into()],
            ..new_event()
        };

        event.validate().unwrap();

        assert_eq!(event.artists, vec!["b".to_string(), "a".to_string()]);
    }
}
