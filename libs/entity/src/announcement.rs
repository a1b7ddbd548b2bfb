use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{required, required_patch, Validation};

#[derive(Debug, PartialEq, Clone)]
pub struct Announcement {
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Higher ranks sort first in the active feed.
    pub fn rank(&self) -> i32 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub author: String,
    pub priority: Priority,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Default for NewAnnouncement {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            author: String::new(),
            priority: Priority::default(),
            is_active: true,
            expires_at: None,
        }
    }
}

impl NewAnnouncement {
    pub fn validate(&mut self) -> Validation {
        required(&mut self.title, "Announcement title")?;
        required(&mut self.content, "Announcement content")
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct AnnouncementPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub priority: Option<Priority>,
    pub is_active: Option<bool>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl AnnouncementPatch {
    pub fn validate(&mut self) -> Validation {
        required_patch(&mut self.title, "Announcement title")?;
        required_patch(&mut self.content, "Announcement content")
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use crate::validation::ValidationError;

    use super::*;

    #[test]
    fn test_new_announcement_defaults() {
        let announcement = NewAnnouncement::default();

        assert!(announcement.is_active);
        assert_eq!(announcement.priority, Priority::Medium);
    }

    #[test]
    fn test_content_is_required() {
        let mut announcement = NewAnnouncement {
            title: "Doors open early".to_string(),
            ..Default::default()
        };

        assert_eq!(
            announcement.validate(),
            Err(ValidationError::Required("Announcement content"))
        );
    }

    #[test]
    fn test_priority_rank_follows_declaration_order() {
        let ranks: Vec<_> = Priority::iter().map(|p| p.rank()).collect();

        assert_eq!(ranks, vec![0, 1, 2]);
    }
}
