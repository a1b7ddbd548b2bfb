pub mod announcement;
pub mod artist;
pub mod dashboard;
pub mod event;
pub mod image;
pub mod validation;

pub mod prelude {
    pub use crate::announcement::{
        Announcement as AnnouncementEntity, AnnouncementPatch,
        NewAnnouncement, Priority,
    };
    pub use crate::artist::{
        Artist as ArtistEntity, ArtistPatch, ArtistStatus, ArtistSummary,
        NewArtist, SocialMedia,
    };
    pub use crate::dashboard::{
        AnnouncementStats, ArtistStats, DashboardStats, EventStats,
        TicketingStats,
    };
    pub use crate::event::{
        Event as EventEntity, EventPatch, EventStatus, NewEvent,
    };
    pub use crate::image::ImageRef;
    pub use crate::validation::ValidationError;
}
