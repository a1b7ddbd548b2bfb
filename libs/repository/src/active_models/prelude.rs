pub use super::announcement::Entity as Announcement;
pub use super::artist::Entity as Artist;
pub use super::event::Entity as Event;
pub use super::event_artist::Entity as EventArtist;
