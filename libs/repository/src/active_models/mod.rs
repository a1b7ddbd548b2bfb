pub mod prelude;

pub mod announcement;
pub mod artist;
pub mod event;
pub mod event_artist;
