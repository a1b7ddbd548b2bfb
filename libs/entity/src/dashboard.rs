#[derive(Debug, Default, PartialEq, Clone)]
pub struct DashboardStats {
    pub artists: ArtistStats,
    pub events: EventStats,
    pub announcements: AnnouncementStats,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct ArtistStats {
    pub total: u64,
    pub active: u64,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct EventStats {
    pub total: u64,
    pub upcoming: u64,
    pub ticketing: TicketingStats,
}

/// Sums over upcoming events.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct TicketingStats {
    pub capacity: i64,
    pub sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct AnnouncementStats {
    pub total: u64,
    pub active: u64,
}
