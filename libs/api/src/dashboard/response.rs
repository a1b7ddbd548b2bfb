use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct Stats {
    pub artists: CountStats,
    pub events: EventCountStats,
    pub announcements: CountStats,
}

#[derive(Serialize, ToSchema)]
pub struct CountStats {
    pub total: u64,
    pub active: u64,
}

#[derive(Serialize, ToSchema)]
pub struct EventCountStats {
    pub total: u64,
    pub upcoming: u64,
    pub ticketing: Ticketing,
}

/// Totals over upcoming events.
#[derive(Serialize, ToSchema)]
pub struct Ticketing {
    pub capacity: i64,
    pub sold: i64,
    pub revenue: f64,
}

#[derive(Serialize, ToSchema)]
pub struct GetStatsResp {
    pub data: Stats,
}

impl From<DashboardStats> for Stats {
    fn from(value: DashboardStats) -> Self {
        let DashboardStats {
            artists,
            events,
            announcements,
        } = value;

        Self {
            artists: CountStats {
                total: artists.total,
                active: artists.active,
            },
            events: EventCountStats {
                total: events.total,
                upcoming: events.upcoming,
                ticketing: Ticketing {
                    capacity: events.ticketing.capacity,
                    sold: events.ticketing.sold,
                    revenue: events.ticketing.revenue,
                },
            },
            announcements: CountStats {
                total: announcements.total,
                active: announcements.active,
            },
        }
    }
}
