use entity::prelude::*;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::active_models::{prelude::*, *};
use crate::{IntoResponse, Response};

#[derive(Clone, Debug)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DashboardRepository {
    pub async fn stats(&self) -> Response<DashboardStats> {
        let (
            total_artists,
            active_artists,
            total_events,
            upcoming_events,
            total_announcements,
            active_announcements,
            ticketing,
        ) = tokio::try_join!(
            Artist::find().count(&self.db),
            Artist::find()
                .filter(
                    artist::Column::Status.eq(ArtistStatus::Active.to_string())
                )
                .count(&self.db),
            Event::find().count(&self.db),
            Event::find()
                .filter(
                    event::Column::Status.eq(EventStatus::Upcoming.to_string())
                )
                .count(&self.db),
            Announcement::find().count(&self.db),
            Announcement::find()
                .filter(announcement::Column::IsActive.eq(true))
                .count(&self.db),
            self.ticketing(),
        )
        .into_response("in dashboard stats")?;

        Ok(DashboardStats {
            artists: ArtistStats {
                total: total_artists,
                active: active_artists,
            },
            events: EventStats {
                total: total_events,
                upcoming: upcoming_events,
                ticketing,
            },
            announcements: AnnouncementStats {
                total: total_announcements,
                active: active_announcements,
            },
        })
    }

    /// Capacity, tickets sold and revenue summed over upcoming events.
    async fn ticketing(&self) -> Result<TicketingStats, DbErr> {
        let sums = Event::find()
            .select_only()
            .column_as(
                Expr::cust("CAST(COALESCE(SUM(capacity), 0) AS BIGINT)"),
                "capacity",
            )
            .column_as(
                Expr::cust("CAST(COALESCE(SUM(tickets_sold), 0) AS BIGINT)"),
                "sold",
            )
            .column_as(
                Expr::cust(
                    "CAST(COALESCE(SUM(tickets_sold * ticket_price), 0) \
                     AS DOUBLE PRECISION)",
                ),
                "revenue",
            )
            .filter(event::Column::Status.eq(EventStatus::Upcoming.to_string()))
            .into_tuple::<(i64, i64, f64)>()
            .one(&self.db)
            .await?;

        Ok(sums
            .map(|(capacity, sold, revenue)| TicketingStats {
                capacity,
                sold,
                revenue,
            })
            .unwrap_or_default())
    }
}
