use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use entity::event::check_date_range;
use entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};

use crate::active_models::{prelude::*, *};
use crate::{
    new_id, now, set_some, IntoResponse, RepositoryError, Response,
};

#[derive(Clone, Debug)]
pub struct EventRepository {
    db: DatabaseConnection,
}

impl EventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_entity(value: event::Model, artists: Vec<ArtistSummary>) -> EventEntity {
    EventEntity {
        id: value.id,
        title: value.title,
        description: value.description,
        venue: value.venue,
        location: value.location,
        start_date: value.start_date.and_utc(),
        end_date: value.end_date.map(|d| d.and_utc()),
        image: ImageRef::new(value.image_public_id, value.image_url),
        status: value.status.parse().unwrap_or_default(),
        artists,
        capacity: value.capacity,
        ticket_price: value.ticket_price,
        tickets_sold: value.tickets_sold,
        created_at: value.created_at.and_utc(),
        updated_at: value.updated_at.and_utc(),
    }
}

impl From<NewEvent> for event::ActiveModel {
    fn from(value: NewEvent) -> Self {
        let now = now();

        Self {
            id: ActiveValue::Set(new_id()),
            title: ActiveValue::Set(value.title),
            description: ActiveValue::Set(value.description),
            venue: ActiveValue::Set(value.venue),
            location: ActiveValue::Set(value.location),
            start_date: ActiveValue::Set(value.start_date.naive_utc()),
            end_date: ActiveValue::Set(value.end_date.map(|d| d.naive_utc())),
            image_public_id: ActiveValue::Set(String::new()),
            image_url: ActiveValue::Set(String::new()),
            status: ActiveValue::Set(value.status.to_string()),
            capacity: ActiveValue::Set(value.capacity),
            ticket_price: ActiveValue::Set(value.ticket_price),
            tickets_sold: ActiveValue::Set(value.tickets_sold),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

/// Attaches each event's lineup, in stored order. Links to artists that no
/// longer exist are skipped.
async fn populate<C: ConnectionTrait>(
    db: &C,
    events: Vec<event::Model>,
) -> Result<Vec<EventEntity>, DbErr> {
    let event_ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();

    let links = EventArtist::find()
        .filter(event_artist::Column::EventId.is_in(event_ids))
        .order_by_asc(event_artist::Column::Position)
        .all(db)
        .await?;
    let artist_ids: HashSet<_> =
        links.iter().map(|l| l.artist_id.clone()).collect();

    let artists: HashMap<_, _> = Artist::find()
        .filter(artist::Column::Id.is_in(artist_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id.clone(), ArtistSummary::from(ArtistEntity::from(a))))
        .collect();

    let mut lineups: HashMap<String, Vec<ArtistSummary>> = HashMap::new();
    for link in links {
        if let Some(artist) = artists.get(&link.artist_id) {
            lineups.entry(link.event_id).or_default().push(artist.clone());
        }
    }

    Ok(events
        .into_iter()
        .map(|e| {
            let lineup = lineups.remove(&e.id).unwrap_or_default();
            into_entity(e, lineup)
        })
        .collect())
}

async fn ensure_artists_exist<C: ConnectionTrait>(
    db: &C,
    artist_ids: &[String],
) -> Response<()> {
    if artist_ids.is_empty() {
        return Ok(());
    }

    let found: HashSet<String> = Artist::find()
        .select_only()
        .column(artist::Column::Id)
        .filter(artist::Column::Id.is_in(artist_ids.to_vec()))
        .into_tuple::<String>()
        .all(db)
        .await
        .into_response("in artist lookup")?
        .into_iter()
        .collect();

    match artist_ids.iter().find(|id| !found.contains(*id)) {
        Some(missing) => Err(RepositoryError::InvalidReference(missing.clone())),
        None => Ok(()),
    }
}

async fn replace_lineup<C: ConnectionTrait>(
    db: &C,
    event_id: &str,
    artist_ids: Vec<String>,
) -> Result<(), DbErr> {
    EventArtist::delete_many()
        .filter(event_artist::Column::EventId.eq(event_id))
        .exec(db)
        .await?;

    if artist_ids.is_empty() {
        return Ok(());
    }

    let links = artist_ids.into_iter().enumerate().map(|(position, id)| {
        event_artist::ActiveModel {
            event_id: ActiveValue::Set(event_id.to_string()),
            artist_id: ActiveValue::Set(id),
            position: ActiveValue::Set(position as i32),
        }
    });
    EventArtist::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

impl EventRepository {
    /// `page` is 1-based. Ordered by start date, soonest first.
    pub async fn find(
        &self,
        status: Option<EventStatus>,
        page: u64,
        limit: u64,
    ) -> Response<(Vec<EventEntity>, u64)> {
        let mut query = Event::find()
            .order_by_asc(event::Column::StartDate)
            .order_by_asc(event::Column::Id);

        if let Some(status) = status {
            query = query.filter(event::Column::Status.eq(status.to_string()));
        }

        let paginator = query.paginate(&self.db, limit);
        let total = paginator
            .num_items()
            .await
            .into_response("in event count")?;
        let events = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .into_response("in event find")?;

        let events = populate(&self.db, events)
            .await
            .into_response("in event populate")?;

        Ok((events, total))
    }

    /// Events that have not started yet and are upcoming or ongoing.
    pub async fn find_upcoming(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Response<Vec<EventEntity>> {
        let events = Event::find()
            .filter(event::Column::StartDate.gte(now.naive_utc()))
            .filter(event::Column::Status.is_in([
                EventStatus::Upcoming.to_string(),
                EventStatus::Ongoing.to_string(),
            ]))
            .order_by_asc(event::Column::StartDate)
            .limit(limit)
            .all(&self.db)
            .await
            .into_response("in event find upcoming")?;

        populate(&self.db, events)
            .await
            .into_response("in event populate")
    }

    pub async fn find_by_id(&self, id: &str) -> Response<Option<EventEntity>> {
        let Some(event) = Event::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in event find by id")?
        else {
            return Ok(None);
        };

        let event = populate(&self.db, vec![event])
            .await
            .into_response("in event populate")?;

        Ok(event.into_iter().next())
    }

    pub async fn create(&self, mut event: NewEvent) -> Response<EventEntity> {
        event.validate()?;

        let txn = self.db.begin().await.into_response("in begin")?;
        ensure_artists_exist(&txn, &event.artists).await?;

        let artist_ids = std::mem::take(&mut event.artists);
        let model = event::ActiveModel::from(event)
            .insert(&txn)
            .await
            .into_response("in event insert")?;
        replace_lineup(&txn, &model.id, artist_ids)
            .await
            .into_response("in event lineup insert")?;

        let event = populate(&txn, vec![model])
            .await
            .into_response("in event populate")?;
        txn.commit().await.into_response("in commit")?;

        event
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound("Event"))
    }

    pub async fn update(
        &self,
        id: &str,
        mut patch: EventPatch,
    ) -> Response<EventEntity> {
        patch.validate()?;

        let txn = self.db.begin().await.into_response("in begin")?;
        let Some(event) = Event::find_by_id(id)
            .one(&txn)
            .await
            .into_response("in event find by id")?
        else {
            return Err(RepositoryError::NotFound("Event"));
        };

        let start_date = patch
            .start_date
            .unwrap_or_else(|| event.start_date.and_utc());
        let end_date = match patch.end_date {
            Some(end_date) => end_date,
            None => event.end_date.map(|d| d.and_utc()),
        };
        check_date_range(start_date, end_date)?;

        if let Some(artist_ids) = patch.artists {
            ensure_artists_exist(&txn, &artist_ids).await?;
            replace_lineup(&txn, id, artist_ids)
                .await
                .into_response("in event lineup update")?;
        }

        let mut model = event::ActiveModel::from(event);
        set_some(&mut model.title, patch.title);
        set_some(&mut model.description, patch.description);
        set_some(&mut model.venue, patch.venue);
        set_some(&mut model.location, patch.location);
        model.start_date = ActiveValue::Set(start_date.naive_utc());
        model.end_date = ActiveValue::Set(end_date.map(|d| d.naive_utc()));
        set_some(&mut model.status, patch.status.map(|s| s.to_string()));
        set_some(&mut model.capacity, patch.capacity);
        set_some(&mut model.ticket_price, patch.ticket_price);
        set_some(&mut model.tickets_sold, patch.tickets_sold);
        model.updated_at = ActiveValue::Set(now());

        let model = model
            .update(&txn)
            .await
            .into_response("in event update")?;
        let event = populate(&txn, vec![model])
            .await
            .into_response("in event populate")?;
        txn.commit().await.into_response("in commit")?;

        event
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound("Event"))
    }

    /// Returns the deleted record so the caller can release its image.
    pub async fn delete(&self, id: &str) -> Response<EventEntity> {
        let txn = self.db.begin().await.into_response("in begin")?;

        let Some(event) = Event::find_by_id(id)
            .one(&txn)
            .await
            .into_response("in event find by id")?
        else {
            return Err(RepositoryError::NotFound("Event"));
        };
        let event = populate(&txn, vec![event])
            .await
            .into_response("in event populate")?;

        EventArtist::delete_many()
            .filter(event_artist::Column::EventId.eq(id))
            .exec(&txn)
            .await
            .into_response("in event artist delete")?;
        Event::delete_by_id(id)
            .exec(&txn)
            .await
            .into_response("in event delete")?;

        txn.commit().await.into_response("in commit")?;

        event
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound("Event"))
    }

    pub async fn set_image(
        &self,
        id: &str,
        image: ImageRef,
    ) -> Response<EventEntity> {
        let Some(event) = Event::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in event find by id")?
        else {
            return Err(RepositoryError::NotFound("Event"));
        };

        let mut model = event::ActiveModel::from(event);
        model.image_public_id = ActiveValue::Set(image.public_id);
        model.image_url = ActiveValue::Set(image.url);
        model.updated_at = ActiveValue::Set(now());

        let model = model
            .update(&self.db)
            .await
            .into_response("in event image update")?;
        let event = populate(&self.db, vec![model])
            .await
            .into_response("in event populate")?;

        event
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound("Event"))
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone};

    use crate::{test_repository, Repository};

    use super::*;

    fn new_event(title: &str, start_date: DateTime<Utc>) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            venue: "Warehouse".to_string(),
            start_date,
            ..Default::default()
        }
    }

    async fn artist(repo: &Repository, name: &str) -> ArtistEntity {
        repo.artist
            .create(NewArtist {
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_populates_lineup_in_order() {
        // Arrange
        let repo = test_repository().await;
        let first = artist(&repo, "Floating Points").await;
        let second = artist(&repo, "Four Tet").await;
        let start = Utc.with_ymd_and_hms(2030, 5, 1, 20, 0, 0).unwrap();

        // Act
        let event = repo
            .event
            .create(NewEvent {
                artists: vec![second.id.clone(), first.id.clone()],
                ..new_event("Night One", start)
            })
            .await
            .unwrap();

        // Assert
        let names: Vec<_> = event.artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Four Tet", "Floating Points"]);
        assert_eq!(event.start_date, start);

        let found = repo.event.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(found.artists, event.artists);
    }

    #[tokio::test]
    async fn test_unknown_artist_is_rejected() {
        let repo = test_repository().await;
        let start = Utc.with_ymd_and_hms(2030, 5, 1, 20, 0, 0).unwrap();

        let result = repo
            .event
            .create(NewEvent {
                artists: vec!["ghost".to_string()],
                ..new_event("Night One", start)
            })
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::InvalidReference(id)) if id == "ghost"
        ));
        let (events, total) = repo.event.find(None, 1, 10).await.unwrap();
        assert!(events.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_find_orders_by_start_date() {
        let repo = test_repository().await;
        let base = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        repo.event
            .create(new_event("later", base + Duration::days(2)))
            .await
            .unwrap();
        repo.event.create(new_event("sooner", base)).await.unwrap();
        repo.event
            .create(NewEvent {
                status: EventStatus::Cancelled,
                ..new_event("cancelled", base + Duration::days(1))
            })
            .await
            .unwrap();

        let (events, total) = repo.event.find(None, 1, 10).await.unwrap();
        let (cancelled, cancelled_total) = repo
            .event
            .find(Some(EventStatus::Cancelled), 1, 10)
            .await
            .unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["sooner", "cancelled", "later"]);
        assert_eq!(total, 3);
        assert_eq!(cancelled_total, 1);
        assert_eq!(cancelled[0].title, "cancelled");
    }

    #[tokio::test]
    async fn test_find_upcoming() {
        // Arrange
        let repo = test_repository().await;
        let now = Utc::now();
        repo.event
            .create(new_event("past", now - Duration::days(1)))
            .await
            .unwrap();
        repo.event
            .create(NewEvent {
                status: EventStatus::Completed,
                ..new_event("completed", now + Duration::days(1))
            })
            .await
            .unwrap();
        repo.event
            .create(NewEvent {
                status: EventStatus::Ongoing,
                ..new_event("ongoing", now + Duration::days(3))
            })
            .await
            .unwrap();
        repo.event
            .create(new_event("next", now + Duration::days(2)))
            .await
            .unwrap();

        // Act
        let events = repo.event.find_upcoming(now, 10).await.unwrap();
        let limited = repo.event.find_upcoming(now, 1).await.unwrap();

        // Assert
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["next", "ongoing"]);
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_lineup_and_checks_dates() {
        let repo = test_repository().await;
        let a = artist(&repo, "Caribou").await;
        let b = artist(&repo, "Daphni").await;
        let start = Utc.with_ymd_and_hms(2030, 3, 1, 20, 0, 0).unwrap();
        let event = repo
            .event
            .create(NewEvent {
                artists: vec![a.id.clone()],
                ..new_event("Spring", start)
            })
            .await
            .unwrap();

        let updated = repo
            .event
            .update(
                &event.id,
                EventPatch {
                    artists: Some(vec![b.id.clone()]),
                    tickets_sold: Some(40),
                    end_date: Some(Some(start + Duration::hours(4))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let invalid = repo
            .event
            .update(
                &event.id,
                EventPatch {
                    start_date: Some(start + Duration::days(1)),
                    ..Default::default()
                },
            )
            .await;
        let cleared = repo
            .event
            .update(
                &event.id,
                EventPatch {
                    end_date: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.artists.len(), 1);
        assert_eq!(updated.artists[0].id, b.id);
        assert_eq!(updated.tickets_sold, 40);
        assert_eq!(updated.title, "Spring");
        assert!(matches!(invalid, Err(RepositoryError::Validation(_))));
        assert_eq!(cleared.end_date, None);
        assert_eq!(cleared.artists.len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_artist_drops_it_from_lineups() {
        let repo = test_repository().await;
        let a = artist(&repo, "Kiasmos").await;
        let b = artist(&repo, "Ólafur Arnalds").await;
        let start = Utc.with_ymd_and_hms(2030, 3, 1, 20, 0, 0).unwrap();
        let event = repo
            .event
            .create(NewEvent {
                artists: vec![a.id.clone(), b.id.clone()],
                ..new_event("Reykjavik", start)
            })
            .await
            .unwrap();

        repo.artist.delete(&a.id).await.unwrap();

        let event = repo.event.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(event.artists.len(), 1);
        assert_eq!(event.artists[0].id, b.id);
    }

    #[tokio::test]
    async fn test_delete_event() {
        let repo = test_repository().await;
        let start = Utc.with_ymd_and_hms(2030, 3, 1, 20, 0, 0).unwrap();
        let event = repo.event.create(new_event("Gone", start)).await.unwrap();
        repo.event
            .set_image(&event.id, ImageRef::new("k", "u"))
            .await
            .unwrap();

        let deleted = repo.event.delete(&event.id).await.unwrap();
        let again = repo.event.delete(&event.id).await;

        assert_eq!(deleted.image.public_id, "k");
        assert!(matches!(again, Err(RepositoryError::NotFound("Event"))));
    }
}
