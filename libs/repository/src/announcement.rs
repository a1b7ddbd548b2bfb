use chrono::{DateTime, Utc};
use entity::prelude::*;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::active_models::{prelude::*, *};
use crate::{
    new_id, now, set_some, IntoResponse, RepositoryError, Response,
};

// keep in step with Priority::rank
const PRIORITY_RANK: &str =
    "CASE priority WHEN 'high' THEN 2 WHEN 'medium' THEN 1 ELSE 0 END";

#[derive(Clone, Debug)]
pub struct AnnouncementRepository {
    db: DatabaseConnection,
}

impl AnnouncementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<announcement::Model> for AnnouncementEntity {
    fn from(value: announcement::Model) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            author: value.author,
            priority: value.priority.parse().unwrap_or_default(),
            is_active: value.is_active,
            expires_at: value.expires_at.map(|d| d.and_utc()),
            created_at: value.created_at.and_utc(),
            updated_at: value.updated_at.and_utc(),
        }
    }
}

impl From<NewAnnouncement> for announcement::ActiveModel {
    fn from(value: NewAnnouncement) -> Self {
        let now = now();

        Self {
            id: ActiveValue::Set(new_id()),
            title: ActiveValue::Set(value.title),
            content: ActiveValue::Set(value.content),
            author: ActiveValue::Set(value.author),
            priority: ActiveValue::Set(value.priority.to_string()),
            is_active: ActiveValue::Set(value.is_active),
            expires_at: ActiveValue::Set(
                value.expires_at.map(|d| d.naive_utc()),
            ),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl AnnouncementRepository {
    /// Newest first.
    pub async fn find(
        &self,
        is_active: Option<bool>,
    ) -> Response<Vec<AnnouncementEntity>> {
        let mut query = Announcement::find()
            .order_by_desc(announcement::Column::CreatedAt)
            .order_by_asc(announcement::Column::Id);

        if let Some(is_active) = is_active {
            query =
                query.filter(announcement::Column::IsActive.eq(is_active));
        }

        let announcements = query
            .all(&self.db)
            .await
            .into_response("in announcement find")?;

        Ok(announcements
            .into_iter()
            .map(AnnouncementEntity::from)
            .collect())
    }

    /// Active and unexpired at `now`, highest priority first, then newest.
    pub async fn find_active(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Response<Vec<AnnouncementEntity>> {
        let announcements = Announcement::find()
            .filter(announcement::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(announcement::Column::ExpiresAt.is_null())
                    .add(announcement::Column::ExpiresAt.gte(now.naive_utc())),
            )
            .order_by_desc(Expr::cust(PRIORITY_RANK))
            .order_by_desc(announcement::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .into_response("in announcement find active")?;

        Ok(announcements
            .into_iter()
            .map(AnnouncementEntity::from)
            .collect())
    }

    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Response<Option<AnnouncementEntity>> {
        let announcement = Announcement::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in announcement find by id")?;

        Ok(announcement.map(AnnouncementEntity::from))
    }

    pub async fn create(
        &self,
        mut announcement: NewAnnouncement,
    ) -> Response<AnnouncementEntity> {
        announcement.validate()?;

        let announcement = announcement::ActiveModel::from(announcement)
            .insert(&self.db)
            .await
            .into_response("in announcement insert")?;

        Ok(announcement.into())
    }

    pub async fn update(
        &self,
        id: &str,
        mut patch: AnnouncementPatch,
    ) -> Response<AnnouncementEntity> {
        patch.validate()?;

        let Some(announcement) = Announcement::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in announcement find by id")?
        else {
            return Err(RepositoryError::NotFound("Announcement"));
        };

        let mut model = announcement::ActiveModel::from(announcement);
        set_some(&mut model.title, patch.title);
        set_some(&mut model.content, patch.content);
        set_some(&mut model.author, patch.author);
        set_some(&mut model.priority, patch.priority.map(|p| p.to_string()));
        set_some(&mut model.is_active, patch.is_active);
        set_some(
            &mut model.expires_at,
            patch.expires_at.map(|d| d.map(|d| d.naive_utc())),
        );
        model.updated_at = ActiveValue::Set(now());

        let announcement = model
            .update(&self.db)
            .await
            .into_response("in announcement update")?;

        Ok(announcement.into())
    }

    pub async fn delete(&self, id: &str) -> Response<AnnouncementEntity> {
        let Some(announcement) = Announcement::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in announcement find by id")?
        else {
            return Err(RepositoryError::NotFound("Announcement"));
        };

        Announcement::delete_by_id(id)
            .exec(&self.db)
            .await
            .into_response("in announcement delete")?;

        Ok(announcement.into())
    }
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use crate::test_repository;

    use super::*;

    fn new_announcement(title: &str) -> NewAnnouncement {
        NewAnnouncement {
            title: title.to_string(),
            content: "content".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let repo = test_repository().await;

        let created = repo
            .announcement
            .create(new_announcement("Welcome"))
            .await
            .unwrap();

        assert!(created.is_active);
        assert_eq!(created.priority, Priority::Medium);
        assert_eq!(created.expires_at, None);
    }

    #[tokio::test]
    async fn test_find_filters_by_active_flag() {
        let repo = test_repository().await;
        repo.announcement
            .create(new_announcement("on"))
            .await
            .unwrap();
        repo.announcement
            .create(NewAnnouncement {
                is_active: false,
                ..new_announcement("off")
            })
            .await
            .unwrap();

        let active = repo.announcement.find(Some(true)).await.unwrap();
        let inactive = repo.announcement.find(Some(false)).await.unwrap();
        let all = repo.announcement.find(None).await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "on");
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].title, "off");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_find_active_orders_by_priority_and_skips_expired() {
        // Arrange
        let repo = test_repository().await;
        let now = Utc::now();
        for (title, priority) in [
            ("low", Priority::Low),
            ("high", Priority::High),
            ("medium", Priority::Medium),
        ] {
            repo.announcement
                .create(NewAnnouncement {
                    priority,
                    expires_at: Some(now + Duration::days(1)),
                    ..new_announcement(title)
                })
                .await
                .unwrap();
        }
        repo.announcement
            .create(NewAnnouncement {
                priority: Priority::High,
                expires_at: Some(now - Duration::days(1)),
                ..new_announcement("expired")
            })
            .await
            .unwrap();
        repo.announcement
            .create(NewAnnouncement {
                priority: Priority::High,
                is_active: false,
                ..new_announcement("inactive")
            })
            .await
            .unwrap();

        // Act
        let active = repo.announcement.find_active(now, 10).await.unwrap();

        // Assert
        let titles: Vec<_> = active.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "medium", "low"]);
    }

    #[tokio::test]
    async fn test_update_can_clear_expiry() {
        let repo = test_repository().await;
        let created = repo
            .announcement
            .create(NewAnnouncement {
                expires_at: Some(Utc::now()),
                ..new_announcement("soon")
            })
            .await
            .unwrap();

        let updated = repo
            .announcement
            .update(
                &created.id,
                AnnouncementPatch {
                    expires_at: Some(None),
                    priority: Some(Priority::High),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.expires_at, None);
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.title, "soon");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = test_repository().await;
        let created = repo
            .announcement
            .create(new_announcement("bye"))
            .await
            .unwrap();

        repo.announcement.delete(&created.id).await.unwrap();
        let missing = repo.announcement.delete(&created.id).await;

        assert!(matches!(
            missing,
            Err(RepositoryError::NotFound("Announcement"))
        ));
    }
}
