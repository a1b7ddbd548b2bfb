use entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};

use crate::active_models::{prelude::*, *};
use crate::{
    new_id, now, set_some, IntoResponse, RepositoryError, Response,
};

#[derive(Clone, Debug)]
pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<artist::Model> for ArtistEntity {
    fn from(value: artist::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            bio: value.bio,
            image: ImageRef::new(value.image_public_id, value.image_url),
            genre: value.genre,
            contact_email: value.contact_email,
            contact_phone: value.contact_phone,
            social_media: SocialMedia {
                instagram: value.instagram,
                twitter: value.twitter,
                youtube: value.youtube,
            },
            status: value.status.parse().unwrap_or_default(),
            created_at: value.created_at.and_utc(),
            updated_at: value.updated_at.and_utc(),
        }
    }
}

impl From<NewArtist> for artist::ActiveModel {
    fn from(value: NewArtist) -> Self {
        let now = now();

        Self {
            id: ActiveValue::Set(new_id()),
            name: ActiveValue::Set(value.name),
            bio: ActiveValue::Set(value.bio),
            genre: ActiveValue::Set(value.genre),
            contact_email: ActiveValue::Set(value.contact_email),
            contact_phone: ActiveValue::Set(value.contact_phone),
            instagram: ActiveValue::Set(value.social_media.instagram),
            twitter: ActiveValue::Set(value.social_media.twitter),
            youtube: ActiveValue::Set(value.social_media.youtube),
            image_public_id: ActiveValue::Set(String::new()),
            image_url: ActiveValue::Set(String::new()),
            status: ActiveValue::Set(value.status.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl ArtistRepository {
    /// `page` is 1-based.
    pub async fn find(
        &self,
        status: Option<ArtistStatus>,
        page: u64,
        limit: u64,
    ) -> Response<(Vec<ArtistEntity>, u64)> {
        let mut query = Artist::find()
            .order_by_desc(artist::Column::CreatedAt)
            .order_by_asc(artist::Column::Id);

        if let Some(status) = status {
            query = query.filter(artist::Column::Status.eq(status.to_string()));
        }

        let paginator = query.paginate(&self.db, limit);
        let total = paginator
            .num_items()
            .await
            .into_response("in artist count")?;
        let artists = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .into_response("in artist find")?;

        Ok((artists.into_iter().map(ArtistEntity::from).collect(), total))
    }

    pub async fn find_by_id(&self, id: &str) -> Response<Option<ArtistEntity>> {
        let artist = Artist::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in artist find by id")?;

        Ok(artist.map(ArtistEntity::from))
    }

    pub async fn create(&self, mut artist: NewArtist) -> Response<ArtistEntity> {
        artist.validate()?;
        self.ensure_unique_name(&artist.name, None).await?;

        let name = artist.name.clone();
        let artist = artist::ActiveModel::from(artist)
            .insert(&self.db)
            .await
            .map_err(|e| name_conflict(e, &name, "in artist insert"))?;

        Ok(artist.into())
    }

    pub async fn update(
        &self,
        id: &str,
        mut patch: ArtistPatch,
    ) -> Response<ArtistEntity> {
        patch.validate()?;

        let Some(artist) = Artist::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in artist find by id")?
        else {
            return Err(RepositoryError::NotFound("Artist"));
        };

        if let Some(name) = &patch.name {
            self.ensure_unique_name(name, Some(id)).await?;
        }

        let name = patch.name.clone().unwrap_or_else(|| artist.name.clone());
        let mut model = artist::ActiveModel::from(artist);
        set_some(&mut model.name, patch.name);
        set_some(&mut model.bio, patch.bio);
        set_some(&mut model.genre, patch.genre);
        set_some(&mut model.contact_email, patch.contact_email);
        set_some(&mut model.contact_phone, patch.contact_phone);
        if let Some(social_media) = patch.social_media {
            model.instagram = ActiveValue::Set(social_media.instagram);
            model.twitter = ActiveValue::Set(social_media.twitter);
            model.youtube = ActiveValue::Set(social_media.youtube);
        }
        set_some(&mut model.status, patch.status.map(|s| s.to_string()));
        model.updated_at = ActiveValue::Set(now());

        let artist = model
            .update(&self.db)
            .await
            .map_err(|e| name_conflict(e, &name, "in artist update"))?;

        Ok(artist.into())
    }

    /// Removes the artist from every event's lineup as well. Returns the
    /// deleted record so the caller can release its image.
    pub async fn delete(&self, id: &str) -> Response<ArtistEntity> {
        let txn = self.db.begin().await.into_response("in begin")?;

        let Some(artist) = Artist::find_by_id(id)
            .one(&txn)
            .await
            .into_response("in artist find by id")?
        else {
            return Err(RepositoryError::NotFound("Artist"));
        };

        EventArtist::delete_many()
            .filter(event_artist::Column::ArtistId.eq(id))
            .exec(&txn)
            .await
            .into_response("in event artist delete")?;
        Artist::delete_by_id(id)
            .exec(&txn)
            .await
            .into_response("in artist delete")?;

        txn.commit().await.into_response("in commit")?;

        Ok(artist.into())
    }

    pub async fn set_image(
        &self,
        id: &str,
        image: ImageRef,
    ) -> Response<ArtistEntity> {
        let Some(artist) = Artist::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in artist find by id")?
        else {
            return Err(RepositoryError::NotFound("Artist"));
        };

        let mut model = artist::ActiveModel::from(artist);
        model.image_public_id = ActiveValue::Set(image.public_id);
        model.image_url = ActiveValue::Set(image.url);
        model.updated_at = ActiveValue::Set(now());

        let artist = model
            .update(&self.db)
            .await
            .into_response("in artist image update")?;

        Ok(artist.into())
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        except_id: Option<&str>,
    ) -> Response<()> {
        let mut query = Artist::find().filter(artist::Column::Name.eq(name));
        if let Some(id) = except_id {
            query = query.filter(artist::Column::Id.ne(id));
        }

        let count = query
            .count(&self.db)
            .await
            .into_response("in artist name check")?;
        if count > 0 {
            return Err(RepositoryError::Conflict(format!(
                "Artist name already exists: {}",
                name
            )));
        }

        Ok(())
    }
}

/// A concurrent writer can claim the name between the uniqueness check and
/// the write, in which case the unique index rejects it.
fn name_conflict(e: DbErr, name: &str, message: &str) -> RepositoryError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::Conflict(
            format!("Artist name already exists: {}", name),
        ),
        _ => RepositoryError::InSeaOrmDbErr {
            message: message.to_string(),
            source: e,
        },
    }
}

#[cfg(test)]
mod test {
    use crate::test_repository;

    use super::*;

    fn new_artist(name: &str) -> NewArtist {
        NewArtist {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        // Arrange
        let repo = test_repository().await;

        // Act
        let created = repo
            .artist
            .create(NewArtist {
                name: "  Aurora ".to_string(),
                genre: "pop".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        // Assert
        assert_eq!(created.name, "Aurora");
        assert_eq!(created.status, ArtistStatus::Active);
        assert!(created.image.is_empty());

        let found = repo.artist.find_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let repo = test_repository().await;

        let result = repo.artist.create(new_artist(" ")).await;

        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let repo = test_repository().await;
        repo.artist.create(new_artist("Bonobo")).await.unwrap();
        let other = repo.artist.create(new_artist("Tycho")).await.unwrap();

        let created = repo.artist.create(new_artist("Bonobo")).await;
        let renamed = repo
            .artist
            .update(
                &other.id,
                ArtistPatch {
                    name: Some("Bonobo".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(created, Err(RepositoryError::Conflict(_))));
        assert!(matches!(renamed, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_unique_index_violation_is_conflict() {
        let repo = test_repository().await;
        repo.artist.create(new_artist("Nils")).await.unwrap();

        // skips the name check, as a racing writer would
        let err = artist::ActiveModel::from(new_artist("Nils"))
            .insert(&repo.artist.db)
            .await
            .unwrap_err();

        assert!(matches!(
            name_conflict(err, "Nils", "in artist insert"),
            RepositoryError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn test_find_filters_and_paginates() {
        // Arrange
        let repo = test_repository().await;
        for i in 0..3 {
            repo.artist
                .create(new_artist(&format!("active {i}")))
                .await
                .unwrap();
        }
        repo.artist
            .create(NewArtist {
                status: ArtistStatus::Pending,
                ..new_artist("pending")
            })
            .await
            .unwrap();

        // Act
        let (first, total) = repo
            .artist
            .find(Some(ArtistStatus::Active), 1, 2)
            .await
            .unwrap();
        let (second, _) = repo
            .artist
            .find(Some(ArtistStatus::Active), 2, 2)
            .await
            .unwrap();
        let (all, all_total) = repo.artist.find(None, 1, 10).await.unwrap();

        // Assert
        assert_eq!(total, 3);
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert!(first.iter().chain(second.iter()).all(|a| a.status == ArtistStatus::Active));
        assert_eq!(all_total, 4);
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let repo = test_repository().await;
        let created = repo
            .artist
            .create(NewArtist {
                bio: "original bio".to_string(),
                ..new_artist("Moderat")
            })
            .await
            .unwrap();

        let updated = repo
            .artist
            .update(
                &created.id,
                ArtistPatch {
                    status: Some(ArtistStatus::Inactive),
                    social_media: Some(SocialMedia {
                        instagram: "@moderat".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.bio, "original bio");
        assert_eq!(updated.status, ArtistStatus::Inactive);
        assert_eq!(updated.social_media.instagram, "@moderat");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_artist() {
        let repo = test_repository().await;

        let updated = repo.artist.update("missing", ArtistPatch::default()).await;
        let deleted = repo.artist.delete("missing").await;

        assert!(matches!(updated, Err(RepositoryError::NotFound("Artist"))));
        assert!(matches!(deleted, Err(RepositoryError::NotFound("Artist"))));
    }

    #[tokio::test]
    async fn test_set_image_and_delete() {
        let repo = test_repository().await;
        let created = repo.artist.create(new_artist("Jon Hopkins")).await.unwrap();

        let updated = repo
            .artist
            .set_image(&created.id, ImageRef::new("key", "https://cdn/key"))
            .await
            .unwrap();
        let deleted = repo.artist.delete(&created.id).await.unwrap();

        assert_eq!(updated.image.public_id, "key");
        assert_eq!(deleted.image.url, "https://cdn/key");
        assert_eq!(repo.artist.find_by_id(&created.id).await.unwrap(), None);
    }
}
