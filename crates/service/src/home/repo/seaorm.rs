use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::home::{self, HomeChanges, NewHome};
use models::{image, user};

use crate::errors::ServiceError;
use crate::home::filter::HomeFilter;
use crate::home::repository::{HomeListing, HomeRecord, HomeRepository};

/// SeaORM-backed repository implementation.
pub struct SeaOrmHomeRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl HomeRepository for SeaOrmHomeRepository {
    async fn list(&self, filter: &HomeFilter) -> Result<Vec<HomeListing>, ServiceError> {
        let mut finder = home::Entity::find();
        if !filter.is_empty() {
            finder = finder.filter(filter.to_condition());
        }
        let homes = finder
            .order_by_asc(home::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        let ids: Vec<i32> = homes.iter().map(|h| h.id).collect();
        let mut first = image::first_url_per_home(&self.db, &ids).await?;
        Ok(homes
            .into_iter()
            .map(|h| {
                let image = first.remove(&h.id);
                HomeListing { home: h, image }
            })
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<HomeRecord>, ServiceError> {
        let found = home::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        let Some((h, realtor)) = found else { return Ok(None) };
        let images = image::urls_for_home(&self.db, h.id).await?;
        Ok(Some(HomeRecord { home: h, images, realtor }))
    }

    async fn realtor_id(&self, id: i32) -> Result<Option<i32>, ServiceError> {
        Ok(home::realtor_id_of(&self.db, id).await?)
    }

    async fn create(&self, realtor_id: i32, new: NewHome, image_urls: Vec<String>) -> Result<home::Model, ServiceError> {
        let (created, _images) = home::create_with_images(&self.db, realtor_id, new, &image_urls).await?;
        Ok(created)
    }

    async fn update(&self, id: i32, changes: HomeChanges) -> Result<Option<home::Model>, ServiceError> {
        Ok(home::apply_changes(&self.db, id, changes).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(home::delete_with_images(&self.db, id).await?)
    }
}
