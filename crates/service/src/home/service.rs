use std::sync::Arc;

use tracing::{info, instrument};

use models::user::UserType;

use super::domain::{CreateHomeInput, HomeDetail, HomeQuery, HomeResponse, RealtorView, UpdateHomeInput};
use super::filter::HomeFilter;
use super::repository::HomeRepository;
use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;
use crate::validation::Validate;

/// Listing business service independent of web framework
pub struct HomeService<R: HomeRepository> {
    repo: Arc<R>,
}

impl<R: HomeRepository> HomeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Homes matching the query, each with at most one image URL.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &HomeQuery) -> Result<Vec<HomeResponse>, ServiceError> {
        let filter = HomeFilter::try_from(query)?;
        let listings = self.repo.list(&filter).await?;
        info!(count = listings.len(), "homes_listed");
        Ok(listings
            .into_iter()
            .map(|l| HomeResponse::from_model(l.home, l.image))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<HomeDetail, ServiceError> {
        let rec = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("home"))?;
        let image = rec.images.first().cloned();
        Ok(HomeDetail {
            home: HomeResponse::from_model(rec.home, image),
            images: rec.images,
            realtor: rec.realtor.map(RealtorView::from),
        })
    }

    /// The caller becomes the listing's realtor.
    #[instrument(skip(self, caller, input), fields(caller = caller.id))]
    pub async fn create(&self, caller: &AuthUser, input: CreateHomeInput) -> Result<HomeResponse, ServiceError> {
        if !(caller.is(UserType::Realtor) || caller.is(UserType::Admin)) {
            return Err(ServiceError::Forbidden("only realtors can list homes".into()));
        }
        input.validate()?;
        let (new, urls) = input.into_parts()?;
        let image = urls.first().cloned();
        let image_count = urls.len();
        let home = self.repo.create(caller.id, new, urls).await?;
        info!(home_id = home.id, images = image_count, "home_created");
        Ok(HomeResponse::from_model(home, image))
    }

    #[instrument(skip(self, caller, input), fields(caller = caller.id))]
    pub async fn update(&self, caller: &AuthUser, id: i32, input: UpdateHomeInput) -> Result<HomeResponse, ServiceError> {
        input.validate()?;
        self.ensure_owner(caller, id).await?;
        let home = self
            .repo
            .update(id, input.into_changes()?)
            .await?
            .ok_or_else(|| ServiceError::not_found("home"))?;
        info!(home_id = id, "home_updated");
        Ok(HomeResponse::from_model(home, None))
    }

    #[instrument(skip(self, caller), fields(caller = caller.id))]
    pub async fn delete(&self, caller: &AuthUser, id: i32) -> Result<(), ServiceError> {
        self.ensure_owner(caller, id).await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("home"));
        }
        info!(home_id = id, "home_deleted");
        Ok(())
    }

    /// NotFound before Forbidden, so a missing id never leaks as a permission error.
    async fn ensure_owner(&self, caller: &AuthUser, id: i32) -> Result<(), ServiceError> {
        let owner = self.repo.realtor_id(id).await?.ok_or_else(|| ServiceError::not_found("home"))?;
        if owner != caller.id {
            return Err(ServiceError::Forbidden("home belongs to another realtor".into()));
        }
        Ok(())
    }
}
