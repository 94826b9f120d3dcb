use async_trait::async_trait;

use models::home::{self, HomeChanges, NewHome};
use models::user;

use super::filter::HomeFilter;
use crate::errors::ServiceError;

/// A listed home with its representative image, if it has any.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeListing {
    pub home: home::Model,
    pub image: Option<String>,
}

/// A home with every image URL and its realtor.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeRecord {
    pub home: home::Model,
    pub images: Vec<String>,
    pub realtor: Option<user::Model>,
}

/// Repository abstraction for listing persistence.
#[async_trait]
pub trait HomeRepository: Send + Sync {
    async fn list(&self, filter: &HomeFilter) -> Result<Vec<HomeListing>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<HomeRecord>, ServiceError>;
    async fn realtor_id(&self, id: i32) -> Result<Option<i32>, ServiceError>;
    /// Persist the home and its images atomically.
    async fn create(&self, realtor_id: i32, new: NewHome, image_urls: Vec<String>) -> Result<home::Model, ServiceError>;
    async fn update(&self, id: i32, changes: HomeChanges) -> Result<Option<home::Model>, ServiceError>;
    /// Remove the home's images and then the home atomically; false if absent.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}
