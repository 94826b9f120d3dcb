use sea_orm::DatabaseConnection;

use models::errors::ModelError;
use models::user::{self, NewUser};

use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
        Ok(user::find_by_email(&self.db, email).await?)
    }

    async fn create_user(&self, new: NewUser) -> Result<user::Model, AuthError> {
        match user::create(&self.db, new).await {
            Ok(u) => Ok(u),
            Err(ModelError::Conflict(_)) => Err(AuthError::Conflict),
            Err(e) => Err(e.into()),
        }
    }
}
