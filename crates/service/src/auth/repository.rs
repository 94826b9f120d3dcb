use async_trait::async_trait;

use models::user::{self, NewUser};

use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, new: NewUser) -> Result<user::Model, AuthError>;
}
