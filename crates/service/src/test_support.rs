#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use models::db::connect_in_memory;
use models::user::{self, NewUser, UserType};

/// Fresh in-memory database with migrations applied. Each test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, user_type: UserType) -> Result<user::Model, anyhow::Error> {
    let u = user::create(
        db,
        NewUser {
            name: "Laith".into(),
            phone: "555 555 5555".into(),
            email: email.into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".into(),
            user_type,
        },
    )
    .await?;
    Ok(u)
}
