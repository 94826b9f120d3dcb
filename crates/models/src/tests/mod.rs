/// CRUD operations tests for all models
pub mod crud_tests;


use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::{db, home, user};

/// Fresh in-memory database with the full schema applied.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) async fn seed_realtor(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    let u = user::create(
        db,
        user::NewUser {
            name: "Laith".into(),
            phone: "555 555 5555".into(),
            email: email.into(),
            password_hash: "$argon2id$v=19$placeholder".into(),
            user_type: user::UserType::Realtor,
        },
    )
    .await?;
    Ok(u)
}

pub(crate) fn sample_home(city: &str, price: f64) -> home::NewHome {
    home::NewHome {
        address: "2345 William Str".into(),
        city: city.into(),
        price,
        land_size: 4444.0,
        number_of_bedrooms: 3,
        number_of_bathrooms: 2.5,
        property_type: home::PropertyType::Residential,
    }
}
