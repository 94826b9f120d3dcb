use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{errors, image, user};

/// Listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    #[sea_orm(string_value = "RESIDENTIAL")]
    Residential,
    #[sea_orm(string_value = "CONDO")]
    Condo,
}

impl PropertyType {
    pub const ALL: [PropertyType; 2] = [PropertyType::Residential, PropertyType::Condo];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "RESIDENTIAL",
            PropertyType::Condo => "CONDO",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| errors::ModelError::Validation(format!("unknown property type `{s}`")))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "home")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub land_size: f64,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub property_type: PropertyType,
    pub listed_date: DateTimeWithTimeZone,
    pub realtor_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Realtor,
    Image,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Realtor => Entity::belongs_to(user::Entity)
                .from(Column::RealtorId)
                .to(user::Column::Id)
                .into(),
            Relation::Image => Entity::has_many(image::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Realtor.def()
    }
}

impl Related<image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHome {
    pub address: String,
    pub city: String,
    pub price: f64,
    pub land_size: f64,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub property_type: PropertyType,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeChanges {
    pub address: Option<String>,
    pub city: Option<String>,
    pub price: Option<f64>,
    pub land_size: Option<f64>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_bathrooms: Option<f64>,
    pub property_type: Option<PropertyType>,
}

impl HomeChanges {
    pub fn is_empty(&self) -> bool {
        *self == HomeChanges::default()
    }
}

/// Insert a home and one image row per URL in a single transaction.
pub async fn create_with_images(
    db: &DatabaseConnection,
    realtor_id: i32,
    new: NewHome,
    image_urls: &[String],
) -> Result<(Model, Vec<image::Model>), errors::ModelError> {
    if new.address.trim().is_empty() {
        return Err(errors::ModelError::Validation("address required".into()));
    }
    if new.city.trim().is_empty() {
        return Err(errors::ModelError::Validation("city required".into()));
    }

    let txn = db.begin().await?;
    match insert_home_and_images(&txn, realtor_id, new, image_urls).await {
        Ok((home, images)) => {
            txn.commit().await?;
            debug!(home_id = home.id, images = images.len(), "home inserted");
            Ok((home, images))
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

async fn insert_home_and_images<C: ConnectionTrait>(
    db: &C,
    realtor_id: i32,
    new: NewHome,
    image_urls: &[String],
) -> Result<(Model, Vec<image::Model>), errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        address: Set(new.address),
        city: Set(new.city),
        price: Set(new.price),
        land_size: Set(new.land_size),
        number_of_bedrooms: Set(new.number_of_bedrooms),
        number_of_bathrooms: Set(new.number_of_bathrooms),
        property_type: Set(new.property_type),
        listed_date: Set(now),
        realtor_id: Set(realtor_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let home = am.insert(db).await?;
    let images = image::create_many(db, home.id, image_urls).await?;
    Ok((home, images))
}

/// Apply a partial update. Returns `None` when no home has this id.
pub async fn apply_changes(
    db: &DatabaseConnection,
    id: i32,
    changes: HomeChanges,
) -> Result<Option<Model>, errors::ModelError> {
    let Some(existing) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    if changes.is_empty() {
        return Ok(Some(existing));
    }
    let mut am: ActiveModel = existing.into();
    if let Some(v) = changes.address { am.address = Set(v); }
    if let Some(v) = changes.city { am.city = Set(v); }
    if let Some(v) = changes.price { am.price = Set(v); }
    if let Some(v) = changes.land_size { am.land_size = Set(v); }
    if let Some(v) = changes.number_of_bedrooms { am.number_of_bedrooms = Set(v); }
    if let Some(v) = changes.number_of_bathrooms { am.number_of_bathrooms = Set(v); }
    if let Some(v) = changes.property_type { am.property_type = Set(v); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    Ok(Some(updated))
}

/// Delete the home's images, then the home, atomically.
/// Returns false (and changes nothing) when the home does not exist.
pub async fn delete_with_images(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let txn = db.begin().await?;
    let removed_images = image::Entity::delete_many()
        .filter(image::Column::HomeId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    let res = Entity::delete_by_id(id).exec(&txn).await?;
    if res.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(false);
    }
    txn.commit().await?;
    debug!(home_id = id, removed_images, "home deleted");
    Ok(true)
}

/// Owning realtor of a home, if the home exists.
pub async fn realtor_id_of(db: &DatabaseConnection, id: i32) -> Result<Option<i32>, errors::ModelError> {
    let found = Entity::find_by_id(id).one(db).await?;
    Ok(found.map(|h| h.realtor_id))
}
