use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, home};

/// Role of an account. Realtors own listings; admins issue product keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    #[sea_orm(string_value = "BUYER")]
    Buyer,
    #[sea_orm(string_value = "REALTOR")]
    Realtor,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Buyer, UserType::Realtor, UserType::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Buyer => "BUYER",
            UserType::Realtor => "REALTOR",
            UserType::Admin => "ADMIN",
        }
    }

    /// Non-buyer accounts need an admin-issued product key to sign up.
    pub fn requires_product_key(&self) -> bool {
        !matches!(self, UserType::Buyer)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserType::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| errors::ModelError::Validation(format!("unknown user type `{s}`")))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    #[sea_orm(unique)]
    pub email: String,
    /// argon2 PHC string, never the plain password
    #[serde(skip_serializing)]
    pub password: String,
    pub user_type: UserType,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Home,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Home => Entity::has_many(home::Entity).into(),
        }
    }
}

impl Related<home::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Home.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields needed to insert a user; the password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
}

/// Minimal structural email check: one `@`, a non-empty local part and a
/// dotted domain without empty labels or whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else { return false };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !is_valid_email(email) {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, errors::ModelError> {
    validate_email(&new.email)?;
    if new.name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if new.password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(new.name),
        phone: Set(new.phone),
        email: Set(new.email),
        password: Set(new.password_hash),
        user_type: Set(new.user_type),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find()
        .filter(Column::Email.eq(email.to_string()))
        .one(db)
        .await?;
    Ok(found)
}
