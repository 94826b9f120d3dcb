use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, home};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub url: String,
    pub home_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Home }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Home => Entity::belongs_to(home::Entity)
                .from(Column::HomeId)
                .to(home::Column::Id)
                .into(),
        }
    }
}

impl Related<home::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Home.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert one row per URL for `home_id`, preserving input order.
pub async fn create_many<C: ConnectionTrait>(
    db: &C,
    home_id: i32,
    urls: &[String],
) -> Result<Vec<Model>, errors::ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let mut created = Vec::with_capacity(urls.len());
    for url in urls {
        if url.trim().is_empty() {
            return Err(errors::ModelError::Validation("image url required".into()));
        }
        let am = ActiveModel {
            url: Set(url.clone()),
            home_id: Set(home_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        created.push(am.insert(db).await?);
    }
    Ok(created)
}

/// First image URL (lowest id) of each listed home. Homes without images
/// are absent from the map.
pub async fn first_url_per_home<C: ConnectionTrait>(
    db: &C,
    home_ids: &[i32],
) -> Result<HashMap<i32, String>, errors::ModelError> {
    if home_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Entity::find()
        .filter(Column::HomeId.is_in(home_ids.iter().copied()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    let mut first = HashMap::with_capacity(home_ids.len());
    for row in rows {
        first.entry(row.home_id).or_insert(row.url);
    }
    Ok(first)
}

/// All image URLs of one home in insertion order.
pub async fn urls_for_home<C: ConnectionTrait>(db: &C, home_id: i32) -> Result<Vec<String>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::HomeId.eq(home_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| r.url).collect())
}
