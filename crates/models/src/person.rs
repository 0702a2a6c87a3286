use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use common::types::Person;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub zip_code: String,
    pub city: String,
    pub color_name: String,
    pub color_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Person {
    fn from(m: Model) -> Self {
        Person {
            id: m.id,
            name: m.name,
            lastname: m.last_name,
            zipcode: m.zip_code,
            city: m.city,
            color: m.color_name,
            color_id: m.color_id,
        }
    }
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Rows with the given color id; served by `idx_persons_color_id`.
pub async fn find_by_color_id(db: &DatabaseConnection, color_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::ColorId.eq(color_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert a person; the id is left to the database.
pub async fn insert(db: &DatabaseConnection, person: &Person) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(person.name.clone()),
        last_name: Set(person.lastname.clone()),
        zip_code: Set(person.zipcode.clone()),
        city: Set(person.city.clone()),
        color_name: Set(person.color.clone()),
        color_id: Set(person.color_id),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
