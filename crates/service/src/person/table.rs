use std::sync::Arc;

use async_trait::async_trait;
use common::types::Person;
use models::errors::ModelError;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::colors::ColorTable;
use crate::errors::ServiceError;
use crate::person::repository::PersonRepository;

/// SeaORM-backed repository over the `persons` table. No caching; every call
/// goes to the database.
pub struct SeaOrmPersonRepository {
    pub db: DatabaseConnection,
    pub colors: Arc<ColorTable>,
}

impl SeaOrmPersonRepository {
    pub fn new(db: DatabaseConnection, colors: Arc<ColorTable>) -> Arc<Self> {
        Arc::new(Self { db, colors })
    }
}

fn db_error(e: ModelError) -> ServiceError {
    match e {
        ModelError::Db(msg) => ServiceError::Db(msg),
        other => ServiceError::Model(other),
    }
}

#[async_trait]
impl PersonRepository for SeaOrmPersonRepository {
    async fn list_all(&self) -> Result<Vec<Person>, ServiceError> {
        let rows = models::person::find_all(&self.db).await.map_err(db_error)?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Person>, ServiceError> {
        let found = models::person::find_by_id(&self.db, id).await.map_err(db_error)?;
        Ok(found.map(Person::from))
    }

    async fn list_by_color(&self, color: Option<&str>) -> Result<Vec<Person>, ServiceError> {
        // stored names are derived from the id, so matching the resolved id matches the name
        let Some(color_id) = color.and_then(|c| self.colors.name_to_id(c)) else {
            return Ok(Vec::new());
        };
        let rows = models::person::find_by_color_id(&self.db, color_id).await.map_err(db_error)?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn create(&self, person: Person) -> Result<Person, ServiceError> {
        let person = self.colors.canonicalize(person)?;
        let created = models::person::insert(&self.db, &person).await.map_err(db_error)?;
        info!(id = created.id, color_id = created.color_id, "person inserted");
        Ok(created.into())
    }
}
