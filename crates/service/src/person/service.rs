use std::sync::Arc;

use common::types::Person;
use tracing::instrument;

use crate::errors::ServiceError;
use crate::person::repository::PersonRepository;

/// Application service over whichever person repository was chosen at boot.
/// Delegates one-to-one; the repository owns id assignment and color rules.
pub struct PersonService<R: PersonRepository> {
    repo: Arc<R>,
}

impl<R: PersonRepository> PersonService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_all(&self) -> Result<Vec<Person>, ServiceError> { self.repo.list_all().await }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Person>, ServiceError> { self.repo.get_by_id(id).await }

    pub async fn list_by_color(&self, color: Option<&str>) -> Result<Vec<Person>, ServiceError> {
        self.repo.list_by_color(color).await
    }

    #[instrument(skip(self, person), fields(color = %person.color, color_id = person.color_id))]
    pub async fn create(&self, person: Person) -> Result<Person, ServiceError> {
        self.repo.create(person).await
    }

    pub fn repository(&self) -> &Arc<R> { &self.repo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::ColorTable;
    use crate::person::repository::mock::MockPersonRepository;
    use crate::storage::flat_file::FlatFileStore;

    #[tokio::test]
    async fn delegates_to_repository() -> Result<(), anyhow::Error> {
        let repo = Arc::new(MockPersonRepository::with_persons(vec![Person {
            id: 1,
            name: "Adam".into(),
            color: "rot".into(),
            color_id: 4,
            ..Person::default()
        }]));
        let svc = PersonService::new(Arc::clone(&repo));

        assert_eq!(svc.list_all().await?.len(), 1);
        assert!(svc.get_by_id(1).await?.is_some());
        assert!(svc.get_by_id(2).await?.is_none());
        assert_eq!(svc.list_by_color(Some("ROT")).await?.len(), 1);
        assert!(svc.list_by_color(Some("gelb")).await?.is_empty());

        let created = svc.create(Person { name: "Billi".into(), ..Person::default() }).await?;
        assert_eq!(created.id, 2);
        assert_eq!(repo.create_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn storage_failures_surface_as_errors() {
        let svc = PersonService::new(Arc::new(MockPersonRepository::failing()));
        assert!(matches!(svc.list_all().await, Err(ServiceError::Storage(_))));
        assert!(matches!(svc.get_by_id(1).await, Err(ServiceError::Storage(_))));
        assert!(matches!(svc.create(Person::default()).await, Err(ServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn created_person_is_immediately_visible() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("person_service_{}.csv", uuid::Uuid::new_v4()));
        let colors = Arc::new(ColorTable::parse("1,red\n2,blue\n"));
        let svc = PersonService::new(FlatFileStore::open(&tmp, colors).await?);

        let ann = svc
            .create(Person { name: "Ann".into(), color: "red".into(), ..Person::default() })
            .await?;
        assert_eq!((ann.id, ann.color_id), (1, 1));
        assert_eq!(svc.get_by_id(1).await?, Some(ann.clone()));
        assert_eq!(svc.list_all().await?, vec![ann]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
