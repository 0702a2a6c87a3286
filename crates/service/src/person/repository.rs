use async_trait::async_trait;
use common::types::Person;

use crate::errors::ServiceError;

/// Storage abstraction for person records.
///
/// Both backends honor the same contract: `list_by_color` matches the color
/// name ignoring case and returns an empty vec for a missing or blank color;
/// `create` assigns the id and makes the color fields consistent through the
/// color table before anything is written.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Person>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Person>, ServiceError>;
    async fn list_by_color(&self, color: Option<&str>) -> Result<Vec<Person>, ServiceError>;
    async fn create(&self, person: Person) -> Result<Person, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPersonRepository {
        persons: Mutex<Vec<Person>>,
        create_calls: AtomicUsize,
        failing: bool,
    }

    impl MockPersonRepository {
        pub fn with_persons(persons: Vec<Person>) -> Self {
            Self { persons: Mutex::new(persons), ..Self::default() }
        }

        /// Every call fails with a storage error.
        pub fn failing() -> Self {
            Self { failing: true, ..Self::default() }
        }

        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.failing {
                return Err(ServiceError::Storage("mock storage unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PersonRepository for MockPersonRepository {
        async fn list_all(&self) -> Result<Vec<Person>, ServiceError> {
            self.check()?;
            Ok(self.persons.lock().unwrap().clone())
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<Person>, ServiceError> {
            self.check()?;
            Ok(self.persons.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn list_by_color(&self, color: Option<&str>) -> Result<Vec<Person>, ServiceError> {
            self.check()?;
            let Some(color) = color.filter(|c| !c.trim().is_empty()) else { return Ok(Vec::new()) };
            let persons = self.persons.lock().unwrap();
            Ok(persons.iter().filter(|p| p.color.to_lowercase() == color.to_lowercase()).cloned().collect())
        }

        async fn create(&self, mut person: Person) -> Result<Person, ServiceError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            let mut persons = self.persons.lock().unwrap();
            person.id = persons.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            persons.push(person.clone());
            Ok(person)
        }
    }
}
