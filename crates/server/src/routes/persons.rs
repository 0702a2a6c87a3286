use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::types::Person;
use service::{
    colors::ColorTable,
    errors::ServiceError,
    person::{repository::PersonRepository, service::PersonService},
};
use tracing::{info, warn};

use crate::errors::ApiError;

/// Shared handler state: the person service and the color table it was built with.
pub struct AppState<R: PersonRepository> {
    pub persons: Arc<PersonService<R>>,
    pub colors: Arc<ColorTable>,
}

impl<R: PersonRepository> AppState<R> {
    pub fn new(repo: Arc<R>, colors: Arc<ColorTable>) -> Self {
        Self { persons: Arc::new(PersonService::new(repo)), colors }
    }
}

// derive(Clone) would require R: Clone
impl<R: PersonRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self { persons: Arc::clone(&self.persons), colors: Arc::clone(&self.colors) }
    }
}

pub async fn list_persons<R: PersonRepository + 'static>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(state.persons.list_all().await?))
}

pub async fn get_person<R: PersonRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<i32>,
) -> Result<Json<Person>, ApiError> {
    state
        .persons
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("person").into())
}

/// An empty match set is answered with 404.
pub async fn list_persons_by_color<R: PersonRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(color): Path<String>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let found = state.persons.list_by_color(Some(&color)).await?;
    if found.is_empty() {
        return Err(ServiceError::NotFound(format!("no person with color {color}")).into());
    }
    Ok(Json(found))
}

/// Resolve the color name up front; an unknown name never reaches the store.
pub async fn create_person<R: PersonRepository + 'static>(
    State(state): State<AppState<R>>,
    Json(mut input): Json<Person>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    if input.has_color_name() {
        match state.colors.name_to_id(&input.color) {
            Some(id) => input.color_id = id,
            None => {
                warn!(color = %input.color, "unknown color in create request");
                return Err(ServiceError::UnknownColor(input.color).into());
            }
        }
    }
    let created = state.persons.create(input).await?;
    info!(id = created.id, color_id = created.color_id, "person created");
    Ok((StatusCode::CREATED, Json(created)))
}
