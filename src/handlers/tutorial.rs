//! Tutorial handlers: create, list, list published, read, update, delete, delete all.
//! Each handler makes exactly one store call.

use crate::error::AppError;
use crate::extractors::{Payload, QueryParams};
use crate::model::{CreateTutorial, TutorialFilter, TutorialPatch};
use crate::response::{deleted, message, success_many, success_one};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub title: Option<String>,
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest(format!("invalid id: {}", id)))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload<CreateTutorial>,
) -> Result<impl IntoResponse, AppError> {
    let tutorial = body
        .and_then(CreateTutorial::validate)
        .ok_or_else(|| AppError::Validation("Content can not be empty!".into()))?;
    let doc = state
        .store
        .insert(tutorial)
        .await
        .map_err(|e| AppError::store(e, "Some error occurred while creating the Tutorial."))?;
    tracing::info!(id = %doc.id, "tutorial created");
    Ok(success_one(doc))
}

pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = TutorialFilter::title(query.title);
    let docs = state
        .store
        .find(&filter)
        .await
        .map_err(|e| AppError::store(e, "Some error occurred while retrieving tutorials."))?;
    Ok(success_many(docs))
}

pub async fn list_published(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let docs = state
        .store
        .find(&TutorialFilter::published())
        .await
        .map_err(|e| AppError::store(e, "Some error occurred while retrieving tutorials."))?;
    Ok(success_many(docs))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let doc = state
        .store
        .find_by_id(id)
        .await
        .map_err(|e| AppError::store(e, "Error retrieving tutorial."))?
        .ok_or_else(|| AppError::NotFound(format!("Not found tutorial with id - {}", id_str)))?;
    Ok(success_one(doc))
}

/// Responds with the tutorial as stored after the patch is applied.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Payload(body): Payload<TutorialPatch>,
) -> Result<impl IntoResponse, AppError> {
    let patch = body
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("Data to update can not be empty!".into()))?;
    let id = parse_id(&id_str)?;
    let doc = state
        .store
        .update_by_id(id, &patch)
        .await
        .map_err(|e| AppError::store(e, "Error updating Tutorial."))?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Cannot update Tutorial with {}. Tutorial is not in the database.",
                id_str
            ))
        })?;
    Ok(success_one(doc))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state
        .store
        .delete_by_id(id)
        .await
        .map_err(|e| AppError::store(e, "Could not delete Tutorial."))?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Cannot delete Tutorial with id = {}. Maybe Tutorial was not found!",
                id_str
            ))
        })?;
    tracing::info!(%id, "tutorial deleted");
    Ok(message("Tutorial was deleted successfully!"))
}

pub async fn delete_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let count = state
        .store
        .delete_all()
        .await
        .map_err(|e| AppError::store(e, "Some error occurred while removing all tutorials."))?;
    tracing::info!(count, "tutorials deleted");
    Ok(deleted(count))
}
