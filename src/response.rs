//! Response body helpers. Every tutorial leaving the API goes through [`to_api_shape`].

use crate::model::{to_api_shape, Tutorial, TutorialDocument};
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBody {
    pub message: String,
    pub deleted_count: u64,
}

pub fn success_one(doc: TutorialDocument) -> (StatusCode, Json<Tutorial>) {
    (StatusCode::OK, Json(to_api_shape(doc)))
}

pub fn success_many(docs: Vec<TutorialDocument>) -> (StatusCode, Json<Vec<Tutorial>>) {
    (StatusCode::OK, Json(docs.into_iter().map(to_api_shape).collect()))
}

pub fn message(message: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: message.into(),
        }),
    )
}

pub fn deleted(count: u64) -> (StatusCode, Json<DeletedBody>) {
    (
        StatusCode::OK,
        Json(DeletedBody {
            message: format!("{} tutorials were deleted successfully!", count),
            deleted_count: count,
        }),
    )
}
