//! Request extractors. Rejections are reported as [`crate::error::AppError`].

pub mod payload;
pub mod query;

pub use payload::Payload;
pub use query::QueryParams;
