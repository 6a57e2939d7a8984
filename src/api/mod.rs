//! API handlers for Libris REST endpoints

pub mod books;
pub mod health;
pub mod libraries;
pub mod library_books;
pub mod openapi;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::EntityStatus;

/// Query parameter for filtering related records by mapping status
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MappingStatusQuery {
    pub status: Option<EntityStatus>,
}
