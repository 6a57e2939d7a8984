//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Record status shared by libraries and library-book mappings.
///
/// Stored in Postgres as the `entity_status` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "entity_status")]
pub enum EntityStatus {
    Active,
    Inactive,
}

impl Default for EntityStatus {
    fn default() -> Self {
        EntityStatus::Active
    }
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EntityStatus::Active => "Active",
            EntityStatus::Inactive => "Inactive",
        };
        write!(f, "{}", label)
    }
}
