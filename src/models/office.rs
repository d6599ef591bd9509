// src/models/office.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Offices ---
// Hierarchical org units (registrar office, departments, sections...).
// Deleting an office is a soft delete: `is_active` flips to false and the
// row stays retrievable by id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub name_bn: Option<String>,
    pub office_type: Option<String>,
    pub code: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Inventory ---
// Exactly one per office; the container new item instances land in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: i64,
    pub office_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
