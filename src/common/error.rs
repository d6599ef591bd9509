use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Which kind of record a lookup failed for. Keeps NotFound messages uniform
// across offices, users, items and purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Office,
    User,
    Item,
    Unit,
    Purchase,
    ItemInstance,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Office => "Office",
            EntityKind::User => "User",
            EntityKind::Item => "Item",
            EntityKind::Unit => "Unit",
            EntityKind::Purchase => "Purchase",
            EntityKind::ItemInstance => "Item instance",
        };
        f.write_str(name)
    }
}

// Application error type, with `thiserror` for ergonomics. Every failure a
// handler can surface goes through here so the HTTP mapping lives in one place.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0} not found with id: {1}")]
    NotFound(EntityKind, i64),

    #[error("Office {0} does not have an inventory")]
    NoInventory(i64),

    #[error("Label font not found: {0}")]
    FontNotFound(String),

    #[error("Could not reach printer at {0}: {1}")]
    PrinterUnreachable(String, std::io::Error),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    // Catch-all for unexpected failures; anyhow keeps the context chain.
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Return every field's validation details, not just the first.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound(kind, id) => {
                let body = Json(json!({ "error": format!("{kind} not found with id: {id}") }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            AppError::NoInventory(office_id) => {
                let body = Json(json!({
                    "error": format!("Office {office_id} does not have an inventory")
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::PrinterUnreachable(ref target, ref io_err) => {
                tracing::warn!("Print job to {} failed: {}", target, io_err);
                let body = Json(json!({
                    "success": false,
                    "message": format!("Failed to send print job to {target}: {io_err}"),
                }));
                return (StatusCode::BAD_GATEWAY, body).into_response();
            }
            AppError::FontNotFound(ref path) => {
                tracing::error!("Label font missing: {}", path);
                (StatusCode::INTERNAL_SERVER_ERROR, "Label rendering is not configured.")
            }

            // Everything else (DatabaseError, InternalServerError) becomes a 500.
            // tracing gets the detailed message, the client gets a generic one.
            ref e => {
                tracing::error!("Internal server error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity_and_id() {
        let err = AppError::NotFound(EntityKind::Office, 42);
        assert_eq!(err.to_string(), "Office not found with id: 42");
    }

    #[test]
    fn no_inventory_message_names_the_office() {
        let err = AppError::NoInventory(7);
        assert_eq!(err.to_string(), "Office 7 does not have an inventory");
    }
}
