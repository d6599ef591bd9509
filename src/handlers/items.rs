// src/handlers/items.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, services::catalog_service::NewItem,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub name_bn: Option<String>,
    pub unit_id: i64,
    pub description: Option<String>,
}

impl From<ItemPayload> for NewItem {
    fn from(payload: ItemPayload) -> Self {
        NewItem {
            name: payload.name,
            name_bn: payload.name_bn,
            unit_id: payload.unit_id,
            description: payload.description,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/items",
    tag = "Items",
    responses((status = 200, description = "All catalog items", body = [crate::models::catalog::Item]))
)]
pub async fn get_all_items(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.catalog_service.get_all_items(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(items)))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "Items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, body = crate::models::catalog::Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.catalog_service.get_item(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    post,
    path = "/api/items",
    tag = "Items",
    request_body = ItemPayload,
    responses(
        (status = 201, body = crate::models::catalog::Item),
        (status = 404, description = "Referenced unit not found")
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    Json(payload): Json<ItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .catalog_service
        .create_item(&app_state.db_pool, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    tag = "Items",
    params(("id" = i64, Path, description = "Item id")),
    request_body = ItemPayload,
    responses(
        (status = 200, body = crate::models::catalog::Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .catalog_service
        .update_item(&app_state.db_pool, id, payload.into())
        .await?;
    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "Items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_item(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
