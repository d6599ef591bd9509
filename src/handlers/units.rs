// src/handlers/units.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub description: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/units",
    tag = "Units",
    responses((status = 200, description = "All measurement units", body = [crate::models::catalog::Unit]))
)]
pub async fn get_all_units(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let units = app_state.catalog_service.get_all_units(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(units)))
}

#[utoipa::path(
    get,
    path = "/api/units/{id}",
    tag = "Units",
    params(("id" = i64, Path, description = "Unit id")),
    responses(
        (status = 200, body = crate::models::catalog::Unit),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn get_unit_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let unit = app_state.catalog_service.get_unit(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(unit)))
}

#[utoipa::path(
    post,
    path = "/api/units",
    tag = "Units",
    request_body = UnitPayload,
    responses((status = 201, body = crate::models::catalog::Unit))
)]
pub async fn create_unit(
    State(app_state): State<AppState>,
    Json(payload): Json<UnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let unit = app_state
        .catalog_service
        .create_unit(&app_state.db_pool, &payload.name, payload.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

#[utoipa::path(
    put,
    path = "/api/units/{id}",
    tag = "Units",
    params(("id" = i64, Path, description = "Unit id")),
    request_body = UnitPayload,
    responses(
        (status = 200, body = crate::models::catalog::Unit),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn update_unit(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let unit = app_state
        .catalog_service
        .update_unit(&app_state.db_pool, id, &payload.name, payload.description.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(unit)))
}

#[utoipa::path(
    delete,
    path = "/api/units/{id}",
    tag = "Units",
    params(("id" = i64, Path, description = "Unit id")),
    responses(
        (status = 204, description = "Unit deleted"),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn delete_unit(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_unit(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
