// src/handlers/offices.rs

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
    common::error::AppError, config::AppState, services::office_service::NewOffice,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfficePayload {
    pub parent_id: Option<i64>,
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub name_bn: Option<String>,
    pub office_type: Option<String>,
    #[validate(length(min = 1, message = "Code is required."))]
    pub code: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfficePayload {
    pub parent_id: Option<i64>,
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub name_bn: Option<String>,
    pub office_type: Option<String>,
    #[validate(length(min = 1, message = "Code is required."))]
    pub code: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[utoipa::path(
    get,
    path = "/api/offices",
    tag = "Offices",
    responses((status = 200, description = "All offices, soft-deleted ones included", body = [crate::models::office::Office]))
)]
pub async fn get_all_offices(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let offices = app_state.office_service.get_all_offices(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(offices)))
}

#[utoipa::path(
    get,
    path = "/api/offices/{id}",
    tag = "Offices",
    params(("id" = i64, Path, description = "Office id")),
    responses(
        (status = 200, body = crate::models::office::Office),
        (status = 404, description = "Office not found")
    )
)]
pub async fn get_office_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let office = app_state.office_service.get_office(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(office)))
}

#[utoipa::path(
    get,
    path = "/api/offices/children/{parentId}",
    tag = "Offices",
    params(("parentId" = i64, Path, description = "Parent office id")),
    responses((status = 200, body = [crate::models::office::Office]))
)]
pub async fn get_child_offices(
    State(app_state): State<AppState>,
    Path(parent_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let offices = app_state
        .office_service
        .get_child_offices(&app_state.db_pool, parent_id)
        .await?;
    Ok((StatusCode::OK, Json(offices)))
}

#[utoipa::path(
    post,
    path = "/api/offices",
    tag = "Offices",
    request_body = CreateOfficePayload,
    responses((status = 201, body = crate::models::office::Office))
)]
pub async fn create_office(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOfficePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let office = app_state
        .office_service
        .create_office(
            &app_state.db_pool,
            NewOffice {
                parent_id: payload.parent_id,
                name: payload.name,
                name_bn: payload.name_bn,
                office_type: payload.office_type,
                code: payload.code,
                description: payload.description,
                sort_order: payload.sort_order,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(office)))
}

#[utoipa::path(
    put,
    path = "/api/offices/{id}",
    tag = "Offices",
    params(("id" = i64, Path, description = "Office id")),
    request_body = UpdateOfficePayload,
    responses(
        (status = 200, body = crate::models::office::Office),
        (status = 404, description = "Office not found")
    )
)]
pub async fn update_office(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOfficePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let office = app_state
        .office_service
        .update_office(
            &app_state.db_pool,
            id,
            NewOffice {
                parent_id: payload.parent_id,
                name: payload.name,
                name_bn: payload.name_bn,
                office_type: payload.office_type,
                code: payload.code,
                description: payload.description,
                sort_order: payload.sort_order,
            },
            payload.is_active,
        )
        .await?;
    Ok((StatusCode::OK, Json(office)))
}

#[utoipa::path(
    delete,
    path = "/api/offices/{id}",
    tag = "Offices",
    params(("id" = i64, Path, description = "Office id")),
    responses(
        (status = 204, description = "Office deactivated (soft delete)"),
        (status = 404, description = "Office not found")
    )
)]
pub async fn delete_office(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.office_service.delete_office(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
