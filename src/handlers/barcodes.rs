// src/handlers/barcodes.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct QrSizeParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrintNetworkPayload {
    pub printer_ip: String,
    pub printer_port: u16,
    // Raw bytes as a JSON array of 0-255, matching what /escpos returns.
    pub data: Vec<u8>,
}

#[utoipa::path(
    get,
    path = "/api/barcodes/qrcode/{text}",
    tag = "Barcodes",
    params(
        ("text" = String, Path, description = "Text to encode"),
        QrSizeParams
    ),
    responses((status = 200, description = "QR code PNG", body = Vec<u8>, content_type = "image/png"))
)]
pub async fn generate_qrcode(
    State(app_state): State<AppState>,
    Path(text): Path<String>,
    Query(params): Query<QrSizeParams>,
) -> Result<impl IntoResponse, AppError> {
    let width = params.width.unwrap_or(200);
    let height = params.height.unwrap_or(200);

    let png = app_state.barcode_service.qr_png(&text, width, height)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, "inline; filename=\"qrcode.png\"".to_string()),
        ],
        png,
    ))
}

#[utoipa::path(
    post,
    path = "/api/barcodes/labels-pdf",
    tag = "Barcodes",
    request_body = Vec<i64>,
    responses(
        (status = 200, description = "Printable label sheet", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "An item instance was not found")
    )
)]
pub async fn generate_labels_pdf(
    State(app_state): State<AppState>,
    Json(instance_ids): Json<Vec<i64>>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state
        .barcode_service
        .labels_pdf(&app_state.db_pool, &instance_ids)
        .await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"barcode-labels.pdf\"".to_string(),
            ),
        ],
        pdf,
    ))
}

#[utoipa::path(
    get,
    path = "/api/barcodes/escpos/{instanceId}",
    tag = "Barcodes",
    params(("instanceId" = i64, Path, description = "Item instance id")),
    responses(
        (status = 200, description = "ESC/POS command stream", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "Item instance not found")
    )
)]
pub async fn generate_escpos(
    State(app_state): State<AppState>,
    Path(instance_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let commands = app_state
        .barcode_service
        .escpos_for_instances(&app_state.db_pool, &[instance_id])
        .await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"print-{instance_id}.bin\""),
            ),
        ],
        commands,
    ))
}

#[utoipa::path(
    post,
    path = "/api/barcodes/escpos-multiple",
    tag = "Barcodes",
    request_body = Vec<i64>,
    responses(
        (status = 200, description = "ESC/POS command stream for several labels", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "An item instance was not found")
    )
)]
pub async fn generate_escpos_multiple(
    State(app_state): State<AppState>,
    Json(instance_ids): Json<Vec<i64>>,
) -> Result<impl IntoResponse, AppError> {
    let commands = app_state
        .barcode_service
        .escpos_for_instances(&app_state.db_pool, &instance_ids)
        .await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"print-labels.bin\"".to_string(),
            ),
        ],
        commands,
    ))
}

#[utoipa::path(
    post,
    path = "/api/barcodes/print-network",
    tag = "Barcodes",
    request_body = PrintNetworkPayload,
    responses(
        (status = 200, description = "Print job accepted by the printer"),
        (status = 502, description = "Printer unreachable")
    )
)]
pub async fn print_to_network_printer(
    State(app_state): State<AppState>,
    Json(payload): Json<PrintNetworkPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .barcode_service
        .print_to_network_printer(&payload.printer_ip, payload.printer_port, &payload.data)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": format!(
                "Print job sent successfully to {}:{}",
                payload.printer_ip, payload.printer_port
            ),
        })),
    ))
}
