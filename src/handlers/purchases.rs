// src/handlers/purchases.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    services::purchase_service::{NewPurchase, PurchaseLineInput},
};

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLinePayload {
    pub item_id: i64,
    // Quantity 0 records the line without creating any instances.
    #[validate(range(min = 0, message = "Quantity cannot be negative."))]
    pub quantity: i32,
    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchasePayload {
    pub office_id: i64,
    pub purchased_by_id: i64,
    pub supplier: Option<String>,
    pub invoice_number: Option<String>,
    pub remarks: Option<String>,
    #[validate(length(max = 500, message = "Receipt URL is too long."))]
    pub receipt_url: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<PurchaseLinePayload>,
}

#[utoipa::path(
    post,
    path = "/api/purchases",
    tag = "Purchases",
    request_body = CreatePurchasePayload,
    responses(
        (status = 201, description = "Purchase recorded and expanded into item instances", body = crate::models::purchase::PurchaseDetail),
        (status = 404, description = "Referenced office, user or item not found"),
        (status = 409, description = "Office has no inventory")
    )
)]
pub async fn create_purchase(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let new_purchase = NewPurchase {
        office_id: payload.office_id,
        purchased_by_user_id: payload.purchased_by_id,
        supplier: payload.supplier,
        invoice_number: payload.invoice_number,
        remarks: payload.remarks,
        receipt_url: payload.receipt_url,
        lines: payload
            .items
            .into_iter()
            .map(|line| PurchaseLineInput {
                item_id: line.item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect(),
    };

    let detail = app_state
        .purchase_service
        .create_purchase(&app_state.db_pool, new_purchase)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/api/purchases",
    tag = "Purchases",
    responses((status = 200, description = "All purchase headers", body = [crate::models::purchase::Purchase]))
)]
pub async fn get_all_purchases(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let purchases = app_state.purchase_service.get_all_purchases(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(purchases)))
}

#[utoipa::path(
    get,
    path = "/api/purchases/{id}",
    tag = "Purchases",
    params(("id" = i64, Path, description = "Purchase id")),
    responses(
        (status = 200, description = "Purchase with lines and computed totals", body = crate::models::purchase::PurchaseDetail),
        (status = 404, description = "Purchase not found")
    )
)]
pub async fn get_purchase_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.purchase_service.get_purchase(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/api/purchases/office/{officeId}",
    tag = "Purchases",
    params(("officeId" = i64, Path, description = "Office id")),
    responses((status = 200, description = "Purchases of one office; empty list when there are none", body = [crate::models::purchase::Purchase]))
)]
pub async fn get_purchases_by_office(
    State(app_state): State<AppState>,
    Path(office_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let purchases = app_state
        .purchase_service
        .get_purchases_by_office(&app_state.db_pool, office_id)
        .await?;
    Ok((StatusCode::OK, Json(purchases)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_unit_price_fails_validation() {
        let payload = CreatePurchasePayload {
            office_id: 1,
            purchased_by_id: 1,
            supplier: None,
            invoice_number: None,
            remarks: None,
            receipt_url: None,
            items: vec![PurchaseLinePayload {
                item_id: 1,
                quantity: 1,
                unit_price: Decimal::new(-100, 2),
            }],
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn negative_quantity_fails_validation() {
        let payload = CreatePurchasePayload {
            office_id: 1,
            purchased_by_id: 1,
            supplier: None,
            invoice_number: None,
            remarks: None,
            receipt_url: None,
            items: vec![PurchaseLinePayload {
                item_id: 1,
                quantity: -1,
                unit_price: Decimal::ONE,
            }],
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn zero_quantity_and_empty_item_list_are_valid() {
        let empty = CreatePurchasePayload {
            office_id: 1,
            purchased_by_id: 1,
            supplier: Some("Acme".into()),
            invoice_number: None,
            remarks: None,
            receipt_url: None,
            items: vec![],
        };
        assert!(empty.validate().is_ok());

        let zero_quantity = CreatePurchasePayload {
            items: vec![PurchaseLinePayload {
                item_id: 1,
                quantity: 0,
                unit_price: Decimal::ONE,
            }],
            ..empty
        };
        assert!(zero_quantity.validate().is_ok());
    }

    #[test]
    fn payload_uses_camel_case_field_names() {
        let json = r#"{
            "officeId": 3,
            "purchasedById": 1,
            "supplier": "Acme Supplies",
            "invoiceNumber": "INV-9",
            "items": [{ "itemId": 5, "quantity": 2, "unitPrice": 10.5 }]
        }"#;
        let payload: CreatePurchasePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.office_id, 3);
        assert_eq!(payload.items[0].item_id, 5);
        assert_eq!(payload.items[0].quantity, 2);
    }
}
