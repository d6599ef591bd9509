// src/models/purchase.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Purchase header ---
// `purchased_date` is assigned by the database at insert time and never
// updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: i64,
    pub office_id: i64,
    pub purchased_by_user_id: i64,
    pub supplier: Option<String>,
    pub invoice_number: Option<String>,
    pub remarks: Option<String>,
    pub receipt_url: Option<String>,
    pub purchased_date: DateTime<Utc>,
}

// --- Purchase line ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub id: i64,
    pub purchase_id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

// Line as returned to clients, joined with the catalog for the item name.
// `total_price` is computed in the query (quantity * unit_price).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemLine {
    pub id: i64,
    pub purchase_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

// --- Purchase as returned to clients ---
// Totals are derived from the lines on every read; they are not stored
// anywhere, so they cannot drift.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDetail {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub items: Vec<PurchaseItemLine>,
    pub total_amount: Decimal,
    pub total_items: i64,
}

impl PurchaseDetail {
    pub fn assemble(purchase: Purchase, items: Vec<PurchaseItemLine>) -> Self {
        let total_amount = items.iter().map(|line| line.total_price).sum();
        // Count of lines, not of units purchased.
        let total_items = items.len() as i64;
        Self { purchase, items, total_amount, total_items }
    }
}

// --- Item instance lifecycle ---
// Instances are born AVAILABLE; the remaining states belong to the
// issue/return workflows downstream of purchasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "item_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Available,
    Issued,
    Returned,
    Damaged,
    Retired,
}

// --- Item instance ---
// One physical, barcoded unit of an item. Created exactly once per unit of
// quantity when a purchase is expanded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemInstance {
    pub id: i64,
    pub barcode: String,
    pub item_id: i64,
    pub inventory_id: i64,
    pub owner_office_id: i64,
    pub status: ItemStatus,
    pub purchase_date: DateTime<Utc>,
    pub purchase_price: Decimal,
    pub created_at: DateTime<Utc>,
}

// Instance joined with item/office names, for label printing.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemInstanceLabel {
    pub id: i64,
    pub barcode: String,
    pub item_name: String,
    pub office_name: String,
    pub purchase_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn header() -> Purchase {
        Purchase {
            id: 1,
            office_id: 7,
            purchased_by_user_id: 1,
            supplier: Some("Acme Supplies".into()),
            invoice_number: Some("INV-42".into()),
            remarks: None,
            receipt_url: None,
            purchased_date: Utc::now(),
        }
    }

    fn line(id: i64, quantity: i32, unit_price: Decimal) -> PurchaseItemLine {
        PurchaseItemLine {
            id,
            purchase_id: 1,
            item_id: id,
            item_name: format!("Item {id}"),
            quantity,
            unit_price,
            total_price: Decimal::from(quantity) * unit_price,
        }
    }

    #[test]
    fn totals_are_zero_for_an_empty_purchase() {
        let detail = PurchaseDetail::assemble(header(), vec![]);
        assert_eq!(detail.total_amount, Decimal::ZERO);
        assert_eq!(detail.total_items, 0);
    }

    #[test]
    fn total_amount_sums_line_totals() {
        let lines = vec![
            line(1, 3, Decimal::new(1050, 2)), // 3 x 10.50
            line(2, 1, Decimal::new(200, 0)),  // 1 x 200
        ];
        let detail = PurchaseDetail::assemble(header(), lines);
        assert_eq!(detail.total_amount, Decimal::new(23150, 2)); // 231.50
    }

    #[test]
    fn total_items_counts_lines_not_units() {
        let lines = vec![line(1, 10, Decimal::ONE), line(2, 5, Decimal::ONE)];
        let detail = PurchaseDetail::assemble(header(), lines);
        assert_eq!(detail.total_items, 2);
    }

    #[test]
    fn item_status_uses_screaming_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::Available).unwrap(),
            "\"AVAILABLE\""
        );
    }
}
