// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Units ---
        handlers::units::get_all_units,
        handlers::units::get_unit_by_id,
        handlers::units::create_unit,
        handlers::units::update_unit,
        handlers::units::delete_unit,

        // --- Items ---
        handlers::items::get_all_items,
        handlers::items::get_item_by_id,
        handlers::items::create_item,
        handlers::items::update_item,
        handlers::items::delete_item,

        // --- Offices ---
        handlers::offices::get_all_offices,
        handlers::offices::get_office_by_id,
        handlers::offices::get_child_offices,
        handlers::offices::create_office,
        handlers::offices::update_office,
        handlers::offices::delete_office,

        // --- Purchases ---
        handlers::purchases::create_purchase,
        handlers::purchases::get_all_purchases,
        handlers::purchases::get_purchase_by_id,
        handlers::purchases::get_purchases_by_office,

        // --- Barcodes ---
        handlers::barcodes::generate_qrcode,
        handlers::barcodes::generate_labels_pdf,
        handlers::barcodes::generate_escpos,
        handlers::barcodes::generate_escpos_multiple,
        handlers::barcodes::print_to_network_printer,
    ),
    components(
        schemas(
            // --- Catalog ---
            models::catalog::Unit,
            models::catalog::Item,

            // --- Offices ---
            models::office::Office,
            models::office::Inventory,

            // --- Users ---
            models::user::User,

            // --- Purchasing ---
            models::purchase::Purchase,
            models::purchase::PurchaseItem,
            models::purchase::PurchaseItemLine,
            models::purchase::PurchaseDetail,
            models::purchase::ItemStatus,
            models::purchase::ItemInstance,
            models::purchase::ItemInstanceLabel,

            // --- Payloads ---
            handlers::units::UnitPayload,
            handlers::items::ItemPayload,
            handlers::offices::CreateOfficePayload,
            handlers::offices::UpdateOfficePayload,
            handlers::purchases::PurchaseLinePayload,
            handlers::purchases::CreatePurchasePayload,
            handlers::barcodes::PrintNetworkPayload,
        )
    ),
    tags(
        (name = "Units", description = "Measurement unit management"),
        (name = "Items", description = "Catalog item management"),
        (name = "Offices", description = "Office hierarchy and inventories"),
        (name = "Purchases", description = "Purchasing and item instance expansion"),
        (name = "Barcodes", description = "Barcode, QR and label generation plus printing")
    )
)]
pub struct ApiDoc;
