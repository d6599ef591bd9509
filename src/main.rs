// src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // If configuration fails the application should not start.
    let app_state = AppState::new()
        .await
        .expect("Failed to initialize application state.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Failed to run database migrations.");

    tracing::info!("✅ Database migrations applied!");

    let unit_routes = Router::new()
        .route("/", post(handlers::units::create_unit).get(handlers::units::get_all_units))
        .route(
            "/{id}",
            get(handlers::units::get_unit_by_id)
                .put(handlers::units::update_unit)
                .delete(handlers::units::delete_unit),
        );

    let item_routes = Router::new()
        .route("/", post(handlers::items::create_item).get(handlers::items::get_all_items))
        .route(
            "/{id}",
            get(handlers::items::get_item_by_id)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        );

    let office_routes = Router::new()
        .route("/", post(handlers::offices::create_office).get(handlers::offices::get_all_offices))
        .route("/children/{parentId}", get(handlers::offices::get_child_offices))
        .route(
            "/{id}",
            get(handlers::offices::get_office_by_id)
                .put(handlers::offices::update_office)
                .delete(handlers::offices::delete_office),
        );

    let purchase_routes = Router::new()
        .route(
            "/",
            post(handlers::purchases::create_purchase).get(handlers::purchases::get_all_purchases),
        )
        .route("/office/{officeId}", get(handlers::purchases::get_purchases_by_office))
        .route("/{id}", get(handlers::purchases::get_purchase_by_id));

    let barcode_routes = Router::new()
        .route("/qrcode/{text}", get(handlers::barcodes::generate_qrcode))
        .route("/labels-pdf", post(handlers::barcodes::generate_labels_pdf))
        .route("/escpos/{instanceId}", get(handlers::barcodes::generate_escpos))
        .route("/escpos-multiple", post(handlers::barcodes::generate_escpos_multiple))
        .route("/print-network", post(handlers::barcodes::print_to_network_printer));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/units", unit_routes)
        .nest("/api/items", item_routes)
        .nest("/api/offices", office_routes)
        .nest("/api/purchases", purchase_routes)
        .nest("/api/barcodes", barcode_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("🚀 Server listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Axum server error");
}
