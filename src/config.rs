// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, OfficeRepository, PurchaseRepository, UserRepository},
    services::{
        barcode_service::BarcodeService, catalog_service::CatalogService,
        office_service::OfficeService, purchase_service::PurchaseService,
    },
};

// Shared state, accessible from every handler.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_service: CatalogService,
    pub office_service: OfficeService,
    pub purchase_service: PurchaseService,
    pub barcode_service: BarcodeService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Database connection established!");

        // --- Wire the dependency graph ---
        let catalog_repo = CatalogRepository::new();
        let office_repo = OfficeRepository::new();
        let user_repo = UserRepository::new();
        let purchase_repo = PurchaseRepository::new();

        let catalog_service = CatalogService::new(catalog_repo.clone());
        let office_service = OfficeService::new(office_repo.clone());
        let purchase_service =
            PurchaseService::new(purchase_repo.clone(), catalog_repo, office_repo, user_repo);
        let barcode_service = BarcodeService::new(purchase_repo);

        Ok(Self {
            db_pool,
            catalog_service,
            office_service,
            purchase_service,
            barcode_service,
        })
    }
}
