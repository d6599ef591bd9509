// src/db/purchase_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::purchase::{
        ItemInstance, ItemInstanceLabel, ItemStatus, Purchase, PurchaseItem, PurchaseItemLine,
    },
};

#[derive(Clone)]
pub struct PurchaseRepository;

impl PurchaseRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Writes (run inside the expansion transaction)
    // ---

    pub async fn insert_purchase<'e, E>(
        &self,
        executor: E,
        office_id: i64,
        purchased_by_user_id: i64,
        supplier: Option<&str>,
        invoice_number: Option<&str>,
        remarks: Option<&str>,
        receipt_url: Option<&str>,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // purchased_date comes from the column default (now()).
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (office_id, purchased_by_user_id, supplier, invoice_number, remarks, receipt_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(office_id)
        .bind(purchased_by_user_id)
        .bind(supplier)
        .bind(invoice_number)
        .bind(remarks)
        .bind(receipt_url)
        .fetch_one(executor)
        .await?;
        Ok(purchase)
    }

    pub async fn insert_purchase_item<'e, E>(
        &self,
        executor: E,
        purchase_id: i64,
        item_id: i64,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<PurchaseItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let line = sqlx::query_as::<_, PurchaseItem>(
            r#"
            INSERT INTO purchase_items (purchase_id, item_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(purchase_id)
        .bind(item_id)
        .bind(quantity)
        .bind(unit_price)
        .fetch_one(executor)
        .await?;
        Ok(line)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_item_instance<'e, E>(
        &self,
        executor: E,
        barcode: &str,
        item_id: i64,
        inventory_id: i64,
        owner_office_id: i64,
        status: ItemStatus,
        purchase_date: DateTime<Utc>,
        purchase_price: Decimal,
    ) -> Result<ItemInstance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let instance = sqlx::query_as::<_, ItemInstance>(
            r#"
            INSERT INTO item_instances
                (barcode, item_id, inventory_id, owner_office_id, status, purchase_date, purchase_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(barcode)
        .bind(item_id)
        .bind(inventory_id)
        .bind(owner_office_id)
        .bind(status)
        .bind(purchase_date)
        .bind(purchase_price)
        .fetch_one(executor)
        .await?;
        Ok(instance)
    }

    // ---
    // Reads
    // ---

    pub async fn find_purchase<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>("SELECT * FROM purchases WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(purchase)
    }

    pub async fn list_purchases<'e, E>(&self, executor: E) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchases =
            sqlx::query_as::<_, Purchase>("SELECT * FROM purchases ORDER BY purchased_date DESC")
                .fetch_all(executor)
                .await?;
        Ok(purchases)
    }

    pub async fn list_purchases_by_office<'e, E>(
        &self,
        executor: E,
        office_id: i64,
    ) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchases = sqlx::query_as::<_, Purchase>(
            "SELECT * FROM purchases WHERE office_id = $1 ORDER BY purchased_date DESC",
        )
        .bind(office_id)
        .fetch_all(executor)
        .await?;
        Ok(purchases)
    }

    /// Lines of one purchase, in insertion order, with the item name joined in
    /// and the line total computed by the database.
    pub async fn list_purchase_lines<'e, E>(
        &self,
        executor: E,
        purchase_id: i64,
    ) -> Result<Vec<PurchaseItemLine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lines = sqlx::query_as::<_, PurchaseItemLine>(
            r#"
            SELECT pi.id,
                   pi.purchase_id,
                   pi.item_id,
                   i.name AS item_name,
                   pi.quantity,
                   pi.unit_price,
                   pi.quantity * pi.unit_price AS total_price
            FROM purchase_items pi
            JOIN items i ON i.id = pi.item_id
            WHERE pi.purchase_id = $1
            ORDER BY pi.id ASC
            "#,
        )
        .bind(purchase_id)
        .fetch_all(executor)
        .await?;
        Ok(lines)
    }

    pub async fn find_instance_label<'e, E>(
        &self,
        executor: E,
        instance_id: i64,
    ) -> Result<Option<ItemInstanceLabel>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let label = sqlx::query_as::<_, ItemInstanceLabel>(
            r#"
            SELECT ii.id,
                   ii.barcode,
                   i.name AS item_name,
                   o.name AS office_name,
                   ii.purchase_date
            FROM item_instances ii
            JOIN items i ON i.id = ii.item_id
            JOIN offices o ON o.id = ii.owner_office_id
            WHERE ii.id = $1
            "#,
        )
        .bind(instance_id)
        .fetch_optional(executor)
        .await?;
        Ok(label)
    }
}
