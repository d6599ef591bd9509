// src/services/purchase_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::{AppError, EntityKind},
    db::{CatalogRepository, OfficeRepository, PurchaseRepository, UserRepository},
    models::purchase::{ItemStatus, Purchase, PurchaseDetail},
};

// Input for one purchase line, as handed over by the handler.
#[derive(Debug, Clone)]
pub struct PurchaseLineInput {
    pub item_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub office_id: i64,
    pub purchased_by_user_id: i64,
    pub supplier: Option<String>,
    pub invoice_number: Option<String>,
    pub remarks: Option<String>,
    pub receipt_url: Option<String>,
    pub lines: Vec<PurchaseLineInput>,
}

/// Builds the barcode for one tracked instance:
/// item-name prefix + office code + wall-clock millis + per-line index.
///
/// The prefix takes up to three characters so short (or empty) item names
/// never panic; `chars()` keeps multi-byte names (e.g. Bangla) intact.
/// The index disambiguates instances of one line created within the same
/// millisecond. Across concurrent purchases this scheme is collision-
/// resistant, not collision-proof; the unique constraint on
/// item_instances.barcode is the final arbiter.
pub(crate) fn instance_barcode(
    item_name: &str,
    office_code: &str,
    epoch_millis: i64,
    index: i32,
) -> String {
    let prefix: String = item_name.chars().take(3).collect::<String>().to_uppercase();
    format!("{prefix}-{office_code}-{epoch_millis}-{index}")
}

// One instance the expansion loop will persist for a line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InstancePlan {
    pub index: i32,
    pub item_id: i64,
    pub purchase_price: Decimal,
}

/// Plans the fan-out of one purchase line: one instance per unit of
/// quantity, ascending index, each carrying the line's item and unit price.
/// Quantity zero plans nothing; the line itself is still recorded.
pub(crate) fn plan_line_instances(
    item_id: i64,
    quantity: i32,
    unit_price: Decimal,
) -> Vec<InstancePlan> {
    (0..quantity.max(0))
        .map(|index| InstancePlan { index, item_id, purchase_price: unit_price })
        .collect()
}

#[derive(Clone)]
pub struct PurchaseService {
    purchase_repo: PurchaseRepository,
    catalog_repo: CatalogRepository,
    office_repo: OfficeRepository,
    user_repo: UserRepository,
}

impl PurchaseService {
    pub fn new(
        purchase_repo: PurchaseRepository,
        catalog_repo: CatalogRepository,
        office_repo: OfficeRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self { purchase_repo, catalog_repo, office_repo, user_repo }
    }

    // --- CREATE PURCHASE (the expansion engine) ---
    //
    // All-or-nothing: header insert, line inserts and the instance fan-out
    // run inside one transaction. Any missing reference aborts the whole
    // thing; the transaction rolls back on drop.
    pub async fn create_purchase<'e, E>(
        &self,
        executor: E,
        new_purchase: NewPurchase,
    ) -> Result<PurchaseDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // 1. Resolve references the header needs.
        let office = self
            .office_repo
            .find_office(&mut *tx, new_purchase.office_id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Office, new_purchase.office_id))?;

        let user = self
            .user_repo
            .find_user(&mut *tx, new_purchase.purchased_by_user_id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::User, new_purchase.purchased_by_user_id))?;

        // 2. Persist the header; purchased_date is server-assigned here and
        //    immutable from now on.
        let purchase = self
            .purchase_repo
            .insert_purchase(
                &mut *tx,
                office.id,
                user.id,
                new_purchase.supplier.as_deref(),
                new_purchase.invoice_number.as_deref(),
                new_purchase.remarks.as_deref(),
                new_purchase.receipt_url.as_deref(),
            )
            .await?;

        // 3. The office must have an inventory to receive the instances.
        //    Failing here rolls the header insert back as well.
        let inventory = self
            .office_repo
            .find_inventory_by_office(&mut *tx, office.id)
            .await?
            .ok_or(AppError::NoInventory(office.id))?;

        // 4. Expand every line into individually barcoded instances,
        //    in request order, ascending index, one insert per unit.
        let mut instances_created = 0u32;
        for line in &new_purchase.lines {
            let item = self
                .catalog_repo
                .find_item(&mut *tx, line.item_id)
                .await?
                .ok_or(AppError::NotFound(EntityKind::Item, line.item_id))?;

            self.purchase_repo
                .insert_purchase_item(&mut *tx, purchase.id, item.id, line.quantity, line.unit_price)
                .await?;

            for plan in plan_line_instances(item.id, line.quantity, line.unit_price) {
                let millis = Utc::now().timestamp_millis();
                let barcode = instance_barcode(&item.name, &office.code, millis, plan.index);

                self.purchase_repo
                    .insert_item_instance(
                        &mut *tx,
                        &barcode,
                        plan.item_id,
                        inventory.id,
                        office.id,
                        ItemStatus::Available,
                        purchase.purchased_date,
                        plan.purchase_price,
                    )
                    .await?;
                instances_created += 1;
            }
        }

        let lines = self.purchase_repo.list_purchase_lines(&mut *tx, purchase.id).await?;

        tx.commit().await?;

        tracing::info!(
            "Purchase {} recorded for office '{}': {} line(s), {} instance(s)",
            purchase.id,
            office.code,
            lines.len(),
            instances_created
        );

        Ok(PurchaseDetail::assemble(purchase, lines))
    }

    // --- Reads ---

    pub async fn get_purchase<'e, E>(&self, executor: E, id: i64) -> Result<PurchaseDetail, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let purchase = self
            .purchase_repo
            .find_purchase(&mut *conn, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Purchase, id))?;

        let lines = self.purchase_repo.list_purchase_lines(&mut *conn, id).await?;
        Ok(PurchaseDetail::assemble(purchase, lines))
    }

    pub async fn get_all_purchases<'e, E>(&self, executor: E) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.purchase_repo.list_purchases(executor).await
    }

    // An office with no purchases is an empty list, not an error.
    pub async fn get_purchases_by_office<'e, E>(
        &self,
        executor: E,
        office_id: i64,
    ) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.purchase_repo.list_purchases_by_office(executor, office_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barcode_has_prefix_code_millis_index_shape() {
        let code = instance_barcode("Notebook", "HQ1", 1700000000000, 4);
        assert_eq!(code, "NOT-HQ1-1700000000000-4");
    }

    #[test]
    fn barcode_prefix_is_uppercased() {
        let code = instance_barcode("notebook", "HQ1", 1, 0);
        assert!(code.starts_with("NOT-"));
    }

    #[test]
    fn short_item_names_use_what_is_available() {
        assert!(instance_barcode("AC", "HQ1", 1, 0).starts_with("AC-"));
        assert!(instance_barcode("X", "HQ1", 1, 0).starts_with("X-"));
    }

    #[test]
    fn empty_item_name_does_not_panic() {
        let code = instance_barcode("", "HQ1", 99, 0);
        assert_eq!(code, "-HQ1-99-0");
    }

    #[test]
    fn multibyte_item_names_truncate_by_characters() {
        // Bangla item names are stored alongside English ones; taking bytes
        // instead of chars would split a code point here.
        let code = instance_barcode("কলমদানি", "HQ1", 1, 0);
        assert!(code.starts_with("কলম-"));
    }

    #[test]
    fn indices_distinguish_instances_within_the_same_millisecond() {
        let a = instance_barcode("Notebook", "HQ1", 1700000000000, 0);
        let b = instance_barcode("Notebook", "HQ1", 1700000000000, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn planned_instances_across_lines_sum_to_the_quantities() {
        let lines = [(1i64, 3i32), (2, 5), (3, 1)];
        let planned: usize = lines
            .iter()
            .map(|&(item_id, qty)| plan_line_instances(item_id, qty, Decimal::ONE).len())
            .sum();
        assert_eq!(planned, 9);
    }

    #[test]
    fn zero_quantity_line_plans_no_instances() {
        assert!(plan_line_instances(7, 0, Decimal::ONE).is_empty());
        // Negative quantities are rejected at the payload layer; the planner
        // still treats them as nothing to expand.
        assert!(plan_line_instances(7, -2, Decimal::ONE).is_empty());
    }

    #[test]
    fn every_planned_instance_carries_its_lines_item_and_price() {
        let price = Decimal::new(1250, 2);
        let plans = plan_line_instances(42, 4, price);

        assert_eq!(plans.len(), 4);
        for (i, plan) in plans.iter().enumerate() {
            assert_eq!(plan.index, i as i32);
            assert_eq!(plan.item_id, 42);
            assert_eq!(plan.purchase_price, price);
        }
    }
}
