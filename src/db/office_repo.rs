// src/db/office_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::office::{Inventory, Office},
};

#[derive(Clone)]
pub struct OfficeRepository;

impl OfficeRepository {
    pub fn new() -> Self {
        Self
    }

    // Read paths deliberately do not filter on is_active; callers decide
    // whether soft-deleted offices are visible.
    pub async fn list_offices<'e, E>(&self, executor: E) -> Result<Vec<Office>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let offices =
            sqlx::query_as::<_, Office>("SELECT * FROM offices ORDER BY sort_order ASC, name ASC")
                .fetch_all(executor)
                .await?;
        Ok(offices)
    }

    pub async fn find_office<'e, E>(&self, executor: E, id: i64) -> Result<Option<Office>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let office = sqlx::query_as::<_, Office>("SELECT * FROM offices WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(office)
    }

    pub async fn list_children<'e, E>(
        &self,
        executor: E,
        parent_id: i64,
    ) -> Result<Vec<Office>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let offices = sqlx::query_as::<_, Office>(
            "SELECT * FROM offices WHERE parent_id = $1 ORDER BY sort_order ASC, name ASC",
        )
        .bind(parent_id)
        .fetch_all(executor)
        .await?;
        Ok(offices)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_office<'e, E>(
        &self,
        executor: E,
        parent_id: Option<i64>,
        name: &str,
        name_bn: Option<&str>,
        office_type: Option<&str>,
        code: &str,
        description: Option<&str>,
        sort_order: i32,
    ) -> Result<Office, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let office = sqlx::query_as::<_, Office>(
            r#"
            INSERT INTO offices (parent_id, name, name_bn, office_type, code, description, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(parent_id)
        .bind(name)
        .bind(name_bn)
        .bind(office_type)
        .bind(code)
        .bind(description)
        .bind(sort_order)
        .fetch_one(executor)
        .await?;
        Ok(office)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_office<'e, E>(
        &self,
        executor: E,
        id: i64,
        parent_id: Option<i64>,
        name: &str,
        name_bn: Option<&str>,
        office_type: Option<&str>,
        code: &str,
        description: Option<&str>,
        sort_order: i32,
        is_active: bool,
    ) -> Result<Option<Office>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let office = sqlx::query_as::<_, Office>(
            r#"
            UPDATE offices
            SET parent_id = $2, name = $3, name_bn = $4, office_type = $5,
                code = $6, description = $7, sort_order = $8, is_active = $9,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(parent_id)
        .bind(name)
        .bind(name_bn)
        .bind(office_type)
        .bind(code)
        .bind(description)
        .bind(sort_order)
        .bind(is_active)
        .fetch_optional(executor)
        .await?;
        Ok(office)
    }

    // Soft delete: the row stays, only the flag flips.
    pub async fn deactivate_office<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Office>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let office = sqlx::query_as::<_, Office>(
            r#"
            UPDATE offices
            SET is_active = FALSE, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(office)
    }

    pub async fn insert_inventory<'e, E>(
        &self,
        executor: E,
        office_id: i64,
        name: &str,
    ) -> Result<Inventory, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let inventory = sqlx::query_as::<_, Inventory>(
            r#"
            INSERT INTO inventories (office_id, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(office_id)
        .bind(name)
        .fetch_one(executor)
        .await?;
        Ok(inventory)
    }

    pub async fn find_inventory_by_office<'e, E>(
        &self,
        executor: E,
        office_id: i64,
    ) -> Result<Option<Inventory>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let inventory =
            sqlx::query_as::<_, Inventory>("SELECT * FROM inventories WHERE office_id = $1")
                .bind(office_id)
                .fetch_optional(executor)
                .await?;
        Ok(inventory)
    }
}
