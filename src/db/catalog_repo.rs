// src/db/catalog_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::catalog::{Item, Unit},
};

// Stateless; every method takes its executor so callers pick pool vs transaction.
#[derive(Clone)]
pub struct CatalogRepository;

impl CatalogRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Units
    // ---

    pub async fn list_units<'e, E>(&self, executor: E) -> Result<Vec<Unit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let units = sqlx::query_as::<_, Unit>("SELECT * FROM units ORDER BY name ASC")
            .fetch_all(executor)
            .await?;
        Ok(units)
    }

    pub async fn find_unit<'e, E>(&self, executor: E, id: i64) -> Result<Option<Unit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let unit = sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(unit)
    }

    pub async fn create_unit<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
    ) -> Result<Unit, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let unit = sqlx::query_as::<_, Unit>(
            r#"
            INSERT INTO units (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await?;
        Ok(unit)
    }

    pub async fn update_unit<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Unit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let unit = sqlx::query_as::<_, Unit>(
            r#"
            UPDATE units
            SET name = $2, description = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(executor)
        .await?;
        Ok(unit)
    }

    pub async fn delete_unit<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Items
    // ---

    pub async fn list_items<'e, E>(&self, executor: E) -> Result<Vec<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, Item>("SELECT * FROM items ORDER BY name ASC")
            .fetch_all(executor)
            .await?;
        Ok(items)
    }

    pub async fn find_item<'e, E>(&self, executor: E, id: i64) -> Result<Option<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        name: &str,
        name_bn: Option<&str>,
        unit_id: i64,
        description: Option<&str>,
    ) -> Result<Item, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, name_bn, unit_id, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(name_bn)
        .bind(unit_id)
        .bind(description)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        name_bn: Option<&str>,
        unit_id: i64,
        description: Option<&str>,
    ) -> Result<Option<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = $2, name_bn = $3, unit_id = $4, description = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(name_bn)
        .bind(unit_id)
        .bind(description)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
