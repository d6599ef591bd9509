// src/services/catalog_service.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::{AppError, EntityKind},
    db::CatalogRepository,
    models::catalog::{Item, Unit},
};

#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub name_bn: Option<String>,
    pub unit_id: i64,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(catalog_repo: CatalogRepository) -> Self {
        Self { catalog_repo }
    }

    // ---
    // Units
    // ---

    pub async fn get_all_units<'e, E>(&self, executor: E) -> Result<Vec<Unit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.catalog_repo.list_units(executor).await
    }

    pub async fn get_unit<'e, E>(&self, executor: E, id: i64) -> Result<Unit, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.catalog_repo
            .find_unit(executor, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Unit, id))
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
        self.catalog_repo.create_unit(executor, name, description).await
    }

    pub async fn update_unit<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Unit, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.catalog_repo
            .update_unit(executor, id, name, description)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Unit, id))
    }

    pub async fn delete_unit<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.catalog_repo.delete_unit(executor, id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(EntityKind::Unit, id))
        }
    }

    // ---
    // Items
    // ---

    pub async fn get_all_items<'e, E>(&self, executor: E) -> Result<Vec<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.catalog_repo.list_items(executor).await
    }

    pub async fn get_item<'e, E>(&self, executor: E, id: i64) -> Result<Item, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.catalog_repo
            .find_item(executor, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Item, id))
    }

    pub async fn create_item<'e, E>(&self, executor: E, new_item: NewItem) -> Result<Item, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // The referenced unit must exist; a foreign key error would be
        // opaque to the client.
        self.catalog_repo
            .find_unit(&mut *tx, new_item.unit_id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Unit, new_item.unit_id))?;

        let item = self
            .catalog_repo
            .create_item(
                &mut *tx,
                &new_item.name,
                new_item.name_bn.as_deref(),
                new_item.unit_id,
                new_item.description.as_deref(),
            )
            .await?;

        tx.commit().await?;
        Ok(item)
    }

    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: i64,
        details: NewItem,
    ) -> Result<Item, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.catalog_repo
            .update_item(
                executor,
                id,
                &details.name,
                details.name_bn.as_deref(),
                details.unit_id,
                details.description.as_deref(),
            )
            .await?
            .ok_or(AppError::NotFound(EntityKind::Item, id))
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.catalog_repo.delete_item(executor, id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(EntityKind::Item, id))
        }
    }
}
