// src/services/office_service.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::{AppError, EntityKind},
    db::OfficeRepository,
    models::office::Office,
};

#[derive(Debug, Clone)]
pub struct NewOffice {
    pub parent_id: Option<i64>,
    pub name: String,
    pub name_bn: Option<String>,
    pub office_type: Option<String>,
    pub code: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

#[derive(Clone)]
pub struct OfficeService {
    office_repo: OfficeRepository,
}

impl OfficeService {
    pub fn new(office_repo: OfficeRepository) -> Self {
        Self { office_repo }
    }

    pub async fn get_all_offices<'e, E>(&self, executor: E) -> Result<Vec<Office>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.office_repo.list_offices(executor).await
    }

    pub async fn get_office<'e, E>(&self, executor: E, id: i64) -> Result<Office, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.office_repo
            .find_office(executor, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Office, id))
    }

    pub async fn get_child_offices<'e, E>(
        &self,
        executor: E,
        parent_id: i64,
    ) -> Result<Vec<Office>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.office_repo.list_children(executor, parent_id).await
    }

    // Creating an office provisions its inventory in the same transaction;
    // purchases against an office without one are rejected outright.
    pub async fn create_office<'e, E>(
        &self,
        executor: E,
        new_office: NewOffice,
    ) -> Result<Office, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let office = self
            .office_repo
            .insert_office(
                &mut *tx,
                new_office.parent_id,
                &new_office.name,
                new_office.name_bn.as_deref(),
                new_office.office_type.as_deref(),
                &new_office.code,
                new_office.description.as_deref(),
                new_office.sort_order,
            )
            .await?;

        let inventory_name = format!("{} Inventory", office.name);
        self.office_repo.insert_inventory(&mut *tx, office.id, &inventory_name).await?;

        tx.commit().await?;
        Ok(office)
    }

    pub async fn update_office<'e, E>(
        &self,
        executor: E,
        id: i64,
        details: NewOffice,
        is_active: bool,
    ) -> Result<Office, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.office_repo
            .update_office(
                executor,
                id,
                details.parent_id,
                &details.name,
                details.name_bn.as_deref(),
                details.office_type.as_deref(),
                &details.code,
                details.description.as_deref(),
                details.sort_order,
                is_active,
            )
            .await?
            .ok_or(AppError::NotFound(EntityKind::Office, id))
    }

    // Soft delete: flip is_active, keep the row. The office stays
    // retrievable by id afterwards.
    pub async fn delete_office<'e, E>(&self, executor: E, id: i64) -> Result<Office, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.office_repo
            .deactivate_office(executor, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Office, id))
    }
}
