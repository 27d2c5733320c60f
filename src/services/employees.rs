//! Employee directory. Employees exist independently of login accounts;
//! removal is a soft delete so historical committee rows stay resolvable.

use crate::{
    db::DbPool,
    entities::employee,
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateEmployeeInput {
    #[validate(length(min = 1, max = 64))]
    pub employee_id: String,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<i64>,
    pub division_id: Option<i64>,
    pub section_id: Option<i64>,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateEmployeeInput {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department_id: Option<i64>,
    pub division_id: Option<i64>,
    pub section_id: Option<i64>,
    pub job_title: Option<String>,
    pub is_active: Option<bool>,
}

/// Filters for the employee list endpoint
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct EmployeeFilter {
    /// Matches against names, staff number and email
    pub search: Option<String>,
    pub department_id: Option<i64>,
    pub division_id: Option<i64>,
    pub section_id: Option<i64>,
    pub is_active: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Service for the employee directory
#[derive(Clone)]
pub struct EmployeeService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl EmployeeService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_employee(
        &self,
        input: CreateEmployeeInput,
    ) -> Result<employee::Model, ServiceError> {
        input.validate()?;

        let now = Utc::now();
        let created = employee::ActiveModel {
            employee_id: Set(input.employee_id),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            phone: Set(input.phone),
            department_id: Set(input.department_id),
            division_id: Set(input.division_id),
            section_id: Set(input.section_id),
            job_title: Set(input.job_title),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => ServiceError::Conflict(
                "Employee with this staff number or email already exists".to_string(),
            ),
            other => ServiceError::DatabaseError(other),
        })?;

        let _ = self
            .event_sender
            .send(Event::EmployeeCreated(created.id))
            .await;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_employee(&self, id: i64) -> Result<employee::Model, ServiceError> {
        employee::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Employee {} not found", id)))
    }

    /// Staff-number lookup, case-insensitive. Used by bulk import and
    /// account linking.
    #[instrument(skip(self))]
    pub async fn find_by_staff_number(
        &self,
        staff_number: &str,
    ) -> Result<Option<employee::Model>, ServiceError> {
        employee::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(employee::Column::EmployeeId)))
                    .eq(staff_number.trim().to_lowercase()),
            )
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn list_employees(
        &self,
        filter: EmployeeFilter,
    ) -> Result<Vec<employee::Model>, ServiceError> {
        let mut query = employee::Entity::find()
            .order_by_asc(employee::Column::LastName)
            .order_by_asc(employee::Column::FirstName);

        if let Some(term) = filter.search.as_deref().filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(employee::Column::FirstName.contains(term))
                    .add(employee::Column::LastName.contains(term))
                    .add(employee::Column::EmployeeId.contains(term))
                    .add(employee::Column::Email.contains(term)),
            );
        }
        if let Some(dept) = filter.department_id {
            query = query.filter(employee::Column::DepartmentId.eq(dept));
        }
        if let Some(div) = filter.division_id {
            query = query.filter(employee::Column::DivisionId.eq(div));
        }
        if let Some(sec) = filter.section_id {
            query = query.filter(employee::Column::SectionId.eq(sec));
        }
        if let Some(active) = filter.is_active {
            query = query.filter(employee::Column::IsActive.eq(active));
        }

        query
            .limit(filter.limit.unwrap_or(100))
            .offset(filter.offset.unwrap_or(0))
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn update_employee(
        &self,
        id: i64,
        input: UpdateEmployeeInput,
    ) -> Result<employee::Model, ServiceError> {
        input.validate()?;

        let existing = self.get_employee(id).await?;
        let mut active: employee::ActiveModel = existing.into();

        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if input.phone.is_some() {
            active.phone = Set(input.phone);
        }
        if input.department_id.is_some() {
            active.department_id = Set(input.department_id);
        }
        if input.division_id.is_some() {
            active.division_id = Set(input.division_id);
        }
        if input.section_id.is_some() {
            active.section_id = Set(input.section_id);
        }
        if input.job_title.is_some() {
            active.job_title = Set(input.job_title);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let _ = self
            .event_sender
            .send(Event::EmployeeUpdated(updated.id))
            .await;
        Ok(updated)
    }

    /// Soft delete. The row stays so existing committee memberships and
    /// requisition assignments keep resolving.
    #[instrument(skip(self))]
    pub async fn deactivate_employee(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get_employee(id).await?;
        let mut active: employee::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(employee_id = id, "Employee deactivated");
        let _ = self.event_sender.send(Event::EmployeeDeactivated(id)).await;
        Ok(())
    }

    pub async fn count_active(&self) -> Result<u64, ServiceError> {
        employee::Entity::find()
            .filter(employee::Column::IsActive.eq(true))
            .count(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
