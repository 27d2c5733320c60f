//! Requisition lifecycle. The creation deadline is derived from
//! `date_assigned` by the scheduling rules on every create and update;
//! client-supplied values for it are ignored.

use crate::{
    db::DbPool,
    entities::requisition::{self, ProcurementCategory},
    errors::ServiceError,
    events::{Event, EventSender},
    scheduling,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateRequisitionInput {
    #[validate(length(min = 1, max = 64))]
    pub requisition_number: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub shopping_cart_no: Option<String>,
    pub shopping_cart_amount: Option<Decimal>,
    pub shopping_cart_status: Option<String>,
    pub procurement_category: ProcurementCategory,
    pub region_id: Option<i64>,
    pub department_id: Option<i64>,
    pub division_id: Option<i64>,
    pub section_id: Option<i64>,
    pub assigned_employee_id: Option<i64>,
    pub created_by_employee_id: Option<i64>,
    pub date_assigned: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateRequisitionInput {
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub shopping_cart_no: Option<String>,
    pub shopping_cart_amount: Option<Decimal>,
    pub shopping_cart_status: Option<String>,
    pub procurement_category: Option<ProcurementCategory>,
    pub region_id: Option<i64>,
    pub department_id: Option<i64>,
    pub division_id: Option<i64>,
    pub section_id: Option<i64>,
    pub assigned_employee_id: Option<i64>,
    pub date_assigned: Option<NaiveDate>,
}

/// Filters for the requisition list endpoint
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct RequisitionFilter {
    /// Matches against the requisition number and description
    pub search: Option<String>,
    pub procurement_category: Option<ProcurementCategory>,
    pub department_id: Option<i64>,
    pub assigned_employee_id: Option<i64>,
    /// Only requisitions whose creation deadline falls on or before this date
    pub deadline_before: Option<NaiveDate>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Service for managing requisitions
#[derive(Clone)]
pub struct RequisitionService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    deadline_days: u32,
}

impl RequisitionService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>, deadline_days: u32) -> Self {
        Self {
            db_pool,
            event_sender,
            deadline_days,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_requisition(
        &self,
        input: CreateRequisitionInput,
    ) -> Result<requisition::Model, ServiceError> {
        input.validate()?;

        let creation_deadline =
            scheduling::creation_deadline(input.date_assigned, self.deadline_days);

        let now = Utc::now();
        let created = requisition::ActiveModel {
            requisition_number: Set(input.requisition_number),
            description: Set(input.description),
            shopping_cart_no: Set(input.shopping_cart_no),
            shopping_cart_amount: Set(input.shopping_cart_amount),
            shopping_cart_status: Set(input.shopping_cart_status),
            procurement_category: Set(input.procurement_category),
            region_id: Set(input.region_id),
            department_id: Set(input.department_id),
            division_id: Set(input.division_id),
            section_id: Set(input.section_id),
            assigned_employee_id: Set(input.assigned_employee_id),
            created_by_employee_id: Set(input.created_by_employee_id),
            date_assigned: Set(input.date_assigned),
            creation_deadline: Set(creation_deadline),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => {
                ServiceError::Conflict("Requisition number already exists".to_string())
            }
            other => ServiceError::DatabaseError(other),
        })?;

        let _ = self
            .event_sender
            .send(Event::RequisitionCreated(created.id))
            .await;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_requisition(&self, id: i64) -> Result<requisition::Model, ServiceError> {
        requisition::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Requisition {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_requisitions(
        &self,
        filter: RequisitionFilter,
    ) -> Result<Vec<requisition::Model>, ServiceError> {
        let mut query =
            requisition::Entity::find().order_by_desc(requisition::Column::CreatedAt);

        if let Some(term) = filter.search.as_deref().filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(requisition::Column::RequisitionNumber.contains(term))
                    .add(requisition::Column::Description.contains(term)),
            );
        }
        if let Some(category) = filter.procurement_category {
            query = query.filter(requisition::Column::ProcurementCategory.eq(category));
        }
        if let Some(dept) = filter.department_id {
            query = query.filter(requisition::Column::DepartmentId.eq(dept));
        }
        if let Some(emp) = filter.assigned_employee_id {
            query = query.filter(requisition::Column::AssignedEmployeeId.eq(emp));
        }
        if let Some(deadline) = filter.deadline_before {
            query = query.filter(requisition::Column::CreationDeadline.lte(deadline));
        }

        query
            .limit(filter.limit.unwrap_or(100))
            .offset(filter.offset.unwrap_or(0))
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn update_requisition(
        &self,
        id: i64,
        input: UpdateRequisitionInput,
    ) -> Result<requisition::Model, ServiceError> {
        input.validate()?;

        let mut model = self.get_requisition(id).await?;

        if let Some(description) = input.description {
            model.description = description;
        }
        if input.shopping_cart_no.is_some() {
            model.shopping_cart_no = input.shopping_cart_no;
        }
        if input.shopping_cart_amount.is_some() {
            model.shopping_cart_amount = input.shopping_cart_amount;
        }
        if input.shopping_cart_status.is_some() {
            model.shopping_cart_status = input.shopping_cart_status;
        }
        if let Some(category) = input.procurement_category {
            model.procurement_category = category;
        }
        if input.region_id.is_some() {
            model.region_id = input.region_id;
        }
        if input.department_id.is_some() {
            model.department_id = input.department_id;
        }
        if input.division_id.is_some() {
            model.division_id = input.division_id;
        }
        if input.section_id.is_some() {
            model.section_id = input.section_id;
        }
        if input.assigned_employee_id.is_some() {
            model.assigned_employee_id = input.assigned_employee_id;
        }
        if input.date_assigned.is_some() {
            model.date_assigned = input.date_assigned;
        }

        // Derived field, recomputed whether or not the anchor changed.
        scheduling::apply_requisition_schedule(&mut model, self.deadline_days);
        model.updated_at = Utc::now();

        let active: requisition::ActiveModel = requisition::ActiveModel::from(model).reset_all();

        let updated = active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let _ = self
            .event_sender
            .send(Event::RequisitionUpdated(updated.id))
            .await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_requisition(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get_requisition(id).await?;
        requisition::Entity::delete_by_id(existing.id)
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let _ = self
            .event_sender
            .send(Event::RequisitionDeleted(id))
            .await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn count_requisitions(&self) -> Result<u64, ServiceError> {
        requisition::Entity::find()
            .count(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
