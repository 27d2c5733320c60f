//! Tender lifecycle and its opening/evaluation committees.
//!
//! Every create and update runs the tender date cascade: the client supplies
//! anchor fields (creation date, closing date/time, validity and evaluation
//! durations) and the derived dates are recomputed server-side. The linked
//! requisition's procurement category drives the evaluation-duration
//! default.

use crate::{
    db::DbPool,
    entities::{
        employee, requisition,
        tender::{self, AgpoCategory, Eligibility},
        tender_evaluation_committee, tender_opening_committee,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    scheduling,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateTenderInput {
    #[validate(length(min = 1, max = 64))]
    pub tender_number: String,
    pub requisition_id: Option<i64>,
    #[validate(length(min = 1))]
    pub description: String,
    pub procurement_type_id: Option<i64>,
    pub eligibility: Eligibility,
    pub agpo_category: Option<AgpoCategory>,
    pub created_by_employee_id: Option<i64>,
    pub egp_reference: Option<String>,
    pub internal_reference: Option<String>,
    pub tender_creation_date: Option<NaiveDate>,
    pub tender_advert_date: Option<NaiveDate>,
    pub tender_closing_date: Option<NaiveDate>,
    pub tender_closing_time: Option<NaiveTime>,
    pub tender_validity_days: Option<i32>,
    pub tender_evaluation_duration_days: Option<i32>,
    pub estimated_value: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateTenderInput {
    pub requisition_id: Option<i64>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub procurement_type_id: Option<i64>,
    pub eligibility: Option<Eligibility>,
    pub agpo_category: Option<AgpoCategory>,
    pub egp_reference: Option<String>,
    pub internal_reference: Option<String>,
    pub tender_creation_date: Option<NaiveDate>,
    pub tender_advert_date: Option<NaiveDate>,
    pub tender_closing_date: Option<NaiveDate>,
    pub tender_closing_time: Option<NaiveTime>,
    pub tender_validity_days: Option<i32>,
    pub tender_evaluation_duration_days: Option<i32>,
    pub estimated_value: Option<Decimal>,
}

/// Filters for the tender list endpoint
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct TenderFilter {
    /// Matches against the tender number and description
    pub search: Option<String>,
    pub eligibility: Option<Eligibility>,
    pub procurement_type_id: Option<i64>,
    pub requisition_id: Option<i64>,
    /// Filters through the linked requisition's region
    pub region_id: Option<i64>,
    /// Filters through the linked requisition's department
    pub department_id: Option<i64>,
    /// Tenders closing on or after this date
    pub closing_after: Option<NaiveDate>,
    /// Tenders closing on or before this date
    pub closing_before: Option<NaiveDate>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CommitteeMemberInput {
    pub employee_id: i64,
    #[validate(length(max = 64))]
    pub role: Option<String>,
}

/// Which tender committee an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TenderCommittee {
    Opening,
    Evaluation,
}

/// Service for managing tenders
#[derive(Clone)]
pub struct TenderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl TenderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// AGPO tenders must carry a category; the cascade clears it for
    /// non-AGPO ones.
    fn check_agpo_pairing(
        eligibility: Eligibility,
        agpo_category: Option<AgpoCategory>,
    ) -> Result<(), ServiceError> {
        if eligibility == Eligibility::Agpo && agpo_category.is_none() {
            return Err(ServiceError::ValidationError(
                "AGPO tenders require an agpo_category".to_string(),
            ));
        }
        Ok(())
    }

    async fn requisition_category(
        &self,
        requisition_id: Option<i64>,
    ) -> Result<Option<requisition::ProcurementCategory>, ServiceError> {
        let Some(id) = requisition_id else {
            return Ok(None);
        };
        let req = requisition::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Requisition {} not found", id)))?;
        Ok(Some(req.procurement_category))
    }

    #[instrument(skip(self, input))]
    pub async fn create_tender(
        &self,
        input: CreateTenderInput,
    ) -> Result<tender::Model, ServiceError> {
        input.validate()?;
        Self::check_agpo_pairing(input.eligibility, input.agpo_category)?;

        let category = self.requisition_category(input.requisition_id).await?;

        let now = Utc::now();
        let mut model = tender::Model {
            id: 0,
            tender_number: input.tender_number,
            requisition_id: input.requisition_id,
            description: input.description,
            procurement_type_id: input.procurement_type_id,
            eligibility: input.eligibility,
            agpo_category: input.agpo_category,
            created_by_employee_id: input.created_by_employee_id,
            egp_reference: input.egp_reference,
            internal_reference: input.internal_reference,
            tender_creation_date: input.tender_creation_date,
            proposed_advert_date: None,
            tender_advert_date: input.tender_advert_date,
            tender_closing_date: input.tender_closing_date,
            tender_closing_time: input.tender_closing_time,
            tender_opening_date: None,
            tender_opening_time: None,
            tender_validity_days: input.tender_validity_days,
            tender_validity_expiry_date: None,
            tender_evaluation_duration_days: input.tender_evaluation_duration_days,
            tender_evaluation_end_date: None,
            estimated_value: input.estimated_value,
            created_at: now,
            updated_at: now,
        };

        scheduling::apply_tender_schedule(&mut model, category, Utc::now().date_naive());

        let mut active = tender::ActiveModel::from(model).reset_all();
        active.id = sea_orm::ActiveValue::NotSet;

        let created = active.insert(&*self.db_pool).await.map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => {
                ServiceError::Conflict("Tender number already exists".to_string())
            }
            other => ServiceError::DatabaseError(other),
        })?;

        let _ = self.event_sender.send(Event::TenderCreated(created.id)).await;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_tender(&self, id: i64) -> Result<tender::Model, ServiceError> {
        tender::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Tender {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_tenders(
        &self,
        filter: TenderFilter,
    ) -> Result<Vec<tender::Model>, ServiceError> {
        let mut query = tender::Entity::find().order_by_desc(tender::Column::CreatedAt);

        if let Some(term) = filter.search.as_deref().filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(tender::Column::TenderNumber.contains(term))
                    .add(tender::Column::Description.contains(term)),
            );
        }
        if filter.region_id.is_some() || filter.department_id.is_some() {
            query = query.join(JoinType::InnerJoin, tender::Relation::Requisition.def());
            if let Some(region) = filter.region_id {
                query = query.filter(requisition::Column::RegionId.eq(region));
            }
            if let Some(dept) = filter.department_id {
                query = query.filter(requisition::Column::DepartmentId.eq(dept));
            }
        }
        if let Some(eligibility) = filter.eligibility {
            query = query.filter(tender::Column::Eligibility.eq(eligibility));
        }
        if let Some(pt) = filter.procurement_type_id {
            query = query.filter(tender::Column::ProcurementTypeId.eq(pt));
        }
        if let Some(req) = filter.requisition_id {
            query = query.filter(tender::Column::RequisitionId.eq(req));
        }
        if let Some(after) = filter.closing_after {
            query = query.filter(tender::Column::TenderClosingDate.gte(after));
        }
        if let Some(before) = filter.closing_before {
            query = query.filter(tender::Column::TenderClosingDate.lte(before));
        }

        query
            .limit(filter.limit.unwrap_or(100))
            .offset(filter.offset.unwrap_or(0))
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn update_tender(
        &self,
        id: i64,
        input: UpdateTenderInput,
    ) -> Result<tender::Model, ServiceError> {
        input.validate()?;

        let mut model = self.get_tender(id).await?;

        if input.requisition_id.is_some() {
            model.requisition_id = input.requisition_id;
        }
        if let Some(description) = input.description {
            model.description = description;
        }
        if input.procurement_type_id.is_some() {
            model.procurement_type_id = input.procurement_type_id;
        }
        if let Some(eligibility) = input.eligibility {
            model.eligibility = eligibility;
        }
        if input.agpo_category.is_some() {
            model.agpo_category = input.agpo_category;
        }
        if input.egp_reference.is_some() {
            model.egp_reference = input.egp_reference;
        }
        if input.internal_reference.is_some() {
            model.internal_reference = input.internal_reference;
        }
        if input.tender_creation_date.is_some() {
            model.tender_creation_date = input.tender_creation_date;
        }
        if input.tender_advert_date.is_some() {
            model.tender_advert_date = input.tender_advert_date;
        }
        if input.tender_closing_date.is_some() {
            model.tender_closing_date = input.tender_closing_date;
        }
        if input.tender_closing_time.is_some() {
            model.tender_closing_time = input.tender_closing_time;
        }
        if input.tender_validity_days.is_some() {
            model.tender_validity_days = input.tender_validity_days;
        }
        if input.tender_evaluation_duration_days.is_some() {
            model.tender_evaluation_duration_days = input.tender_evaluation_duration_days;
        }
        if input.estimated_value.is_some() {
            model.estimated_value = input.estimated_value;
        }

        Self::check_agpo_pairing(model.eligibility, model.agpo_category)?;

        let category = self.requisition_category(model.requisition_id).await?;
        scheduling::apply_tender_schedule(&mut model, category, Utc::now().date_naive());
        model.updated_at = Utc::now();

        let active = tender::ActiveModel::from(model).reset_all();
        let updated = active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let _ = self.event_sender.send(Event::TenderUpdated(updated.id)).await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_tender(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get_tender(id).await?;

        // Committee rows go with the tender.
        tender_opening_committee::Entity::delete_many()
            .filter(tender_opening_committee::Column::TenderId.eq(id))
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;
        tender_evaluation_committee::Entity::delete_many()
            .filter(tender_evaluation_committee::Column::TenderId.eq(id))
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        tender::Entity::delete_by_id(existing.id)
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let _ = self.event_sender.send(Event::TenderDeleted(id)).await;
        Ok(())
    }

    // ----- committees -----

    async fn ensure_employee_exists(&self, employee_id: i64) -> Result<(), ServiceError> {
        employee::Entity::find_by_id(employee_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Employee {} not found", employee_id)))?;
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn add_committee_member(
        &self,
        tender_id: i64,
        committee: TenderCommittee,
        input: CommitteeMemberInput,
    ) -> Result<(), ServiceError> {
        input.validate()?;
        self.get_tender(tender_id).await?;
        self.ensure_employee_exists(input.employee_id).await?;

        let now = Utc::now();
        let conflict =
            || ServiceError::Conflict("Employee already sits on this committee".to_string());

        match committee {
            TenderCommittee::Opening => {
                tender_opening_committee::ActiveModel {
                    tender_id: Set(tender_id),
                    employee_id: Set(input.employee_id),
                    role: Set(input.role),
                    added_at: Set(now),
                    ..Default::default()
                }
                .insert(&*self.db_pool)
                .await
                .map_err(|e| match e {
                    sea_orm::DbErr::Exec(_) => conflict(),
                    other => ServiceError::DatabaseError(other),
                })?;
            }
            TenderCommittee::Evaluation => {
                tender_evaluation_committee::ActiveModel {
                    tender_id: Set(tender_id),
                    employee_id: Set(input.employee_id),
                    role: Set(input.role),
                    added_at: Set(now),
                    ..Default::default()
                }
                .insert(&*self.db_pool)
                .await
                .map_err(|e| match e {
                    sea_orm::DbErr::Exec(_) => conflict(),
                    other => ServiceError::DatabaseError(other),
                })?;
            }
        }

        let _ = self
            .event_sender
            .send(Event::TenderCommitteeMemberAdded {
                tender_id,
                employee_id: input.employee_id,
                committee: format!("{:?}", committee).to_lowercase(),
            })
            .await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_committee_member(
        &self,
        tender_id: i64,
        committee: TenderCommittee,
        employee_id: i64,
    ) -> Result<(), ServiceError> {
        let deleted = match committee {
            TenderCommittee::Opening => tender_opening_committee::Entity::delete_many()
                .filter(tender_opening_committee::Column::TenderId.eq(tender_id))
                .filter(tender_opening_committee::Column::EmployeeId.eq(employee_id))
                .exec(&*self.db_pool)
                .await
                .map_err(ServiceError::DatabaseError)?
                .rows_affected,
            TenderCommittee::Evaluation => tender_evaluation_committee::Entity::delete_many()
                .filter(tender_evaluation_committee::Column::TenderId.eq(tender_id))
                .filter(tender_evaluation_committee::Column::EmployeeId.eq(employee_id))
                .exec(&*self.db_pool)
                .await
                .map_err(ServiceError::DatabaseError)?
                .rows_affected,
        };

        if deleted == 0 {
            return Err(ServiceError::NotFound(format!(
                "Employee {} is not on that committee of tender {}",
                employee_id, tender_id
            )));
        }

        let _ = self
            .event_sender
            .send(Event::TenderCommitteeMemberRemoved {
                tender_id,
                employee_id,
                committee: format!("{:?}", committee).to_lowercase(),
            })
            .await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_opening_committee(
        &self,
        tender_id: i64,
    ) -> Result<Vec<tender_opening_committee::Model>, ServiceError> {
        self.get_tender(tender_id).await?;
        tender_opening_committee::Entity::find()
            .filter(tender_opening_committee::Column::TenderId.eq(tender_id))
            .order_by_asc(tender_opening_committee::Column::AddedAt)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn list_evaluation_committee(
        &self,
        tender_id: i64,
    ) -> Result<Vec<tender_evaluation_committee::Model>, ServiceError> {
        self.get_tender(tender_id).await?;
        tender_evaluation_committee::Entity::find()
            .filter(tender_evaluation_committee::Column::TenderId.eq(tender_id))
            .order_by_asc(tender_evaluation_committee::Column::AddedAt)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn count_tenders(&self) -> Result<u64, ServiceError> {
        tender::Entity::find()
            .count(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
