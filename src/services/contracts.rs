//! Contract lifecycle and the contract implementation (CIT) committee.
//! One contract per tender; the expiry fields are derived from the
//! commencement anchor on every save.

use crate::{
    db::DbPool,
    entities::{
        contract::{self, DurationMeasure},
        contract_cit_committee, employee, tender,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    scheduling,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use super::tenders::CommitteeMemberInput;

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateContractInput {
    pub tender_id: i64,
    pub contract_reference: Option<String>,
    pub created_by_employee_id: Option<i64>,
    pub loa_status_id: Option<i64>,
    pub contract_status_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub supplier_county: Option<String>,
    pub e_purchase_order_no: Option<String>,
    pub sap_purchase_order_no: Option<String>,
    pub contract_signature_date: Option<NaiveDate>,
    pub commencement_date: Option<NaiveDate>,
    #[validate(range(min = 0, max = 36500))]
    pub contract_duration: Option<i32>,
    pub contract_duration_measure: Option<DurationMeasure>,
    #[validate(range(min = 0))]
    pub contract_delivery_period: Option<i32>,
    pub contract_delivery_period_measure: Option<DurationMeasure>,
    pub contract_value: Option<Decimal>,
    pub tender_security_value: Option<Decimal>,
    #[validate(range(min = 0))]
    pub tender_security_validity_days: Option<i32>,
    pub performance_security_amount: Option<Decimal>,
    #[validate(range(min = 0))]
    pub performance_security_duration_days: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateContractInput {
    pub contract_reference: Option<String>,
    pub loa_status_id: Option<i64>,
    pub contract_status_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub supplier_county: Option<String>,
    pub e_purchase_order_no: Option<String>,
    pub sap_purchase_order_no: Option<String>,
    pub contract_signature_date: Option<NaiveDate>,
    pub commencement_date: Option<NaiveDate>,
    #[validate(range(min = 0, max = 36500))]
    pub contract_duration: Option<i32>,
    pub contract_duration_measure: Option<DurationMeasure>,
    #[validate(range(min = 0))]
    pub contract_delivery_period: Option<i32>,
    pub contract_delivery_period_measure: Option<DurationMeasure>,
    pub contract_value: Option<Decimal>,
    pub tender_security_value: Option<Decimal>,
    #[validate(range(min = 0))]
    pub tender_security_validity_days: Option<i32>,
    pub performance_security_amount: Option<Decimal>,
    #[validate(range(min = 0))]
    pub performance_security_duration_days: Option<i32>,
}

/// Filters for the contract list endpoint
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct ContractFilter {
    pub loa_status_id: Option<i64>,
    pub contract_status_id: Option<i64>,
    /// Contracts expiring on or before this date
    pub expiring_before: Option<NaiveDate>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Service for managing contracts
#[derive(Clone)]
pub struct ContractService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ContractService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_contract(
        &self,
        input: CreateContractInput,
    ) -> Result<contract::Model, ServiceError> {
        input.validate()?;

        tender::Entity::find_by_id(input.tender_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Tender {} not found", input.tender_id))
            })?;

        let existing = contract::Entity::find()
            .filter(contract::Column::TenderId.eq(input.tender_id))
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Tender {} already has a contract",
                input.tender_id
            )));
        }

        let now = Utc::now();
        let mut model = contract::Model {
            id: 0,
            tender_id: input.tender_id,
            contract_reference: input.contract_reference,
            created_by_employee_id: input.created_by_employee_id,
            loa_status_id: input.loa_status_id,
            contract_status_id: input.contract_status_id,
            supplier_name: input.supplier_name,
            supplier_county: input.supplier_county,
            e_purchase_order_no: input.e_purchase_order_no,
            sap_purchase_order_no: input.sap_purchase_order_no,
            contract_signature_date: input.contract_signature_date,
            commencement_date: input.commencement_date,
            contract_duration: input.contract_duration,
            contract_duration_measure: input.contract_duration_measure,
            contract_expiry_date: None,
            contract_delivery_period: input.contract_delivery_period,
            contract_delivery_period_measure: input.contract_delivery_period_measure,
            contract_value: input.contract_value,
            tender_security_value: input.tender_security_value,
            tender_security_validity_days: input.tender_security_validity_days,
            tender_security_expiry_date: None,
            performance_security_amount: input.performance_security_amount,
            performance_security_duration_days: input.performance_security_duration_days,
            performance_security_expiry_date: None,
            created_at: now,
            updated_at: now,
        };

        scheduling::apply_contract_schedule(&mut model);

        let mut active = contract::ActiveModel::from(model).reset_all();
        active.id = sea_orm::ActiveValue::NotSet;

        let created = active.insert(&*self.db_pool).await.map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => ServiceError::Conflict(
                "Tender already has a contract".to_string(),
            ),
            other => ServiceError::DatabaseError(other),
        })?;

        let _ = self
            .event_sender
            .send(Event::ContractCreated(created.id))
            .await;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_contract(&self, id: i64) -> Result<contract::Model, ServiceError> {
        contract::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Contract {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_contract_for_tender(
        &self,
        tender_id: i64,
    ) -> Result<Option<contract::Model>, ServiceError> {
        contract::Entity::find()
            .filter(contract::Column::TenderId.eq(tender_id))
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn list_contracts(
        &self,
        filter: ContractFilter,
    ) -> Result<Vec<contract::Model>, ServiceError> {
        let mut query = contract::Entity::find().order_by_desc(contract::Column::CreatedAt);

        if let Some(loa) = filter.loa_status_id {
            query = query.filter(contract::Column::LoaStatusId.eq(loa));
        }
        if let Some(status) = filter.contract_status_id {
            query = query.filter(contract::Column::ContractStatusId.eq(status));
        }
        if let Some(before) = filter.expiring_before {
            query = query.filter(contract::Column::ContractExpiryDate.lte(before));
        }

        query
            .limit(filter.limit.unwrap_or(100))
            .offset(filter.offset.unwrap_or(0))
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn update_contract(
        &self,
        id: i64,
        input: UpdateContractInput,
    ) -> Result<contract::Model, ServiceError> {
        input.validate()?;

        let mut model = self.get_contract(id).await?;

        if input.contract_reference.is_some() {
            model.contract_reference = input.contract_reference;
        }
        if input.loa_status_id.is_some() {
            model.loa_status_id = input.loa_status_id;
        }
        if input.contract_status_id.is_some() {
            model.contract_status_id = input.contract_status_id;
        }
        if input.supplier_name.is_some() {
            model.supplier_name = input.supplier_name;
        }
        if input.supplier_county.is_some() {
            model.supplier_county = input.supplier_county;
        }
        if input.e_purchase_order_no.is_some() {
            model.e_purchase_order_no = input.e_purchase_order_no;
        }
        if input.sap_purchase_order_no.is_some() {
            model.sap_purchase_order_no = input.sap_purchase_order_no;
        }
        if input.contract_signature_date.is_some() {
            model.contract_signature_date = input.contract_signature_date;
        }
        if input.commencement_date.is_some() {
            model.commencement_date = input.commencement_date;
        }
        if input.contract_duration.is_some() {
            model.contract_duration = input.contract_duration;
        }
        if input.contract_duration_measure.is_some() {
            model.contract_duration_measure = input.contract_duration_measure;
        }
        if input.contract_delivery_period.is_some() {
            model.contract_delivery_period = input.contract_delivery_period;
        }
        if input.contract_delivery_period_measure.is_some() {
            model.contract_delivery_period_measure = input.contract_delivery_period_measure;
        }
        if input.contract_value.is_some() {
            model.contract_value = input.contract_value;
        }
        if input.tender_security_value.is_some() {
            model.tender_security_value = input.tender_security_value;
        }
        if input.tender_security_validity_days.is_some() {
            model.tender_security_validity_days = input.tender_security_validity_days;
        }
        if input.performance_security_amount.is_some() {
            model.performance_security_amount = input.performance_security_amount;
        }
        if input.performance_security_duration_days.is_some() {
            model.performance_security_duration_days = input.performance_security_duration_days;
        }

        scheduling::apply_contract_schedule(&mut model);
        model.updated_at = Utc::now();

        let active = contract::ActiveModel::from(model).reset_all();
        let updated = active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let _ = self
            .event_sender
            .send(Event::ContractUpdated(updated.id))
            .await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_contract(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get_contract(id).await?;

        contract_cit_committee::Entity::delete_many()
            .filter(contract_cit_committee::Column::ContractId.eq(id))
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        contract::Entity::delete_by_id(existing.id)
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let _ = self.event_sender.send(Event::ContractDeleted(id)).await;
        Ok(())
    }

    // ----- CIT committee -----

    #[instrument(skip(self, input))]
    pub async fn add_cit_member(
        &self,
        contract_id: i64,
        input: CommitteeMemberInput,
    ) -> Result<(), ServiceError> {
        input.validate()?;
        self.get_contract(contract_id).await?;

        employee::Entity::find_by_id(input.employee_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Employee {} not found", input.employee_id))
            })?;

        contract_cit_committee::ActiveModel {
            contract_id: Set(contract_id),
            employee_id: Set(input.employee_id),
            role: Set(input.role),
            added_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => {
                ServiceError::Conflict("Employee already sits on this committee".to_string())
            }
            other => ServiceError::DatabaseError(other),
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_cit_member(
        &self,
        contract_id: i64,
        employee_id: i64,
    ) -> Result<(), ServiceError> {
        let deleted = contract_cit_committee::Entity::delete_many()
            .filter(contract_cit_committee::Column::ContractId.eq(contract_id))
            .filter(contract_cit_committee::Column::EmployeeId.eq(employee_id))
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .rows_affected;

        if deleted == 0 {
            return Err(ServiceError::NotFound(format!(
                "Employee {} is not on the CIT committee of contract {}",
                employee_id, contract_id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_cit_committee(
        &self,
        contract_id: i64,
    ) -> Result<Vec<contract_cit_committee::Model>, ServiceError> {
        self.get_contract(contract_id).await?;
        contract_cit_committee::Entity::find()
            .filter(contract_cit_committee::Column::ContractId.eq(contract_id))
            .order_by_asc(contract_cit_committee::Column::AddedAt)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn count_contracts(&self) -> Result<u64, ServiceError> {
        contract::Entity::find()
            .count(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Contracts whose expiry falls within the next `days` days. Dashboard
    /// helper.
    #[instrument(skip(self))]
    pub async fn count_expiring_within(&self, days: i64) -> Result<u64, ServiceError> {
        let today = Utc::now().date_naive();
        let horizon = today + chrono::Duration::days(days);
        contract::Entity::find()
            .filter(contract::Column::ContractExpiryDate.gte(today))
            .filter(contract::Column::ContractExpiryDate.lte(horizon))
            .count(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
