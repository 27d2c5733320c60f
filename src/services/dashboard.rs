//! Dashboard aggregates. Counts are folded in Rust over narrow queries
//! rather than backend-specific GROUP BY statements; the row counts here
//! are departmental-scale, not analytical-scale.

use crate::{
    db::DbPool,
    entities::{
        contract, department, employee, procurement_type, region, requisition,
        requisition::ProcurementCategory,
        tender,
        tender::Eligibility,
    },
    errors::ServiceError,
};
use chrono::{Duration, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Aggregate counts for the landing dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub total_requisitions: u64,
    pub requisitions_by_category: BTreeMap<String, u64>,
    pub requisitions_by_region: BTreeMap<String, u64>,
    pub requisitions_by_department: BTreeMap<String, u64>,
    /// Requisitions whose creation deadline has already passed
    pub requisitions_past_deadline: u64,
    pub total_tenders: u64,
    pub tenders_by_eligibility: BTreeMap<String, u64>,
    pub tenders_by_procurement_type: BTreeMap<String, u64>,
    /// Tenders still open for bids (closing date today or later)
    pub open_tenders: u64,
    pub total_contracts: u64,
    /// Contracts expiring in the next 90 days
    pub contracts_expiring_soon: u64,
    pub active_employees: u64,
    /// Most recently created tenders, newest first
    pub recent_tenders: Vec<tender::Model>,
}

const RECENT_LIMIT: u64 = 5;

/// Service computing dashboard aggregates
#[derive(Clone)]
pub struct DashboardService {
    db_pool: Arc<DbPool>,
}

impl DashboardService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
        let db = &*self.db_pool;
        let today = Utc::now().date_naive();

        let mut summary = DashboardSummary::default();

        // Lookup tables are small; load them once for id -> name resolution.
        let region_names: HashMap<i64, String> = region::Entity::find()
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();
        let department_names: HashMap<i64, String> = department::Entity::find()
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect();
        let procurement_type_names: HashMap<i64, String> = procurement_type::Entity::find()
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        // Requisitions: fetch only the grouping columns.
        let requisition_rows: Vec<(
            ProcurementCategory,
            Option<i64>,
            Option<i64>,
            Option<chrono::NaiveDate>,
        )> = requisition::Entity::find()
            .select_only()
            .column(requisition::Column::ProcurementCategory)
            .column(requisition::Column::RegionId)
            .column(requisition::Column::DepartmentId)
            .column(requisition::Column::CreationDeadline)
            .into_tuple()
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        summary.total_requisitions = requisition_rows.len() as u64;
        for (category, region_id, department_id, deadline) in &requisition_rows {
            *summary
                .requisitions_by_category
                .entry(category.to_string())
                .or_default() += 1;
            if let Some(name) = region_id.and_then(|id| region_names.get(&id)) {
                *summary
                    .requisitions_by_region
                    .entry(name.clone())
                    .or_default() += 1;
            }
            if let Some(name) = department_id.and_then(|id| department_names.get(&id)) {
                *summary
                    .requisitions_by_department
                    .entry(name.clone())
                    .or_default() += 1;
            }
            if deadline.is_some_and(|d| d < today) {
                summary.requisitions_past_deadline += 1;
            }
        }

        // Tenders.
        let tender_rows: Vec<(Eligibility, Option<i64>, Option<chrono::NaiveDate>)> =
            tender::Entity::find()
                .select_only()
                .column(tender::Column::Eligibility)
                .column(tender::Column::ProcurementTypeId)
                .column(tender::Column::TenderClosingDate)
                .into_tuple()
                .all(db)
                .await
                .map_err(ServiceError::DatabaseError)?;

        summary.total_tenders = tender_rows.len() as u64;
        for (eligibility, type_id, closing) in &tender_rows {
            *summary
                .tenders_by_eligibility
                .entry(eligibility.to_string())
                .or_default() += 1;
            if let Some(name) = type_id.and_then(|id| procurement_type_names.get(&id)) {
                *summary
                    .tenders_by_procurement_type
                    .entry(name.clone())
                    .or_default() += 1;
            }
            if closing.is_some_and(|d| d >= today) {
                summary.open_tenders += 1;
            }
        }

        summary.recent_tenders = tender::Entity::find()
            .order_by_desc(tender::Column::CreatedAt)
            .limit(RECENT_LIMIT)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        // Contracts.
        summary.total_contracts = contract::Entity::find()
            .count(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let horizon = today + Duration::days(90);
        summary.contracts_expiring_soon = contract::Entity::find()
            .filter(contract::Column::ContractExpiryDate.gte(today))
            .filter(contract::Column::ContractExpiryDate.lte(horizon))
            .count(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        summary.active_employees = employee::Entity::find()
            .filter(employee::Column::IsActive.eq(true))
            .count(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(summary)
    }
}
