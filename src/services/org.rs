//! Organizational hierarchy (region, department, division, section) and the
//! procurement lookup tables (procurement types, LOA statuses, contract
//! statuses). Name lookups are case-insensitive exact matches; bulk import
//! and committee handling both rely on that.

use crate::{
    db::DbPool,
    entities::{
        contract_status, department, division, loa_status, procurement_type, region, section,
    },
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

/// Request body for creating or renaming a named record
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct NamedInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
}

/// Request body for a division (department-scoped name)
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct DivisionInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub department_id: i64,
}

/// Request body for a section (division-scoped name)
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct SectionInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub division_id: i64,
}

/// Service for the org hierarchy and lookup tables
#[derive(Clone)]
pub struct OrgService {
    db_pool: Arc<DbPool>,
}

impl OrgService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    // ----- regions -----

    #[instrument(skip(self))]
    pub async fn list_regions(&self) -> Result<Vec<region::Model>, ServiceError> {
        region::Entity::find()
            .order_by_asc(region::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn create_region(&self, input: NamedInput) -> Result<region::Model, ServiceError> {
        input.validate()?;
        let now = Utc::now();
        region::ActiveModel {
            name: Set(input.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => ServiceError::Conflict("Region already exists".to_string()),
            other => ServiceError::DatabaseError(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_region_by_name(
        &self,
        name: &str,
    ) -> Result<Option<region::Model>, ServiceError> {
        region::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(region::Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    // ----- departments -----

    #[instrument(skip(self))]
    pub async fn list_departments(&self) -> Result<Vec<department::Model>, ServiceError> {
        department::Entity::find()
            .order_by_asc(department::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn create_department(
        &self,
        input: NamedInput,
    ) -> Result<department::Model, ServiceError> {
        input.validate()?;
        let now = Utc::now();
        department::ActiveModel {
            name: Set(input.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => {
                ServiceError::Conflict("Department already exists".to_string())
            }
            other => ServiceError::DatabaseError(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<department::Model>, ServiceError> {
        department::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(department::Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    // ----- divisions -----

    #[instrument(skip(self))]
    pub async fn list_divisions(
        &self,
        department_id: Option<i64>,
    ) -> Result<Vec<division::Model>, ServiceError> {
        let mut query = division::Entity::find().order_by_asc(division::Column::Name);
        if let Some(dept) = department_id {
            query = query.filter(division::Column::DepartmentId.eq(dept));
        }
        query
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn create_division(
        &self,
        input: DivisionInput,
    ) -> Result<division::Model, ServiceError> {
        input.validate()?;

        department::Entity::find_by_id(input.department_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Department {} not found", input.department_id))
            })?;

        let now = Utc::now();
        division::ActiveModel {
            name: Set(input.name),
            department_id: Set(input.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => ServiceError::Conflict(
                "Division with this name already exists in the department".to_string(),
            ),
            other => ServiceError::DatabaseError(other),
        })
    }

    /// Case-insensitive division lookup, optionally scoped to a department.
    /// An unscoped lookup that matches divisions in several departments is
    /// ambiguous and returns `InvalidInput`.
    #[instrument(skip(self))]
    pub async fn find_division_by_name(
        &self,
        name: &str,
        department_id: Option<i64>,
    ) -> Result<Option<division::Model>, ServiceError> {
        let mut query = division::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(division::Column::Name)))
                .eq(name.trim().to_lowercase()),
        );
        if let Some(dept) = department_id {
            query = query.filter(division::Column::DepartmentId.eq(dept));
        }

        let matches = query
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.into_iter().next()),
            n => Err(ServiceError::InvalidInput(format!(
                "Division name '{}' is ambiguous ({} departments have one)",
                name, n
            ))),
        }
    }

    // ----- sections -----

    #[instrument(skip(self))]
    pub async fn list_sections(
        &self,
        division_id: Option<i64>,
    ) -> Result<Vec<section::Model>, ServiceError> {
        let mut query = section::Entity::find().order_by_asc(section::Column::Name);
        if let Some(div) = division_id {
            query = query.filter(section::Column::DivisionId.eq(div));
        }
        query
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn create_section(&self, input: SectionInput) -> Result<section::Model, ServiceError> {
        input.validate()?;

        division::Entity::find_by_id(input.division_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Division {} not found", input.division_id))
            })?;

        let now = Utc::now();
        section::ActiveModel {
            name: Set(input.name),
            division_id: Set(input.division_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => ServiceError::Conflict(
                "Section with this name already exists in the division".to_string(),
            ),
            other => ServiceError::DatabaseError(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_section_by_name(
        &self,
        name: &str,
        division_id: Option<i64>,
    ) -> Result<Option<section::Model>, ServiceError> {
        let mut query = section::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(section::Column::Name)))
                .eq(name.trim().to_lowercase()),
        );
        if let Some(div) = division_id {
            query = query.filter(section::Column::DivisionId.eq(div));
        }

        let matches = query
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.into_iter().next()),
            n => Err(ServiceError::InvalidInput(format!(
                "Section name '{}' is ambiguous ({} divisions have one)",
                name, n
            ))),
        }
    }

    // ----- procurement types -----

    #[instrument(skip(self))]
    pub async fn list_procurement_types(
        &self,
    ) -> Result<Vec<procurement_type::Model>, ServiceError> {
        procurement_type::Entity::find()
            .order_by_asc(procurement_type::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn create_procurement_type(
        &self,
        input: NamedInput,
    ) -> Result<procurement_type::Model, ServiceError> {
        input.validate()?;
        let now = Utc::now();
        procurement_type::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => {
                ServiceError::Conflict("Procurement type already exists".to_string())
            }
            other => ServiceError::DatabaseError(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_procurement_type_by_name(
        &self,
        name: &str,
    ) -> Result<Option<procurement_type::Model>, ServiceError> {
        procurement_type::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(procurement_type::Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    // ----- LOA statuses -----

    #[instrument(skip(self))]
    pub async fn list_loa_statuses(&self) -> Result<Vec<loa_status::Model>, ServiceError> {
        loa_status::Entity::find()
            .order_by_asc(loa_status::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn create_loa_status(
        &self,
        input: NamedInput,
    ) -> Result<loa_status::Model, ServiceError> {
        input.validate()?;
        let now = Utc::now();
        loa_status::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => {
                ServiceError::Conflict("LOA status already exists".to_string())
            }
            other => ServiceError::DatabaseError(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_loa_status_by_name(
        &self,
        name: &str,
    ) -> Result<Option<loa_status::Model>, ServiceError> {
        loa_status::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(loa_status::Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    // ----- contract statuses -----

    #[instrument(skip(self))]
    pub async fn list_contract_statuses(
        &self,
    ) -> Result<Vec<contract_status::Model>, ServiceError> {
        contract_status::Entity::find()
            .order_by_asc(contract_status::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, input))]
    pub async fn create_contract_status(
        &self,
        input: NamedInput,
    ) -> Result<contract_status::Model, ServiceError> {
        input.validate()?;
        let now = Utc::now();
        contract_status::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::Exec(_) => {
                ServiceError::Conflict("Contract status already exists".to_string())
            }
            other => ServiceError::DatabaseError(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_contract_status_by_name(
        &self,
        name: &str,
    ) -> Result<Option<contract_status::Model>, ServiceError> {
        contract_status::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(contract_status::Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Count helper for the dashboard.
    pub async fn count_departments(&self) -> Result<u64, ServiceError> {
        department::Entity::find()
            .count(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
