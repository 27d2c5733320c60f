use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a requisition will be sourced; drives the default evaluation duration
/// applied to a linked tender.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display, strum::EnumString, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcurementCategory {
    #[sea_orm(string_value = "TENDER")]
    Tender,
    #[sea_orm(string_value = "QUOTATION")]
    Quotation,
}

/// Pre-tender purchase request. `creation_deadline` is derived from
/// `date_assigned` on every save and is never accepted from client input.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "requisitions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub requisition_number: String,
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
    pub creation_deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::RegionId",
        to = "super::region::Column::Id"
    )]
    Region,
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::division::Entity",
        from = "Column::DivisionId",
        to = "super::division::Column::Id"
    )]
    Division,
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::AssignedEmployeeId",
        to = "super::employee::Column::Id"
    )]
    AssignedEmployee,
    #[sea_orm(has_many = "super::tender::Entity")]
    Tenders,
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::tender::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
