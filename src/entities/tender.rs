use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Who may participate in a tender.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display, strum::EnumString, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Eligibility {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "AGPO")]
    Agpo,
}

/// Reserved-group category for AGPO tenders. Required when eligibility is
/// AGPO, forced to NULL otherwise.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display, strum::EnumString, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AgpoCategory {
    #[sea_orm(string_value = "YOUTH")]
    Youth,
    #[sea_orm(string_value = "WOMEN")]
    Women,
    #[sea_orm(string_value = "PWD")]
    Pwd,
}

/// Tender record. The stored anchors are `tender_creation_date`,
/// `tender_closing_date`/`time`, `tender_validity_days` and
/// `tender_evaluation_duration_days`; every other date field here is
/// recomputed from them on each save by the scheduling rules.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "tenders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tender_number: String,
    pub requisition_id: Option<i64>,
    pub description: String,
    pub procurement_type_id: Option<i64>,
    pub eligibility: Eligibility,
    pub agpo_category: Option<AgpoCategory>,
    pub created_by_employee_id: Option<i64>,
    pub egp_reference: Option<String>,
    pub internal_reference: Option<String>,
    pub tender_creation_date: Option<NaiveDate>,
    pub proposed_advert_date: Option<NaiveDate>,
    pub tender_advert_date: Option<NaiveDate>,
    pub tender_closing_date: Option<NaiveDate>,
    pub tender_closing_time: Option<NaiveTime>,
    pub tender_opening_date: Option<NaiveDate>,
    pub tender_opening_time: Option<NaiveTime>,
    pub tender_validity_days: Option<i32>,
    pub tender_validity_expiry_date: Option<NaiveDate>,
    pub tender_evaluation_duration_days: Option<i32>,
    pub tender_evaluation_end_date: Option<NaiveDate>,
    pub estimated_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requisition::Entity",
        from = "Column::RequisitionId",
        to = "super::requisition::Column::Id"
    )]
    Requisition,
    #[sea_orm(
        belongs_to = "super::procurement_type::Entity",
        from = "Column::ProcurementTypeId",
        to = "super::procurement_type::Column::Id"
    )]
    ProcurementType,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::CreatedByEmployeeId",
        to = "super::employee::Column::Id"
    )]
    Creator,
    #[sea_orm(has_one = "super::contract::Entity")]
    Contract,
    #[sea_orm(has_many = "super::tender_opening_committee::Entity")]
    OpeningCommittee,
    #[sea_orm(has_many = "super::tender_evaluation_committee::Entity")]
    EvaluationCommittee,
}

impl Related<super::requisition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requisition.def()
    }
}

impl Related<super::procurement_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcurementType.def()
    }
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::tender_opening_committee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpeningCommittee.def()
    }
}

impl Related<super::tender_evaluation_committee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationCommittee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
