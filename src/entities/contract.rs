use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unit a contract duration is expressed in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display, strum::EnumString, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DurationMeasure {
    #[sea_orm(string_value = "DAYS")]
    Days,
    #[sea_orm(string_value = "MONTHS")]
    Months,
    #[sea_orm(string_value = "YEARS")]
    Years,
}

/// Contract awarded from a tender (one-to-one with `tenders`). The expiry
/// dates are recomputed from `commencement_date` on each save.
/// `contract_delivery_period`/`_measure` are recorded for reporting only and
/// feed no derivation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
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
    pub contract_duration: Option<i32>,
    pub contract_duration_measure: Option<DurationMeasure>,
    pub contract_expiry_date: Option<NaiveDate>,
    pub contract_delivery_period: Option<i32>,
    pub contract_delivery_period_measure: Option<DurationMeasure>,
    pub contract_value: Option<Decimal>,
    pub tender_security_value: Option<Decimal>,
    pub tender_security_validity_days: Option<i32>,
    pub tender_security_expiry_date: Option<NaiveDate>,
    pub performance_security_amount: Option<Decimal>,
    pub performance_security_duration_days: Option<i32>,
    pub performance_security_expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tender::Entity",
        from = "Column::TenderId",
        to = "super::tender::Column::Id"
    )]
    Tender,
    #[sea_orm(
        belongs_to = "super::loa_status::Entity",
        from = "Column::LoaStatusId",
        to = "super::loa_status::Column::Id"
    )]
    LoaStatus,
    #[sea_orm(
        belongs_to = "super::contract_status::Entity",
        from = "Column::ContractStatusId",
        to = "super::contract_status::Column::Id"
    )]
    ContractStatus,
    #[sea_orm(has_many = "super::contract_cit_committee::Entity")]
    CitCommittee,
}

impl Related<super::tender::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tender.def()
    }
}

impl Related<super::loa_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoaStatus.def()
    }
}

impl Related<super::contract_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContractStatus.def()
    }
}

impl Related<super::contract_cit_committee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CitCommittee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
