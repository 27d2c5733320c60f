//! HTTP route handlers. Each submodule owns one resource's DTO wiring and
//! exposes a `*_routes()` builder; permission gating is applied in
//! `lib.rs` when the groups are mounted.

use crate::services::{
    contracts::ContractService, dashboard::DashboardService, employees::EmployeeService,
    imports::ImportService, org::OrgService, requisitions::RequisitionService,
    tenders::TenderService, users::UserService,
};

pub mod auth;
pub mod contracts;
pub mod dashboard;
pub mod employees;
pub mod imports;
pub mod org;
pub mod requisitions;
pub mod tenders;

/// Service bundle carried in [`crate::AppState`].
#[derive(Clone)]
pub struct AppServices {
    pub requisitions: RequisitionService,
    pub tenders: TenderService,
    pub contracts: ContractService,
    pub employees: EmployeeService,
    pub org: OrgService,
    pub dashboard: DashboardService,
    pub imports: ImportService,
    pub users: UserService,
}
