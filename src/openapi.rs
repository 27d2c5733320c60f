//! OpenAPI document and Swagger UI wiring.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth, entities, errors, handlers, imports, services};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TenderTrack API",
        version = env!("CARGO_PKG_VERSION"),
        description = r#"
Procurement lifecycle tracker: requisitions, tenders, contracts, the
organizational hierarchy, committee membership and bulk CSV import.

Scheduling dates (advert, closing, opening, validity expiry, evaluation
end, contract and security expiries) are derived server-side from a small
set of anchor fields on every create and update; the derived fields are
never accepted from clients.

All `/api/v1` endpoints require a bearer token obtained from `/auth/login`.
        "#
    ),
    paths(
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::set_role,
        handlers::requisitions::create_requisition,
        handlers::requisitions::list_requisitions,
        handlers::requisitions::get_requisition,
        handlers::requisitions::update_requisition,
        handlers::requisitions::delete_requisition,
        handlers::tenders::create_tender,
        handlers::tenders::list_tenders,
        handlers::tenders::get_tender,
        handlers::tenders::update_tender,
        handlers::tenders::delete_tender,
        handlers::tenders::list_committee_members,
        handlers::tenders::add_committee_member,
        handlers::tenders::remove_committee_member,
        handlers::contracts::create_contract,
        handlers::contracts::list_contracts,
        handlers::contracts::get_contract,
        handlers::contracts::update_contract,
        handlers::contracts::delete_contract,
        handlers::contracts::list_cit_members,
        handlers::contracts::add_cit_member,
        handlers::contracts::remove_cit_member,
        handlers::employees::create_employee,
        handlers::employees::list_employees,
        handlers::employees::get_employee,
        handlers::employees::update_employee,
        handlers::employees::deactivate_employee,
        handlers::dashboard::dashboard_summary,
        handlers::imports::run_import,
    ),
    components(schemas(
        errors::ErrorResponse,
        auth::TokenResponse,
        entities::requisition::Model,
        entities::requisition::ProcurementCategory,
        entities::tender::Model,
        entities::tender::Eligibility,
        entities::tender::AgpoCategory,
        entities::contract::Model,
        entities::contract::DurationMeasure,
        entities::employee::Model,
        entities::region::Model,
        entities::department::Model,
        entities::division::Model,
        entities::section::Model,
        entities::procurement_type::Model,
        entities::loa_status::Model,
        entities::contract_status::Model,
        entities::tender_opening_committee::Model,
        entities::tender_evaluation_committee::Model,
        entities::contract_cit_committee::Model,
        imports::ImportTarget,
        imports::ImportReport,
        services::requisitions::CreateRequisitionInput,
        services::requisitions::UpdateRequisitionInput,
        services::tenders::CreateTenderInput,
        services::tenders::UpdateTenderInput,
        services::tenders::CommitteeMemberInput,
        services::contracts::CreateContractInput,
        services::contracts::UpdateContractInput,
        services::employees::CreateEmployeeInput,
        services::employees::UpdateEmployeeInput,
        services::org::NamedInput,
        services::org::DivisionInput,
        services::org::SectionInput,
        services::dashboard::DashboardSummary,
        services::users::RegisterUserInput,
        services::users::LoginInput,
        services::users::SetRoleInput,
        services::users::UserAccountView,
    )),
    tags(
        (name = "auth", description = "Signup, login and token introspection"),
        (name = "requisitions", description = "Pre-tender purchase requests"),
        (name = "tenders", description = "Tenders and their committees"),
        (name = "contracts", description = "Contracts and implementation teams"),
        (name = "employees", description = "Employee directory"),
        (name = "dashboard", description = "Aggregate counts"),
        (name = "imports", description = "Bulk CSV import")
    )
)]
pub struct ApiDoc;

/// Swagger UI router serving the generated document.
pub fn swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
