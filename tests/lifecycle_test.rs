//! End-to-end lifecycle: requisition, linked tender with derived dates,
//! contract with expiries, committee membership rules.

mod common;

use chrono::NaiveDate;
use common::TestApp;
use tendertrack_api::{
    entities::contract::DurationMeasure,
    entities::requisition::ProcurementCategory,
    entities::tender::{AgpoCategory, Eligibility},
    errors::ServiceError,
    services::contracts::CreateContractInput,
    services::requisitions::{CreateRequisitionInput, UpdateRequisitionInput},
    services::tenders::{
        CommitteeMemberInput, CreateTenderInput, TenderCommittee, TenderFilter,
        UpdateTenderInput,
    },
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn requisition_input(number: &str) -> CreateRequisitionInput {
    CreateRequisitionInput {
        requisition_number: number.to_string(),
        description: "Supply of network equipment".to_string(),
        shopping_cart_no: None,
        shopping_cart_amount: None,
        shopping_cart_status: None,
        procurement_category: ProcurementCategory::Quotation,
        region_id: None,
        department_id: None,
        division_id: None,
        section_id: None,
        assigned_employee_id: None,
        created_by_employee_id: None,
        date_assigned: Some(date(2025, 3, 3)),
    }
}

fn tender_input(number: &str, requisition_id: Option<i64>) -> CreateTenderInput {
    CreateTenderInput {
        tender_number: number.to_string(),
        requisition_id,
        description: "Supply of network equipment".to_string(),
        procurement_type_id: None,
        eligibility: Eligibility::Open,
        agpo_category: None,
        created_by_employee_id: None,
        egp_reference: None,
        internal_reference: None,
        tender_creation_date: Some(date(2025, 3, 3)),
        tender_advert_date: None,
        tender_closing_date: Some(date(2025, 3, 10)),
        tender_closing_time: Some(chrono::NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
        tender_validity_days: Some(30),
        tender_evaluation_duration_days: None,
        estimated_value: None,
    }
}

fn contract_input(tender_id: i64) -> CreateContractInput {
    CreateContractInput {
        tender_id,
        contract_reference: Some("CON-001".to_string()),
        created_by_employee_id: None,
        loa_status_id: None,
        contract_status_id: None,
        supplier_name: Some("Acme Ltd".to_string()),
        supplier_county: None,
        e_purchase_order_no: None,
        sap_purchase_order_no: None,
        contract_signature_date: Some(date(2025, 1, 15)),
        commencement_date: Some(date(2025, 1, 31)),
        contract_duration: Some(1),
        contract_duration_measure: Some(DurationMeasure::Months),
        contract_delivery_period: Some(14),
        contract_delivery_period_measure: Some(DurationMeasure::Days),
        contract_value: None,
        tender_security_value: None,
        tender_security_validity_days: Some(30),
        performance_security_amount: None,
        performance_security_duration_days: Some(60),
    }
}

#[tokio::test]
async fn requisition_deadline_follows_date_assigned() {
    let app = TestApp::new().await;
    let svc = &app.state.services.requisitions;

    let requisition = svc
        .create_requisition(requisition_input("REQ-001"))
        .await
        .expect("create requisition");
    assert_eq!(requisition.creation_deadline, Some(date(2025, 3, 10)));

    // Moving the assignment date moves the deadline with it.
    let updated = svc
        .update_requisition(
            requisition.id,
            UpdateRequisitionInput {
                date_assigned: Some(date(2025, 4, 1)),
                ..Default::default()
            },
        )
        .await
        .expect("update requisition");
    assert_eq!(updated.creation_deadline, Some(date(2025, 4, 8)));
}

#[tokio::test]
async fn tender_derives_full_date_cascade() {
    let app = TestApp::new().await;
    let requisition = app
        .state
        .services
        .requisitions
        .create_requisition(requisition_input("REQ-002"))
        .await
        .expect("create requisition");

    let tender = app
        .state
        .services
        .tenders
        .create_tender(tender_input("TDR-002", Some(requisition.id)))
        .await
        .expect("create tender");

    // 2025-03-03 is a Monday; the proposed advert lands on the Wednesday
    // nine days out.
    assert_eq!(tender.proposed_advert_date, Some(date(2025, 3, 12)));
    assert_eq!(tender.tender_opening_date, Some(date(2025, 3, 10)));
    assert_eq!(
        tender.tender_opening_time,
        Some(chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap())
    );
    assert_eq!(tender.tender_validity_expiry_date, Some(date(2025, 4, 9)));
    // Linked QUOTATION requisition defaults the evaluation duration to 21.
    assert_eq!(tender.tender_evaluation_duration_days, Some(21));
    assert_eq!(tender.tender_evaluation_end_date, Some(date(2025, 3, 31)));
}

#[tokio::test]
async fn tender_update_with_unchanged_anchors_is_a_fixpoint() {
    let app = TestApp::new().await;
    let svc = &app.state.services.tenders;

    let created = svc
        .create_tender(tender_input("TDR-003", None))
        .await
        .expect("create tender");

    let updated = svc
        .update_tender(created.id, UpdateTenderInput::default())
        .await
        .expect("update tender");

    assert_eq!(updated.proposed_advert_date, created.proposed_advert_date);
    assert_eq!(updated.tender_opening_date, created.tender_opening_date);
    assert_eq!(updated.tender_opening_time, created.tender_opening_time);
    assert_eq!(
        updated.tender_validity_expiry_date,
        created.tender_validity_expiry_date
    );
    assert_eq!(
        updated.tender_evaluation_end_date,
        created.tender_evaluation_end_date
    );
}

#[tokio::test]
async fn non_agpo_tender_clears_agpo_category() {
    let app = TestApp::new().await;
    let svc = &app.state.services.tenders;

    let mut input = tender_input("TDR-004", None);
    input.eligibility = Eligibility::Open;
    input.agpo_category = Some(AgpoCategory::Youth);

    let tender = svc.create_tender(input).await.expect("create tender");
    assert_eq!(tender.agpo_category, None);
}

#[tokio::test]
async fn agpo_tender_requires_category() {
    let app = TestApp::new().await;
    let svc = &app.state.services.tenders;

    let mut input = tender_input("TDR-005", None);
    input.eligibility = Eligibility::Agpo;
    input.agpo_category = None;

    let err = svc.create_tender(input).await.unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    let mut input = tender_input("TDR-006", None);
    input.eligibility = Eligibility::Agpo;
    input.agpo_category = Some(AgpoCategory::Women);
    let tender = svc.create_tender(input).await.expect("create tender");
    assert_eq!(tender.agpo_category, Some(AgpoCategory::Women));
}

#[tokio::test]
async fn contract_expiries_derive_from_commencement() {
    let app = TestApp::new().await;

    let tender = app
        .state
        .services
        .tenders
        .create_tender(tender_input("TDR-007", None))
        .await
        .expect("create tender");

    let contract = app
        .state
        .services
        .contracts
        .create_contract(contract_input(tender.id))
        .await
        .expect("create contract");

    // One calendar month from Jan 31 clamps to the end of February.
    assert_eq!(contract.contract_expiry_date, Some(date(2025, 2, 28)));
    assert_eq!(contract.tender_security_expiry_date, Some(date(2025, 3, 2)));
    assert_eq!(
        contract.performance_security_expiry_date,
        Some(date(2025, 4, 1))
    );

    // One contract per tender.
    let err = app
        .state
        .services
        .contracts
        .create_contract(contract_input(tender.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn committee_membership_is_unique_per_parent() {
    let app = TestApp::new().await;

    let tender = app
        .state
        .services
        .tenders
        .create_tender(tender_input("TDR-008", None))
        .await
        .expect("create tender");

    let employee = app
        .state
        .services
        .employees
        .create_employee(tendertrack_api::services::employees::CreateEmployeeInput {
            employee_id: "E100".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Mwangi".to_string(),
            email: "grace.mwangi@example.com".to_string(),
            phone: None,
            department_id: None,
            division_id: None,
            section_id: None,
            job_title: None,
        })
        .await
        .expect("create employee");

    let member = CommitteeMemberInput {
        employee_id: employee.id,
        role: Some("chair".to_string()),
    };

    app.state
        .services
        .tenders
        .add_committee_member(tender.id, TenderCommittee::Opening, member.clone())
        .await
        .expect("add member");

    // The same employee may sit on the evaluation committee.
    app.state
        .services
        .tenders
        .add_committee_member(tender.id, TenderCommittee::Evaluation, member.clone())
        .await
        .expect("add member to other committee");

    // Adding them to the opening committee again is a conflict.
    let err = app
        .state
        .services
        .tenders
        .add_committee_member(tender.id, TenderCommittee::Opening, member)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    let members = app
        .state
        .services
        .tenders
        .list_opening_committee(tender.id)
        .await
        .expect("list committee");
    assert_eq!(members.len(), 1);

    app.state
        .services
        .tenders
        .remove_committee_member(tender.id, TenderCommittee::Opening, employee.id)
        .await
        .expect("remove member");

    let err = app
        .state
        .services
        .tenders
        .remove_committee_member(tender.id, TenderCommittee::Opening, employee.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn dashboard_counts_reflect_created_records() {
    let app = TestApp::new().await;

    app.state
        .services
        .requisitions
        .create_requisition(requisition_input("REQ-100"))
        .await
        .expect("create requisition");
    app.state
        .services
        .tenders
        .create_tender(tender_input("TDR-100", None))
        .await
        .expect("create tender");

    let summary = app
        .state
        .services
        .dashboard
        .summary()
        .await
        .expect("dashboard summary");
    assert_eq!(summary.total_requisitions, 1);
    assert_eq!(summary.total_tenders, 1);
    assert_eq!(summary.total_contracts, 0);
    assert_eq!(
        summary.requisitions_by_category.get("QUOTATION").copied(),
        Some(1)
    );
    assert_eq!(summary.recent_tenders.len(), 1);
    assert_eq!(summary.recent_tenders[0].tender_number, "TDR-100");
    assert!(summary.tenders_by_procurement_type.is_empty());

    let hits = app
        .state
        .services
        .tenders
        .list_tenders(TenderFilter {
            search: Some("network".to_string()),
            ..Default::default()
        })
        .await
        .expect("list tenders");
    assert_eq!(hits.len(), 1);
    let misses = app
        .state
        .services
        .tenders
        .list_tenders(TenderFilter {
            search: Some("bridge works".to_string()),
            ..Default::default()
        })
        .await
        .expect("list tenders");
    assert!(misses.is_empty());
}
