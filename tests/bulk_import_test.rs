//! Bulk CSV import: file-level column rejection, row skip-and-warn behavior
//! and create-or-update by natural key.

mod common;

use common::TestApp;
use tendertrack_api::{errors::ServiceError, imports::ImportTarget};

#[tokio::test]
async fn missing_required_column_rejects_the_whole_file() {
    let app = TestApp::new().await;

    let csv = "label\nFinance\n";
    let err = app
        .state
        .services
        .imports
        .import_csv(ImportTarget::Department, csv)
        .await
        .unwrap_err();

    match err {
        ServiceError::ImportRejected(msg) => {
            assert!(msg.contains("name"), "message should name the missing column: {msg}");
            assert!(msg.contains("label"), "message should list the found columns: {msg}");
        }
        other => panic!("expected ImportRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn header_names_are_trimmed_and_case_folded() {
    let app = TestApp::new().await;

    let csv = "  Name  \nProcurement\nFinance\n";
    let report = app
        .state
        .services
        .imports
        .import_csv(ImportTarget::Department, csv)
        .await
        .expect("import departments");

    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 0);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn reimport_matches_existing_rows_case_insensitively() {
    let app = TestApp::new().await;

    let first = app
        .state
        .services
        .imports
        .import_csv(ImportTarget::Region, "name\nCoast\n")
        .await
        .expect("first import");
    assert_eq!(first.created, 1);

    let second = app
        .state
        .services
        .imports
        .import_csv(ImportTarget::Region, "name\nCOAST\n")
        .await
        .expect("second import");
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 1);
}

#[tokio::test]
async fn division_rows_with_unknown_department_are_skipped_with_warning() {
    let app = TestApp::new().await;

    app.state
        .services
        .imports
        .import_csv(ImportTarget::Department, "name\nProcurement\n")
        .await
        .expect("seed departments");

    let csv = "name,department_name\n\
               Sourcing,Procurement\n\
               Ghost Division,No Such Department\n\
               Disposal,procurement\n";
    let report = app
        .state
        .services
        .imports
        .import_csv(ImportTarget::Division, csv)
        .await
        .expect("import divisions");

    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("row 3"));
    assert!(report.warnings[0].contains("No Such Department"));
}

#[tokio::test]
async fn rows_missing_required_values_are_skipped() {
    let app = TestApp::new().await;

    app.state
        .services
        .imports
        .import_csv(ImportTarget::Department, "name\nProcurement\n")
        .await
        .expect("seed departments");

    let csv = "name,department_name\n\
               Sourcing,Procurement\n\
               ,Procurement\n";
    let report = app
        .state
        .services
        .imports
        .import_csv(ImportTarget::Division, csv)
        .await
        .expect("import divisions");

    assert_eq!(report.created, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.warnings[0].contains("missing required value"));
}

#[tokio::test]
async fn employee_import_creates_then_updates_by_staff_number() {
    let app = TestApp::new().await;

    app.state
        .services
        .imports
        .import_csv(ImportTarget::Department, "name\nProcurement\n")
        .await
        .expect("seed departments");

    let csv = "employee_id,first_name,last_name,email,department_name\n\
               E001,Grace,Mwangi,grace.mwangi@example.com,Procurement\n";
    let first = app
        .state
        .services
        .imports
        .import_csv(ImportTarget::Employee, csv)
        .await
        .expect("first employee import");
    assert_eq!(first.created, 1);

    let csv = "employee_id,first_name,last_name,email,job_title,is_active\n\
               E001,Grace,Mwangi,g.mwangi@example.com,Senior Officer,Active\n";
    let second = app
        .state
        .services
        .imports
        .import_csv(ImportTarget::Employee, csv)
        .await
        .expect("second employee import");
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 1);

    let employee = app
        .state
        .services
        .employees
        .find_by_staff_number("E001")
        .await
        .expect("lookup")
        .expect("employee exists");
    assert_eq!(employee.email, "g.mwangi@example.com");
    assert_eq!(employee.job_title.as_deref(), Some("Senior Officer"));
    assert!(employee.is_active);
}
