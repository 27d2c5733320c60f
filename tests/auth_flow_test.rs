//! Account registration, employee linking and login.

mod common;

use common::TestApp;
use tendertrack_api::{
    entities::user_account::UserRole,
    errors::ServiceError,
    services::employees::CreateEmployeeInput,
    services::users::{LoginInput, RegisterUserInput},
};

fn register_input(username: &str, staff_number: Option<&str>) -> RegisterUserInput {
    RegisterUserInput {
        username: username.to_string(),
        password: "correct horse battery".to_string(),
        staff_number: staff_number.map(String::from),
    }
}

#[tokio::test]
async fn register_links_account_to_employee_by_staff_number() {
    let app = TestApp::new().await;

    let employee = app
        .state
        .services
        .employees
        .create_employee(CreateEmployeeInput {
            employee_id: "E200".to_string(),
            first_name: "Amina".to_string(),
            last_name: "Odhiambo".to_string(),
            email: "amina.odhiambo@example.com".to_string(),
            phone: None,
            department_id: None,
            division_id: None,
            section_id: None,
            job_title: None,
        })
        .await
        .expect("create employee");

    let account = app
        .state
        .services
        .users
        .register(register_input("amina", Some("E200")))
        .await
        .expect("register");
    assert_eq!(account.employee_id, Some(employee.id));
    assert_eq!(account.role, UserRole::Staff);

    let err = app
        .state
        .services
        .users
        .register(register_input("ghost", Some("E999")))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let app = TestApp::new().await;

    app.state
        .services
        .users
        .register(register_input("kiptoo", None))
        .await
        .expect("register");

    let err = app
        .state
        .services
        .users
        .register(register_input("kiptoo", None))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn login_issues_token_and_rejects_bad_credentials() {
    let app = TestApp::new().await;

    let account = app
        .state
        .services
        .users
        .register(register_input("wanjiru", None))
        .await
        .expect("register");

    let token = app
        .state
        .services
        .users
        .login(LoginInput {
            username: "wanjiru".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .expect("login");
    assert_eq!(token.token_type, "Bearer");
    assert!(!token.access_token.is_empty());

    // Token validates and carries the staff role's permissions.
    let claims = app
        .state
        .auth_service
        .validate_token(&token.access_token)
        .expect("validate token");
    assert_eq!(claims.username, "wanjiru");
    assert_eq!(claims.role, "staff");
    assert!(claims
        .permissions
        .iter()
        .any(|p| p == "requisitions:create"));

    let err = app
        .state
        .services
        .users
        .login(LoginInput {
            username: "wanjiru".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));

    // Deactivated accounts cannot log in.
    app.state
        .services
        .users
        .deactivate_account(account.id)
        .await
        .expect("deactivate");
    let err = app
        .state
        .services
        .users
        .login(LoginInput {
            username: "wanjiru".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
}
