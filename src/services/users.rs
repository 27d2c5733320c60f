//! User account management: registration with argon2 hashing, login issuing
//! a JWT, and the explicit staff-number employee link.

use crate::{
    auth::{hash_password, verify_password, AuthService, TokenResponse},
    db::DbPool,
    entities::user_account::{self, UserRole},
    errors::ServiceError,
    events::{Event, EventSender},
    services::employees::EmployeeService,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserInput {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Staff number of the employee this account belongs to, if any.
    pub staff_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRoleInput {
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Account view without the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserAccountView {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub employee_id: Option<i64>,
    pub is_active: bool,
}

impl From<user_account::Model> for UserAccountView {
    fn from(account: user_account::Model) -> Self {
        Self {
            id: account.id,
            username: account.username,
            role: account.role,
            employee_id: account.employee_id,
            is_active: account.is_active,
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    auth: Arc<AuthService>,
    employees: EmployeeService,
}

impl UserService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        auth: Arc<AuthService>,
        employees: EmployeeService,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            auth,
            employees,
        }
    }

    /// Creates a login account. Every self-registered account starts with the
    /// staff role; elevation goes through `set_role`. When a staff number is
    /// supplied the account is linked to the matching employee record up
    /// front; an unknown staff number fails the registration rather than
    /// creating an orphan link.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(
        &self,
        input: RegisterUserInput,
    ) -> Result<UserAccountView, ServiceError> {
        input.validate()?;

        let existing = user_account::Entity::find()
            .filter(user_account::Column::Username.eq(input.username.as_str()))
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let employee_id = match input.staff_number.as_deref() {
            Some(staff_no) => match self.employees.find_by_staff_number(staff_no).await? {
                Some(employee) => Some(employee.id),
                None => {
                    return Err(ServiceError::InvalidInput(format!(
                        "No employee with staff number '{}'",
                        staff_no
                    )))
                }
            },
            None => None,
        };

        let password_hash =
            hash_password(&input.password).map_err(|e| ServiceError::HashError(e.to_string()))?;

        let now = Utc::now();
        let account = user_account::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            password_hash: Set(password_hash),
            role: Set(UserRole::Staff),
            employee_id: Set(employee_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;

        info!(account_id = %account.id, "Registered user account");
        let _ = self
            .event_sender
            .send(Event::UserRegistered(account.id))
            .await;

        Ok(account.into())
    }

    /// Verifies credentials and issues a JWT. Failures are deliberately
    /// indistinguishable between unknown username and wrong password.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<TokenResponse, ServiceError> {
        input.validate()?;

        let account = user_account::Entity::find()
            .filter(user_account::Column::Username.eq(input.username.as_str()))
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let Some(account) = account else {
            warn!("Login attempt for unknown username");
            return Err(ServiceError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        };

        if !account.is_active {
            return Err(ServiceError::Unauthorized(
                "Account is disabled".to_string(),
            ));
        }

        let ok = verify_password(&input.password, &account.password_hash)
            .map_err(|e| ServiceError::HashError(e.to_string()))?;
        if !ok {
            return Err(ServiceError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self
            .auth
            .generate_token(&account)
            .map_err(|e| ServiceError::JwtError(e.to_string()))?;

        let _ = self
            .event_sender
            .send(Event::UserLoggedIn(account.id))
            .await;

        Ok(token)
    }

    pub async fn get_account(&self, id: Uuid) -> Result<UserAccountView, ServiceError> {
        let account = user_account::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("User account {} not found", id)))?;
        Ok(account.into())
    }

    /// Changes an account's role. Exposed only behind the user-management
    /// permission; self-registration never reaches this path.
    #[instrument(skip(self))]
    pub async fn set_role(
        &self,
        id: Uuid,
        input: SetRoleInput,
    ) -> Result<UserAccountView, ServiceError> {
        let account = user_account::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("User account {} not found", id)))?;

        let mut active = account.into_active_model();
        active.role = Set(input.role);
        active.updated_at = Set(Utc::now());
        let account = active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(account_id = %account.id, role = %account.role, "Changed account role");
        Ok(account.into())
    }

    /// Disables an account; its tokens stop working at their natural expiry.
    pub async fn deactivate_account(&self, id: Uuid) -> Result<UserAccountView, ServiceError> {
        let account = user_account::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("User account {} not found", id)))?;

        let mut active = account.into_active_model();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        let account = active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(account.into())
    }
}
