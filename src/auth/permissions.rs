/*!
 * # Permissions Module
 *
 * Permission strings are `resource:action`. Role grants are fixed at
 * compile time; the admin role bypasses permission checks entirely in the
 * middleware.
 */

use crate::entities::user_account::UserRole;

/// Common permission string constants for compile-time safety
pub mod consts {
    // Requisitions
    pub const REQUISITIONS_READ: &str = "requisitions:read";
    pub const REQUISITIONS_CREATE: &str = "requisitions:create";
    pub const REQUISITIONS_UPDATE: &str = "requisitions:update";
    pub const REQUISITIONS_DELETE: &str = "requisitions:delete";

    // Tenders
    pub const TENDERS_READ: &str = "tenders:read";
    pub const TENDERS_CREATE: &str = "tenders:create";
    pub const TENDERS_UPDATE: &str = "tenders:update";
    pub const TENDERS_DELETE: &str = "tenders:delete";

    // Contracts
    pub const CONTRACTS_READ: &str = "contracts:read";
    pub const CONTRACTS_CREATE: &str = "contracts:create";
    pub const CONTRACTS_UPDATE: &str = "contracts:update";
    pub const CONTRACTS_DELETE: &str = "contracts:delete";

    // Employee directory
    pub const EMPLOYEES_READ: &str = "employees:read";
    pub const EMPLOYEES_MANAGE: &str = "employees:manage";

    // Org hierarchy and lookup tables
    pub const ORG_READ: &str = "org:read";
    pub const ORG_MANAGE: &str = "org:manage";

    // Bulk import
    pub const IMPORTS_RUN: &str = "imports:run";

    // Dashboard
    pub const DASHBOARD_READ: &str = "dashboard:read";

    // Account administration
    pub const USERS_MANAGE: &str = "users:manage";
}

use consts::*;

const VIEWER_PERMISSIONS: &[&str] = &[
    REQUISITIONS_READ,
    TENDERS_READ,
    CONTRACTS_READ,
    EMPLOYEES_READ,
    ORG_READ,
    DASHBOARD_READ,
];

const STAFF_PERMISSIONS: &[&str] = &[
    REQUISITIONS_READ,
    REQUISITIONS_CREATE,
    REQUISITIONS_UPDATE,
    TENDERS_READ,
    TENDERS_CREATE,
    TENDERS_UPDATE,
    CONTRACTS_READ,
    CONTRACTS_CREATE,
    CONTRACTS_UPDATE,
    EMPLOYEES_READ,
    ORG_READ,
    DASHBOARD_READ,
];

const MANAGER_PERMISSIONS: &[&str] = &[
    REQUISITIONS_READ,
    REQUISITIONS_CREATE,
    REQUISITIONS_UPDATE,
    REQUISITIONS_DELETE,
    TENDERS_READ,
    TENDERS_CREATE,
    TENDERS_UPDATE,
    TENDERS_DELETE,
    CONTRACTS_READ,
    CONTRACTS_CREATE,
    CONTRACTS_UPDATE,
    CONTRACTS_DELETE,
    EMPLOYEES_READ,
    EMPLOYEES_MANAGE,
    ORG_READ,
    ORG_MANAGE,
    IMPORTS_RUN,
    DASHBOARD_READ,
];

/// Permissions granted to a role. Admin is empty on purpose: the permission
/// middleware short-circuits for admins.
pub fn role_permissions(role: UserRole) -> &'static [&'static str] {
    match role {
        UserRole::Admin => &[],
        UserRole::Manager => MANAGER_PERMISSIONS,
        UserRole::Staff => STAFF_PERMISSIONS,
        UserRole::Viewer => VIEWER_PERMISSIONS,
    }
}

/// Format a permission string
pub fn format_permission(resource: &str, action: &str) -> String {
    format!("{}:{}", resource, action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_cannot_write() {
        let perms = role_permissions(UserRole::Viewer);
        assert!(perms.contains(&REQUISITIONS_READ));
        assert!(!perms.contains(&REQUISITIONS_CREATE));
        assert!(!perms.contains(&IMPORTS_RUN));
    }

    #[test]
    fn staff_cannot_delete_or_import() {
        let perms = role_permissions(UserRole::Staff);
        assert!(perms.contains(&TENDERS_UPDATE));
        assert!(!perms.contains(&TENDERS_DELETE));
        assert!(!perms.contains(&IMPORTS_RUN));
    }

    #[test]
    fn manager_can_import_and_manage_org() {
        let perms = role_permissions(UserRole::Manager);
        assert!(perms.contains(&IMPORTS_RUN));
        assert!(perms.contains(&ORG_MANAGE));
        assert!(!perms.contains(&USERS_MANAGE));
    }
}
