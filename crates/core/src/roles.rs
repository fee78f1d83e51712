//! Canonical role names used in JWT claims and the `users.role` column.

/// Full administrative access, including product deletion.
pub const ROLE_ADMIN: &str = "admin";

/// May manage warehouses, products, stock adjustments, and alerts.
pub const ROLE_MANAGER: &str = "manager";

/// Read-only access. The default role for self-registered users.
pub const ROLE_VIEWER: &str = "viewer";

/// Returns `true` if `role` is one of the known role names.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_ADMIN | ROLE_MANAGER | ROLE_VIEWER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role(ROLE_ADMIN));
        assert!(is_valid_role(ROLE_MANAGER));
        assert!(is_valid_role(ROLE_VIEWER));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(!is_valid_role("superuser"));
        assert!(!is_valid_role(""));
        assert!(!is_valid_role("Admin"));
    }
}
