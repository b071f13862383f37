use crate::error::AppError;
use crate::models::User;

pub const NOT_ENOUGH_PERMISSIONS: &str = "Not enough permissions";

/// An account may only modify or remove itself.
///
/// Evaluated before any write so a refused request leaves storage untouched.
pub fn ensure_account_owner(current: &User, target_id: i32) -> Result<(), AppError> {
    if current.id == target_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(NOT_ENOUGH_PERMISSIONS.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(id: i32) -> User {
        let now = Utc::now();
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            password: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_owner_is_allowed() {
        assert!(ensure_account_owner(&account(4), 4).is_ok());
    }

    #[test]
    fn test_other_account_is_forbidden() {
        match ensure_account_owner(&account(4), 5) {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, NOT_ENOUGH_PERMISSIONS),
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }
}
