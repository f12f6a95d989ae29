//! Local checks run before registration hits the backend

use partsdesk_domain::constants::MIN_PASSWORD_LENGTH;
use partsdesk_domain::{PartsDeskError, RegisterRequest, Result};

/// First problem with `password`, if any.
pub fn password_problem(password: &str) -> Option<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(format!("password must be at least {MIN_PASSWORD_LENGTH} characters"));
    }
    if password.chars().any(char::is_whitespace) {
        return Some("password must not contain spaces".to_string());
    }
    None
}

/// Validate a registration form.
pub fn validate_registration(request: &RegisterRequest) -> Result<()> {
    if request.name.trim().is_empty() {
        return Err(PartsDeskError::InvalidInput("name is required".into()));
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(PartsDeskError::InvalidInput("a valid email is required".into()));
    }
    if request.password != request.confirm_password {
        return Err(PartsDeskError::InvalidInput("passwords do not match".into()));
    }
    if let Some(problem) = password_problem(&request.password) {
        return Err(PartsDeskError::InvalidInput(problem));
    }
    Ok(())
}

/// Validate login input before sending it.
pub fn validate_login(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(PartsDeskError::InvalidInput("username and password are required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_registration() {
        let request = RegisterRequest::seller("Ana", "ana@example.com", "secret1", "secret1");
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn rejects_mismatched_passwords_first() {
        let request = RegisterRequest::seller("Ana", "ana@example.com", "abc", "abd");
        let err = validate_registration(&request).unwrap_err();
        assert_eq!(err, PartsDeskError::InvalidInput("passwords do not match".into()));
    }

    #[test]
    fn password_rules() {
        assert!(password_problem("12345").unwrap().contains("at least 6"));
        assert!(password_problem("abc def").unwrap().contains("spaces"));
        assert!(password_problem("ñandú1").is_none());
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(validate_login("ana@example.com", "").is_err());
        assert!(validate_login(" ", "pw").is_err());
        assert!(validate_login("ana@example.com", "pw").is_ok());
    }
}
