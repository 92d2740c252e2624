//! Input validation for account forms

use crate::models::Credentials;

pub const MAX_USERNAME_LENGTH: usize = 150;
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username must be at most {} characters long",
            MAX_USERNAME_LENGTH
        ));
    }

    if username.chars().any(char::is_control) {
        return Err("Username must not contain control characters".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at most {} bytes long",
            MAX_PASSWORD_LENGTH
        ));
    }

    Ok(())
}

/// Extract both credential fields, rejecting missing or invalid ones
pub fn validate_credentials(credentials: &Credentials) -> Result<(String, String), String> {
    let username = credentials.username.as_deref().unwrap_or_default();
    let password = credentials.password.as_deref().unwrap_or_default();

    validate_username(username)?;
    validate_password(password)?;

    Ok((username.to_string(), password.to_string()))
}
