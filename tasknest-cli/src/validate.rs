/// Input validation for the CLI
///
/// Mirrors the rules the web API enforces at its request boundary: titles
/// are 1-200 characters, user IDs are non-empty and not all whitespace.
/// Lengths count characters, not bytes.

use crate::error::CliError;

/// Validates a task title
///
/// # Errors
///
/// Returns a validation error if the title is empty or longer than 200
/// characters.
pub fn validate_title(title: &str) -> Result<(), CliError> {
    if title.is_empty() {
        return Err(CliError::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > 200 {
        return Err(CliError::Validation(
            "Title must be 1-200 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validates a user ID
///
/// # Errors
///
/// Returns a validation error if the user ID is empty or whitespace-only.
pub fn validate_user_id(user_id: &str) -> Result<(), CliError> {
    if user_id.trim().is_empty() {
        return Err(CliError::Validation("User ID cannot be empty".to_string()));
    }
    Ok(())
}
