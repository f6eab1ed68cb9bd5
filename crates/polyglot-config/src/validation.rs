//! Custom field validators

use validator::ValidationError;

/// Validate a language code: non-empty, no whitespace
pub fn validate_language_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::new("empty_language_code"));
    }
    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("language_code_whitespace"));
    }
    Ok(())
}

/// Validate every entry of a language code list
pub fn validate_language_list(codes: &[String]) -> Result<(), ValidationError> {
    codes.iter().try_for_each(|code| validate_language_code(code))
}

/// Validate a file extension: non-empty, ASCII alphanumeric, no leading dot
pub fn validate_file_extension(extension: &str) -> Result<(), ValidationError> {
    if extension.is_empty() {
        return Err(ValidationError::new("empty_file_extension"));
    }
    if !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("invalid_file_extension"));
    }
    Ok(())
}
