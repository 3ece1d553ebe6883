use super::error::DomainError;

pub(super) fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

/// Trims `value` and checks that the result has `1..=max_len` characters.
pub(super) fn normalize_required(
    field: &'static str,
    value: &str,
    max_len: usize,
    message: &'static str,
) -> Result<String, DomainError> {
    let value = value.trim();
    let len = value.chars().count();
    if len == 0 || len > max_len {
        return Err(DomainError::Validation { field, message });
    }
    Ok(value.to_string())
}
