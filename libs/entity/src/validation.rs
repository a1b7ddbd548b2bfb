#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("End date must not be before start date")]
    EndBeforeStart,
}

pub type Validation = Result<(), ValidationError>;

/// Trims `value` in place and rejects it when nothing is left.
pub(crate) fn required(value: &mut String, field: &'static str) -> Validation {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }

    Ok(())
}

pub(crate) fn required_patch(
    value: &mut Option<String>,
    field: &'static str,
) -> Validation {
    match value {
        Some(value) => required(value, field),
        None => Ok(()),
    }
}

pub(crate) fn non_negative(value: i32, field: &'static str) -> Validation {
    if value < 0 {
        return Err(ValidationError::Negative(field));
    }

    Ok(())
}

pub(crate) fn non_negative_price(value: f64, field: &'static str) -> Validation {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    if value < 0.0 {
        return Err(ValidationError::Negative(field));
    }

    Ok(())
}
