//! Field validation applied before any store mutation.
//!
//! Required-field and invariant checks are explicit functions returning a
//! tagged result; the repository implementations call them before touching
//! the store, so a failed validation never leaves a partial write behind.

use bigdecimal::{BigDecimal, Zero};

use crate::error::{RepoError, RepoResult};

/// ## Summary
/// Checks the required customer fields: name and primary phone must be
/// non-empty.
///
/// ## Errors
/// Returns `RepoError::Validation` naming the offending field.
pub fn customer_fields(name: &str, phone: &str) -> RepoResult<()> {
    if name.is_empty() {
        return Err(RepoError::Validation(
            "customer name must not be empty".to_string(),
        ));
    }
    if phone.is_empty() {
        return Err(RepoError::Validation(
            "customer phone must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// ## Summary
/// Checks the required device fields: name and type must be non-empty.
///
/// ## Errors
/// Returns `RepoError::Validation` naming the offending field.
pub fn device_fields(name: &str, device_type: &str) -> RepoResult<()> {
    if name.is_empty() {
        return Err(RepoError::Validation(
            "device name must not be empty".to_string(),
        ));
    }
    if device_type.is_empty() {
        return Err(RepoError::Validation(
            "device type must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// ## Summary
/// Checks the required problem fields: name non-empty, price non-negative.
///
/// ## Errors
/// Returns `RepoError::Validation` naming the offending field.
pub fn problem_fields(name: &str, price: &BigDecimal) -> RepoResult<()> {
    if name.is_empty() {
        return Err(RepoError::Validation(
            "problem name must not be empty".to_string(),
        ));
    }
    if price < &BigDecimal::zero() {
        return Err(RepoError::Validation(
            "problem price must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// ## Summary
/// Checks the job problem-set cardinality: a job must reference at least
/// one problem at creation and through every update.
///
/// ## Errors
/// Returns `RepoError::InvalidReference` when the set is empty.
pub fn job_problems(problem_ids: &[i32]) -> RepoResult<()> {
    if problem_ids.is_empty() {
        return Err(RepoError::InvalidReference(
            "a job requires at least one problem".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_requires_name_and_phone() {
        assert!(customer_fields("a", "123").is_ok());
        assert!(matches!(
            customer_fields("", "123"),
            Err(RepoError::Validation(_))
        ));
        assert!(matches!(
            customer_fields("a", ""),
            Err(RepoError::Validation(_))
        ));
    }

    #[test]
    fn device_requires_name_and_type() {
        assert!(device_fields("iPhone 12", "phone").is_ok());
        assert!(device_fields("", "phone").is_err());
        assert!(device_fields("iPhone 12", "").is_err());
    }

    #[test]
    fn problem_price_must_not_be_negative() {
        assert!(problem_fields("screen", &BigDecimal::from(120)).is_ok());
        assert!(problem_fields("screen", &BigDecimal::zero()).is_ok());
        assert!(matches!(
            problem_fields("screen", &BigDecimal::from(-1)),
            Err(RepoError::Validation(_))
        ));
        assert!(problem_fields("", &BigDecimal::from(1)).is_err());
    }

    #[test]
    fn job_needs_at_least_one_problem() {
        assert!(job_problems(&[1]).is_ok());
        assert!(matches!(
            job_problems(&[]),
            Err(RepoError::InvalidReference(_))
        ));
    }
}
