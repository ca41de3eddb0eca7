use super::entity::Card;
use crate::domain::{DomainError, DomainResult};

/// Validates all Card invariants
pub fn validate_card(card: &Card) -> DomainResult<()> {
    validate_name(&card.name)?;
    validate_amount(card.amount)?;
    validate_image_reference(card.image_front.as_deref())?;
    validate_image_reference(card.image_back.as_deref())?;
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Card name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_amount(amount: u32) -> DomainResult<()> {
    if amount == 0 {
        return Err(DomainError::InvariantViolation(
            "Card amount must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Image references are bare file names resolved against the image directory
fn validate_image_reference(reference: Option<&str>) -> DomainResult<()> {
    if let Some(name) = reference {
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(DomainError::InvariantViolation(format!(
                "Image reference {:?} must be a bare file name",
                name
            )));
        }
    }
    Ok(())
}

/// Invariants that must hold true for Card domain:
///
/// 1. Identity is assigned by the container, never by the caller
/// 2. Name cannot be empty
/// 3. Amount is at least one
/// 4. Image references never point outside the image directory
