use crate::offer::{FlightOffer, OfferId};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("offer {id}: {field} is not a finite number")]
    NonFiniteValue { id: OfferId, field: &'static str },

    #[error("offer {id}: {field} is negative ({value})")]
    NegativeAmount {
        id: OfferId,
        field: &'static str,
        value: f64,
    },

    #[error("offer {id}: duration must be positive")]
    ZeroDuration { id: OfferId },

    #[error("offer id {0} appears more than once")]
    DuplicateId(OfferId),

    #[error("invalid filter criteria: {0}")]
    InvalidCriteria(String),

    #[error("invalid ranking weights: {0}")]
    InvalidWeights(String),
}

fn check_amount(id: &OfferId, field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue {
            id: id.clone(),
            field,
        });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount {
            id: id.clone(),
            field,
            value,
        });
    }
    Ok(())
}

pub fn validate_offer(offer: &FlightOffer) -> Result<(), ValidationError> {
    check_amount(&offer.id, "price", offer.price)?;
    if let Some(target) = offer.target_price {
        check_amount(&offer.id, "target_price", target)?;
    }
    for value in &offer.price_history {
        check_amount(&offer.id, "price_history", *value)?;
    }
    // Signed, but still has to be a number.
    if !offer.price_change_since_last_check.is_finite() {
        return Err(ValidationError::NonFiniteValue {
            id: offer.id.clone(),
            field: "price_change_since_last_check",
        });
    }
    if offer.duration_minutes == 0 {
        return Err(ValidationError::ZeroDuration {
            id: offer.id.clone(),
        });
    }
    Ok(())
}

/// Checks every offer and the uniqueness of ids across the list.
pub fn validate_offers(offers: &[FlightOffer]) -> Result<(), ValidationError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(offers.len());
    for offer in offers {
        validate_offer(offer)?;
        if !seen.insert(&*offer.id) {
            return Err(ValidationError::DuplicateId(offer.id.clone()));
        }
    }
    Ok(())
}
