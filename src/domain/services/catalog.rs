use crate::error::AppError;

/// Controlled vocabulary of session types trainers can offer.
pub const TRAINING_TYPES: &[&str] = &[
    "cardio",
    "strength",
    "yoga",
    "pilates",
    "zumba",
    "crossfit",
    "meditation",
    "nutrition",
];

pub fn is_known_type(label: &str) -> bool {
    TRAINING_TYPES.contains(&label)
}

/// Checks a requested type set against the vocabulary and the trainer's
/// offered catalogue. Returns the deduplicated set in request order.
pub fn validate_requested(
    requested: &[String],
    offered: &[String],
) -> Result<Vec<String>, AppError> {
    if requested.is_empty() {
        return Err(AppError::Validation(
            "At least one training type is required".into(),
        ));
    }

    let mut accepted: Vec<String> = Vec::with_capacity(requested.len());
    for label in requested {
        if !is_known_type(label) {
            return Err(AppError::Validation(format!(
                "Unknown training type '{label}'"
            )));
        }
        if !offered.iter().any(|o| o == label) {
            return Err(AppError::Validation(format!(
                "Trainer does not offer training type '{label}'"
            )));
        }
        if !accepted.contains(label) {
            accepted.push(label.clone());
        }
    }
    Ok(accepted)
}
