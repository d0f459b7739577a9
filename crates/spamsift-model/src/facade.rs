//! Inference facade
//!
//! Stateless request/response mapping from raw email text to a
//! [`Prediction`]. Input is validated before the model is touched;
//! everything after that is the artifact's two capability methods and a
//! label lookup.

use spamsift_core::{ClassProbabilities, Error, Prediction, Result, SpamLabel};

use crate::classifier::SpamModel;

/// Classify one email text with the given model handle.
///
/// Confidence is the probability mass the model assigns to its own
/// predicted class, not `max` of the distribution by construction; for a
/// calibrated binary classifier the two coincide.
pub fn classify(text: &str, model: &dyn SpamModel) -> Result<Prediction> {
    if text.trim().is_empty() {
        return Err(Error::validation("email text is empty"));
    }

    let class_id = model.predict(text)?;
    let proba = model.predict_proba(text)?;

    let label = SpamLabel::from_class_id(class_id);
    let confidence = match label {
        SpamLabel::Spam => proba[1],
        SpamLabel::Ham => proba[0],
    };

    Ok(Prediction {
        label,
        confidence,
        probabilities: ClassProbabilities {
            ham: proba[0],
            spam: proba[1],
        },
    })
}
