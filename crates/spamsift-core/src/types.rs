//! Prediction value types
//!
//! The classifier is binary: class 0 is ham, class 1 is spam. A
//! [`Prediction`] is created per request and discarded after rendering.

use serde::{Deserialize, Serialize};

/// Binary classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpamLabel {
    /// Legitimate (non-spam) email
    Ham,
    /// Unsolicited email
    Spam,
}

impl SpamLabel {
    /// Map a model class id to a label: 1 is spam, anything else is ham.
    pub fn from_class_id(id: u32) -> Self {
        if id == 1 {
            Self::Spam
        } else {
            Self::Ham
        }
    }

    /// Human-readable label text shown to the user
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ham => "Ham (Non spam)",
            Self::Spam => "Spam",
        }
    }
}

impl std::fmt::Display for SpamLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability mass per class, in class-id order (ham = 0, spam = 1).
///
/// A well-formed model produces a distribution summing to 1.0; that is a
/// property of the model, not something enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub ham: f64,
    pub spam: f64,
}

/// Result of classifying one email text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label
    pub label: SpamLabel,

    /// Probability mass the model assigns to its own predicted class
    pub confidence: f64,

    /// Full two-class distribution
    pub probabilities: ClassProbabilities,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_id_mapping() {
        assert_eq!(SpamLabel::from_class_id(1), SpamLabel::Spam);
        assert_eq!(SpamLabel::from_class_id(0), SpamLabel::Ham);
        // Anything that is not the spam class falls back to ham.
        assert_eq!(SpamLabel::from_class_id(7), SpamLabel::Ham);
    }

    #[test]
    fn label_display_text() {
        assert_eq!(SpamLabel::Spam.to_string(), "Spam");
        assert_eq!(SpamLabel::Ham.to_string(), "Ham (Non spam)");
    }

    #[test]
    fn prediction_serializes_for_the_api() {
        let prediction = Prediction {
            label: SpamLabel::Spam,
            confidence: 0.98,
            probabilities: ClassProbabilities {
                ham: 0.02,
                spam: 0.98,
            },
        };

        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["label"], "spam");
        assert_eq!(json["probabilities"]["ham"], 0.02);
    }
}
