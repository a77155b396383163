//! Traits for entity recognition.

use super::EntitySet;

/// Trait for classifying spans of an utterance into clinical categories.
///
/// Recognition never fails: input that matches nothing yields an empty
/// [`EntitySet`].
pub trait EntityRecognizer: Send + Sync + std::fmt::Debug {
    /// Recognize entities in a single utterance.
    fn recognize(&self, text: &str) -> EntitySet;

    /// Get the name of this recognizer for identification purposes.
    fn name(&self) -> &str;
}
