//! Symptom scoring and escalation.
//!
//! [`SymptomExtractor`] turns an [`EntitySet`](crate::recognition::EntitySet)
//! into confidence-scored [`SymptomRecord`]s and reports [`UrgencyEvent`]s for
//! dangerous symptom combinations and urgent wording.

mod extractor;
mod types;

pub use extractor::*;
pub use types::*;
