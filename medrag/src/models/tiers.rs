//! Ordered classification enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency tier of a symptom, an escalation event or a whole session.
///
/// The declaration order is the total order `low < moderate < high < critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Nothing that needs prompt attention
    #[default]
    Low = 0,

    /// Worth monitoring or a routine appointment
    Moderate = 1,

    /// Should be seen soon
    High = 2,

    /// Possible emergency
    Critical = 3,
}

impl Urgency {
    /// All tiers in ascending order.
    pub const ALL: [Urgency; 4] = [
        Urgency::Low,
        Urgency::Moderate,
        Urgency::High,
        Urgency::Critical,
    ];

    /// Get a string representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Moderate => "moderate",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }

    /// Return the higher of the two tiers.
    pub fn raise(self, other: Urgency) -> Urgency {
        self.max(other)
    }

    /// Whether this tier warrants an explicit urgency directive in the prompt.
    pub fn needs_directive(&self) -> bool {
        *self >= Urgency::High
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "moderate" | "medium" => Ok(Urgency::Moderate),
            "high" => Ok(Urgency::High),
            "critical" => Ok(Urgency::Critical),
            _ => Err(format!("Invalid urgency: {}", s)),
        }
    }
}

/// Severity qualifier found in an utterance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No severity marker present
    #[default]
    Unspecified,
    /// "mild", "slight", ...
    Mild,
    /// "moderate", "uncomfortable", ...
    Moderate,
    /// "severe", "unbearable", ...
    Severe,
}

impl Severity {
    /// Get a string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unspecified => "unspecified",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }

    /// Whether a severity qualifier was present at all.
    pub fn is_specified(&self) -> bool {
        *self != Severity::Unspecified
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unspecified" => Ok(Severity::Unspecified),
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

/// Onset classification derived from temporal wording.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    /// No duration marker present
    #[default]
    Unspecified,
    /// Minutes to hours
    Acute,
    /// Days to about a week
    Subacute,
    /// Weeks or longer
    Chronic,
}

impl DurationClass {
    /// Get a string representation of the class.
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationClass::Unspecified => "unspecified",
            DurationClass::Acute => "acute",
            DurationClass::Subacute => "subacute",
            DurationClass::Chronic => "chronic",
        }
    }
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category a lexicon alias classifies a span into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// Complaints such as "chest pain" or "nausea"
    Symptom,
    /// Anatomical regions
    BodyPart,
    /// Named conditions or diagnoses
    Condition,
    /// Drugs and treatment devices
    Medication,
    /// Time expressions ("an hour ago", "since yesterday")
    Temporal,
    /// Severity qualifiers
    Severity,
    /// Phrases signalling an emergency ("call 911")
    UrgencyCue,
}

impl EntityCategory {
    /// Get a string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Symptom => "symptom",
            EntityCategory::BodyPart => "body_part",
            EntityCategory::Condition => "condition",
            EntityCategory::Medication => "medication",
            EntityCategory::Temporal => "temporal",
            EntityCategory::Severity => "severity",
            EntityCategory::UrgencyCue => "urgency_cue",
        }
    }

    /// Whether a preceding negation marker can exclude a match of this category.
    pub fn is_negatable(&self) -> bool {
        matches!(
            self,
            EntityCategory::Symptom
                | EntityCategory::Condition
                | EntityCategory::Medication
                | EntityCategory::UrgencyCue
        )
    }

    /// Tie-break priority for equally long overlapping matches (higher wins).
    pub fn overlap_priority(&self) -> u8 {
        match self {
            EntityCategory::UrgencyCue => 100,
            EntityCategory::Symptom => 90,
            EntityCategory::Condition => 80,
            EntityCategory::Medication => 70,
            EntityCategory::BodyPart => 60,
            EntityCategory::Temporal => 50,
            EntityCategory::Severity => 40,
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_total_order() {
        assert!(Urgency::Low < Urgency::Moderate);
        assert!(Urgency::Moderate < Urgency::High);
        assert!(Urgency::High < Urgency::Critical);
        assert_eq!(Urgency::Moderate.raise(Urgency::Critical), Urgency::Critical);
        assert_eq!(Urgency::High.raise(Urgency::Low), Urgency::High);
    }

    #[test]
    fn test_urgency_parsing() {
        assert_eq!("Critical".parse::<Urgency>().unwrap(), Urgency::Critical);
        assert_eq!("medium".parse::<Urgency>().unwrap(), Urgency::Moderate);
        assert!("urgent".parse::<Urgency>().is_err());
    }

    #[test]
    fn test_urgency_serializes_lowercase() {
        let json = serde_json::to_string(&Urgency::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_negatable_categories() {
        assert!(EntityCategory::Symptom.is_negatable());
        assert!(EntityCategory::UrgencyCue.is_negatable());
        assert!(!EntityCategory::Temporal.is_negatable());
        assert!(!EntityCategory::Severity.is_negatable());
        assert!(!EntityCategory::BodyPart.is_negatable());
    }
}
