//! Integration tests for entity recognition and symptom scoring
//!
//! These tests drive the public recognizer and extractor APIs with realistic
//! patient phrasing:
//! - Negation markers, clause boundaries and apostrophe variants
//! - Category coverage (body parts, conditions, medications, timing)
//! - Confidence bounds and urgency tiers of scored symptoms
//! - Custom rule tables loaded from JSON

use medrag::config::{RecognitionConfig, ScoringConfig};
use medrag::knowledge::{KnowledgeBase, LexiconEntry, SymptomProfile};
use medrag::models::{DurationClass, EntityCategory, Severity, Urgency};
use medrag::recognition::{EntityRecognizer, LexiconRecognizer};
use medrag::symptoms::SymptomExtractor;

fn recognizer() -> LexiconRecognizer {
    LexiconRecognizer::new(&KnowledgeBase::default(), &RecognitionConfig::default())
}

fn extractor() -> SymptomExtractor {
    SymptomExtractor::new(&KnowledgeBase::default(), &ScoringConfig::default())
}

#[cfg(test)]
mod negation_tests {
    use super::*;

    #[test]
    fn test_curly_apostrophe_negation() {
        let set = recognizer().recognize("I don\u{2019}t have a fever");
        assert!(set.symptoms.is_empty());
        assert_eq!(set.negated, vec!["fever"]);
    }

    #[test]
    fn test_multi_word_marker() {
        let set = recognizer().recognize("There is no sign of bleeding");
        assert!(set.symptoms.is_empty());
        assert!(set.is_negated("bleeding"));
    }

    #[test]
    fn test_punctuation_ends_negation_scope() {
        let set = recognizer().recognize("No fever. Headache since yesterday");
        assert_eq!(set.symptoms, vec!["headache"]);
        assert_eq!(set.negated, vec!["fever"]);
        assert_eq!(set.temporal_expressions, vec!["since yesterday"]);
    }

    #[test]
    fn test_denial_list() {
        let set = recognizer().recognize("Patient denies nausea or vomiting");
        assert!(set.symptoms.is_empty());
        assert!(set.is_negated("nausea"));
        assert!(set.is_negated("vomiting"));
    }

    #[test]
    fn test_and_ends_negation_scope() {
        let set = recognizer().recognize("No fever and crushing chest pain");
        assert_eq!(set.symptoms, vec!["chest pain"]);
        assert_eq!(set.negated, vec!["fever"]);

        let set = recognizer().recognize("no fever or chills");
        assert!(set.symptoms.is_empty());
        assert!(set.is_negated("fever"));
        assert!(set.is_negated("chills"));
    }

    #[test]
    fn test_negated_urgency_cue() {
        let set = recognizer().recognize("This is not an emergency");
        assert!(set.urgency_indicators.is_empty());
        assert!(set.is_negated("emergency"));
    }

    #[test]
    fn test_body_parts_are_never_negated() {
        let set = recognizer().recognize("no pain in my knee");
        assert!(set.symptoms.is_empty());
        assert_eq!(set.body_parts, vec!["knee"]);
    }
}

#[cfg(test)]
mod coverage_tests {
    use super::*;

    #[test]
    fn test_mixed_categories() {
        let set = recognizer()
            .recognize("I took advil for the pain in my knee, I have arthritis");
        assert_eq!(set.medications, vec!["ibuprofen"]);
        assert_eq!(set.symptoms, vec!["pain"]);
        assert_eq!(set.body_parts, vec!["knee"]);
        assert_eq!(set.conditions, vec!["arthritis"]);
        assert_eq!(set.surfaces_of("ibuprofen"), vec!["advil"]);
    }

    #[test]
    fn test_duplicates_collapse_in_first_occurrence_order() {
        let set = recognizer().recognize("cough, fever and more coughing");
        assert_eq!(set.symptoms, vec!["cough", "fever"]);
        assert_eq!(set.surfaces_of("cough"), vec!["cough", "coughing"]);
        assert_eq!(set.first_position("fever"), Some(2));
    }

    #[test]
    fn test_severity_and_duration() {
        let set = recognizer().recognize("A severe headache that came on suddenly");
        assert_eq!(set.severity, Severity::Severe);
        assert_eq!(set.duration, DurationClass::Acute);
        assert!(set.has_timing());
    }

    #[test]
    fn test_emergency_wording() {
        let set = recognizer().recognize("I can't breathe, call 911");
        assert_eq!(
            set.urgency_indicators,
            vec!["cannot breathe", "call emergency services"]
        );
    }

    #[test]
    fn test_every_mention_is_kept() {
        let set = recognizer().recognize("no fever but a cough");
        assert_eq!(set.mentions.len(), 2);
        assert!(set.mentions[0].negated);
        assert_eq!(set.mentions[0].category, EntityCategory::Symptom);
        assert!(!set.mentions[1].negated);
    }
}

#[cfg(test)]
mod scoring_tests {
    use super::*;

    #[test]
    fn test_confidence_bounds_over_phrasebook() {
        let recognizer = recognizer();
        let extractor = extractor();
        let utterances = [
            "I have chest pain",
            "Severe crushing chest pain with sweating and nausea",
            "A mild headache and a bit of a cough",
            "I feel dizzy and tired, my stomach hurts",
            "Fever, chills, a sore throat and a terrible cough for days",
            "My face is drooping and I have slurred speech",
            "Hello, how are you?",
        ];

        for text in utterances {
            let entities = recognizer.recognize(text);
            for record in extractor.extract(&entities, text) {
                assert!(
                    (0.0..=1.0).contains(&record.confidence),
                    "{} out of range for {:?}",
                    record.confidence,
                    text
                );
                assert!(Urgency::ALL.contains(&record.urgency));
                assert!(record.occurrence_count >= 1);
                assert!(!record.matched_text.is_empty());
            }
        }
    }

    #[test]
    fn test_negated_symptoms_are_not_scored() {
        let text = "no fever, but I do have a cough";
        let entities = recognizer().recognize(text);
        let records = extractor().extract(&entities, text);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["cough"]);
    }

    #[test]
    fn test_stroke_signs_are_critical() {
        let text = "My face is drooping and I have slurred speech";
        let entities = recognizer().recognize(text);
        let records = extractor().extract(&entities, text);
        assert!(records.iter().all(|r| r.urgency == Urgency::Critical));
        assert_eq!(records.len(), 2);
    }
}

#[cfg(test)]
mod custom_knowledge_tests {
    use super::*;

    #[test]
    fn test_knowledge_base_from_json() {
        let mut knowledge = KnowledgeBase::empty();
        knowledge.lexicon.push(LexiconEntry::new(
            "ear pain",
            EntityCategory::Symptom,
            &["ear pain", "earache"],
        ));
        knowledge
            .symptoms
            .push(SymptomProfile::new("ear pain", 0.6, Urgency::Moderate));
        knowledge.negation_markers.push("no".to_string());

        let json = serde_json::to_string(&knowledge).unwrap();
        let loaded: KnowledgeBase = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, knowledge);

        let recognizer = LexiconRecognizer::new(&loaded, &RecognitionConfig::default());
        let extractor = SymptomExtractor::new(&loaded, &ScoringConfig::default());

        let text = "I have an earache and a headache";
        let entities = recognizer.recognize(text);
        assert_eq!(entities.symptoms, vec!["ear pain"]);

        let records = extractor.extract(&entities, text);
        assert_eq!(records.len(), 1);
        assert!((records[0].confidence - 0.6).abs() < 1e-6);
        assert_eq!(records[0].urgency, Urgency::Moderate);

        assert!(recognizer.recognize("no earache").symptoms.is_empty());
    }
}
