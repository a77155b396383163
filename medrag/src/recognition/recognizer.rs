//! Lexicon-driven entity recognizer with negation awareness.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::{EntityRecognizer, EntitySet, Mention};
use crate::config::RecognitionConfig;
use crate::knowledge::{KnowledgeBase, LexiconEntry};
use crate::models::{DurationClass, EntityCategory, Severity};

lazy_static! {
    static ref TOKEN_REGEX: Regex =
        Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}]+)*|[.,;:!?]").unwrap();
}

/// A normalized token of an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lower-cased token text
    pub text: String,
    /// Whether the token is clause-boundary punctuation
    pub boundary: bool,
}

/// Case-fold, unify apostrophes and split into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized = text
        .to_lowercase()
        .replace(['\u{2019}', '\u{2018}', '\u{02BC}', '`'], "'");

    TOKEN_REGEX
        .find_iter(&normalized)
        .map(|m| {
            let text = m.as_str();
            Token {
                boundary: matches!(text, "." | "," | ";" | ":" | "!" | "?"),
                text: text.to_string(),
            }
        })
        .collect()
}

/// Word tokens of a lexicon phrase, or `None` if the phrase has none or
/// contains punctuation.
pub(crate) fn phrase_tokens(phrase: &str) -> Option<Vec<String>> {
    let tokens = tokenize(phrase);
    if tokens.is_empty() || tokens.iter().any(|t| t.boundary) {
        return None;
    }
    Some(tokens.into_iter().map(|t| t.text).collect())
}

fn contains_phrase(haystack: &[&str], needle: &[String]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.iter().zip(needle).all(|(a, b)| *a == b))
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

#[derive(Debug)]
struct CompiledAlias {
    tokens: Vec<String>,
    entry: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    start: usize,
    end: usize,
    entry: usize,
    priority: u8,
}

impl Candidate {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Recognizer backed by the knowledge base's alias table.
#[derive(Debug)]
pub struct LexiconRecognizer {
    name: String,
    entries: Vec<LexiconEntry>,
    /// Aliases keyed by their first token
    index: HashMap<String, Vec<CompiledAlias>>,
    negation_markers: Vec<Vec<String>>,
    clause_breakers: HashSet<String>,
    duration_markers: Vec<(DurationClass, Vec<Vec<String>>)>,
    negation_window: usize,
    max_input_chars: usize,
}

impl LexiconRecognizer {
    /// Compile the alias table of a knowledge base.
    pub fn new(knowledge: &KnowledgeBase, config: &RecognitionConfig) -> Self {
        let mut index: HashMap<String, Vec<CompiledAlias>> = HashMap::new();
        for (entry_idx, entry) in knowledge.lexicon.iter().enumerate() {
            for alias in &entry.aliases {
                let Some(tokens) = phrase_tokens(alias) else {
                    debug!(alias = %alias, canonical = %entry.canonical, "Skipping alias without word tokens");
                    continue;
                };
                index
                    .entry(tokens[0].clone())
                    .or_default()
                    .push(CompiledAlias {
                        tokens,
                        entry: entry_idx,
                    });
            }
        }

        let compile_all =
            |phrases: &[String]| -> Vec<Vec<String>> { phrases.iter().filter_map(|p| phrase_tokens(p)).collect() };

        let duration_markers = knowledge
            .duration
            .in_priority_order()
            .into_iter()
            .map(|(class, phrases)| (class, compile_all(phrases)))
            .collect();

        Self {
            name: "lexicon".to_string(),
            entries: knowledge.lexicon.clone(),
            index,
            negation_markers: compile_all(&knowledge.negation_markers),
            clause_breakers: knowledge
                .clause_breakers
                .iter()
                .map(|word| word.to_lowercase())
                .collect(),
            duration_markers,
            negation_window: config.negation_window,
            max_input_chars: config.max_input_chars,
        }
    }

    /// Every alias occurrence in the token stream.
    fn candidates(&self, tokens: &[Token]) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for (start, token) in tokens.iter().enumerate() {
            if token.boundary {
                continue;
            }
            let Some(aliases) = self.index.get(&token.text) else {
                continue;
            };
            for alias in aliases {
                let end = start + alias.tokens.len();
                if end > tokens.len() {
                    continue;
                }
                let matched = tokens[start..end]
                    .iter()
                    .zip(&alias.tokens)
                    .all(|(token, expected)| !token.boundary && token.text == *expected);
                if matched {
                    candidates.push(Candidate {
                        start,
                        end,
                        entry: alias.entry,
                        priority: self.entries[alias.entry].category.overlap_priority(),
                    });
                }
            }
        }
        candidates
    }

    /// Longest spans first, then category priority; each token used once.
    fn select(mut candidates: Vec<Candidate>, token_count: usize) -> Vec<Candidate> {
        candidates.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then(b.priority.cmp(&a.priority))
                .then(a.start.cmp(&b.start))
                .then(a.entry.cmp(&b.entry))
        });

        let mut covered = vec![false; token_count];
        let mut accepted = Vec::new();
        for candidate in candidates {
            if covered[candidate.start..candidate.end].iter().any(|c| *c) {
                continue;
            }
            covered[candidate.start..candidate.end]
                .iter_mut()
                .for_each(|c| *c = true);
            accepted.push(candidate);
        }

        accepted.sort_by_key(|c| c.start);
        accepted
    }

    /// Whether a negation marker precedes `start` within the window and the
    /// same clause.
    fn is_negated(&self, tokens: &[Token], start: usize) -> bool {
        let clause_start = tokens[..start]
            .iter()
            .rposition(|t| t.boundary || self.clause_breakers.contains(&t.text))
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let window_start = clause_start.max(start.saturating_sub(self.negation_window));
        let window: Vec<&str> = tokens[window_start..start]
            .iter()
            .map(|t| t.text.as_str())
            .collect();

        self.negation_markers
            .iter()
            .any(|marker| contains_phrase(&window, marker))
    }

    fn classify_duration(&self, tokens: &[Token]) -> DurationClass {
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| !t.boundary)
            .map(|t| t.text.as_str())
            .collect();

        self.duration_markers
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| contains_phrase(&words, m)))
            .map(|(class, _)| *class)
            .unwrap_or_default()
    }
}

impl EntityRecognizer for LexiconRecognizer {
    fn recognize(&self, text: &str) -> EntitySet {
        let tokens = tokenize(truncate_chars(text, self.max_input_chars));
        let accepted = Self::select(self.candidates(&tokens), tokens.len());

        let mut set = EntitySet::default();
        let mut negated: Vec<String> = Vec::new();

        for candidate in accepted {
            let entry = &self.entries[candidate.entry];
            let is_negated =
                entry.category.is_negatable() && self.is_negated(&tokens, candidate.start);
            let surface = tokens[candidate.start..candidate.end]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            if is_negated {
                push_unique(&mut negated, &entry.canonical);
            } else if entry.category == EntityCategory::Severity {
                if let Ok(severity) = entry.canonical.parse::<Severity>() {
                    set.severity = set.severity.max(severity);
                }
            } else if let Some(list) = set.list_mut(entry.category) {
                let value = if entry.category == EntityCategory::Temporal {
                    &surface
                } else {
                    &entry.canonical
                };
                push_unique(list, value);
            }

            set.mentions.push(Mention {
                canonical: entry.canonical.clone(),
                category: entry.category,
                surface,
                token_start: candidate.start,
                token_end: candidate.end,
                negated: is_negated,
            });
        }

        // A term asserted anywhere in the utterance is not reported as negated.
        negated.retain(|term| {
            !set
                .mentions
                .iter()
                .any(|m| !m.negated && m.canonical == *term)
        });
        set.negated = negated;
        set.duration = self.classify_duration(&tokens);

        debug!(
            recognizer = %self.name,
            tokens = tokens.len(),
            mentions = set.mentions.len(),
            symptoms = set.symptoms.len(),
            negated = set.negated.len(),
            "Recognized entities"
        );

        set
    }

    fn name(&self) -> &str {
        &self.name
    }
}
