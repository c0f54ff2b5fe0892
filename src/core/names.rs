use crate::models::{Entity, PERSON_LABEL};
use strsim::normalized_levenshtein;

/// Default minimum partial ratio for a fuzzy name match
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 70;

/// Keep PERSON entities of at least two words, upper-cased, in extractor order
pub fn candidate_names(entities: &[Entity]) -> Vec<String> {
    entities
        .iter()
        .filter(|e| e.label == PERSON_LABEL && e.text.split_whitespace().count() >= 2)
        .map(|e| e.text.trim().to_uppercase())
        .collect()
}

/// Best similarity (0-100) between the shorter string and any equally long
/// window of the longer one
///
/// Windows are compared with normalized Levenshtein similarity, so a name
/// embedded in a longer owner string ("JOHN SMITH" in "JOHN SMITH & MARY
/// SMITH") scores 100.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let width = shorter.chars().count();
    if width == 0 {
        return 0;
    }

    let longer: Vec<char> = longer.chars().collect();
    let mut best = 0.0_f64;
    for window in longer.windows(width) {
        let window: String = window.iter().collect();
        best = best.max(normalized_levenshtein(shorter, &window));
        if best >= 1.0 {
            break;
        }
    }

    (best * 100.0).round() as u8
}

/// First character of every word, order preserved
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Two-tier name comparator: fuzzy partial ratio, then exact initials
#[derive(Debug, Clone, Copy)]
pub struct NameMatcher {
    threshold: u8,
}

impl NameMatcher {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn matches(&self, candidate: &str, registry_owner: &str) -> bool {
        let candidate = candidate.trim().to_uppercase();
        let owner = registry_owner.trim().to_uppercase();
        if candidate.is_empty() || owner.is_empty() {
            return false;
        }

        let score = partial_ratio(&candidate, &owner);
        if score >= self.threshold {
            tracing::trace!("Fuzzy name match {} ~ {} ({})", candidate, owner, score);
            return true;
        }

        initials(&candidate) == initials(&owner)
    }

    /// First candidate accepted by `matches`, not the best-scoring one
    pub fn select_first<'a>(&self, candidates: &'a [String], registry_owner: &str) -> Option<&'a str> {
        candidates
            .iter()
            .map(String::as_str)
            .find(|candidate| self.matches(candidate, registry_owner))
    }
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}
