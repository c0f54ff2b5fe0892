use regex::Regex;
use thiserror::Error;

/// Street-type suffixes recognised by default
pub const DEFAULT_STREET_TYPES: &[&str] = &[
    "RD", "ST", "AVE", "DR", "LN", "BLVD", "ROAD", "LANE", "COURT", "PL", "PLACE", "TRAIL", "WAY",
    "CIR", "CIRCLE", "PKWY", "PARKWAY",
];

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("street type vocabulary is empty")]
    EmptyVocabulary,

    #[error("invalid street type {0:?}: must be a single non-empty word")]
    InvalidStreetType(String),

    #[error("failed to compile address pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Finds the first street address in deed text
///
/// An address is a 2-6 digit house number, one or more uppercase
/// alphanumeric/hyphen words and a word starting with a street type from
/// the vocabulary, all on one line. The street type may be a prefix of the
/// final word, so `123 MAIN STREET` yields `123 MAIN ST`. Within a line the
/// street name extends to the last street type it can reach, which keeps
/// `100 N ST MARYS ST` whole.
///
/// Only the leftmost address is returned, so a deed that lists the
/// grantor's address before the property's yields the grantor's.
#[derive(Debug, Clone)]
pub struct AddressLocator {
    pattern: Regex,
}

impl AddressLocator {
    pub fn new<S: AsRef<str>>(street_types: &[S]) -> Result<Self, LocatorError> {
        if street_types.is_empty() {
            return Err(LocatorError::EmptyVocabulary);
        }

        let mut alternatives = Vec::with_capacity(street_types.len());
        for street_type in street_types {
            let word = street_type.as_ref().trim();
            if word.is_empty() || word.contains(char::is_whitespace) {
                return Err(LocatorError::InvalidStreetType(street_type.as_ref().to_string()));
            }
            alternatives.push(regex::escape(&word.to_uppercase()));
        }

        let pattern = Regex::new(&format!(
            r"\b\d{{2,6}}(?:[ \t]+[A-Z0-9\-]+)+[ \t]+(?:{})",
            alternatives.join("|")
        ))?;

        Ok(Self { pattern })
    }

    pub fn with_default_street_types() -> Self {
        // The default vocabulary is plain words, so compilation cannot fail
        Self::new(DEFAULT_STREET_TYPES).expect("default street types form a valid pattern")
    }

    /// Return the first address in `text`, upper-cased
    pub fn locate(&self, text: &str) -> Option<String> {
        let upper = text.to_uppercase();
        self.pattern.find(&upper).map(|m| m.as_str().to_string())
    }
}

impl Default for AddressLocator {
    fn default() -> Self {
        Self::with_default_street_types()
    }
}
