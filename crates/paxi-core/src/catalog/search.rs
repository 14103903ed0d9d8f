//! Doctor directory search.
//!
//! Matches the directory page behaviour: a case-insensitive substring match
//! over name, clinic and specializations, combined with a visit-type filter.
//! Query tokens that miss every substring fall back to Jaro-Winkler so a
//! typo like "dermatolgy" still finds the dermatologist.

use strsim::jaro_winkler;

use crate::models::{Doctor, VisitType};

/// Minimum Jaro-Winkler similarity for a fuzzy token match.
const FUZZY_THRESHOLD: f64 = 0.9;

/// Tokens shorter than this only match as substrings.
const MIN_FUZZY_TOKEN_LEN: usize = 4;

/// Filter for the doctor directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorQuery {
    /// Free text matched against name, clinic and specializations
    pub text: Option<String>,
    /// Only doctors offering this visit type
    pub visit_type: Option<VisitType>,
    /// Hide doctors that are not taking new bookings
    pub accepting_only: bool,
}

impl DoctorQuery {
    /// Query matching every doctor.
    pub fn all() -> Self {
        Self::default()
    }

    /// Free-text query.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Restrict to a visit type.
    pub fn with_visit_type(mut self, visit_type: VisitType) -> Self {
        self.visit_type = Some(visit_type);
        self
    }

    /// Restrict to doctors accepting bookings.
    pub fn accepting_only(mut self) -> Self {
        self.accepting_only = true;
        self
    }

    /// Whether `doctor` passes every filter.
    pub fn matches(&self, doctor: &Doctor) -> bool {
        if let Some(visit_type) = self.visit_type {
            if !doctor.supports(visit_type) {
                return false;
            }
        }
        if self.accepting_only && !doctor.accepting_bookings {
            return false;
        }
        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => matches_text(doctor, &text.to_lowercase()),
        }
    }
}

fn haystack(doctor: &Doctor) -> Vec<String> {
    let mut fields = vec![doctor.name.to_lowercase(), doctor.clinic.to_lowercase()];
    fields.extend(doctor.specializations.iter().map(|s| s.to_lowercase()));
    fields
}

fn matches_text(doctor: &Doctor, needle: &str) -> bool {
    let fields = haystack(doctor);
    if fields.iter().any(|field| field.contains(needle)) {
        return true;
    }

    let words: Vec<&str> = fields
        .iter()
        .flat_map(|field| field.split(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();

    needle.split_whitespace().all(|token| {
        words.iter().any(|word| {
            word.contains(token)
                || (token.chars().count() >= MIN_FUZZY_TOKEN_LEN
                    && jaro_winkler(word, token) >= FUZZY_THRESHOLD)
        })
    })
}
