//! Intake questionnaire editing.

use crate::catalog::{canonical_option, KEY_SIGNS, PROBLEM_CATEGORIES, PROGRESSION_OPTIONS};
use crate::models::{IntakeData, MAX_SEVERITY, MIN_SEVERITY};

use super::{WizardError, WizardResult};

/// Intake form state, built incrementally during the intake step.
///
/// Multi-select answers only accept values from the option lists and are
/// stored in their canonical spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    data: IntakeData,
}

impl IntakeForm {
    /// Empty form starting at `severity` (clamped into range).
    pub fn new(severity: u8) -> Self {
        Self {
            data: IntakeData {
                severity: severity.clamp(MIN_SEVERITY, MAX_SEVERITY),
                ..IntakeData::default()
            },
        }
    }

    pub fn data(&self) -> &IntakeData {
        &self.data
    }

    pub fn into_data(self) -> IntakeData {
        self.data
    }

    /// Toggle a problem category. Returns whether it is now selected.
    pub fn toggle_problem_category(&mut self, category: &str) -> WizardResult<bool> {
        let canonical = canonical_option(PROBLEM_CATEGORIES, category)
            .ok_or_else(|| WizardError::UnknownOption(category.to_string()))?;
        Ok(toggle(&mut self.data.problem_categories, canonical))
    }

    /// Toggle a key sign. Returns whether it is now selected.
    pub fn toggle_key_sign(&mut self, sign: &str) -> WizardResult<bool> {
        let canonical = canonical_option(KEY_SIGNS, sign)
            .ok_or_else(|| WizardError::UnknownOption(sign.to_string()))?;
        Ok(toggle(&mut self.data.key_signs, canonical))
    }

    pub fn set_severity(&mut self, severity: u8) -> WizardResult<()> {
        if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
            return Err(WizardError::InvalidSeverity(severity));
        }
        self.data.severity = severity;
        Ok(())
    }

    /// Set the progression. An empty string clears it.
    pub fn set_progression(&mut self, progression: &str) -> WizardResult<()> {
        if progression.trim().is_empty() {
            self.data.progression.clear();
            return Ok(());
        }
        let canonical = canonical_option(PROGRESSION_OPTIONS, progression)
            .ok_or_else(|| WizardError::UnknownOption(progression.to_string()))?;
        self.data.progression = canonical.to_string();
        Ok(())
    }

    pub fn set_onset(&mut self, onset: impl Into<String>) {
        self.data.onset = onset.into();
    }

    pub fn set_key_signs_notes(&mut self, notes: impl Into<String>) {
        self.data.key_signs_notes = notes.into();
    }

    pub fn set_recent_meds(&mut self, meds: impl Into<String>) {
        self.data.recent_meds = meds.into();
    }

    pub fn set_exposures(&mut self, exposures: impl Into<String>) {
        self.data.exposures = exposures.into();
    }

    pub fn add_photo(&mut self, photo: impl Into<String>) {
        self.data.photos.push(photo.into());
    }

    /// Remove a photo. Returns false if it was not attached.
    pub fn remove_photo(&mut self, photo: &str) -> bool {
        let before = self.data.photos.len();
        self.data.photos.retain(|p| p != photo);
        self.data.photos.len() != before
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.data.consent = consent;
    }

    pub fn has_consent(&self) -> bool {
        self.data.consent
    }
}

fn toggle(values: &mut Vec<String>, value: &str) -> bool {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
        false
    } else {
        values.push(value.to_string());
        true
    }
}
