//! Read-only reference data: the doctor directory, visit history and
//! questionnaire option lists.

pub mod fixtures;
mod options;
mod search;

pub use fixtures::SessionSeed;
pub use options::*;
pub use search::*;

use thiserror::Error;

use crate::models::{Doctor, HistoryRecord};

/// Catalog errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Provider of veterinarian reference data.
///
/// The store never owns doctors; the booking wizard and the views query a
/// directory by ID or predicate.
pub trait DoctorDirectory: Send + Sync {
    /// All doctors, in directory order.
    fn doctors(&self) -> &[Doctor];

    /// Past visit records across all pets.
    fn history(&self) -> &[HistoryRecord];

    /// Look up a doctor by ID.
    fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors().iter().find(|d| d.id == id)
    }

    /// Look up a doctor by ID, failing if it is not in the directory.
    fn require_doctor(&self, id: &str) -> CatalogResult<&Doctor> {
        self.doctor(id)
            .ok_or_else(|| CatalogError::DoctorNotFound(id.to_string()))
    }

    /// Doctors matching a query, in directory order.
    fn search(&self, query: &DoctorQuery) -> Vec<&Doctor> {
        self.doctors().iter().filter(|d| query.matches(d)).collect()
    }

    /// History for one pet, most recent first.
    fn history_for_pet(&self, pet_id: &str) -> Vec<&HistoryRecord> {
        let mut records: Vec<&HistoryRecord> = self
            .history()
            .iter()
            .filter(|r| r.pet_id == pet_id)
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }
}

/// In-memory directory backed by fixed records.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    doctors: Vec<Doctor>,
    history: Vec<HistoryRecord>,
}

impl FixtureCatalog {
    /// Directory with the built-in sample doctors and history.
    pub fn sample() -> Self {
        Self {
            doctors: fixtures::sample_doctors(),
            history: fixtures::sample_history(),
        }
    }

    /// Directory with custom records.
    pub fn new(doctors: Vec<Doctor>, history: Vec<HistoryRecord>) -> Self {
        Self { doctors, history }
    }
}

impl DoctorDirectory for FixtureCatalog {
    fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    fn history(&self) -> &[HistoryRecord] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VisitType;

    #[test]
    fn test_require_doctor() {
        let catalog = FixtureCatalog::sample();
        assert_eq!(catalog.require_doctor("doc-2").unwrap().name, "Dr. Priya Menon");
        assert_eq!(
            catalog.require_doctor("doc-99").unwrap_err(),
            CatalogError::DoctorNotFound("doc-99".into())
        );
    }

    #[test]
    fn test_search_preserves_order() {
        let catalog = FixtureCatalog::sample();
        let found = catalog.search(&DoctorQuery::all().with_visit_type(VisitType::InClinic));
        let ids: Vec<_> = found.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["doc-1", "doc-2", "doc-3"]);
    }

    #[test]
    fn test_history_for_pet_newest_first() {
        let catalog = FixtureCatalog::sample();
        let history = catalog.history_for_pet("pet-1");
        let ids: Vec<_> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["hist-3", "hist-2", "hist-1"]);
        assert!(catalog.history_for_pet("pet-404").is_empty());
    }
}
