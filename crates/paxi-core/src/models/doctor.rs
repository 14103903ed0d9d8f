//! Veterinarian reference records.

use serde::{Deserialize, Serialize};

use super::VisitType;

/// Bookable times on a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySlots {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Display times in booking order (e.g., "09:00 AM")
    pub times: Vec<String>,
}

/// A veterinarian. Read-only reference data, never mutated by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub clinic: String,
    /// Free-form (e.g., "12+ years")
    pub experience: String,
    pub specializations: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub accepting_bookings: bool,
    pub visit_types: Vec<VisitType>,
    pub avatar: String,
    pub available_slots: Vec<DaySlots>,
}

impl Doctor {
    /// Whether this doctor offers the given kind of visit.
    pub fn supports(&self, visit_type: VisitType) -> bool {
        self.visit_types.contains(&visit_type)
    }

    /// Times offered on a date, `None` if the date has no slots.
    pub fn times_on(&self, date: &str) -> Option<&[String]> {
        self.available_slots
            .iter()
            .find(|day| day.date == date)
            .map(|day| day.times.as_slice())
    }

    /// Whether `time` is offered on `date`.
    pub fn has_slot(&self, date: &str, time: &str) -> bool {
        self.times_on(date)
            .map(|times| times.iter().any(|t| t == time))
            .unwrap_or(false)
    }

    /// Default visit type for a new booking with this doctor, `None` if
    /// the doctor offers no visit types at all.
    pub fn preferred_visit_type(&self) -> Option<VisitType> {
        if self.supports(VisitType::InClinic) {
            Some(VisitType::InClinic)
        } else {
            self.visit_types.first().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doctor() -> Doctor {
        Doctor {
            id: "doc-x".into(),
            name: "Dr. Test".into(),
            clinic: "Test Clinic".into(),
            experience: "5 years".into(),
            specializations: vec!["Surgery".into()],
            rating: 4.5,
            review_count: 10,
            accepting_bookings: true,
            visit_types: vec![VisitType::Video],
            avatar: String::new(),
            available_slots: vec![DaySlots {
                date: "2025-12-10".into(),
                times: vec!["09:00 AM".into(), "10:00 AM".into()],
            }],
        }
    }

    #[test]
    fn test_slot_lookup() {
        let doctor = make_doctor();
        assert!(doctor.has_slot("2025-12-10", "10:00 AM"));
        assert!(!doctor.has_slot("2025-12-10", "11:00 AM"));
        assert!(!doctor.has_slot("2025-12-11", "09:00 AM"));
        assert!(doctor.times_on("2025-12-11").is_none());
    }

    #[test]
    fn test_preferred_visit_type_falls_back_to_offered() {
        let doctor = make_doctor();
        assert!(!doctor.supports(VisitType::InClinic));
        assert_eq!(doctor.preferred_visit_type(), Some(VisitType::Video));
    }

    #[test]
    fn test_no_visit_types_has_no_preference() {
        let mut doctor = make_doctor();
        doctor.visit_types.clear();
        assert_eq!(doctor.preferred_visit_type(), None);
    }
}
