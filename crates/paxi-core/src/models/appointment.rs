//! Appointment models and the intake questionnaire attached to them.

use serde::{Deserialize, Serialize};

/// Lowest severity an owner can report.
pub const MIN_SEVERITY: u8 = 1;
/// Highest severity an owner can report.
pub const MAX_SEVERITY: u8 = 10;

/// How the visit takes place.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum VisitType {
    #[default]
    InClinic,
    Video,
}

impl VisitType {
    /// Wire name, as used in the reference data ("in-clinic", "video").
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::InClinic => "in-clinic",
            VisitType::Video => "video",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in-clinic" => Some(VisitType::InClinic),
            "video" => Some(VisitType::Video),
            _ => None,
        }
    }
}

/// Appointment lifecycle status.
///
/// Nothing in the core advances status; new bookings are always `Pending`
/// and the clinic side moves them on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Still upcoming (shown on the dashboard).
    pub fn is_active(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Approved)
    }
}

/// Structured symptom report filled in while booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntakeData {
    pub problem_categories: Vec<String>,
    /// Free-form (e.g., "3 days ago")
    pub onset: String,
    /// One of the progression options, or empty
    pub progression: String,
    /// 1..=10
    pub severity: u8,
    pub key_signs: Vec<String>,
    pub key_signs_notes: String,
    pub recent_meds: String,
    pub exposures: String,
    pub photos: Vec<String>,
    /// Owner agreed to share the report with the vet
    pub consent: bool,
}

impl Default for IntakeData {
    fn default() -> Self {
        Self {
            problem_categories: Vec::new(),
            onset: String::new(),
            progression: String::new(),
            severity: 5,
            key_signs: Vec::new(),
            key_signs_notes: String::new(),
            recent_meds: String::new(),
            exposures: String::new(),
            photos: Vec::new(),
            consent: false,
        }
    }
}

/// One day in the pre-visit symptom timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Relative day label (e.g., "Day -2")
    pub day: String,
    pub description: String,
}

/// Pre-visit questionnaire requested by the vet after approval.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTestData {
    pub timeline: Vec<TimelineEntry>,
    pub at_home_actions: String,
    /// General status values ("Normal", "Reduced", ...)
    pub appetite: String,
    pub water_intake: String,
    pub mobility: String,
    pub observed_changes: String,
    pub change_since_booking: String,
    pub additional_photos: Vec<String>,
}

/// A scheduled visit linking a pet, a doctor and a time slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub pet_id: String,
    pub doctor_id: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Display time (e.g., "09:00 AM")
    pub time: String,
    pub visit_type: VisitType,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intake: Option<IntakeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_test: Option<OnboardingTestData>,
    pub created_at: String,
}

impl Appointment {
    /// Create a pending appointment with a generated ID and the current timestamp.
    pub fn new_pending(
        pet_id: String,
        doctor_id: String,
        date: String,
        time: String,
        visit_type: VisitType,
        intake: Option<IntakeData>,
    ) -> Self {
        Self {
            id: format!("apt-{}", uuid::Uuid::new_v4()),
            pet_id,
            doctor_id,
            date,
            time,
            visit_type,
            status: AppointmentStatus::Pending,
            intake,
            onboarding_test: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Whether the appointment is still upcoming.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pending() {
        let apt = Appointment::new_pending(
            "pet-1".into(),
            "doc-1".into(),
            "2025-12-10".into(),
            "09:00 AM".into(),
            VisitType::Video,
            None,
        );
        assert!(apt.id.starts_with("apt-"));
        assert_eq!(apt.status, AppointmentStatus::Pending);
        assert!(apt.is_active());
        assert!(chrono::DateTime::parse_from_rfc3339(&apt.created_at).is_ok());
    }

    #[test]
    fn test_unique_ids() {
        let make = || {
            Appointment::new_pending(
                "pet-1".into(),
                "doc-1".into(),
                "2025-12-10".into(),
                "09:00 AM".into(),
                VisitType::InClinic,
                None,
            )
        };
        assert_ne!(make().id, make().id);
    }

    #[test]
    fn test_visit_type_wire_names() {
        assert_eq!(serde_json::to_string(&VisitType::InClinic).unwrap(), "\"in-clinic\"");
        assert_eq!(VisitType::parse("video"), Some(VisitType::Video));
        assert_eq!(VisitType::parse("home"), None);
        assert_eq!(VisitType::InClinic.as_str(), "in-clinic");
    }

    #[test]
    fn test_status_activity() {
        assert!(AppointmentStatus::Approved.is_active());
        assert!(!AppointmentStatus::Completed.is_active());
        assert!(!AppointmentStatus::Cancelled.is_active());
    }
}
