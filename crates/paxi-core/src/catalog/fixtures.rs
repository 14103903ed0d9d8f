//! Built-in sample dataset.
//!
//! Everything a demo session needs: the doctor directory, the owner that
//! `login` signs in as, their pet, inbox and booking history.

use serde::{Deserialize, Serialize};

use crate::models::{
    Appointment, AppointmentStatus, DaySlots, Doctor, HistoryRecord, HistoryStatus, IntakeData,
    Notification, NotificationKind, OnboardingTestData, Owner, Pet, TimelineEntry, VisitType,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn day(date: &str, times: &[&str]) -> DaySlots {
    DaySlots {
        date: date.to_string(),
        times: strings(times),
    }
}

/// Data loaded into the store when an owner signs in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSeed {
    pub owner: Owner,
    pub pets: Vec<Pet>,
    pub notifications: Vec<Notification>,
    pub appointments: Vec<Appointment>,
}

impl SessionSeed {
    /// The demo account.
    pub fn sample() -> Self {
        Self {
            owner: sample_owner(),
            pets: sample_pets(),
            notifications: sample_notifications(),
            appointments: sample_appointments(),
        }
    }
}

pub fn sample_owner() -> Owner {
    Owner {
        id: "owner-1".into(),
        name: "Akhil Sharma".into(),
        phone: "+91-98765-43210".into(),
        email: "akhil.demo@example.com".into(),
        avatar: None,
    }
}

pub fn sample_pets() -> Vec<Pet> {
    vec![Pet {
        id: "pet-1".into(),
        name: "Pandu".into(),
        species: "Dog".into(),
        breed: "Husky".into(),
        age: "3 years 4 months".into(),
        sex: "Male".into(),
        weight: "24 kg".into(),
        vaccination_status: "Up-to-date".into(),
        regular_meds: "None".into(),
        photos: strings(&[
            "https://images.unsplash.com/photo-1605568427561-40dd23c2acea?w=400&h=400&fit=crop",
            "https://images.unsplash.com/photo-1617895153857-3cfe49a69a5e?w=400&h=400&fit=crop",
        ]),
        owner_id: "owner-1".into(),
    }]
}

pub fn sample_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: "doc-1".into(),
            name: "Dr. Eshwar Naik".into(),
            clinic: "GreenPaws Vet Clinic".into(),
            experience: "12+ years".into(),
            specializations: strings(&["General Practice", "Dermatology", "Internal Medicine"]),
            rating: 4.8,
            review_count: 234,
            accepting_bookings: true,
            visit_types: vec![VisitType::InClinic, VisitType::Video],
            avatar: "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=200&h=200&fit=crop".into(),
            available_slots: vec![
                day("2025-12-10", &["09:00 AM", "10:00 AM", "11:30 AM", "02:00 PM", "04:00 PM"]),
                day("2025-12-11", &["09:30 AM", "11:00 AM", "01:00 PM", "03:30 PM"]),
                day("2025-12-12", &["10:00 AM", "12:00 PM", "02:30 PM", "04:30 PM"]),
            ],
        },
        Doctor {
            id: "doc-2".into(),
            name: "Dr. Priya Menon".into(),
            clinic: "PetCare Plus Hospital".into(),
            experience: "8 years".into(),
            specializations: strings(&["Surgery", "Orthopedics", "Emergency Care"]),
            rating: 4.9,
            review_count: 189,
            accepting_bookings: true,
            visit_types: vec![VisitType::InClinic],
            avatar: "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=200&h=200&fit=crop".into(),
            available_slots: vec![
                day("2025-12-10", &["10:00 AM", "01:00 PM", "03:00 PM"]),
                day("2025-12-11", &["09:00 AM", "11:00 AM", "02:00 PM"]),
            ],
        },
        Doctor {
            id: "doc-3".into(),
            name: "Dr. Rahul Kapoor".into(),
            clinic: "City Animal Hospital".into(),
            experience: "15+ years".into(),
            specializations: strings(&["Cardiology", "Senior Pet Care", "Nutrition"]),
            rating: 4.7,
            review_count: 312,
            accepting_bookings: true,
            visit_types: vec![VisitType::InClinic, VisitType::Video],
            avatar: "https://images.unsplash.com/photo-1537368910025-700350fe46c7?w=200&h=200&fit=crop".into(),
            available_slots: vec![
                day("2025-12-10", &["11:00 AM", "02:30 PM", "04:00 PM"]),
                day("2025-12-12", &["09:00 AM", "10:30 AM", "01:00 PM", "03:00 PM"]),
            ],
        },
    ]
}

pub fn sample_intake() -> IntakeData {
    IntakeData {
        problem_categories: strings(&["Skin", "Infection"]),
        onset: "3 days ago".into(),
        progression: "Worsening".into(),
        severity: 6,
        key_signs: strings(&["Itching", "Redness", "Oozing"]),
        key_signs_notes: "Noticed the itching first, then redness appeared on the flank area".into(),
        recent_meds: "None".into(),
        exposures: "Park visit 4 days ago".into(),
        photos: strings(&[
            "https://images.unsplash.com/photo-1587300003388-59208cc962cb?w=400&h=300&fit=crop",
        ]),
        consent: true,
    }
}

pub fn sample_onboarding_test() -> OnboardingTestData {
    let entry = |day: &str, description: &str| TimelineEntry {
        day: day.into(),
        description: description.into(),
    };
    OnboardingTestData {
        timeline: vec![
            entry("Day -3", "Started scratching frequently"),
            entry("Day -2", "Noticed redness on left flank"),
            entry("Day -1", "Area started oozing slightly"),
        ],
        at_home_actions: "Applied cold compress, tried to prevent scratching".into(),
        appetite: "Normal".into(),
        water_intake: "Normal".into(),
        mobility: "Normal".into(),
        observed_changes: "The redness seems to have spread slightly".into(),
        change_since_booking: "No major changes, still itching".into(),
        additional_photos: Vec::new(),
    }
}

/// The already-approved visit the demo account starts with.
pub fn sample_appointments() -> Vec<Appointment> {
    vec![Appointment {
        id: "apt-1".into(),
        pet_id: "pet-1".into(),
        doctor_id: "doc-1".into(),
        date: "2025-12-10".into(),
        time: "10:00 AM".into(),
        visit_type: VisitType::InClinic,
        status: AppointmentStatus::Approved,
        intake: Some(sample_intake()),
        onboarding_test: Some(sample_onboarding_test()),
        created_at: "2025-12-08T14:00:00".into(),
    }]
}

pub fn sample_history() -> Vec<HistoryRecord> {
    vec![
        HistoryRecord {
            id: "hist-1".into(),
            date: "2025-04-10".into(),
            kind: "Vaccination".into(),
            description: "Annual vaccination - Rabies & DHPP".into(),
            pet_id: "pet-1".into(),
            doctor_id: Some("doc-1".into()),
            prescription: None,
            status: HistoryStatus::Completed,
        },
        HistoryRecord {
            id: "hist-2".into(),
            date: "2025-09-12".into(),
            kind: "Ear Infection".into(),
            description: "Treatment for ear infection - Prescription added".into(),
            pet_id: "pet-1".into(),
            doctor_id: Some("doc-2".into()),
            prescription: Some("Ear drops - twice daily for 7 days".into()),
            status: HistoryStatus::Completed,
        },
        HistoryRecord {
            id: "hist-3".into(),
            date: "2025-12-09".into(),
            kind: "Skin Issue".into(),
            description: "Skin irritation and itching - Pending vet review".into(),
            pet_id: "pet-1".into(),
            doctor_id: Some("doc-1".into()),
            prescription: None,
            status: HistoryStatus::Pending,
        },
    ]
}

pub fn sample_notifications() -> Vec<Notification> {
    let notif = |id: &str,
                 kind: NotificationKind,
                 title: &str,
                 message: &str,
                 read: bool,
                 created_at: &str,
                 action_url: Option<&str>| Notification {
        id: id.into(),
        kind,
        title: title.into(),
        message: message.into(),
        read,
        created_at: created_at.into(),
        action_url: action_url.map(String::from),
    };

    vec![
        notif(
            "notif-1",
            NotificationKind::Action,
            "Photo Needed",
            "Please upload a clearer photo of the affected area",
            false,
            "2025-12-09T10:30:00",
            Some("/appointments/apt-1"),
        ),
        notif(
            "notif-2",
            NotificationKind::Reminder,
            "Upcoming Appointment",
            "Your appointment with Dr. Eshwar Naik is in 24 hours",
            false,
            "2025-12-09T09:00:00",
            None,
        ),
        notif(
            "notif-3",
            NotificationKind::Approval,
            "Appointment Approved",
            "Dr. Eshwar Naik has approved your appointment",
            true,
            "2025-12-08T15:00:00",
            None,
        ),
        notif(
            "notif-4",
            NotificationKind::Action,
            "Onboarding Test Required",
            "Please complete the onboarding questionnaire before your visit",
            false,
            "2025-12-08T15:05:00",
            Some("/onboarding-test"),
        ),
        notif(
            "notif-5",
            NotificationKind::Message,
            "Prescription Ready",
            "Your prescription from Dr. Priya Menon is ready to view",
            true,
            "2025-09-12T16:00:00",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_consistent() {
        let seed = SessionSeed::sample();
        let doctors = sample_doctors();

        assert!(seed.pets.iter().all(|p| p.owner_id == seed.owner.id));
        for apt in &seed.appointments {
            assert!(seed.pets.iter().any(|p| p.id == apt.pet_id));
            assert!(doctors.iter().any(|d| d.id == apt.doctor_id));
        }
    }

    #[test]
    fn test_seed_appointment_slot_exists() {
        let doctors = sample_doctors();
        let apt = &sample_appointments()[0];
        let doctor = doctors.iter().find(|d| d.id == apt.doctor_id).unwrap();
        assert!(doctor.has_slot(&apt.date, &apt.time));
    }

    #[test]
    fn test_sample_notifications_unread() {
        let unread = sample_notifications().iter().filter(|n| !n.read).count();
        assert_eq!(unread, 3);
    }
}
