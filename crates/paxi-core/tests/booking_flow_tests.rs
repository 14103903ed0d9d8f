//! End-to-end booking tests against the store and sample directory.

use std::sync::Arc;

use paxi_core::catalog::DoctorDirectory;
use paxi_core::models::{AppointmentStatus, VisitType};
use paxi_core::wizard::WizardError;
use paxi_core::{AppStore, BookingWizard, CoreConfig, DoctorQuery, FixtureCatalog, WizardStep};

fn signed_in() -> AppStore {
    let mut store = AppStore::new();
    store.login("akhil.demo@example.com", "secret").unwrap();
    store
}

fn directory() -> Arc<FixtureCatalog> {
    Arc::new(FixtureCatalog::sample())
}

#[test]
fn test_book_video_visit_from_search() {
    let mut store = signed_in();
    let directory = directory();

    // Owner searches for a video-capable vet and books straight from the result
    let query = DoctorQuery::all().with_visit_type(VisitType::Video).accepting_only();
    let doctor = directory.search(&query).first().copied().unwrap().clone();

    let mut wizard = BookingWizard::start(
        store.state(),
        directory.clone(),
        &CoreConfig::default(),
        Some(&doctor.id),
    )
    .unwrap();
    assert!(wizard.dropped_doctor().is_none());

    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.select_visit_type(VisitType::Video).unwrap();
    wizard.advance().unwrap();

    let day = wizard.slot_options().unwrap()[0].clone();
    wizard.select_slot(&day.date, &day.times[0]).unwrap();
    assert_eq!(wizard.advance().unwrap(), WizardStep::Intake);

    let intake = wizard.intake_mut().unwrap();
    intake.toggle_problem_category("Digestive").unwrap();
    intake.toggle_key_sign("Vomiting").unwrap();
    intake.set_onset("2 days ago");
    intake.set_consent(true);
    assert_eq!(wizard.advance().unwrap(), WizardStep::Confirm);

    let appointment = wizard.commit(&mut store).unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.visit_type, VisitType::Video);
    assert_eq!(appointment.doctor_id, doctor.id);
    assert_eq!(appointment.date, day.date);
    assert_eq!(
        store.state().current_appointment.as_ref().map(|a| a.id.as_str()),
        Some(appointment.id.as_str())
    );

    let intake = appointment.intake.unwrap();
    assert_eq!(intake.problem_categories, vec!["Digestive"]);
    assert_eq!(intake.onset, "2 days ago");

    // A finished wizard cannot book twice
    assert!(matches!(wizard.commit(&mut store), Err(WizardError::Finished)));
}

#[test]
fn test_book_for_added_pet() {
    let mut store = signed_in();
    let owner_id = store.state().owner.as_ref().unwrap().id.clone();
    let pet = paxi_core::Pet::new(owner_id, "Miso", "Cat");
    store.add_pet(pet.clone()).unwrap();

    let mut wizard =
        BookingWizard::start(store.state(), directory(), &CoreConfig::default(), None).unwrap();
    assert_eq!(wizard.draft().pet_id.as_deref(), Some(pet.id.as_str()));

    wizard.advance().unwrap();
    wizard.select_doctor("doc-1").unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.select_slot("2025-12-10", "11:30 AM").unwrap();
    wizard.advance().unwrap();
    wizard.intake_mut().unwrap().set_consent(true);
    wizard.advance().unwrap();

    let appointment = wizard.commit(&mut store).unwrap();
    assert_eq!(appointment.pet_id, pet.id);
    assert_eq!(store.state().appointments_for_pet(&pet.id).count(), 1);
}

#[test]
fn test_going_back_keeps_draft() {
    let store = signed_in();
    let mut wizard = BookingWizard::start(
        store.state(),
        directory(),
        &CoreConfig::default(),
        Some("doc-1"),
    )
    .unwrap();

    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.select_slot("2025-12-10", "09:00 AM").unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.step(), WizardStep::Intake);

    assert_eq!(wizard.retreat(), WizardStep::Slot);
    assert_eq!(wizard.retreat(), WizardStep::VisitType);
    assert_eq!(wizard.draft().time.as_deref(), Some("09:00 AM"));

    // Same doctor again keeps the slot
    wizard.select_doctor("doc-1").unwrap();
    assert_eq!(wizard.draft().date.as_deref(), Some("2025-12-10"));
}

#[test]
fn test_history_newest_first() {
    let directory = directory();
    let history = directory.history_for_pet("pet-1");
    assert!(!history.is_empty());
    assert!(history.windows(2).all(|w| w[0].date >= w[1].date));
}
