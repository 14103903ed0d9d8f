//! Application state store.
//!
//! One authoritative in-memory snapshot. Views read it through
//! [`AppStore::state`]; every change goes through an [`Action`], which either
//! yields a complete new snapshot or is rejected with the old one kept.

mod action;
mod state;

pub use action::*;
pub use state::*;

use log::{debug, info, warn};
use thiserror::Error;

use crate::catalog::SessionSeed;
use crate::models::{Appointment, Owner, Pet};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Record does not belong to the signed-in owner: {0}")]
    OwnerMismatch(String),

    #[error("Duplicate ID: {0}")]
    DuplicateId(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// State container. Owns the current snapshot, the sign-in seed and the
/// journal of applied actions.
#[derive(Debug, Clone)]
pub struct AppStore {
    state: AppState,
    seed: SessionSeed,
    journal: Vec<Action>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    /// Signed-out store that logs in as the sample account.
    pub fn new() -> Self {
        Self::with_seed(SessionSeed::sample())
    }

    /// Signed-out store with a custom sign-in seed.
    pub fn with_seed(seed: SessionSeed) -> Self {
        Self {
            state: AppState::empty(),
            seed,
            journal: Vec::new(),
        }
    }

    /// Resume from a previously captured snapshot.
    pub fn from_snapshot(state: AppState, seed: SessionSeed) -> StoreResult<Self> {
        state.check_invariants()?;
        Ok(Self {
            state,
            seed,
            journal: Vec::new(),
        })
    }

    /// Current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Actions applied since construction, oldest first.
    pub fn journal(&self) -> &[Action] {
        &self.journal
    }

    /// Apply an action. On error the snapshot is unchanged and nothing is journaled.
    ///
    /// The journal is session-scoped: a logout lands on the signed-out
    /// snapshot, so it drops every earlier entry.
    pub fn dispatch(&mut self, action: Action) -> StoreResult<&AppState> {
        match self.state.reduce(&action, &self.seed) {
            Ok(next) => {
                debug!("Applied {}", action.name());
                self.state = next;
                if matches!(action, Action::Logout) {
                    self.journal.clear();
                } else {
                    self.journal.push(action);
                }
                Ok(&self.state)
            }
            Err(e) => {
                warn!("Rejected {}: {}", action.name(), e);
                Err(e)
            }
        }
    }

    /// Apply a sequence of actions, stopping at the first rejection.
    pub fn replay(&mut self, actions: &[Action]) -> StoreResult<()> {
        for action in actions {
            self.dispatch(action.clone())?;
        }
        Ok(())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Simulated sign-in. Credentials are not checked; always succeeds.
    pub fn login(&mut self, email: &str, _password: &str) -> StoreResult<()> {
        self.dispatch(Action::Login {
            email: email.to_string(),
        })?;
        info!("Signed in as {}", self.seed.owner.id);
        Ok(())
    }

    /// Create a fresh account with no pets, appointments or notifications.
    pub fn signup(&mut self, email: &str, _password: &str, name: &str) -> StoreResult<()> {
        self.dispatch(Action::Signup {
            email: email.to_string(),
            name: name.to_string(),
        })?;
        info!("Signed up new owner");
        Ok(())
    }

    /// Reset to the signed-out snapshot.
    pub fn logout(&mut self) {
        // Logout cannot be rejected
        let _ = self.dispatch(Action::Logout);
        info!("Signed out");
    }

    pub fn update_owner(&mut self, owner: Owner) -> StoreResult<()> {
        self.dispatch(Action::UpdateOwner { owner }).map(|_| ())
    }

    // =========================================================================
    // Pets
    // =========================================================================

    pub fn set_current_pet(&mut self, pet_id: &str) -> StoreResult<()> {
        self.dispatch(Action::SetCurrentPet {
            pet_id: pet_id.to_string(),
        })
        .map(|_| ())
    }

    /// Add a pet and make it the current one.
    pub fn add_pet(&mut self, pet: Pet) -> StoreResult<()> {
        self.dispatch(Action::AddPet { pet }).map(|_| ())
    }

    /// Replace the pet with the same ID.
    pub fn update_pet(&mut self, pet: Pet) -> StoreResult<()> {
        self.dispatch(Action::UpdatePet { pet }).map(|_| ())
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    /// Append an appointment and make it the current one.
    pub fn create_appointment(&mut self, appointment: Appointment) -> StoreResult<()> {
        self.dispatch(Action::CreateAppointment { appointment })
            .map(|_| ())
    }

    /// Replace the appointment with the same ID.
    pub fn update_appointment(&mut self, appointment: Appointment) -> StoreResult<()> {
        self.dispatch(Action::UpdateAppointment { appointment })
            .map(|_| ())
    }

    /// Point the current appointment at a stored one, or clear it.
    pub fn set_current_appointment(&mut self, appointment: Option<Appointment>) -> StoreResult<()> {
        self.dispatch(Action::SetCurrentAppointment { appointment })
            .map(|_| ())
    }

    // =========================================================================
    // Notifications & UI flags
    // =========================================================================

    /// Mark a notification read. Already-read notifications stay read.
    pub fn mark_notification_read(&mut self, notification_id: &str) -> StoreResult<()> {
        self.dispatch(Action::MarkNotificationRead {
            notification_id: notification_id.to_string(),
        })
        .map(|_| ())
    }

    pub fn toggle_chat(&mut self) {
        let _ = self.dispatch(Action::ToggleChat);
    }

    pub fn set_chat_open(&mut self, open: bool) {
        let _ = self.dispatch(Action::SetChatOpen { open });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, VisitType};

    fn signed_in_store() -> AppStore {
        let mut store = AppStore::new();
        store.login("akhil.demo@example.com", "secret").unwrap();
        store
    }

    #[test]
    fn test_login_sets_authenticated() {
        let store = signed_in_store();
        assert!(store.state().is_authenticated());
        assert_eq!(store.state().owner.as_ref().unwrap().id, "owner-1");
        assert_eq!(store.state().current_pet_id.as_deref(), Some("pet-1"));
        assert_eq!(store.journal().len(), 1);
    }

    #[test]
    fn test_signup_requires_name() {
        let mut store = AppStore::new();
        let err = store.signup("new@example.com", "pw", "   ").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!store.state().is_authenticated());
        assert!(store.journal().is_empty());
    }

    #[test]
    fn test_signup_starts_empty() {
        let mut store = signed_in_store();
        store.signup("new@example.com", "pw", " Meera ").unwrap();
        let state = store.state();
        let owner = state.owner.as_ref().unwrap();
        assert_eq!(owner.id, NEW_OWNER_ID);
        assert_eq!(owner.name, "Meera");
        assert!(owner.phone.is_empty());
        assert!(state.pets.is_empty());
        assert!(state.appointments.is_empty());
        assert!(state.notifications.is_empty());
        assert!(state.current_pet_id.is_none());
    }

    #[test]
    fn test_logout_yields_empty_snapshot() {
        let mut store = signed_in_store();
        store.toggle_chat();
        store.logout();
        assert_eq!(store.state(), &AppState::empty());
        assert!(!store.state().chat_open);
    }

    #[test]
    fn test_add_pet_becomes_current() {
        let mut store = signed_in_store();
        let pet = Pet::new("owner-1", "Mishti", "Cat");
        let id = pet.id.clone();
        store.add_pet(pet).unwrap();
        assert_eq!(store.state().pets.len(), 2);
        assert_eq!(store.state().current_pet_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_add_pet_for_other_owner_rejected() {
        let mut store = signed_in_store();
        let err = store.add_pet(Pet::new("owner-2", "Stray", "Dog")).unwrap_err();
        assert!(matches!(err, StoreError::OwnerMismatch(_)));
        assert_eq!(store.state().pets.len(), 1);
    }

    #[test]
    fn test_add_pet_requires_login() {
        let mut store = AppStore::new();
        let err = store.add_pet(Pet::new("owner-1", "Pandu", "Dog")).unwrap_err();
        assert!(matches!(err, StoreError::NotAuthenticated));
    }

    #[test]
    fn test_update_pet_unknown_id_does_not_insert() {
        let mut store = signed_in_store();
        let pets_before = store.state().pets.clone();
        let err = store.update_pet(Pet::new("owner-1", "Ghost", "Dog")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "pet", .. }));
        assert_eq!(store.state().pets, pets_before);
    }

    #[test]
    fn test_update_pet_replaces() {
        let mut store = signed_in_store();
        let mut pet = store.state().pet("pet-1").unwrap().clone();
        pet.weight = "25 kg".into();
        store.update_pet(pet).unwrap();
        assert_eq!(store.state().pet("pet-1").unwrap().weight, "25 kg");
    }

    #[test]
    fn test_set_current_pet_checks_existence() {
        let mut store = signed_in_store();
        assert!(store.set_current_pet("pet-404").is_err());
        assert_eq!(store.state().current_pet_id.as_deref(), Some("pet-1"));
    }

    #[test]
    fn test_update_owner_keeps_identity() {
        let mut store = signed_in_store();
        let mut owner = store.state().owner.clone().unwrap();
        owner.phone = "+91-00000-00000".into();
        store.update_owner(owner.clone()).unwrap();
        assert_eq!(store.state().owner.as_ref(), Some(&owner));

        owner.id = "owner-2".into();
        assert!(matches!(
            store.update_owner(owner),
            Err(StoreError::OwnerMismatch(_))
        ));
    }

    #[test]
    fn test_create_and_update_appointment() {
        let mut store = signed_in_store();
        let apt = Appointment::new_pending(
            "pet-1".into(),
            "doc-2".into(),
            "2025-12-11".into(),
            "09:00 AM".into(),
            VisitType::InClinic,
            None,
        );
        store.create_appointment(apt.clone()).unwrap();
        assert_eq!(store.state().current_appointment.as_ref(), Some(&apt));

        let mut approved = apt.clone();
        approved.status = AppointmentStatus::Approved;
        store.update_appointment(approved.clone()).unwrap();
        assert_eq!(store.state().appointment(&apt.id).unwrap(), &approved);
        assert_eq!(store.state().current_appointment.as_ref(), Some(&approved));
    }

    #[test]
    fn test_update_appointment_leaves_other_current() {
        let mut store = signed_in_store();
        let seeded = store.state().appointment("apt-1").unwrap().clone();
        let other = Appointment::new_pending(
            "pet-1".into(),
            "doc-1".into(),
            "2025-12-12".into(),
            "10:00 AM".into(),
            VisitType::Video,
            None,
        );
        store.create_appointment(other.clone()).unwrap();

        let mut cancelled = seeded;
        cancelled.status = AppointmentStatus::Cancelled;
        store.update_appointment(cancelled).unwrap();
        assert_eq!(store.state().current_appointment.as_ref(), Some(&other));
    }

    #[test]
    fn test_create_appointment_for_unknown_pet_rejected() {
        let mut store = signed_in_store();
        let apt = Appointment::new_pending(
            "pet-404".into(),
            "doc-1".into(),
            "2025-12-10".into(),
            "09:00 AM".into(),
            VisitType::InClinic,
            None,
        );
        assert!(store.create_appointment(apt).is_err());
        assert_eq!(store.state().appointments.len(), 1);
        assert!(store.state().current_appointment.is_none());
    }

    #[test]
    fn test_duplicate_appointment_rejected() {
        let mut store = signed_in_store();
        let seeded = store.state().appointment("apt-1").unwrap().clone();
        assert!(matches!(
            store.create_appointment(seeded),
            Err(StoreError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_mark_notification_read_idempotent() {
        let mut store = signed_in_store();
        store.mark_notification_read("notif-1").unwrap();
        let once = store.state().clone();
        store.mark_notification_read("notif-1").unwrap();
        assert_eq!(store.state(), &once);
        assert_eq!(store.state().unread_count(), 2);
    }

    #[test]
    fn test_mark_unknown_notification() {
        let mut store = signed_in_store();
        let before = store.state().clone();
        assert!(store.mark_notification_read("notif-404").is_err());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_chat_flags() {
        let mut store = AppStore::new();
        store.toggle_chat();
        assert!(store.state().chat_open);
        store.toggle_chat();
        assert!(!store.state().chat_open);
        store.set_chat_open(true);
        store.set_chat_open(true);
        assert!(store.state().chat_open);
    }

    #[test]
    fn test_logout_clears_journal() {
        let mut store = signed_in_store();
        store.mark_notification_read("notif-1").unwrap();
        store.toggle_chat();
        assert_eq!(store.journal().len(), 3);

        store.logout();
        assert!(store.journal().is_empty());

        store.login("akhil.demo@example.com", "pw").unwrap();
        assert_eq!(store.journal().len(), 1);

        let mut replayed = AppStore::new();
        replayed.replay(store.journal()).unwrap();
        assert_eq!(replayed.state(), store.state());
    }

    #[test]
    fn test_login_keeps_chat_flag() {
        let mut store = AppStore::new();
        store.set_chat_open(true);
        store.login("a@example.com", "pw").unwrap();
        assert!(store.state().chat_open);
    }

    #[test]
    fn test_replay_from_snapshot() {
        let mut store = signed_in_store();
        let snapshot = store.state().clone();
        store.mark_notification_read("notif-2").unwrap();
        store.toggle_chat();

        let actions: Vec<Action> = store.journal()[1..].to_vec();
        let mut restored = AppStore::from_snapshot(snapshot, SessionSeed::sample()).unwrap();
        restored.replay(&actions).unwrap();
        assert_eq!(restored.state(), store.state());
    }
}
