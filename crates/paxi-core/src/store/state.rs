//! The application state snapshot and its transition function.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::SessionSeed;
use crate::models::{Appointment, Notification, Owner, Pet};

use super::{Action, StoreError, StoreResult};

/// Owner ID assigned on sign-up.
pub const NEW_OWNER_ID: &str = "owner-new";

/// Complete client state at one point in time.
///
/// Authentication is derived from `owner`, so the two can never disagree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub owner: Option<Owner>,
    pub pets: Vec<Pet>,
    pub current_pet_id: Option<String>,
    pub appointments: Vec<Appointment>,
    pub notifications: Vec<Notification>,
    pub current_appointment: Option<Appointment>,
    pub chat_open: bool,
}

impl AppState {
    /// The signed-out snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.owner.is_some()
    }

    /// The signed-in owner, or `NotAuthenticated`.
    pub fn require_owner(&self) -> StoreResult<&Owner> {
        self.owner.as_ref().ok_or(StoreError::NotAuthenticated)
    }

    /// Look up a pet by ID.
    pub fn pet(&self, pet_id: &str) -> StoreResult<&Pet> {
        self.pets
            .iter()
            .find(|p| p.id == pet_id)
            .ok_or_else(|| StoreError::not_found("pet", pet_id))
    }

    /// Look up an appointment by ID.
    pub fn appointment(&self, appointment_id: &str) -> StoreResult<&Appointment> {
        self.appointments
            .iter()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| StoreError::not_found("appointment", appointment_id))
    }

    /// The currently selected pet, if any.
    pub fn current_pet(&self) -> Option<&Pet> {
        let id = self.current_pet_id.as_deref()?;
        self.pets.iter().find(|p| p.id == id)
    }

    /// First upcoming (approved or pending) appointment.
    pub fn active_appointment(&self) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.is_active())
    }

    pub fn appointments_for_pet<'a>(&'a self, pet_id: &'a str) -> impl Iterator<Item = &'a Appointment> + 'a {
        self.appointments.iter().filter(move |a| a.pet_id == pet_id)
    }

    pub fn unread_notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| !n.read)
    }

    pub fn unread_count(&self) -> usize {
        self.unread_notifications().count()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore from JSON, rejecting snapshots that break the store's invariants.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let state: AppState = serde_json::from_str(json)?;
        state.check_invariants()?;
        Ok(state)
    }

    /// SHA-256 of the JSON form, hex encoded. Equal snapshots hash equal.
    pub fn digest(&self) -> StoreResult<String> {
        let json = self.to_json()?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Check the structural invariants every reachable snapshot satisfies.
    pub fn check_invariants(&self) -> StoreResult<()> {
        match &self.owner {
            None => {
                if !self.pets.is_empty()
                    || !self.appointments.is_empty()
                    || !self.notifications.is_empty()
                    || self.current_pet_id.is_some()
                    || self.current_appointment.is_some()
                {
                    return Err(StoreError::Validation(
                        "signed-out snapshot holds owner data".into(),
                    ));
                }
            }
            Some(owner) => {
                if let Some(pet) = self.pets.iter().find(|p| p.owner_id != owner.id) {
                    return Err(StoreError::OwnerMismatch(pet.id.clone()));
                }
                if let Some(id) = &self.current_pet_id {
                    self.pet(id)?;
                }
                if let Some(current) = &self.current_appointment {
                    self.appointment(&current.id)?;
                }
            }
        }
        Ok(())
    }

    /// Apply one action, producing the next snapshot.
    ///
    /// `self` is never modified; on error the caller keeps the old snapshot.
    pub(crate) fn reduce(&self, action: &Action, seed: &SessionSeed) -> StoreResult<AppState> {
        let mut next = self.clone();

        match action {
            Action::Login { .. } => {
                next.owner = Some(seed.owner.clone());
                next.pets = seed.pets.clone();
                next.current_pet_id = seed.pets.first().map(|p| p.id.clone());
                next.notifications = seed.notifications.clone();
                next.appointments = seed.appointments.clone();
                next.current_appointment = None;
            }
            Action::Signup { email, name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(StoreError::Validation("name is required".into()));
                }
                next.owner = Some(Owner::new(NEW_OWNER_ID, name, email.trim()));
                next.pets.clear();
                next.current_pet_id = None;
                next.notifications.clear();
                next.appointments.clear();
                next.current_appointment = None;
            }
            Action::Logout => return Ok(AppState::empty()),
            Action::SetCurrentPet { pet_id } => {
                self.require_owner()?;
                self.pet(pet_id)?;
                next.current_pet_id = Some(pet_id.clone());
            }
            Action::AddPet { pet } => {
                self.check_pet_owner(pet)?;
                if self.pet(&pet.id).is_ok() {
                    return Err(StoreError::DuplicateId(pet.id.clone()));
                }
                next.pets.push(pet.clone());
                next.current_pet_id = Some(pet.id.clone());
            }
            Action::UpdatePet { pet } => {
                self.check_pet_owner(pet)?;
                let slot = next
                    .pets
                    .iter_mut()
                    .find(|p| p.id == pet.id)
                    .ok_or_else(|| StoreError::not_found("pet", &pet.id))?;
                *slot = pet.clone();
            }
            Action::UpdateOwner { owner } => {
                let current = self.require_owner()?;
                if current.id != owner.id {
                    return Err(StoreError::OwnerMismatch(owner.id.clone()));
                }
                next.owner = Some(owner.clone());
            }
            Action::CreateAppointment { appointment } => {
                self.require_owner()?;
                self.pet(&appointment.pet_id)?;
                if self.appointment(&appointment.id).is_ok() {
                    return Err(StoreError::DuplicateId(appointment.id.clone()));
                }
                next.appointments.push(appointment.clone());
                next.current_appointment = Some(appointment.clone());
            }
            Action::UpdateAppointment { appointment } => {
                let slot = next
                    .appointments
                    .iter_mut()
                    .find(|a| a.id == appointment.id)
                    .ok_or_else(|| StoreError::not_found("appointment", &appointment.id))?;
                *slot = appointment.clone();
                if next
                    .current_appointment
                    .as_ref()
                    .is_some_and(|a| a.id == appointment.id)
                {
                    next.current_appointment = Some(appointment.clone());
                }
            }
            Action::SetCurrentAppointment { appointment } => {
                next.current_appointment = match appointment {
                    Some(appointment) => {
                        self.require_owner()?;
                        Some(self.appointment(&appointment.id)?.clone())
                    }
                    None => None,
                };
            }
            Action::MarkNotificationRead { notification_id } => {
                let notification = next
                    .notifications
                    .iter_mut()
                    .find(|n| &n.id == notification_id)
                    .ok_or_else(|| StoreError::not_found("notification", notification_id))?;
                notification.read = true;
            }
            Action::ToggleChat => next.chat_open = !next.chat_open,
            Action::SetChatOpen { open } => next.chat_open = *open,
        }

        Ok(next)
    }

    fn check_pet_owner(&self, pet: &Pet) -> StoreResult<()> {
        let owner = self.require_owner()?;
        if pet.owner_id != owner.id {
            return Err(StoreError::OwnerMismatch(pet.id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> AppState {
        AppState::empty()
            .reduce(&Action::Login { email: "a@example.com".into() }, &SessionSeed::sample())
            .unwrap()
    }

    #[test]
    fn test_login_loads_seed() {
        let state = signed_in();
        assert!(state.is_authenticated());
        assert_eq!(state.current_pet().unwrap().name, "Pandu");
        assert_eq!(state.appointments.len(), 1);
        assert_eq!(state.unread_count(), 3);
        assert_eq!(state.active_appointment().unwrap().id, "apt-1");
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let state = signed_in();
        let before = state.clone();
        let next = state
            .reduce(&Action::ToggleChat, &SessionSeed::sample())
            .unwrap();
        assert_eq!(state, before);
        assert!(next.chat_open);
    }

    #[test]
    fn test_lookup_or_error() {
        let state = signed_in();
        assert!(state.pet("pet-1").is_ok());
        assert!(matches!(
            state.pet("pet-9"),
            Err(StoreError::NotFound { kind: "pet", .. })
        ));
        assert!(state.appointment("apt-1").is_ok());
    }

    #[test]
    fn test_appointments_for_pet() {
        let state = signed_in();
        assert_eq!(state.appointments_for_pet("pet-1").count(), 1);
        assert_eq!(state.appointments_for_pet("pet-2").count(), 0);
    }

    #[test]
    fn test_json_round_trip_and_digest() {
        let state = signed_in();
        let json = state.to_json().unwrap();
        let restored = AppState::from_json(&json).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.digest().unwrap(), state.digest().unwrap());
        assert_ne!(AppState::empty().digest().unwrap(), state.digest().unwrap());
    }

    #[test]
    fn test_current_appointment_must_be_stored() {
        let seed = SessionSeed::sample();
        let apt = seed.appointments[0].clone();
        let select = Action::SetCurrentAppointment {
            appointment: Some(apt.clone()),
        };

        assert!(matches!(
            AppState::empty().reduce(&select, &seed),
            Err(StoreError::NotAuthenticated)
        ));

        let state = signed_in().reduce(&select, &seed).unwrap();
        assert_eq!(state.current_appointment.as_ref(), Some(&apt));

        let mut ghost = apt;
        ghost.id = "apt-404".into();
        assert!(matches!(
            state.reduce(
                &Action::SetCurrentAppointment {
                    appointment: Some(ghost)
                },
                &seed
            ),
            Err(StoreError::NotFound {
                kind: "appointment",
                ..
            })
        ));
    }

    #[test]
    fn test_signup_and_login_clear_current_appointment() {
        let seed = SessionSeed::sample();
        let state = signed_in()
            .reduce(
                &Action::SetCurrentAppointment {
                    appointment: Some(seed.appointments[0].clone()),
                },
                &seed,
            )
            .unwrap();

        let signed_up = state
            .reduce(
                &Action::Signup {
                    email: "new@example.com".into(),
                    name: "Meera".into(),
                },
                &seed,
            )
            .unwrap();
        assert!(signed_up.current_appointment.is_none());
        assert!(signed_up.check_invariants().is_ok());

        let relogged = state
            .reduce(&Action::Login { email: "a@example.com".into() }, &seed)
            .unwrap();
        assert!(relogged.current_appointment.is_none());
    }

    #[test]
    fn test_from_json_rejects_dangling_current_appointment() {
        let seed = SessionSeed::sample();
        let mut signed_out = AppState::empty();
        signed_out.current_appointment = Some(seed.appointments[0].clone());
        let json = serde_json::to_string(&signed_out).unwrap();
        assert!(matches!(
            AppState::from_json(&json),
            Err(StoreError::Validation(_))
        ));

        let mut state = signed_in();
        let mut ghost = seed.appointments[0].clone();
        ghost.id = "apt-404".into();
        state.current_appointment = Some(ghost);
        let json = serde_json::to_string(&state).unwrap();
        assert!(matches!(
            AppState::from_json(&json),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_orphaned_pets() {
        let mut state = signed_in();
        state.owner = None;
        let json = serde_json::to_string(&state).unwrap();
        assert!(matches!(
            AppState::from_json(&json),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_dangling_current_pet() {
        let mut state = signed_in();
        state.current_pet_id = Some("pet-404".into());
        let json = serde_json::to_string(&state).unwrap();
        assert!(matches!(
            AppState::from_json(&json),
            Err(StoreError::NotFound { .. })
        ));
    }
}
