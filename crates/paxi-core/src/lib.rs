//! PAXI Core Library
//!
//! Client-side session state and appointment booking for the PAXI pet-care app.
//!
//! # Architecture
//!
//! ```text
//!   Views ──read──▶ AppState snapshot ◀──────────────┐
//!     │                                               │
//!     │ user intent                                   │ new snapshot
//!     ▼                                               │
//!   AppStore::dispatch(Action) ──reduce(old, action)──┘
//!     ▲
//!     │ create_appointment (on confirm only)
//!     │
//!   BookingWizard: pet → doctor → type → slot → intake → confirm
//!     │
//!     └──queries──▶ DoctorDirectory (read-only reference data)
//! ```
//!
//! # Core Principle
//!
//! **Every state change is an [`store::Action`].** A rejected action leaves the
//! snapshot untouched; an accepted one is journaled and can be replayed.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Owner, Pet, Doctor, Appointment, Notification, etc.)
//! - [`catalog`]: Doctor directory, sample dataset and questionnaire options
//! - [`store`]: Application state snapshot, actions and the store container
//! - [`wizard`]: Multi-step booking flow
//! - [`auth`]: Sign-in requests with a cancellable simulated round trip
//! - [`config`]: Runtime configuration

pub mod auth;
pub mod catalog;
pub mod config;
pub mod models;
pub mod store;
pub mod wizard;

// Re-export commonly used types
pub use auth::{AuthOutcome, AuthRequest, DeferredAuth};
pub use catalog::{DoctorDirectory, DoctorQuery, FixtureCatalog, SessionSeed};
pub use config::CoreConfig;
pub use models::{
    Appointment, AppointmentStatus, Doctor, IntakeData, Notification, Owner, Pet, VisitType,
};
pub use store::{Action, AppState, AppStore};
pub use wizard::{BookingWizard, WizardStep};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio_util::sync::CancellationToken;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PaxiError {
    #[error("Not signed in: {0}")]
    NotAuthenticated(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Booking error: {0}")]
    BookingError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl From<store::StoreError> for PaxiError {
    fn from(e: store::StoreError) -> Self {
        use store::StoreError;
        match e {
            StoreError::NotAuthenticated => PaxiError::NotAuthenticated(e.to_string()),
            StoreError::NotFound { .. } => PaxiError::NotFound(e.to_string()),
            StoreError::Json(_) => PaxiError::SerializationError(e.to_string()),
            StoreError::Validation(_)
            | StoreError::OwnerMismatch(_)
            | StoreError::DuplicateId(_) => PaxiError::InvalidInput(e.to_string()),
        }
    }
}

impl From<wizard::WizardError> for PaxiError {
    fn from(e: wizard::WizardError) -> Self {
        use wizard::WizardError;
        match e {
            WizardError::Store(inner) => inner.into(),
            WizardError::DoctorUnavailable(_) => PaxiError::NotFound(e.to_string()),
            WizardError::InvalidSeverity(_) | WizardError::UnknownOption(_) => {
                PaxiError::InvalidInput(e.to_string())
            }
            _ => PaxiError::BookingError(e.to_string()),
        }
    }
}

impl From<catalog::CatalogError> for PaxiError {
    fn from(e: catalog::CatalogError) -> Self {
        PaxiError::NotFound(e.to_string())
    }
}

impl From<serde_json::Error> for PaxiError {
    fn from(e: serde_json::Error) -> Self {
        PaxiError::SerializationError(e.to_string())
    }
}

impl From<anyhow::Error> for PaxiError {
    fn from(e: anyhow::Error) -> Self {
        PaxiError::InvalidInput(format!("{:#}", e))
    }
}

impl<T> From<std::sync::PoisonError<T>> for PaxiError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PaxiError::InvalidInput(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a signed-out session backed by the sample dataset.
#[uniffi::export]
pub fn open_session() -> Arc<PaxiCore> {
    Arc::new(PaxiCore::new(CoreConfig::default()))
}

/// Open a session with a JSON configuration.
#[uniffi::export]
pub fn open_session_with_config(config_json: String) -> Result<Arc<PaxiCore>, PaxiError> {
    let config = CoreConfig::from_json(&config_json)?;
    Ok(Arc::new(PaxiCore::new(config)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PaxiCore {
    store: Arc<Mutex<AppStore>>,
    directory: Arc<FixtureCatalog>,
    config: CoreConfig,
    booking: Mutex<Option<BookingWizard>>,
    /// Drives deferred sign-ins; built on first use
    runtime: Mutex<Option<Runtime>>,
}

impl PaxiCore {
    fn new(config: CoreConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(AppStore::new())),
            directory: Arc::new(FixtureCatalog::sample()),
            config,
            booking: Mutex::new(None),
            runtime: Mutex::new(None),
        }
    }

    fn runtime_handle(&self) -> Result<Handle, PaxiError> {
        let mut runtime = self.runtime.lock()?;
        if let Some(rt) = runtime.as_ref() {
            return Ok(rt.handle().clone());
        }
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .map_err(|e| PaxiError::RuntimeError(format!("Failed to build runtime: {}", e)))?;
        let handle = rt.handle().clone();
        *runtime = Some(rt);
        Ok(handle)
    }

    fn defer(&self, request: AuthRequest) -> Result<Arc<PendingAuth>, PaxiError> {
        let runtime = self.runtime_handle()?;
        let auth = DeferredAuth::spawn_on(&runtime, self.store.clone(), request, &self.config)?;
        Ok(Arc::new(PendingAuth {
            runtime,
            token: auth.cancellation_token(),
            auth: Mutex::new(Some(auth)),
        }))
    }

    fn with_booking<R>(
        &self,
        f: impl FnOnce(&mut BookingWizard) -> Result<R, wizard::WizardError>,
    ) -> Result<R, PaxiError> {
        let mut booking = self.booking.lock()?;
        let wizard = booking
            .as_mut()
            .ok_or_else(|| PaxiError::BookingError("No booking in progress".into()))?;
        Ok(f(wizard)?)
    }
}

#[uniffi::export]
impl PaxiCore {
    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Simulated sign-in with the demo account.
    pub fn login(&self, email: String, password: String) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        store.login(&email, &password)?;
        Ok(())
    }

    /// Create a new account.
    pub fn signup(&self, email: String, password: String, name: String) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        store.signup(&email, &password, &name)?;
        Ok(())
    }

    /// Sign in after the configured round-trip latency. Dropping or
    /// cancelling the returned handle first leaves the session signed out.
    pub fn login_deferred(
        &self,
        email: String,
        password: String,
    ) -> Result<Arc<PendingAuth>, PaxiError> {
        self.defer(AuthRequest::SignIn { email, password })
    }

    /// Deferred counterpart of [`PaxiCore::signup`]. A blank name fails at once.
    pub fn signup_deferred(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> Result<Arc<PendingAuth>, PaxiError> {
        self.defer(AuthRequest::SignUp {
            name,
            email,
            password,
        })
    }

    /// Sign out and abandon any booking in progress.
    pub fn logout(&self) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        store.logout();
        *self.booking.lock()? = None;
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool, PaxiError> {
        Ok(self.store.lock()?.state().is_authenticated())
    }

    pub fn get_owner(&self) -> Result<Option<FfiOwner>, PaxiError> {
        let store = self.store.lock()?;
        Ok(store.state().owner.clone().map(Into::into))
    }

    pub fn update_owner(&self, owner: FfiOwner) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        store.update_owner(owner.into())?;
        Ok(())
    }

    // =========================================================================
    // Pet Operations
    // =========================================================================

    pub fn list_pets(&self) -> Result<Vec<FfiPet>, PaxiError> {
        let store = self.store.lock()?;
        Ok(store.state().pets.iter().cloned().map(Into::into).collect())
    }

    pub fn current_pet(&self) -> Result<Option<FfiPet>, PaxiError> {
        let store = self.store.lock()?;
        Ok(store.state().current_pet().cloned().map(Into::into))
    }

    pub fn set_current_pet(&self, pet_id: String) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        store.set_current_pet(&pet_id)?;
        Ok(())
    }

    /// Add a pet owned by the signed-in owner. An empty ID gets a generated one.
    pub fn add_pet(&self, pet: FfiPet) -> Result<FfiPet, PaxiError> {
        let mut store = self.store.lock()?;
        let mut pet: Pet = pet.into();
        if pet.id.is_empty() {
            pet.id = format!("pet-{}", uuid::Uuid::new_v4());
        }
        store.add_pet(pet.clone())?;
        Ok(pet.into())
    }

    pub fn update_pet(&self, pet: FfiPet) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        store.update_pet(pet.into())?;
        Ok(())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    pub fn list_appointments(&self) -> Result<Vec<FfiAppointment>, PaxiError> {
        let store = self.store.lock()?;
        Ok(store
            .state()
            .appointments
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    pub fn current_appointment(&self) -> Result<Option<FfiAppointment>, PaxiError> {
        let store = self.store.lock()?;
        Ok(store.state().current_appointment.clone().map(Into::into))
    }

    /// Point the current appointment at an existing one, or clear it.
    pub fn set_current_appointment(&self, appointment_id: Option<String>) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        let appointment = match appointment_id {
            Some(id) => Some(store.state().appointment(&id)?.clone()),
            None => None,
        };
        store.set_current_appointment(appointment)?;
        Ok(())
    }

    /// Replace an appointment. Fields the FFI record does not carry
    /// (the onboarding questionnaire) are kept from the stored record.
    pub fn update_appointment(&self, appointment: FfiAppointment) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        let existing = store.state().appointment(&appointment.id)?.clone();
        let mut updated = appointment.into_model()?;
        updated.onboarding_test = existing.onboarding_test;
        store.update_appointment(updated)?;
        Ok(())
    }

    // =========================================================================
    // Notification & Chat Operations
    // =========================================================================

    pub fn list_notifications(&self) -> Result<Vec<FfiNotification>, PaxiError> {
        let store = self.store.lock()?;
        Ok(store
            .state()
            .notifications
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    pub fn unread_count(&self) -> Result<u32, PaxiError> {
        Ok(self.store.lock()?.state().unread_count() as u32)
    }

    pub fn mark_notification_read(&self, notification_id: String) -> Result<(), PaxiError> {
        let mut store = self.store.lock()?;
        store.mark_notification_read(&notification_id)?;
        Ok(())
    }

    pub fn toggle_chat(&self) -> Result<bool, PaxiError> {
        let mut store = self.store.lock()?;
        store.toggle_chat();
        Ok(store.state().chat_open)
    }

    pub fn set_chat_open(&self, open: bool) -> Result<(), PaxiError> {
        self.store.lock()?.set_chat_open(open);
        Ok(())
    }

    // =========================================================================
    // Snapshot Operations
    // =========================================================================

    /// Current snapshot as JSON.
    pub fn snapshot_json(&self) -> Result<String, PaxiError> {
        Ok(self.store.lock()?.state().to_json()?)
    }

    /// SHA-256 of the current snapshot.
    pub fn snapshot_digest(&self) -> Result<String, PaxiError> {
        Ok(self.store.lock()?.state().digest()?)
    }

    // =========================================================================
    // Directory Operations
    // =========================================================================

    pub fn get_doctor(&self, doctor_id: String) -> Result<FfiDoctor, PaxiError> {
        Ok(self.directory.require_doctor(&doctor_id)?.clone().into())
    }

    /// Search doctors by name, clinic or specialization, optionally by visit type.
    pub fn search_doctors(
        &self,
        text: Option<String>,
        visit_type: Option<String>,
    ) -> Result<Vec<FfiDoctor>, PaxiError> {
        let visit_type = visit_type.as_deref().map(parse_visit_type).transpose()?;
        let query = DoctorQuery {
            text,
            visit_type,
            accepting_only: false,
        };
        Ok(self
            .directory
            .search(&query)
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Booking Operations
    // =========================================================================

    /// Start a new booking, replacing any in progress.
    pub fn start_booking(&self, doctor_id: Option<String>) -> Result<FfiBookingState, PaxiError> {
        let store = self.store.lock()?;
        let wizard = BookingWizard::start(
            store.state(),
            self.directory.clone(),
            &self.config,
            doctor_id.as_deref(),
        )?;
        let state = FfiBookingState::from(&wizard);
        *self.booking.lock()? = Some(wizard);
        Ok(state)
    }

    pub fn booking_state(&self) -> Result<FfiBookingState, PaxiError> {
        self.with_booking(|w| Ok(FfiBookingState::from(&*w)))
    }

    pub fn booking_select_pet(&self, pet_id: String) -> Result<(), PaxiError> {
        let store = self.store.lock()?;
        self.with_booking(|w| w.select_pet(store.state(), &pet_id))
    }

    pub fn booking_select_doctor(&self, doctor_id: String) -> Result<(), PaxiError> {
        self.with_booking(|w| w.select_doctor(&doctor_id))
    }

    pub fn booking_select_visit_type(&self, visit_type: String) -> Result<(), PaxiError> {
        let visit_type = parse_visit_type(&visit_type)?;
        self.with_booking(|w| w.select_visit_type(visit_type))
    }

    pub fn booking_select_date(&self, date: String) -> Result<(), PaxiError> {
        self.with_booking(|w| w.select_date(&date))
    }

    pub fn booking_select_time(&self, time: String) -> Result<(), PaxiError> {
        self.with_booking(|w| w.select_time(&time))
    }

    pub fn booking_toggle_problem_category(&self, category: String) -> Result<bool, PaxiError> {
        self.with_booking(|w| w.intake_mut()?.toggle_problem_category(&category))
    }

    pub fn booking_toggle_key_sign(&self, sign: String) -> Result<bool, PaxiError> {
        self.with_booking(|w| w.intake_mut()?.toggle_key_sign(&sign))
    }

    pub fn booking_set_severity(&self, severity: u8) -> Result<(), PaxiError> {
        self.with_booking(|w| w.intake_mut()?.set_severity(severity))
    }

    pub fn booking_set_progression(&self, progression: String) -> Result<(), PaxiError> {
        self.with_booking(|w| w.intake_mut()?.set_progression(&progression))
    }

    pub fn booking_set_details(
        &self,
        onset: String,
        notes: String,
        recent_meds: String,
        exposures: String,
    ) -> Result<(), PaxiError> {
        self.with_booking(|w| {
            let intake = w.intake_mut()?;
            intake.set_onset(onset);
            intake.set_key_signs_notes(notes);
            intake.set_recent_meds(recent_meds);
            intake.set_exposures(exposures);
            Ok(())
        })
    }

    pub fn booking_add_photo(&self, photo: String) -> Result<(), PaxiError> {
        self.with_booking(|w| {
            w.intake_mut()?.add_photo(photo);
            Ok(())
        })
    }

    pub fn booking_set_consent(&self, consent: bool) -> Result<(), PaxiError> {
        self.with_booking(|w| {
            w.intake_mut()?.set_consent(consent);
            Ok(())
        })
    }

    pub fn advance_booking(&self) -> Result<FfiBookingState, PaxiError> {
        self.with_booking(|w| {
            w.advance()?;
            Ok(FfiBookingState::from(&*w))
        })
    }

    pub fn retreat_booking(&self) -> Result<FfiBookingState, PaxiError> {
        self.with_booking(|w| {
            w.retreat();
            Ok(FfiBookingState::from(&*w))
        })
    }

    /// Confirm the booking. The finished wizard is discarded.
    pub fn commit_booking(&self) -> Result<FfiAppointment, PaxiError> {
        let mut store = self.store.lock()?;
        let mut booking = self.booking.lock()?;
        let wizard = booking
            .as_mut()
            .ok_or_else(|| PaxiError::BookingError("No booking in progress".into()))?;
        let appointment = wizard.commit(&mut store)?;
        *booking = None;
        Ok(appointment.into())
    }
}

// =========================================================================
// Pending Auth (exported to FFI)
// =========================================================================

/// A sign-in waiting out its simulated round trip.
#[derive(uniffi::Object)]
pub struct PendingAuth {
    runtime: Handle,
    token: CancellationToken,
    auth: Mutex<Option<DeferredAuth>>,
}

#[uniffi::export]
impl PendingAuth {
    /// Suppress the sign-in if it has not happened yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Block until the request finishes. Can only be called once.
    pub fn wait(&self) -> Result<FfiAuthOutcome, PaxiError> {
        let auth = self
            .auth
            .lock()?
            .take()
            .ok_or_else(|| PaxiError::InvalidInput("Auth request already awaited".into()))?;
        Ok(self.runtime.block_on(auth.wait()).into())
    }
}

/// FFI-safe result of a deferred sign-in.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FfiAuthOutcome {
    Authenticated,
    Cancelled,
    Failed { reason: String },
}

impl From<AuthOutcome> for FfiAuthOutcome {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Authenticated => FfiAuthOutcome::Authenticated,
            AuthOutcome::Cancelled => FfiAuthOutcome::Cancelled,
            AuthOutcome::Failed(reason) => FfiAuthOutcome::Failed { reason },
        }
    }
}

fn parse_visit_type(s: &str) -> Result<VisitType, PaxiError> {
    VisitType::parse(s).ok_or_else(|| PaxiError::InvalidInput(format!("Unknown visit type: {}", s)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe owner.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOwner {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<Owner> for FfiOwner {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            phone: owner.phone,
            email: owner.email,
            avatar: owner.avatar,
        }
    }
}

impl From<FfiOwner> for Owner {
    fn from(owner: FfiOwner) -> Self {
        Owner {
            id: owner.id,
            name: owner.name,
            phone: owner.phone,
            email: owner.email,
            avatar: owner.avatar,
        }
    }
}

/// FFI-safe pet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPet {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: String,
    pub sex: String,
    pub weight: String,
    pub vaccination_status: String,
    pub regular_meds: String,
    pub photos: Vec<String>,
    pub owner_id: String,
}

impl From<Pet> for FfiPet {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            species: pet.species,
            breed: pet.breed,
            age: pet.age,
            sex: pet.sex,
            weight: pet.weight,
            vaccination_status: pet.vaccination_status,
            regular_meds: pet.regular_meds,
            photos: pet.photos,
            owner_id: pet.owner_id,
        }
    }
}

impl From<FfiPet> for Pet {
    fn from(pet: FfiPet) -> Self {
        Pet {
            id: pet.id,
            name: pet.name,
            species: pet.species,
            breed: pet.breed,
            age: pet.age,
            sex: pet.sex,
            weight: pet.weight,
            vaccination_status: pet.vaccination_status,
            regular_meds: pet.regular_meds,
            photos: pet.photos,
            owner_id: pet.owner_id,
        }
    }
}

/// FFI-safe day of bookable slots.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDaySlots {
    pub date: String,
    pub times: Vec<String>,
}

/// FFI-safe doctor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: String,
    pub name: String,
    pub clinic: String,
    pub experience: String,
    pub specializations: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub accepting_bookings: bool,
    pub visit_types: Vec<String>,
    pub avatar: String,
    pub available_slots: Vec<FfiDaySlots>,
}

impl From<Doctor> for FfiDoctor {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            clinic: doctor.clinic,
            experience: doctor.experience,
            specializations: doctor.specializations,
            rating: doctor.rating,
            review_count: doctor.review_count,
            accepting_bookings: doctor.accepting_bookings,
            visit_types: doctor
                .visit_types
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            avatar: doctor.avatar,
            available_slots: doctor
                .available_slots
                .into_iter()
                .map(|day| FfiDaySlots {
                    date: day.date,
                    times: day.times,
                })
                .collect(),
        }
    }
}

/// FFI-safe intake questionnaire.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIntake {
    pub problem_categories: Vec<String>,
    pub onset: String,
    pub progression: String,
    pub severity: u8,
    pub key_signs: Vec<String>,
    pub key_signs_notes: String,
    pub recent_meds: String,
    pub exposures: String,
    pub photos: Vec<String>,
    pub consent: bool,
}

impl From<IntakeData> for FfiIntake {
    fn from(intake: IntakeData) -> Self {
        Self {
            problem_categories: intake.problem_categories,
            onset: intake.onset,
            progression: intake.progression,
            severity: intake.severity,
            key_signs: intake.key_signs,
            key_signs_notes: intake.key_signs_notes,
            recent_meds: intake.recent_meds,
            exposures: intake.exposures,
            photos: intake.photos,
            consent: intake.consent,
        }
    }
}

impl From<FfiIntake> for IntakeData {
    fn from(intake: FfiIntake) -> Self {
        IntakeData {
            problem_categories: intake.problem_categories,
            onset: intake.onset,
            progression: intake.progression,
            severity: intake.severity,
            key_signs: intake.key_signs,
            key_signs_notes: intake.key_signs_notes,
            recent_meds: intake.recent_meds,
            exposures: intake.exposures,
            photos: intake.photos,
            consent: intake.consent,
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub pet_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub visit_type: String,
    pub status: String,
    pub intake: Option<FfiIntake>,
    pub has_onboarding_test: bool,
    pub created_at: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(apt: Appointment) -> Self {
        Self {
            id: apt.id,
            pet_id: apt.pet_id,
            doctor_id: apt.doctor_id,
            date: apt.date,
            time: apt.time,
            visit_type: apt.visit_type.as_str().to_string(),
            status: status_to_string(apt.status).to_string(),
            intake: apt.intake.map(Into::into),
            has_onboarding_test: apt.onboarding_test.is_some(),
            created_at: apt.created_at,
        }
    }
}

impl FfiAppointment {
    fn into_model(self) -> Result<Appointment, PaxiError> {
        Ok(Appointment {
            visit_type: parse_visit_type(&self.visit_type)?,
            status: string_to_status(&self.status)?,
            id: self.id,
            pet_id: self.pet_id,
            doctor_id: self.doctor_id,
            date: self.date,
            time: self.time,
            intake: self.intake.map(Into::into),
            onboarding_test: None,
            created_at: self.created_at,
        })
    }
}

fn status_to_string(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Pending => "pending",
        AppointmentStatus::Approved => "approved",
        AppointmentStatus::Completed => "completed",
        AppointmentStatus::Cancelled => "cancelled",
    }
}

fn string_to_status(s: &str) -> Result<AppointmentStatus, PaxiError> {
    match s {
        "pending" => Ok(AppointmentStatus::Pending),
        "approved" => Ok(AppointmentStatus::Approved),
        "completed" => Ok(AppointmentStatus::Completed),
        "cancelled" => Ok(AppointmentStatus::Cancelled),
        _ => Err(PaxiError::InvalidInput(format!(
            "Unknown appointment status: {}",
            s
        ))),
    }
}

/// FFI-safe notification.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotification {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
    pub action_url: Option<String>,
}

impl From<Notification> for FfiNotification {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            kind: n.kind.as_str().to_string(),
            title: n.title,
            message: n.message,
            read: n.read,
            created_at: n.created_at,
            action_url: n.action_url,
        }
    }
}

/// FFI-safe booking progress.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBookingState {
    pub step: String,
    pub pet_id: Option<String>,
    pub doctor_id: Option<String>,
    pub visit_type: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub severity: u8,
    pub consent: bool,
    pub dropped_doctor: Option<String>,
}

impl From<&BookingWizard> for FfiBookingState {
    fn from(wizard: &BookingWizard) -> Self {
        let draft = wizard.draft();
        Self {
            step: wizard.step().as_str().to_string(),
            pet_id: draft.pet_id.clone(),
            doctor_id: draft.doctor_id.clone(),
            visit_type: draft.visit_type.as_str().to_string(),
            date: draft.date.clone(),
            time: draft.time.clone(),
            severity: draft.intake.data().severity,
            consent: draft.intake.has_consent(),
            dropped_doctor: wizard.dropped_doctor().map(String::from),
        }
    }
}
