//! Booking wizard.
//!
//! Linear flow that accumulates a draft appointment:
//!
//! ```text
//! pet → doctor → type → slot → intake → confirm ──commit──▶ AppStore
//! ```
//!
//! Each step gates `advance` on its own completeness check. Nothing reaches
//! the store until `commit` from the confirm step.

mod intake;

pub use intake::*;

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::catalog::DoctorDirectory;
use crate::config::CoreConfig;
use crate::models::{Appointment, DaySlots, Doctor, VisitType};
use crate::store::{AppState, AppStore, StoreError};

/// Wizard errors.
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Step '{step}' incomplete: {reason}")]
    Incomplete {
        step: WizardStep,
        reason: &'static str,
    },

    #[error("Doctor unavailable: {0}")]
    DoctorUnavailable(String),

    #[error("Doctor is not accepting bookings: {0}")]
    NotAcceptingBookings(String),

    #[error("Visit type '{0}' is not offered by this doctor")]
    UnsupportedVisitType(&'static str),

    #[error("No slots on {0}")]
    DateUnavailable(String),

    #[error("Slot unavailable: {date} {time}")]
    SlotUnavailable { date: String, time: String },

    #[error("Severity must be between 1 and 10, got {0}")]
    InvalidSeverity(u8),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Booking can only be confirmed from the confirm step (currently '{0}')")]
    WrongStep(WizardStep),

    #[error("Booking already committed")]
    Finished,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type WizardResult<T> = Result<T, WizardError>;

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Pet,
    Doctor,
    VisitType,
    Slot,
    Intake,
    Confirm,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Pet,
        WizardStep::Doctor,
        WizardStep::VisitType,
        WizardStep::Slot,
        WizardStep::Intake,
        WizardStep::Confirm,
    ];

    /// Zero-based position in the flow.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Pet => "pet",
            WizardStep::Doctor => "doctor",
            WizardStep::VisitType => "type",
            WizardStep::Slot => "slot",
            WizardStep::Intake => "intake",
            WizardStep::Confirm => "confirm",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selections accumulated so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub pet_id: Option<String>,
    pub doctor_id: Option<String>,
    pub visit_type: VisitType,
    pub date: Option<String>,
    pub time: Option<String>,
    pub intake: IntakeForm,
}

/// A single booking session.
pub struct BookingWizard {
    directory: Arc<dyn DoctorDirectory>,
    require_accepting: bool,
    step: WizardStep,
    draft: BookingDraft,
    /// Pre-selected doctor ID that could not be honoured
    dropped_doctor: Option<String>,
    finished: bool,
}

impl fmt::Debug for BookingWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingWizard")
            .field("step", &self.step)
            .field("draft", &self.draft)
            .field("dropped_doctor", &self.dropped_doctor)
            .field("finished", &self.finished)
            .finish()
    }
}

impl BookingWizard {
    /// Start a booking for the signed-in owner.
    ///
    /// The pet defaults to the store's current pet. A pre-selected doctor
    /// that is missing from the directory (or not taking bookings) is dropped
    /// and reported through [`BookingWizard::dropped_doctor`]; the owner then
    /// picks a doctor at the doctor step.
    pub fn start(
        state: &AppState,
        directory: Arc<dyn DoctorDirectory>,
        config: &CoreConfig,
        preselected_doctor: Option<&str>,
    ) -> WizardResult<Self> {
        state.require_owner()?;

        let mut wizard = Self {
            directory,
            require_accepting: config.require_accepting_bookings,
            step: WizardStep::Pet,
            draft: BookingDraft {
                pet_id: state.current_pet().map(|p| p.id.clone()),
                intake: IntakeForm::new(config.default_severity),
                ..BookingDraft::default()
            },
            dropped_doctor: None,
            finished: false,
        };

        if let Some(doctor_id) = preselected_doctor {
            if let Err(e) = wizard.select_doctor(doctor_id) {
                warn!("Dropping pre-selected doctor {}: {}", doctor_id, e);
                wizard.dropped_doctor = Some(doctor_id.to_string());
            }
        }

        debug!("Booking started at step {}", wizard.step);
        Ok(wizard)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Pre-selected doctor ID that was not found or not bookable.
    pub fn dropped_doctor(&self) -> Option<&str> {
        self.dropped_doctor.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // =========================================================================
    // Selections
    // =========================================================================

    pub fn select_pet(&mut self, state: &AppState, pet_id: &str) -> WizardResult<()> {
        self.ensure_open()?;
        state.pet(pet_id)?;
        self.draft.pet_id = Some(pet_id.to_string());
        Ok(())
    }

    /// Choose a doctor. Switching doctors clears the chosen slot, and resets
    /// the visit type if the new doctor does not offer it.
    pub fn select_doctor(&mut self, doctor_id: &str) -> WizardResult<()> {
        self.ensure_open()?;
        let doctor = self
            .directory
            .doctor(doctor_id)
            .ok_or_else(|| WizardError::DoctorUnavailable(doctor_id.to_string()))?;
        if self.require_accepting && !doctor.accepting_bookings {
            return Err(WizardError::NotAcceptingBookings(doctor_id.to_string()));
        }

        let fallback_type = doctor
            .preferred_visit_type()
            .ok_or(WizardError::UnsupportedVisitType(self.draft.visit_type.as_str()))?;
        let supports_current = doctor.supports(self.draft.visit_type);

        if self.draft.doctor_id.as_deref() != Some(doctor_id) {
            self.draft.date = None;
            self.draft.time = None;
        }
        if !supports_current {
            self.draft.visit_type = fallback_type;
        }
        self.draft.doctor_id = Some(doctor_id.to_string());
        self.dropped_doctor = None;
        Ok(())
    }

    pub fn select_visit_type(&mut self, visit_type: VisitType) -> WizardResult<()> {
        self.ensure_open()?;
        if let Some(doctor_id) = &self.draft.doctor_id {
            let doctor = self.doctor_by_id(doctor_id)?;
            if !doctor.supports(visit_type) {
                return Err(WizardError::UnsupportedVisitType(visit_type.as_str()));
            }
        }
        self.draft.visit_type = visit_type;
        Ok(())
    }

    /// Days and times the chosen doctor offers.
    ///
    /// Fails with `DoctorUnavailable` when the chosen doctor has vanished from
    /// the directory, so the slot step never renders an empty list silently.
    pub fn slot_options(&self) -> WizardResult<&[DaySlots]> {
        Ok(&self.selected_doctor()?.available_slots)
    }

    /// Choose a date. A time picked under a different date is cleared.
    pub fn select_date(&mut self, date: &str) -> WizardResult<()> {
        self.ensure_open()?;
        let doctor = self.selected_doctor()?;
        if doctor.times_on(date).is_none() {
            return Err(WizardError::DateUnavailable(date.to_string()));
        }
        if self.draft.date.as_deref() != Some(date) {
            self.draft.time = None;
        }
        self.draft.date = Some(date.to_string());
        Ok(())
    }

    /// Choose a time on the already selected date.
    pub fn select_time(&mut self, time: &str) -> WizardResult<()> {
        self.ensure_open()?;
        let date = self.draft.date.clone().ok_or(WizardError::Incomplete {
            step: WizardStep::Slot,
            reason: "select a date first",
        })?;
        if !self.selected_doctor()?.has_slot(&date, time) {
            return Err(WizardError::SlotUnavailable {
                date,
                time: time.to_string(),
            });
        }
        self.draft.time = Some(time.to_string());
        Ok(())
    }

    /// Choose date and time together; nothing changes if the slot is not offered.
    pub fn select_slot(&mut self, date: &str, time: &str) -> WizardResult<()> {
        self.ensure_open()?;
        if !self.selected_doctor()?.has_slot(date, time) {
            return Err(WizardError::SlotUnavailable {
                date: date.to_string(),
                time: time.to_string(),
            });
        }
        self.draft.date = Some(date.to_string());
        self.draft.time = Some(time.to_string());
        Ok(())
    }

    /// Intake form for editing.
    pub fn intake_mut(&mut self) -> WizardResult<&mut IntakeForm> {
        self.ensure_open()?;
        Ok(&mut self.draft.intake)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Move to the next step if the current one is complete. No-op at confirm.
    pub fn advance(&mut self) -> WizardResult<WizardStep> {
        self.ensure_open()?;
        if let Err(e) = self.check_step(self.step) {
            debug!("Cannot leave step {}: {}", self.step, e);
            return Err(e);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
            debug!("Booking advanced to {}", next);
        }
        Ok(self.step)
    }

    /// Move to the previous step. No-op at the first step.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            debug!("Booking moved back to {}", prev);
        }
        self.step
    }

    /// Completeness check for a single step.
    pub fn check_step(&self, step: WizardStep) -> WizardResult<()> {
        match step {
            WizardStep::Pet => {
                if self.draft.pet_id.is_none() {
                    return Err(WizardError::Incomplete {
                        step,
                        reason: "select a pet",
                    });
                }
            }
            WizardStep::Doctor => {
                if self.draft.doctor_id.is_none() {
                    return Err(WizardError::Incomplete {
                        step,
                        reason: "select a doctor",
                    });
                }
                self.selected_doctor()?;
            }
            WizardStep::VisitType => {
                let doctor = self.selected_doctor()?;
                if !doctor.supports(self.draft.visit_type) {
                    return Err(WizardError::UnsupportedVisitType(
                        self.draft.visit_type.as_str(),
                    ));
                }
            }
            WizardStep::Slot => {
                let doctor = self.selected_doctor()?;
                let (date, time) = match (&self.draft.date, &self.draft.time) {
                    (Some(date), Some(time)) => (date, time),
                    _ => {
                        return Err(WizardError::Incomplete {
                            step,
                            reason: "select a date and time",
                        })
                    }
                };
                if !doctor.has_slot(date, time) {
                    return Err(WizardError::SlotUnavailable {
                        date: date.clone(),
                        time: time.clone(),
                    });
                }
            }
            WizardStep::Intake => {
                if !self.draft.intake.has_consent() {
                    return Err(WizardError::Incomplete {
                        step,
                        reason: "consent is required",
                    });
                }
            }
            WizardStep::Confirm => {}
        }
        Ok(())
    }

    /// Build the appointment the current draft describes.
    pub fn build_appointment(&self) -> WizardResult<Appointment> {
        for step in WizardStep::ALL {
            self.check_step(step)?;
        }
        let incomplete =
            |step: WizardStep, reason: &'static str| WizardError::Incomplete { step, reason };
        let pet_id = self
            .draft
            .pet_id
            .clone()
            .ok_or_else(|| incomplete(WizardStep::Pet, "select a pet"))?;
        let doctor_id = self
            .draft
            .doctor_id
            .clone()
            .ok_or_else(|| incomplete(WizardStep::Doctor, "select a doctor"))?;
        let (date, time) = match (&self.draft.date, &self.draft.time) {
            (Some(date), Some(time)) => (date.clone(), time.clone()),
            _ => return Err(incomplete(WizardStep::Slot, "select a date and time")),
        };

        Ok(Appointment::new_pending(
            pet_id,
            doctor_id,
            date,
            time,
            self.draft.visit_type,
            Some(self.draft.intake.data().clone()),
        ))
    }

    /// Confirm the booking: append a pending appointment to the store.
    ///
    /// Only allowed from the confirm step. After a successful commit the
    /// wizard is finished and rejects further changes.
    pub fn commit(&mut self, store: &mut AppStore) -> WizardResult<Appointment> {
        self.ensure_open()?;
        if self.step != WizardStep::Confirm {
            return Err(WizardError::WrongStep(self.step));
        }
        let appointment = self.build_appointment()?;
        store.create_appointment(appointment.clone())?;
        self.finished = true;
        info!(
            "Booked {} with {} on {} {}",
            appointment.id, appointment.doctor_id, appointment.date, appointment.time
        );
        Ok(appointment)
    }

    fn ensure_open(&self) -> WizardResult<()> {
        if self.finished {
            return Err(WizardError::Finished);
        }
        Ok(())
    }

    fn doctor_by_id(&self, doctor_id: &str) -> WizardResult<&Doctor> {
        self.directory
            .doctor(doctor_id)
            .ok_or_else(|| WizardError::DoctorUnavailable(doctor_id.to_string()))
    }

    fn selected_doctor(&self) -> WizardResult<&Doctor> {
        let doctor_id = self.draft.doctor_id.as_deref().ok_or(WizardError::Incomplete {
            step: WizardStep::Doctor,
            reason: "select a doctor",
        })?;
        self.doctor_by_id(doctor_id)
    }
}
