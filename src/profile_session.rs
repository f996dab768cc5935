//! Profile editing: a scratch buffer over the current profile with
//! commit/discard semantics.
//!
//! Key properties:
//! - `begin` snapshots the editable fields; the profile is untouched
//! - `commit` replaces the session's profile with the buffer contents
//! - `discard` drops the buffer with no effect
//! - At most one buffer is open per session; a buffer from an earlier edit
//!   is rejected as stale

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{Address, EmergencyContact, PatientProfile, Preferences};

/// Editable copy of a profile. Identity and birth date are not editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBuffer {
    profile_id: Uuid,
    generation: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub emergency_contact: EmergencyContact,
    pub preferences: Preferences,
}

impl EditBuffer {
    fn snapshot(profile: &PatientProfile, generation: u64) -> Self {
        Self {
            profile_id: profile.id,
            generation,
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            emergency_contact: profile.emergency_contact.clone(),
            preferences: profile.preferences.clone(),
        }
    }

    pub fn profile_id(&self) -> Uuid {
        self.profile_id
    }

    /// Whether saving would change anything.
    pub fn differs_from(&self, profile: &PatientProfile) -> bool {
        self.name != profile.name
            || self.email != profile.email
            || self.phone != profile.phone
            || self.address != profile.address
            || self.emergency_contact != profile.emergency_contact
            || self.preferences != profile.preferences
    }

    fn apply_to(self, profile: &PatientProfile) -> PatientProfile {
        PatientProfile {
            id: profile.id,
            birth_date: profile.birth_date,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            emergency_contact: self.emergency_contact,
            preferences: self.preferences,
        }
    }
}

/// Owns the session-wide current profile and its single edit slot.
#[derive(Debug, Clone)]
pub struct ProfileSession {
    current: PatientProfile,
    /// Generation of the open buffer, if any.
    open_edit: Option<u64>,
    next_generation: u64,
}

impl ProfileSession {
    pub fn new(profile: PatientProfile) -> Self {
        Self {
            current: profile,
            open_edit: None,
            next_generation: 0,
        }
    }

    pub fn current(&self) -> &PatientProfile {
        &self.current
    }

    pub fn is_editing(&self) -> bool {
        self.open_edit.is_some()
    }

    /// Open an edit buffer. Fails while another buffer is open.
    pub fn begin(&mut self) -> Result<EditBuffer, ProfileError> {
        if self.open_edit.is_some() {
            return Err(ProfileError::EditInProgress);
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        self.open_edit = Some(generation);

        tracing::debug!(profile_id = %self.current.id, generation, "Profile edit started");
        Ok(EditBuffer::snapshot(&self.current, generation))
    }

    /// Save the buffer as the new current profile.
    ///
    /// No field is required to be non-empty.
    pub fn commit(&mut self, buffer: EditBuffer) -> Result<&PatientProfile, ProfileError> {
        self.check_open(&buffer)?;
        let changed = buffer.differs_from(&self.current);
        self.current = buffer.apply_to(&self.current);
        self.open_edit = None;

        tracing::info!(profile_id = %self.current.id, changed, "Profile updated");
        Ok(&self.current)
    }

    /// Throw the buffer away. The profile is left exactly as it was.
    pub fn discard(&mut self, buffer: EditBuffer) -> Result<(), ProfileError> {
        self.check_open(&buffer)?;
        self.open_edit = None;
        tracing::debug!(profile_id = %self.current.id, "Profile edit discarded");
        Ok(())
    }

    /// Close the edit slot when the buffer itself is gone (screen dismissed).
    pub fn abort_edit(&mut self) {
        if self.open_edit.take().is_some() {
            tracing::debug!(profile_id = %self.current.id, "Profile edit aborted");
        }
    }

    fn check_open(&self, buffer: &EditBuffer) -> Result<(), ProfileError> {
        match self.open_edit {
            None => Err(ProfileError::NoEditInProgress),
            Some(generation)
                if generation != buffer.generation || buffer.profile_id != self.current.id =>
            {
                Err(ProfileError::StaleBuffer)
            }
            Some(_) => Ok(()),
        }
    }
}

/// Errors from profile edit operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile is already being edited")]
    EditInProgress,
    #[error("No profile edit is in progress")]
    NoEditInProgress,
    #[error("Edit buffer does not belong to the open profile edit")]
    StaleBuffer,
}
