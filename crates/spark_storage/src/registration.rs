use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use super::error::StoreError;

pub const INCOMPLETE_FORM: &str = "Please fill in all fields";

/// Identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub Uuid);

impl RegistrationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every new registration awaits confirmation by the organizers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Pending,
}

/// What the attendee typed into the modal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub university: String,
}

impl From<&spark_core::AttendeeProfile> for RegistrationForm {
    fn from(p: &spark_core::AttendeeProfile) -> Self {
        Self {
            name: p.name.clone(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            university: p.university.clone(),
        }
    }
}

impl RegistrationForm {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.university]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    /// Turn a complete form into a pending registration for `event`
    pub fn validate(&self, event: &str, now: SystemTime) -> Result<Registration, StoreError> {
        if !self.is_complete() {
            return Err(StoreError::Validation(INCOMPLETE_FORM.into()));
        }
        let created_at = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Ok(Registration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            university: self.university.trim().to_string(),
            event: event.to_string(),
            status: RegistrationStatus::Pending,
            created_at,
        })
    }
}

/// Record written to the registrations collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub university: String,
    /// Title of the event registered for
    pub event: String,
    pub status: RegistrationStatus,
    /// Client timestamp, unix milliseconds
    pub created_at: u64,
}
