use std::fmt;

/// Shown when a registration is stored
pub const SUCCESS_MESSAGE: &str = "Registration successful! We will contact you shortly.";
/// Shown for any failure without a more specific message
pub const FAILURE_MESSAGE: &str = "Registration failed. Please try again later.";

/// Why a registration could not be stored
#[derive(Debug)]
pub enum StoreError {
    /// The form is incomplete
    Validation(String),
    /// The store refuses writes
    PermissionDenied,
    /// No backing collection is configured
    NotInitialized,
    Io(std::io::Error),
    Encode(bincode::Error),
}

impl StoreError {
    /// Message suitable for a toast
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
            Self::PermissionDenied => "Permission denied. Please check your authentication.",
            Self::NotInitialized => "System configuration error. Please contact support.",
            Self::Io(_) | Self::Encode(_) => FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation failed: {msg}"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::NotInitialized => write!(f, "store is not initialized"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Encode(e) => write!(f, "encoding error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied
        } else {
            Self::Io(e)
        }
    }
}

impl From<bincode::Error> for StoreError {
    fn from(e: bincode::Error) -> Self {
        Self::Encode(e)
    }
}
