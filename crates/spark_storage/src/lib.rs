pub mod error;
pub mod registration;
pub mod store;

pub use error::{StoreError, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use registration::{Registration, RegistrationForm, RegistrationId, RegistrationStatus};
pub use store::{submit, DocumentStore, FileStore, StoredRegistration};
