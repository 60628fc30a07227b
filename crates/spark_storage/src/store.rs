use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{error, info};

use super::error::StoreError;
use super::registration::{Registration, RegistrationForm, RegistrationId};

/// A registration together with its generated id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRegistration {
    pub id: RegistrationId,
    pub record: Registration,
}

/// Collection accepting registration documents
pub trait DocumentStore {
    /// Append a record and return its generated id
    fn add(&mut self, record: &Registration) -> Result<RegistrationId, StoreError>;

    /// Every stored record in insertion order
    fn list(&self) -> Result<Vec<StoredRegistration>, StoreError>;
}

/// Registrations kept as one bincode file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Option<PathBuf>,
    read_only: bool,
}

impl FileStore {
    /// `None` models a store whose backend was never configured
    pub fn new(path: Option<PathBuf>, read_only: bool) -> Self {
        Self { path, read_only }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn require_path(&self) -> Result<&Path, StoreError> {
        self.path.as_deref().ok_or(StoreError::NotInitialized)
    }
}

impl DocumentStore for FileStore {
    fn add(&mut self, record: &Registration) -> Result<RegistrationId, StoreError> {
        let path = self.require_path()?;
        if self.read_only {
            return Err(StoreError::PermissionDenied);
        }

        let mut all = load_collection(path)?;
        let id = RegistrationId::generate();
        all.push(StoredRegistration {
            id,
            record: record.clone(),
        });
        save_collection(&all, path)?;
        Ok(id)
    }

    fn list(&self) -> Result<Vec<StoredRegistration>, StoreError> {
        load_collection(self.require_path()?)
    }
}

fn load_collection(path: &Path) -> Result<Vec<StoredRegistration>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read(path)?;
    Ok(bincode::deserialize(&data)?)
}

/// Sibling file a save is written to before it replaces the collection
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the whole collection to a staging file, then rename it into place.
/// An interrupted save leaves the previous collection intact.
fn save_collection(all: &[StoredRegistration], path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = bincode::serialize(all)?;
    let staging = staging_path(path);
    fs::write(&staging, data)?;
    fs::rename(&staging, path)?;
    Ok(())
}

/// Validate `form` for `event` and store it
pub fn submit(
    store: &mut impl DocumentStore,
    form: &RegistrationForm,
    event: &str,
    now: SystemTime,
) -> Result<RegistrationId, StoreError> {
    let result = form
        .validate(event, now)
        .and_then(|record| store.add(&record));
    match &result {
        Ok(id) => info!("Registration successful with ID: {id} ({event})"),
        Err(e) => error!("Error submitting registration for {event}: {e}"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::RegistrationStatus;
    use uuid::Uuid;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("spark-store-{}", Uuid::new_v4()))
            .join("registrations.bin")
    }

    fn form() -> RegistrationForm {
        RegistrationForm {
            name: "Grace".into(),
            email: "grace@example.org".into(),
            phone: "555-0199".into(),
            university: "Navy College".into(),
        }
    }

    #[test]
    fn test_add_and_list_round_trip() {
        let path = temp_store_path();
        let mut store = FileStore::new(Some(path.clone()), false);

        let a = submit(&mut store, &form(), "Hackathon", SystemTime::now()).unwrap();
        let b = submit(&mut store, &form(), "Tech Talks", SystemTime::now()).unwrap();
        assert_ne!(a, b);

        let all = FileStore::new(Some(path.clone()), true).list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a);
        assert_eq!(all[1].record.event, "Tech Talks");
        assert_eq!(all[1].record.status, RegistrationStatus::Pending);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_uninitialized_store() {
        let mut store = FileStore::new(None, false);
        let err = submit(&mut store, &form(), "Hackathon", SystemTime::now()).unwrap_err();
        assert!(matches!(err, StoreError::NotInitialized));
        assert!(store.list().is_err());
    }

    #[test]
    fn test_read_only_store_denies() {
        let path = temp_store_path();
        let mut store = FileStore::new(Some(path.clone()), true);
        let err = submit(&mut store, &form(), "Hackathon", SystemTime::now()).unwrap_err();
        assert!(matches!(err, StoreError::PermissionDenied));
        assert!(!path.exists());
    }

    #[test]
    fn test_validation_runs_before_store() {
        // Validation wins even against an uninitialized backend
        let mut store = FileStore::new(None, false);
        let err = submit(&mut store, &RegistrationForm::default(), "Hackathon", SystemTime::now())
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_staging_path_is_sibling() {
        let path = Path::new("data/registrations.bin");
        assert_eq!(staging_path(path), Path::new("data/registrations.bin.tmp"));
    }

    #[test]
    fn test_save_leaves_no_staging_file() {
        let path = temp_store_path();
        let mut store = FileStore::new(Some(path.clone()), false);
        submit(&mut store, &form(), "Hackathon", SystemTime::now()).unwrap();
        assert!(path.exists());
        assert!(!staging_path(&path).exists());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_interrupted_save_keeps_collection_readable() {
        let path = temp_store_path();
        let mut store = FileStore::new(Some(path.clone()), false);
        let first = submit(&mut store, &form(), "Hackathon", SystemTime::now()).unwrap();

        // A save that died mid-write leaves only a truncated staging file
        let full = fs::read(&path).unwrap();
        fs::write(staging_path(&path), &full[..full.len() / 2]).unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, first);

        // The next save overwrites the stale staging file
        let second = submit(&mut store, &form(), "Tech Talks", SystemTime::now()).unwrap();
        let all = store.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, second);
        assert!(!staging_path(&path).exists());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_encode_error() {
        let path = temp_store_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0xff, 0xff, 0xff]).unwrap();
        let store = FileStore::new(Some(path.clone()), false);
        assert!(matches!(store.list(), Err(StoreError::Encode(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
