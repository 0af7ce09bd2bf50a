//! The encrypted record store.
//!
//! [`EncryptedStore`] owns the authoritative, newest-first collection and the
//! device key. Every mutation re-encodes and re-encrypts the whole collection
//! and replaces the backing file in one step.
//!
//! Failures never escape to the caller. An unreadable file opens as an empty
//! store and is left untouched until the first write, which moves it aside
//! instead of overwriting it. A failed write leaves the in-memory collection
//! in place and marks the store not durable.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::codec;
use crate::crypto::{self, SymmetricKey};
use crate::error::{Result, StashError};
use crate::fs::{ensure_parent_dir, set_owner_only, write_replace};
use crate::keys::{resolve_key, KeyProvider};
use crate::record::{Record, RecordKind, RecordVariant};

/// Maximum number of image records kept by default.
pub const DEFAULT_MAX_IMAGES: usize = 10;

/// Maximum number of records of any kind kept by default.
pub const DEFAULT_MAX_RECORDS: usize = 100;

/// Per-kind and overall caps, enforced when a record is added.
///
/// The oldest records beyond a cap are dropped. Both caps must be at least 1,
/// so a freshly added record always survives its own insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_images: usize,
    pub max_records: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_images: DEFAULT_MAX_IMAGES,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

impl RetentionPolicy {
    /// Check that both caps are at least 1.
    ///
    /// # Errors
    ///
    /// Returns `StashError::Validation` naming the first cap that is 0.
    pub fn validate(&self) -> Result<()> {
        if self.max_images == 0 {
            return Err(StashError::Validation(
                "max_images must be at least 1".to_string(),
            ));
        }
        if self.max_records == 0 {
            return Err(StashError::Validation(
                "max_records must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the collection was obtained when the store was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No backing file yet (first run)
    Fresh,

    /// Backing file read, decrypted and decoded
    Loaded,

    /// Backing file could not be used; the store started empty
    Recovered {
        /// Why the file could not be used
        reason: String,
        /// Where the unreadable file was moved. `None` until the first write.
        quarantined: Option<PathBuf>,
    },
}

/// Encrypted, file-backed record collection.
#[derive(Debug)]
pub struct EncryptedStore {
    path: PathBuf,
    key: SymmetricKey,
    records: Vec<Record>,
    retention: RetentionPolicy,
    load_status: LoadStatus,
    durable: bool,
    /// The unreadable file still sits at `path` and must be moved before a write.
    pending_quarantine: bool,
}

impl EncryptedStore {
    /// Open the store at `path` with `key`.
    ///
    /// Creates the parent directory if needed. A missing file gives an empty
    /// store. A file that cannot be read, decrypted or decoded also gives an
    /// empty store and the cause is logged. Opening never touches the file:
    /// it stays readable for a later open with the right key, and is renamed
    /// to `<name>.corrupt-<timestamp>` only when this store first persists.
    pub fn open(path: impl Into<PathBuf>, key: SymmetricKey) -> Self {
        let path = path.into();

        if let Err(err) = ensure_parent_dir(&path) {
            warn!(path = %path.display(), error = %err, "failed to create store directory");
        }

        let (records, load_status, pending_quarantine) = match load(&path, &key) {
            Ok(None) => {
                debug!(path = %path.display(), "no store file yet; starting empty");
                (Vec::new(), LoadStatus::Fresh, false)
            }
            Ok(Some(records)) => {
                debug!(path = %path.display(), count = records.len(), "loaded store");
                (records, LoadStatus::Loaded, false)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "store file unreadable; starting with an empty collection"
                );
                let status = LoadStatus::Recovered {
                    reason: err.to_string(),
                    quarantined: None,
                };
                (Vec::new(), status, true)
            }
        };

        Self {
            path,
            key,
            records,
            retention: RetentionPolicy::default(),
            load_status,
            durable: true,
            pending_quarantine,
        }
    }

    /// Resolve the key from `provider` (falling back to an ephemeral key) and open.
    ///
    /// # Errors
    ///
    /// Fails only if no key could be produced at all (no OS random source).
    pub fn open_with_provider(
        path: impl Into<PathBuf>,
        provider: &dyn KeyProvider,
    ) -> Result<Self> {
        let key = resolve_key(provider)?;
        Ok(Self::open(path, key))
    }

    /// Replace the retention caps used by subsequent `add` calls.
    ///
    /// # Errors
    ///
    /// Returns `StashError::Validation` if either cap is 0.
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Result<Self> {
        retention.validate()?;
        self.retention = retention;
        Ok(self)
    }

    /// Add a record at the head of the collection and persist.
    ///
    /// Returns `None` (and changes nothing) if the variant fails validation.
    /// Retention caps are applied after insertion.
    pub fn add(&mut self, variant: RecordVariant) -> Option<Record> {
        let variant = variant.normalized();
        if let Err(err) = variant.validate() {
            debug!(kind = %variant.kind(), error = %err, "rejected record");
            return None;
        }

        let record = Record::new(variant);
        self.records.insert(0, record.clone());
        self.enforce_retention();
        self.persist_logged();
        Some(record)
    }

    /// Remove the record with `id`. Returns whether a record was removed.
    ///
    /// The file is rewritten only when something was removed.
    pub fn delete(&mut self, id: &Uuid) -> bool {
        let Some(index) = self.records.iter().position(|record| record.id == *id) else {
            return false;
        };
        self.records.remove(index);
        self.persist_logged();
        true
    }

    /// Current collection, newest first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &Uuid) -> Option<&Record> {
        self.records.iter().find(|record| record.id == *id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Whether the last write reached disk.
    ///
    /// `false` after a failed persist until a later one succeeds.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    fn enforce_retention(&mut self) {
        let before = self.records.len();
        let max_images = self.retention.max_images;
        let mut images = 0usize;
        // Newest first, so the images past the cap are the oldest ones.
        self.records.retain(|record| {
            if record.kind() != RecordKind::Image {
                return true;
            }
            images += 1;
            images <= max_images
        });
        self.records.truncate(self.retention.max_records);

        let evicted = before - self.records.len();
        if evicted > 0 {
            debug!(evicted, "retention caps dropped oldest records");
        }
    }

    /// Rename the unreadable file opened earlier so the write cannot replace it.
    ///
    /// If the rename fails the write is refused; the file is never overwritten.
    fn move_unreadable_aside(&mut self) -> Result<()> {
        let moved = quarantine(&self.path).map_err(|e| {
            StashError::Persist(format!(
                "Refusing to overwrite unreadable {}: could not move it aside: {}",
                self.path.display(),
                e
            ))
        })?;
        if let LoadStatus::Recovered { quarantined, .. } = &mut self.load_status {
            *quarantined = moved;
        }
        self.pending_quarantine = false;
        Ok(())
    }

    fn persist_logged(&mut self) {
        match self.persist() {
            Ok(()) => self.durable = true,
            Err(err) => {
                error!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to persist store; changes are kept in memory only"
                );
                self.durable = false;
            }
        }
    }

    fn persist(&mut self) -> Result<()> {
        let payload = Zeroizing::new(codec::encode(&self.records)?);
        let sealed = crypto::encrypt(&payload, &self.key)?;

        ensure_parent_dir(&self.path).map_err(|e| persist_error(&self.path, e))?;
        if self.pending_quarantine {
            self.move_unreadable_aside()?;
        }
        write_replace(&self.path, &sealed).map_err(|e| persist_error(&self.path, e))?;
        if let Err(err) = set_owner_only(&self.path) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "failed to restrict store file permissions"
            );
        }

        debug!(path = %self.path.display(), count = self.records.len(), "persisted store");
        Ok(())
    }
}

fn persist_error(path: &Path, err: std::io::Error) -> StashError {
    StashError::Persist(format!("Failed to write {}: {}", path.display(), err))
}

/// Read, decrypt and decode the backing file. `Ok(None)` if it does not exist.
fn load(path: &Path, key: &SymmetricKey) -> Result<Option<Vec<Record>>> {
    let sealed = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let payload = Zeroizing::new(crypto::decrypt(&sealed, key)?);
    codec::decode(&payload).map(Some)
}

/// Move an unusable store file aside. `Ok(None)` if there is nothing to move.
fn quarantine(path: &Path) -> std::io::Result<Option<PathBuf>> {
    let Some(file_name) = path.file_name() else {
        return Ok(None);
    };
    if !path.is_file() {
        return Ok(None);
    }
    let mut name = file_name.to_os_string();
    name.push(format!(".corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S%.3fZ")));
    let target = path.with_file_name(name);

    if let Err(err) = fs::rename(path, &target) {
        warn!(
            path = %path.display(),
            error = %err,
            "failed to move unreadable store file aside"
        );
        return Err(err);
    }
    info!(
        from = %path.display(),
        to = %target.display(),
        "moved unreadable store file aside"
    );
    Ok(Some(target))
}
