use crate::error::StoreError;
use crate::store::codec::{decode, encode, ensure_known_fields, is_blank, LINE_SEPARATOR};
use common::model::record::Record;
use common::model::schema::Schema;
use log::{debug, error};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::slice;
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

/// The full record set of a file together with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub records: Vec<Record>,
    /// MD5 of the file bytes, `None` when the file does not exist yet.
    pub version: Option<String>,
}

/// Reads and mutates the records of one CSV file.
///
/// All mutations go through `write_lock`, so two requests in this process
/// can never interleave their read-modify-write sequences. Writers in other
/// processes are detected through [`RecordStore::update_versioned`].
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    schema: Schema,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, schema: Schema) -> Self {
        Self {
            path: path.into(),
            schema,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Reads the whole file. A missing file is an empty set, not an error.
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Snapshot {
                    records: Vec::new(),
                    version: None,
                })
            }
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        let records = decode(&bytes, &self.schema).map_err(|e| {
            error!("Failed to decode {}: {}", self.path.display(), e);
            e
        })?;

        Ok(Snapshot {
            records,
            version: Some(version_of(&bytes)),
        })
    }

    pub fn list(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.snapshot()?.records)
    }

    /// First record whose key field equals `key`.
    pub fn find(&self, key: &str) -> Result<Option<Record>, StoreError> {
        let key_field = &self.schema.key_field;
        Ok(self
            .list()?
            .into_iter()
            .find(|r| r.text(key_field) == Some(key)))
    }

    /// Merges `patch` into the record keyed by `key` and rewrites the file.
    ///
    /// Update-if-present: when no record matches, `NotFound` is returned and
    /// the file is not touched.
    pub fn update(&self, key: &str, patch: &Record) -> Result<Record, StoreError> {
        let _guard = self.lock();
        let snapshot = self.snapshot()?;
        self.apply(snapshot.records, key, patch)
    }

    /// Like [`update`](Self::update), but only if the file is still at
    /// `expected_version` (as returned by [`snapshot`](Self::snapshot)).
    pub fn update_versioned(
        &self,
        expected_version: Option<&str>,
        key: &str,
        patch: &Record,
    ) -> Result<Record, StoreError> {
        let _guard = self.lock();
        let snapshot = self.snapshot()?;
        if snapshot.version.as_deref() != expected_version {
            return Err(StoreError::Conflict);
        }
        self.apply(snapshot.records, key, patch)
    }

    /// Adds one record at the end of the file, creating it with a header if needed.
    pub fn append(&self, record: &Record) -> Result<(), StoreError> {
        let _guard = self.lock();
        self.append_locked(record)
    }

    /// Appends `record` unless another record already has the same key.
    pub fn insert_unique(&self, record: &Record) -> Result<(), StoreError> {
        let key_field = &self.schema.key_field;
        let key = record.text(key_field).ok_or_else(|| {
            StoreError::SchemaMismatch(format!("record is missing key field '{}'", key_field))
        })?;

        let _guard = self.lock();
        if self
            .snapshot()?
            .records
            .iter()
            .any(|r| r.text(key_field) == Some(key))
        {
            return Err(StoreError::DuplicateKey {
                key: key.to_string(),
            });
        }
        self.append_locked(record)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, a panicked writer leaves nothing inconsistent behind.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply(&self, mut records: Vec<Record>, key: &str, patch: &Record) -> Result<Record, StoreError> {
        ensure_known_fields(patch, &self.schema)?;
        let key_field = &self.schema.key_field;
        if patch.text(key_field).is_some_and(|k| k != key) {
            return Err(StoreError::SchemaMismatch(format!(
                "key field '{}' cannot be changed",
                key_field
            )));
        }

        let position = records
            .iter()
            .position(|r| r.text(key_field) == Some(key))
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })?;
        records[position].merge(patch);

        let bytes = encode(&records, &self.schema, true)?;
        self.replace(&bytes)?;
        debug!(
            "Rewrote {} ({} records) after updating '{}'",
            self.path.display(),
            records.len(),
            key
        );

        Ok(records.swap_remove(position))
    }

    fn append_locked(&self, record: &Record) -> Result<(), StoreError> {
        ensure_known_fields(record, &self.schema)?;

        let existing = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        if is_blank(&existing) {
            let bytes = encode(slice::from_ref(record), &self.schema, true)?;
            self.replace(&bytes)?;
            debug!("Created {} with its first record", self.path.display());
            return Ok(());
        }

        let mut row = Vec::new();
        if !existing.ends_with(LINE_SEPARATOR) {
            row.extend_from_slice(LINE_SEPARATOR);
        }
        row.extend(encode(slice::from_ref(record), &self.schema, false)?);

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(&row)?;
        file.sync_data()?;
        debug!("Appended a record to {}", self.path.display());
        Ok(())
    }

    /// Atomically replaces the file: readers see either the old or the new content.
    fn replace(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            error!("Failed to replace {}: {}", self.path.display(), e.error);
            StoreError::Io(e.error)
        })?;
        Ok(())
    }
}

fn version_of(bytes: &[u8]) -> String {
    let mut hasher = md5::Context::new();
    hasher.consume(bytes);
    format!("{:x}", hasher.finalize())
}
