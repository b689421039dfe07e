//! Durable schedule store
//!
//! One JSON file per deployment mapping user ids to their [`UserRecord`].
//! The whole map is re-serialized on every mutation (write-through); the
//! write goes to a sibling temp file and is renamed over the target, so a
//! reader never observes a partially written file.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, info};

use crate::core::errors::ScheduleError;

use super::course::UserRecord;

/// In-memory mapping from user id to schedule record, bound to its
/// durable file.
#[derive(Debug)]
pub struct ScheduleStore {
    path: PathBuf,
    users: HashMap<String, UserRecord>,
}

impl ScheduleStore {
    /// Load the store from durable storage.
    ///
    /// A missing file yields an empty store. A file that exists but cannot
    /// be parsed into the expected shape is a fatal
    /// [`ScheduleError::CorruptState`] — startup must not silently discard
    /// user schedules.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ScheduleError> {
        let path = path.into();

        if !path.exists() {
            info!("No schedule file at {} — starting empty", path.display());
            return Ok(ScheduleStore {
                path,
                users: HashMap::new(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        let users: HashMap<String, UserRecord> = serde_json::from_str(&contents)
            .map_err(|source| ScheduleError::CorruptState {
                path: path.clone(),
                source,
            })?;

        info!(
            "Loaded schedules for {} user(s) from {}",
            users.len(),
            path.display()
        );
        Ok(ScheduleStore { path, users })
    }

    /// Serialize the full store to durable storage, atomically replacing
    /// the previous contents.
    pub fn save(&self) -> Result<(), ScheduleError> {
        let json = serde_json::to_vec_pretty(&self.users).map_err(io::Error::from)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            "Persisted {} user record(s) to {}",
            self.users.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Look up one user's record.
    pub fn user(&self, user_id: &str) -> Option<&UserRecord> {
        self.users.get(user_id)
    }

    /// Iterate all user records.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &UserRecord)> {
        self.users.iter()
    }

    /// Number of user records (including ones with no courses).
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Mutable access for the repository.
    pub(crate) fn user_mut(&mut self, user_id: &str) -> Option<&mut UserRecord> {
        self.users.get_mut(user_id)
    }

    /// Get-or-create a user record, refreshing its delivery context to the
    /// latest caller-supplied values (last writer wins).
    pub(crate) fn touch_user(
        &mut self,
        user_id: &str,
        provider_id: &str,
        conversation_id: &str,
    ) -> &mut UserRecord {
        let record = self.users.entry(user_id.to_string()).or_default();
        record.provider_id = provider_id.to_string();
        record.conversation_id = conversation_id.to_string();
        record
    }
}
