//! Group repository for JSON storage
//!
//! Manages loading and saving groups (with their membership lists) to
//! groups.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::LedgerError;
use crate::models::{Group, GroupId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_guard, write_guard};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GroupData {
    groups: Vec<Group>,
}

/// Repository for group persistence
pub struct GroupRepository {
    path: PathBuf,
    data: RwLock<HashMap<GroupId, Group>>,
}

impl GroupRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load groups from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: GroupData = read_json(&self.path)?;
        let mut data = write_guard(&self.data)?;

        data.clear();
        for group in file_data.groups {
            data.insert(group.id, group);
        }

        Ok(())
    }

    /// Save groups to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let groups = self.get_all()?;
        write_json_atomic(&self.path, &GroupData { groups })
    }

    pub fn get(&self, id: GroupId) -> Result<Option<Group>, LedgerError> {
        Ok(read_guard(&self.data)?.get(&id).cloned())
    }

    /// Get a group by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Group>, LedgerError> {
        let needle = name.trim().to_lowercase();
        Ok(read_guard(&self.data)?
            .values()
            .find(|g| g.name.trim().to_lowercase() == needle)
            .cloned())
    }

    /// All groups, oldest first
    pub fn get_all(&self) -> Result<Vec<Group>, LedgerError> {
        let mut groups: Vec<_> = read_guard(&self.data)?.values().cloned().collect();
        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(groups)
    }

    /// Insert or update a group
    pub fn upsert(&self, group: Group) -> Result<(), LedgerError> {
        write_guard(&self.data)?.insert(group.id, group);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        Ok(read_guard(&self.data)?.len())
    }

    pub(crate) fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<GroupId, Group>>, LedgerError> {
        read_guard(&self.data)
    }

    pub(crate) fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<GroupId, Group>>, LedgerError> {
        write_guard(&self.data)
    }
}
