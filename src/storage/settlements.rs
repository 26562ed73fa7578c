//! Settlement repository for JSON storage
//!
//! Manages loading and saving recorded settlements to settlements.json,
//! indexed by group.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::LedgerError;
use crate::models::{GroupId, Settlement, SettlementId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_guard, write_guard};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SettlementData {
    settlements: Vec<Settlement>,
}

#[derive(Debug, Default)]
pub(crate) struct SettlementTable {
    by_id: HashMap<SettlementId, Settlement>,
    by_group: HashMap<GroupId, Vec<SettlementId>>,
}

impl SettlementTable {
    fn insert(&mut self, settlement: Settlement) {
        let ids = self.by_group.entry(settlement.group_id).or_default();
        if !ids.contains(&settlement.id) {
            ids.push(settlement.id);
        }
        self.by_id.insert(settlement.id, settlement);
    }

    /// Drop every settlement of a group, returning them in recorded order
    pub(crate) fn remove_group(&mut self, group_id: GroupId) -> Vec<Settlement> {
        let mut removed: Vec<Settlement> = self
            .by_group
            .remove(&group_id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| self.by_id.remove(&id))
            .collect();
        removed.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        removed
    }

    /// Settlements of one group in the order they were recorded
    pub(crate) fn for_group(&self, group_id: GroupId) -> Vec<Settlement> {
        let mut settlements: Vec<Settlement> = self
            .by_group
            .get(&group_id)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id).cloned()).collect())
            .unwrap_or_default();
        settlements.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        settlements
    }
}

/// Repository for settlement persistence with a group index
pub struct SettlementRepository {
    path: PathBuf,
    table: RwLock<SettlementTable>,
}

impl SettlementRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(SettlementTable::default()),
        }
    }

    /// Load settlements from disk and build the group index
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: SettlementData = read_json(&self.path)?;
        let mut table = write_guard(&self.table)?;

        *table = SettlementTable::default();
        for settlement in file_data.settlements {
            table.insert(settlement);
        }

        Ok(())
    }

    /// Save settlements to disk, oldest first
    pub fn save(&self) -> Result<(), LedgerError> {
        let mut settlements: Vec<_> = read_guard(&self.table)?.by_id.values().cloned().collect();
        settlements.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        write_json_atomic(&self.path, &SettlementData { settlements })
    }

    pub fn get(&self, id: SettlementId) -> Result<Option<Settlement>, LedgerError> {
        Ok(read_guard(&self.table)?.by_id.get(&id).cloned())
    }

    pub fn get_by_group(&self, group_id: GroupId) -> Result<Vec<Settlement>, LedgerError> {
        Ok(read_guard(&self.table)?.for_group(group_id))
    }

    pub fn upsert(&self, settlement: Settlement) -> Result<(), LedgerError> {
        write_guard(&self.table)?.insert(settlement);
        Ok(())
    }

    pub fn delete(&self, id: SettlementId) -> Result<bool, LedgerError> {
        let mut table = write_guard(&self.table)?;
        match table.by_id.remove(&id) {
            Some(settlement) => {
                if let Some(ids) = table.by_group.get_mut(&settlement.group_id) {
                    ids.retain(|s| *s != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, SettlementTable>, LedgerError> {
        read_guard(&self.table)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, SettlementTable>, LedgerError> {
        write_guard(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberId, Money};
    use tempfile::TempDir;

    #[test]
    fn test_upsert_delete_and_group_listing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SettlementRepository::new(temp_dir.path().join("settlements.json"));
        repo.load().unwrap();

        let group = GroupId::new();
        let payment = |cents| {
            Settlement::new(group, MemberId::new(), MemberId::new(), Money::from_cents(cents))
        };
        let first = payment(500);
        let second = payment(700);
        repo.upsert(first.clone()).unwrap();
        repo.upsert(second.clone()).unwrap();

        let listed = repo.get_by_group(group).unwrap();
        assert_eq!(listed.len(), 2);

        assert!(repo.delete(first.id).unwrap());
        assert_eq!(repo.get_by_group(group).unwrap(), vec![second]);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settlements.json");
        let repo = SettlementRepository::new(path.clone());
        repo.load().unwrap();

        let settlement = Settlement::new(
            GroupId::new(),
            MemberId::new(),
            MemberId::new(),
            Money::from_cents(3000),
        );
        repo.upsert(settlement.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = SettlementRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(settlement.id).unwrap(), Some(settlement));
    }
}
