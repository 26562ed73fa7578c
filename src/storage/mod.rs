//! Storage layer for splitledger
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. This is the persistence and membership collaborator of the
//! ledger: it hands out consistent per-group snapshots and never computes
//! balances itself.

pub mod expenses;
pub mod file_io;
pub mod groups;
pub mod members;
pub mod settlements;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use groups::GroupRepository;
pub use members::MemberRepository;
pub use settlements::SettlementRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Group, GroupId, Member, Settlement};

pub(crate) fn read_guard<T>(lock: &RwLock<T>) -> LedgerResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_guard<T>(lock: &RwLock<T>) -> LedgerResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Everything the ledger needs for one group at a single point in time
#[derive(Debug, Clone)]
pub struct GroupSnapshot {
    pub group: Group,
    /// Group members in membership order
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
    pub settlements: Vec<Settlement>,
}

/// A deleted group and the activity removed along with it
#[derive(Debug, Clone)]
pub struct RemovedGroup {
    pub group: Group,
    pub expenses: Vec<Expense>,
    pub settlements: Vec<Settlement>,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    audit: AuditLogger,
    pub members: MemberRepository,
    pub groups: GroupRepository,
    pub expenses: ExpenseRepository,
    pub settlements: SettlementRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            members: MemberRepository::new(paths.members_file()),
            groups: GroupRepository::new(paths.groups_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            settlements: SettlementRepository::new(paths.settlements_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.members.load()?;
        self.groups.load()?;
        self.expenses.load()?;
        self.settlements.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LedgerError> {
        self.members.save()?;
        self.groups.save()?;
        self.expenses.save()?;
        self.settlements.save()?;
        Ok(())
    }

    /// Read one group's members, expenses, and settlements together
    ///
    /// Read locks are taken in the order groups, members, expenses,
    /// settlements, and all four are held until the snapshot is built, so
    /// no write to any of them can land part way through. Writers that
    /// touch several tables (see [`Storage::remove_group`]) lock in the
    /// same order.
    pub fn group_snapshot(&self, group_id: GroupId) -> LedgerResult<GroupSnapshot> {
        let groups = self.groups.read()?;
        let members = self.members.read()?;
        let expenses = self.expenses.read()?;
        let settlements = self.settlements.read()?;

        let group = groups
            .get(&group_id)
            .cloned()
            .ok_or_else(|| LedgerError::group_not_found(group_id.to_string()))?;

        Ok(GroupSnapshot {
            members: members.many(&group.member_ids),
            expenses: expenses.for_group(group_id),
            settlements: settlements.for_group(group_id),
            group,
        })
    }

    /// Remove a group together with its expenses and settlements
    ///
    /// Holds the group, expense, and settlement write locks for the whole
    /// removal, so no snapshot sees a group with part of its activity gone.
    /// Nothing is written to disk here.
    pub fn remove_group(&self, group_id: GroupId) -> LedgerResult<RemovedGroup> {
        let mut groups = self.groups.write()?;
        let mut expenses = self.expenses.write()?;
        let mut settlements = self.settlements.write()?;

        let group = groups
            .remove(&group_id)
            .ok_or_else(|| LedgerError::group_not_found(group_id.to_string()))?;

        Ok(RemovedGroup {
            group,
            expenses: expenses.remove_group(group_id),
            settlements: settlements.remove_group(group_id),
        })
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> LedgerResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Split};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_group_snapshot_only_includes_group_records() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let alice = Member::new("Alice");
        let bob = Member::new("Bob");
        storage.members.upsert(alice.clone()).unwrap();
        storage.members.upsert(bob.clone()).unwrap();

        let mut group = Group::new("Trip");
        group.add_member(bob.id);
        group.add_member(alice.id);
        storage.groups.upsert(group.clone()).unwrap();

        let other = GroupId::new();
        let amount = Money::from_cents(2000);
        for group_id in [group.id, other] {
            storage
                .expenses
                .upsert(Expense::new(
                    group_id,
                    "Fuel",
                    amount,
                    alice.id,
                    vec![Split::new(bob.id, amount)],
                ))
                .unwrap();
        }
        storage
            .settlements
            .upsert(Settlement::new(group.id, bob.id, alice.id, amount))
            .unwrap();

        let snapshot = storage.group_snapshot(group.id).unwrap();

        let names: Vec<_> = snapshot.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.settlements.len(), 1);
    }

    #[test]
    fn test_snapshot_of_unknown_group() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let err = storage.group_snapshot(GroupId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_snapshot_never_sees_activity_ahead_of_membership() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let founder = Member::new("Founder");
        storage.members.upsert(founder.clone()).unwrap();
        let mut group = Group::new("Busy");
        group.add_member(founder.id);
        storage.groups.upsert(group.clone()).unwrap();
        let group_id = group.id;

        std::thread::scope(|scope| {
            let writer = &storage;
            scope.spawn(move || {
                for n in 0..200 {
                    let joiner = Member::new(format!("Joiner {}", n));
                    writer.members.upsert(joiner.clone()).unwrap();
                    group.add_member(joiner.id);
                    writer.groups.upsert(group.clone()).unwrap();

                    let amount = Money::from_cents(100);
                    writer
                        .expenses
                        .upsert(Expense::new(
                            group_id,
                            "Round",
                            amount,
                            joiner.id,
                            vec![Split::new(founder.id, amount)],
                        ))
                        .unwrap();
                }
            });

            for _ in 0..200 {
                let snapshot = storage.group_snapshot(group_id).unwrap();
                let balances = crate::ledger::compute_balances(
                    &snapshot.group.member_ids,
                    &snapshot.expenses,
                    &snapshot.settlements,
                );
                assert!(balances.is_ok(), "inconsistent snapshot: {:?}", balances);
            }
        });
    }

    #[test]
    fn test_remove_group_takes_its_activity_along() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let (alice, bob) = (Member::new("Alice"), Member::new("Bob"));
        let doomed = Group::new("Doomed");
        let kept = Group::new("Kept");
        storage.groups.upsert(doomed.clone()).unwrap();
        storage.groups.upsert(kept.clone()).unwrap();

        let amount = Money::from_cents(500);
        for group_id in [doomed.id, kept.id] {
            storage
                .expenses
                .upsert(Expense::new(
                    group_id,
                    "Snacks",
                    amount,
                    alice.id,
                    vec![Split::new(bob.id, amount)],
                ))
                .unwrap();
            storage
                .settlements
                .upsert(Settlement::new(group_id, bob.id, alice.id, amount))
                .unwrap();
        }

        let removed = storage.remove_group(doomed.id).unwrap();

        assert_eq!(removed.group.id, doomed.id);
        assert_eq!(removed.expenses.len(), 1);
        assert_eq!(removed.settlements.len(), 1);
        assert!(storage.groups.get(doomed.id).unwrap().is_none());
        assert!(storage.expenses.get_by_group(doomed.id).unwrap().is_empty());
        assert!(storage.settlements.get_by_group(doomed.id).unwrap().is_empty());
        assert_eq!(storage.expenses.count().unwrap(), 1);
        assert_eq!(storage.group_snapshot(kept.id).unwrap().settlements.len(), 1);

        assert!(storage.remove_group(doomed.id).unwrap_err().is_not_found());
    }
}
