//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses (with their embedded splits) to
//! expenses.json, indexed by group.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::LedgerError;
use crate::models::{Expense, ExpenseId, GroupId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_guard, write_guard};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

#[derive(Debug, Default)]
pub(crate) struct ExpenseTable {
    by_id: HashMap<ExpenseId, Expense>,
    /// Index: group_id -> expense_ids
    by_group: HashMap<GroupId, Vec<ExpenseId>>,
}

impl ExpenseTable {
    fn insert(&mut self, expense: Expense) {
        if let Some(old) = self.by_id.get(&expense.id) {
            if old.group_id != expense.group_id {
                let old_group = old.group_id;
                self.unindex(old_group, expense.id);
            }
        }
        let ids = self.by_group.entry(expense.group_id).or_default();
        if !ids.contains(&expense.id) {
            ids.push(expense.id);
        }
        self.by_id.insert(expense.id, expense);
    }

    fn unindex(&mut self, group_id: GroupId, id: ExpenseId) {
        if let Some(ids) = self.by_group.get_mut(&group_id) {
            ids.retain(|e| *e != id);
        }
    }

    /// Drop every expense of a group, returning them oldest first
    pub(crate) fn remove_group(&mut self, group_id: GroupId) -> Vec<Expense> {
        let mut removed: Vec<Expense> = self
            .by_group
            .remove(&group_id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| self.by_id.remove(&id))
            .collect();
        removed.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        removed
    }

    /// Expenses of one group, oldest first
    pub(crate) fn for_group(&self, group_id: GroupId) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self
            .by_group
            .get(&group_id)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id).cloned()).collect())
            .unwrap_or_default();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        expenses
    }
}

/// Repository for expense persistence with a group index
pub struct ExpenseRepository {
    path: PathBuf,
    table: RwLock<ExpenseTable>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(ExpenseTable::default()),
        }
    }

    /// Load expenses from disk and build the group index
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let mut table = write_guard(&self.table)?;

        *table = ExpenseTable::default();
        for expense in file_data.expenses {
            table.insert(expense);
        }

        Ok(())
    }

    /// Save expenses to disk, newest first
    pub fn save(&self) -> Result<(), LedgerError> {
        let mut expenses: Vec<_> = read_guard(&self.table)?.by_id.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, LedgerError> {
        Ok(read_guard(&self.table)?.by_id.get(&id).cloned())
    }

    /// Expenses of one group, oldest first
    pub fn get_by_group(&self, group_id: GroupId) -> Result<Vec<Expense>, LedgerError> {
        Ok(read_guard(&self.table)?.for_group(group_id))
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), LedgerError> {
        write_guard(&self.table)?.insert(expense);
        Ok(())
    }

    /// Delete an expense and its splits
    pub fn delete(&self, id: ExpenseId) -> Result<bool, LedgerError> {
        let mut table = write_guard(&self.table)?;
        match table.by_id.remove(&id) {
            Some(expense) => {
                table.unindex(expense.group_id, id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        Ok(read_guard(&self.table)?.by_id.len())
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, ExpenseTable>, LedgerError> {
        read_guard(&self.table)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, ExpenseTable>, LedgerError> {
        write_guard(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberId, Money, Split};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn expense(group_id: GroupId, description: &str) -> Expense {
        let payer = MemberId::new();
        Expense::new(
            group_id,
            description,
            Money::from_cents(1000),
            payer,
            vec![Split::new(payer, Money::from_cents(1000))],
        )
    }

    #[test]
    fn test_group_index() {
        let (_temp_dir, repo) = create_test_repo();
        let trip = GroupId::new();
        let flat = GroupId::new();

        repo.upsert(expense(trip, "Fuel")).unwrap();
        repo.upsert(expense(trip, "Tolls")).unwrap();
        repo.upsert(expense(flat, "Rent")).unwrap();

        assert_eq!(repo.get_by_group(trip).unwrap().len(), 2);
        assert_eq!(repo.get_by_group(flat).unwrap().len(), 1);
        assert!(repo.get_by_group(GroupId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_from_index() {
        let (_temp_dir, repo) = create_test_repo();
        let group = GroupId::new();
        let fuel = expense(group, "Fuel");
        let id = fuel.id;
        repo.upsert(fuel).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get_by_group(group).unwrap().is_empty());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let group = GroupId::new();
        let fuel = expense(group, "Fuel");
        repo.upsert(fuel.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reloaded.load().unwrap();

        assert_eq!(reloaded.get(fuel.id).unwrap(), Some(fuel));
        assert_eq!(reloaded.get_by_group(group).unwrap().len(), 1);
    }
}
