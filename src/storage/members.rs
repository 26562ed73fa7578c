//! Member repository for JSON storage
//!
//! Manages loading and saving members to members.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard};

use crate::error::LedgerError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_guard, write_guard};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

#[derive(Debug, Default)]
pub(crate) struct MemberTable {
    by_id: HashMap<MemberId, Member>,
    /// Index: normalized name -> member_id
    by_name: HashMap<String, MemberId>,
}

impl MemberTable {
    /// Members for `ids` in the given order; unknown ids are skipped
    pub(crate) fn many(&self, ids: &[MemberId]) -> Vec<Member> {
        ids.iter()
            .filter_map(|id| self.by_id.get(id).cloned())
            .collect()
    }
}

/// Repository for member persistence
pub struct MemberRepository {
    path: PathBuf,
    table: RwLock<MemberTable>,
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(MemberTable::default()),
        }
    }

    /// Load members from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: MemberData = read_json(&self.path)?;
        let mut table = write_guard(&self.table)?;

        table.by_id.clear();
        table.by_name.clear();
        for member in file_data.members {
            table
                .by_name
                .insert(Member::normalize_name(&member.name), member.id);
            table.by_id.insert(member.id, member);
        }

        Ok(())
    }

    /// Save members to disk, sorted by name
    pub fn save(&self) -> Result<(), LedgerError> {
        let members = self.get_all()?;
        write_json_atomic(&self.path, &MemberData { members })
    }

    pub fn get(&self, id: MemberId) -> Result<Option<Member>, LedgerError> {
        Ok(read_guard(&self.table)?.by_id.get(&id).cloned())
    }

    /// Get a member by exact name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Member>, LedgerError> {
        let table = read_guard(&self.table)?;
        Ok(table
            .by_name
            .get(&Member::normalize_name(name))
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    /// All members sorted by name
    pub fn get_all(&self) -> Result<Vec<Member>, LedgerError> {
        let table = read_guard(&self.table)?;
        let mut members: Vec<_> = table.by_id.values().cloned().collect();
        members.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(members)
    }

    /// Look up several members at once, keeping the order of `ids`
    ///
    /// Ids with no stored member are skipped.
    pub fn get_many(&self, ids: &[MemberId]) -> Result<Vec<Member>, LedgerError> {
        Ok(read_guard(&self.table)?.many(ids))
    }

    /// Insert or update a member
    pub fn upsert(&self, member: Member) -> Result<(), LedgerError> {
        let mut table = write_guard(&self.table)?;

        let old_name = table
            .by_id
            .get(&member.id)
            .map(|m| Member::normalize_name(&m.name));
        if let Some(old_name) = old_name {
            table.by_name.remove(&old_name);
        }

        table
            .by_name
            .insert(Member::normalize_name(&member.name), member.id);
        table.by_id.insert(member.id, member);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        Ok(read_guard(&self.table)?.by_id.len())
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, MemberTable>, LedgerError> {
        read_guard(&self.table)
    }
}
