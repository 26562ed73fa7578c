//! Group service
//!
//! Provides business logic for groups and their membership. Membership is
//! what the rest of the ledger checks records against, so members can be
//! added but never removed once they may have activity. Deleting a group
//! deletes its expenses and settlements with it.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Group, GroupId, Member};
use crate::storage::{RemovedGroup, Storage};

/// Service for group management
pub struct GroupService<'a> {
    storage: &'a Storage,
}

impl<'a> GroupService<'a> {
    /// Create a new group service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new group
    pub fn create(&self, name: &str, description: Option<&str>) -> LedgerResult<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Group name cannot be empty".into()));
        }

        if self.storage.groups.get_by_name(name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Group",
                identifier: name.to_string(),
            });
        }

        let mut group = Group::new(name);
        if let Some(description) = description {
            group.description = description.trim().to_string();
        }

        group
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;

        Ok(group)
    }

    /// Get a group by ID
    pub fn get(&self, id: GroupId) -> LedgerResult<Option<Group>> {
        self.storage.groups.get(id)
    }

    /// Find a group by name or ID
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Group>> {
        if let Some(group) = self.storage.groups.get_by_name(identifier)? {
            return Ok(Some(group));
        }

        if let Ok(id) = identifier.parse::<GroupId>() {
            return self.storage.groups.get(id);
        }

        Ok(None)
    }

    /// Find a group or fail with a not-found error
    pub fn require(&self, identifier: &str) -> LedgerResult<Group> {
        self.find(identifier)?
            .ok_or_else(|| LedgerError::group_not_found(identifier))
    }

    /// List all groups
    pub fn list(&self) -> LedgerResult<Vec<Group>> {
        self.storage.groups.get_all()
    }

    /// Members of a group, in the order they joined
    pub fn members(&self, group: &Group) -> LedgerResult<Vec<Member>> {
        self.storage.members.get_many(&group.member_ids)
    }

    /// Add an existing member to a group
    pub fn add_member(&self, group_id: GroupId, member: &Member) -> LedgerResult<Group> {
        let mut group = self
            .storage
            .groups
            .get(group_id)?
            .ok_or_else(|| LedgerError::group_not_found(group_id.to_string()))?;

        // The member must exist in storage, not just be passed in
        self.storage
            .members
            .get(member.id)?
            .ok_or_else(|| LedgerError::member_not_found(member.id.to_string()))?;

        let before = group.clone();
        if !group.add_member(member.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "Group member",
                identifier: format!("{} in {}", member.name, group.name),
            });
        }

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        self.storage.log_update(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &before,
            &group,
            Some(format!(
                "members: {} -> {} (added {})",
                before.member_ids.len(),
                group.member_ids.len(),
                member.name
            )),
        )?;

        Ok(group)
    }

    /// Delete a group along with its expenses and settlements
    ///
    /// A group that still has activity is only deleted with `force`.
    pub fn delete(&self, id: GroupId, force: bool) -> LedgerResult<RemovedGroup> {
        let group = self
            .storage
            .groups
            .get(id)?
            .ok_or_else(|| LedgerError::group_not_found(id.to_string()))?;

        if !force {
            let expenses = self.storage.expenses.get_by_group(id)?.len();
            let settlements = self.storage.settlements.get_by_group(id)?.len();
            if expenses + settlements > 0 {
                return Err(LedgerError::Validation(format!(
                    "Cannot delete group '{}' - it has {} expenses and {} settlements. \
                     Use --force to delete them.",
                    group.name, expenses, settlements
                )));
            }
        }

        let removed = self.storage.remove_group(id)?;
        self.storage.expenses.save()?;
        self.storage.settlements.save()?;
        self.storage.groups.save()?;

        for expense in &removed.expenses {
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            )?;
        }
        for settlement in &removed.settlements {
            self.storage.log_delete(
                EntityType::Settlement,
                settlement.id.to_string(),
                None,
                settlement,
            )?;
        }
        self.storage.log_delete(
            EntityType::Group,
            removed.group.id.to_string(),
            Some(removed.group.name.clone()),
            &removed.group,
        )?;

        tracing::debug!(
            group = %removed.group.id,
            expenses = removed.expenses.len(),
            settlements = removed.settlements.len(),
            "deleted group"
        );

        Ok(removed)
    }
}
