//! Settlement service
//!
//! Records money actually paid from one group member to another.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{GroupId, MemberId, Money, Settlement, SettlementId};
use crate::storage::Storage;

/// Service for settlement management
pub struct SettlementService<'a> {
    storage: &'a Storage,
}

impl<'a> SettlementService<'a> {
    /// Create a new settlement service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payment from `paid_by` to `paid_to`
    pub fn record(
        &self,
        group_id: GroupId,
        paid_by: MemberId,
        paid_to: MemberId,
        amount: Money,
    ) -> LedgerResult<Settlement> {
        let group = self
            .storage
            .groups
            .get(group_id)?
            .ok_or_else(|| LedgerError::group_not_found(group_id.to_string()))?;

        let settlement = Settlement::new(group.id, paid_by, paid_to, amount);
        settlement
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        for member_id in [paid_by, paid_to] {
            if !group.has_member(member_id) {
                return Err(LedgerError::Validation(format!(
                    "Member {} is not part of group '{}'",
                    member_id, group.name
                )));
            }
        }

        self.storage.settlements.upsert(settlement.clone())?;
        self.storage.settlements.save()?;

        self.storage.log_create(
            EntityType::Settlement,
            settlement.id.to_string(),
            Some(format!("{} -> {}", paid_by, paid_to)),
            &settlement,
        )?;

        Ok(settlement)
    }

    pub fn get(&self, id: SettlementId) -> LedgerResult<Option<Settlement>> {
        self.storage.settlements.get(id)
    }

    /// Find a settlement of a group by full or short ID
    pub fn find(&self, group_id: GroupId, identifier: &str) -> LedgerResult<Option<Settlement>> {
        if let Ok(id) = identifier.parse::<SettlementId>() {
            if let Some(settlement) = self.storage.settlements.get(id)? {
                return Ok((settlement.group_id == group_id).then_some(settlement));
            }
        }

        Ok(self
            .storage
            .settlements
            .get_by_group(group_id)?
            .into_iter()
            .find(|s| s.id.matches(identifier)))
    }

    /// Settlements of a group in the order they were recorded
    pub fn list_for_group(&self, group_id: GroupId) -> LedgerResult<Vec<Settlement>> {
        self.storage.settlements.get_by_group(group_id)
    }

    pub fn delete(&self, id: SettlementId) -> LedgerResult<Settlement> {
        let settlement = self
            .storage
            .settlements
            .get(id)?
            .ok_or_else(|| LedgerError::settlement_not_found(id.to_string()))?;

        self.storage.settlements.delete(id)?;
        self.storage.settlements.save()?;

        self.storage.log_delete(
            EntityType::Settlement,
            settlement.id.to_string(),
            None,
            &settlement,
        )?;

        Ok(settlement)
    }
}
