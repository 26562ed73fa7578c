//! Expense service
//!
//! Creates, lists, and deletes expenses. Everything the balance calculator
//! later trusts is checked here: the split total, and that the payer and
//! every split member belong to the expense's group.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, Group, GroupId, MemberId, Money, Split, SplitMode};
use crate::storage::Storage;

/// How the amount of a new expense should be divided
#[derive(Debug, Clone)]
pub enum SplitRequest {
    /// Evenly between these members
    Equal(Vec<MemberId>),
    /// By percentage per member
    Percentage(Vec<(MemberId, Decimal)>),
    /// Explicit amounts per member
    Custom(Vec<Split>),
}

impl SplitRequest {
    pub fn mode(&self) -> SplitMode {
        match self {
            Self::Equal(_) => SplitMode::Equal,
            Self::Percentage(_) => SplitMode::Percentage,
            Self::Custom(_) => SplitMode::Custom,
        }
    }

    /// Turn the request into concrete splits of `amount`
    pub fn into_splits(self, amount: Money) -> LedgerResult<Vec<Split>> {
        let splits = match self {
            Self::Equal(members) => Split::equal(amount, &members),
            Self::Percentage(percentages) => Split::by_percentage(amount, &percentages),
            Self::Custom(splits) => Ok(splits),
        };
        splits.map_err(|e| LedgerError::Validation(e.to_string()))
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub group_id: GroupId,
    pub description: String,
    pub amount: Money,
    pub paid_by: MemberId,
    pub split: SplitRequest,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new expense
    pub fn create(&self, input: CreateExpenseInput) -> LedgerResult<Expense> {
        let group = self
            .storage
            .groups
            .get(input.group_id)?
            .ok_or_else(|| LedgerError::group_not_found(input.group_id.to_string()))?;

        let mode = input.split.mode();
        let splits = input.split.into_splits(input.amount)?;

        let mut expense = Expense::new(
            group.id,
            input.description.trim(),
            input.amount,
            input.paid_by,
            splits,
        );
        if let Some(date) = input.date {
            expense.date = date;
        }

        expense
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        ensure_member(&group, expense.paid_by, "payer")?;
        for member_id in expense.split_members() {
            ensure_member(&group, member_id, "split member")?;
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        tracing::debug!(
            expense = %expense.id,
            group = %group.id,
            %mode,
            splits = expense.splits.len(),
            "expense created"
        );

        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> LedgerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense of a group by full or short ID
    pub fn find(&self, group_id: GroupId, identifier: &str) -> LedgerResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            if let Some(expense) = self.storage.expenses.get(id)? {
                return Ok((expense.group_id == group_id).then_some(expense));
            }
        }

        Ok(self
            .storage
            .expenses
            .get_by_group(group_id)?
            .into_iter()
            .find(|e| e.id.matches(identifier)))
    }

    /// Expenses of a group, oldest first
    pub fn list_for_group(&self, group_id: GroupId) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.get_by_group(group_id)
    }

    /// Delete an expense together with its splits
    pub fn delete(&self, id: ExpenseId) -> LedgerResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }
}

fn ensure_member(group: &Group, member_id: MemberId, role: &str) -> LedgerResult<()> {
    if group.has_member(member_id) {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "The {} {} is not a member of group '{}'",
            role, member_id, group.name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::Member;
    use crate::services::{GroupService, MemberService};
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
    }

    fn fixture() -> (Fixture, Group, Vec<Member>) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let (group, members) = {
            let groups = GroupService::new(&storage);
            let member_service = MemberService::new(&storage);
            let mut group = groups.create("Trip", None).unwrap();
            let mut members = Vec::new();
            for name in ["A", "B", "C"] {
                let member = member_service.create(name, None).unwrap();
                group = groups.add_member(group.id, &member).unwrap();
                members.push(member);
            }
            (group, members)
        };

        (
            Fixture {
                _temp_dir: temp_dir,
                storage,
            },
            group,
            members,
        )
    }

    fn input(
        group: &Group,
        payer: MemberId,
        cents: i64,
        split: SplitRequest,
    ) -> CreateExpenseInput {
        CreateExpenseInput {
            group_id: group.id,
            description: "Dinner".into(),
            amount: Money::from_cents(cents),
            paid_by: payer,
            split,
            date: None,
        }
    }

    #[test]
    fn test_equal_split_distributes_cents() {
        let (fx, group, members) = fixture();
        let service = ExpenseService::new(&fx.storage);
        let ids: Vec<_> = members.iter().map(|m| m.id).collect();

        let expense = service
            .create(input(&group, ids[0], 10000, SplitRequest::Equal(ids.clone())))
            .unwrap();

        let amounts: Vec<_> = expense.splits.iter().map(|s| s.amount.cents().unwrap()).collect();
        assert_eq!(amounts, vec![3334, 3333, 3333]);
        assert_eq!(service.list_for_group(group.id).unwrap().len(), 1);
    }

    #[test]
    fn test_percentage_split() {
        let (fx, group, members) = fixture();
        let service = ExpenseService::new(&fx.storage);

        let split = SplitRequest::Percentage(vec![
            (members[0].id, Decimal::from(50)),
            (members[1].id, Decimal::from(30)),
            (members[2].id, Decimal::from(20)),
        ]);
        let expense = service.create(input(&group, members[1].id, 9000, split)).unwrap();

        let amounts: Vec<_> = expense.splits.iter().map(|s| s.amount.cents().unwrap()).collect();
        assert_eq!(amounts, vec![4500, 2700, 1800]);
    }

    #[test]
    fn test_custom_split_must_match_amount() {
        let (fx, group, members) = fixture();
        let service = ExpenseService::new(&fx.storage);

        let split = SplitRequest::Custom(vec![
            Split::new(members[0].id, Money::from_cents(4000)),
            Split::new(members[1].id, Money::from_cents(4000)),
        ]);
        let err = service.create(input(&group, members[0].id, 9000, split)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_payer_outside_group_rejected() {
        let (fx, group, members) = fixture();
        let service = ExpenseService::new(&fx.storage);
        let outsider = MemberService::new(&fx.storage).create("Z", None).unwrap();

        let split = SplitRequest::Equal(vec![members[0].id]);
        let err = service.create(input(&group, outsider.id, 1000, split)).unwrap_err();
        assert!(err.is_validation());
        assert!(service.list_for_group(group.id).unwrap().is_empty());
    }

    #[test]
    fn test_split_member_outside_group_rejected() {
        let (fx, group, members) = fixture();
        let service = ExpenseService::new(&fx.storage);

        let split = SplitRequest::Equal(vec![members[0].id, MemberId::new()]);
        let err = service.create(input(&group, members[0].id, 1000, split)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_find_by_short_id_and_delete() {
        let (fx, group, members) = fixture();
        let service = ExpenseService::new(&fx.storage);

        let expense = service
            .create(input(&group, members[0].id, 1500, SplitRequest::Equal(vec![members[1].id])))
            .unwrap();

        let found = service.find(group.id, &expense.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, expense.id);
        assert!(service.find(GroupId::new(), &expense.id.to_string()).unwrap().is_none());

        service.delete(expense.id).unwrap();
        assert!(service.get(expense.id).unwrap().is_none());
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }
}
