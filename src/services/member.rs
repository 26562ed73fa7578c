//! Member service
//!
//! Provides business logic for member management.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Member, MemberId};
use crate::storage::Storage;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    /// Create a new member service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new member
    pub fn create(&self, name: &str, avatar_url: Option<&str>) -> LedgerResult<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Member name cannot be empty".into()));
        }

        // Check for duplicate
        if self.storage.members.get_by_name(name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Member",
                identifier: name.to_string(),
            });
        }

        let member = match avatar_url {
            Some(url) => Member::with_avatar(name, url),
            None => Member::new(name),
        };

        member
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        )?;

        Ok(member)
    }

    /// Get a member by ID
    pub fn get(&self, id: MemberId) -> LedgerResult<Option<Member>> {
        self.storage.members.get(id)
    }

    /// Find a member by name or ID
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Member>> {
        if let Some(member) = self.storage.members.get_by_name(identifier)? {
            return Ok(Some(member));
        }

        if let Ok(id) = identifier.parse::<MemberId>() {
            return self.storage.members.get(id);
        }

        Ok(None)
    }

    /// Find a member or fail with a not-found error
    pub fn require(&self, identifier: &str) -> LedgerResult<Member> {
        self.find(identifier)?
            .ok_or_else(|| LedgerError::member_not_found(identifier))
    }

    /// List all members
    pub fn list(&self) -> LedgerResult<Vec<Member>> {
        self.storage.members.get_all()
    }
}
