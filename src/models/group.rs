//! Group model
//!
//! A group is the closed world balances are computed in: its members share
//! expenses and settle with each other, never across groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupId, MemberId};

/// A set of members sharing expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Members in the order they joined
    #[serde(default)]
    pub member_ids: Vec<MemberId>,

    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new, empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            description: String::new(),
            member_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Check whether a member belongs to this group
    pub fn has_member(&self, member_id: MemberId) -> bool {
        self.member_ids.contains(&member_id)
    }

    /// Add a member; returns false if they were already in the group
    pub fn add_member(&mut self, member_id: MemberId) -> bool {
        if self.has_member(member_id) {
            return false;
        }
        self.member_ids.push(member_id);
        true
    }

    /// Validate the group
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroupValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(GroupValidationError::NameTooLong(self.name.len()));
        }

        if self.description.len() > 1000 {
            return Err(GroupValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    EmptyName,
    NameTooLong(usize),
    DescriptionTooLong(usize),
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Group name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Group name too long ({} chars, max 100)", len),
            Self::DescriptionTooLong(len) => {
                write!(f, "Group description too long ({} chars, max 1000)", len)
            }
        }
    }
}

impl std::error::Error for GroupValidationError {}
