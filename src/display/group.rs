//! Member and group display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Group, Member};

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Avatar")]
    avatar: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    name: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format a list of members as a table
pub fn format_member_list(members: &[Member]) -> String {
    if members.is_empty() {
        return "No members found.".to_string();
    }

    let rows = members.iter().map(|m| MemberRow {
        name: m.name.clone(),
        avatar: m.avatar_url.clone().unwrap_or_else(|| "-".into()),
        id: m.id.to_string(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format a list of groups as a table
pub fn format_group_list(groups: &[Group]) -> String {
    if groups.is_empty() {
        return "No groups found.".to_string();
    }

    let rows = groups.iter().map(|g| GroupRow {
        name: g.name.clone(),
        members: g.member_ids.len(),
        description: g.description.clone(),
        id: g.id.to_string(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format a group with its members
pub fn format_group_details(group: &Group, members: &[Member]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Group: {}\n", group.name));
    output.push_str(&format!("  ID:      {}\n", group.id));
    if !group.description.is_empty() {
        output.push_str(&format!("  About:   {}\n", group.description));
    }
    output.push_str(&format!(
        "  Created: {}\n",
        group.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push('\n');
    output.push_str(&format_member_list(members));
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_member_list(&[]), "No members found.");
        assert_eq!(format_group_list(&[]), "No groups found.");
    }

    #[test]
    fn test_group_details_lists_members() {
        let alice = Member::new("Alice");
        let mut group = Group::new("Trip");
        group.description = "Lisbon".into();
        group.add_member(alice.id);

        let output = format_group_details(&group, &[alice]);
        assert!(output.contains("Group: Trip"));
        assert!(output.contains("Lisbon"));
        assert!(output.contains("Alice"));
    }
}
