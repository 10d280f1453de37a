//! Option Entity
//!
//! A configurable choice or a group header in the configurator's option list.
//! Groups hold choices; groups never nest, so a group header has no place to
//! store a parent.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::Entity;
use super::record::OptionRecord;

/// Opaque option identifier supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OptionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Descriptive group header fields, opaque to ordering
#[derive(Debug, Clone, PartialEq)]
pub struct GroupData {
    pub description: Option<String>,
    /// Whether the group's members are shown in the panel
    pub expanded: bool,
}

impl Default for GroupData {
    fn default() -> Self {
        Self {
            description: None,
            expanded: true,
        }
    }
}

/// Structural role of an option
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    /// Group header
    Group(GroupData),
    /// Selectable choice, at root level (`None`) or inside a group
    Choice { group_id: Option<OptionId> },
}

/// An entry of the flat option storage
///
/// Storage order is the option's index in the list it lives in; there is no
/// position field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionRecord", into = "OptionRecord")]
pub struct ConfigOption {
    pub id: OptionId,
    pub name: String,
    pub kind: OptionKind,
    /// Host fields the engine does not interpret, carried through unchanged
    pub extra: Map<String, Value>,
}

impl ConfigOption {
    /// Create a root-level choice
    pub fn choice(id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: OptionKind::Choice { group_id: None },
            extra: Map::new(),
        }
    }

    /// Create a group header
    pub fn group(id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: OptionKind::Group(GroupData::default()),
            extra: Map::new(),
        }
    }

    /// Place a choice inside a group. Has no effect on group headers.
    pub fn in_group(mut self, group_id: impl Into<OptionId>) -> Self {
        self.set_group(Some(group_id.into()));
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, OptionKind::Group(_))
    }

    /// Stored group membership (may reference a group that no longer exists)
    pub fn group_id(&self) -> Option<&OptionId> {
        match &self.kind {
            OptionKind::Choice { group_id } => group_id.as_ref(),
            OptionKind::Group(_) => None,
        }
    }

    /// Check if this is a root-level entry
    pub fn is_root(&self) -> bool {
        self.group_id().is_none()
    }

    pub fn group_data(&self) -> Option<&GroupData> {
        match &self.kind {
            OptionKind::Group(data) => Some(data),
            OptionKind::Choice { .. } => None,
        }
    }

    /// Rewrite group membership. Returns false (and changes nothing) for
    /// group headers.
    pub fn set_group(&mut self, group: Option<OptionId>) -> bool {
        match &mut self.kind {
            OptionKind::Choice { group_id } => {
                *group_id = group;
                true
            }
            OptionKind::Group(_) => false,
        }
    }
}

impl Entity for ConfigOption {
    type Id = OptionId;

    fn id(&self) -> &OptionId {
        &self.id
    }
}
