//! Host Records
//!
//! Wire shape of options as the host UI stores them (camelCase JSON), and the
//! conversions to and from the typed `ConfigOption`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::DomainError;
use super::option::{ConfigOption, GroupData, OptionId, OptionKind};

const GROUP_DATA_KEY: &str = "groupData";

/// Option record as exchanged with the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRecord {
    pub id: OptionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, alias = "parentId", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<OptionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_data: Option<GroupDataRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDataRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_expanded: bool,
}

fn default_true() -> bool {
    true
}

impl From<GroupData> for GroupDataRecord {
    fn from(data: GroupData) -> Self {
        Self {
            description: data.description,
            is_expanded: data.expanded,
        }
    }
}

impl From<GroupDataRecord> for GroupData {
    fn from(record: GroupDataRecord) -> Self {
        Self {
            description: record.description,
            expanded: record.is_expanded,
        }
    }
}

impl TryFrom<OptionRecord> for ConfigOption {
    type Error = DomainError;

    fn try_from(record: OptionRecord) -> Result<Self, Self::Error> {
        let OptionRecord {
            id,
            name,
            is_group,
            group_id,
            group_data,
            mut extra,
        } = record;

        let kind = if is_group {
            if let Some(parent) = group_id {
                return Err(DomainError::InvalidInput(format!(
                    "group {} cannot belong to group {}",
                    id, parent
                )));
            }
            OptionKind::Group(group_data.map(GroupData::from).unwrap_or_default())
        } else {
            // Stray group data on a choice is host data, keep it.
            if let Some(data) = group_data {
                extra.insert(GROUP_DATA_KEY.to_string(), serde_json::to_value(data)?);
            }
            OptionKind::Choice { group_id }
        };

        Ok(ConfigOption {
            id,
            name,
            kind,
            extra,
        })
    }
}

impl From<ConfigOption> for OptionRecord {
    fn from(option: ConfigOption) -> Self {
        let (is_group, group_id, group_data) = match option.kind {
            OptionKind::Group(data) => (true, None, Some(data.into())),
            OptionKind::Choice { group_id } => (false, group_id, None),
        };
        Self {
            id: option.id,
            name: option.name,
            is_group,
            group_id,
            group_data,
            extra: option.extra,
        }
    }
}
