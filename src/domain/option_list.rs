//! Option List Helpers
//!
//! Parsing and lookup over the flat option storage.

use super::entity::{ensure_unique_ids, DomainError, DomainResult};
use super::option::{ConfigOption, OptionId};
use super::record::OptionRecord;

/// Convert host records into typed options, rejecting nested groups and
/// duplicate ids
pub fn parse_records(records: Vec<OptionRecord>) -> DomainResult<Vec<ConfigOption>> {
    let options = records
        .into_iter()
        .map(ConfigOption::try_from)
        .collect::<DomainResult<Vec<_>>>()?;
    ensure_unique_ids(&options)?;
    Ok(options)
}

/// Parse a JSON array of host records
pub fn options_from_json(json: &str) -> DomainResult<Vec<ConfigOption>> {
    let records: Vec<OptionRecord> = serde_json::from_str(json)?;
    parse_records(records)
}

/// Serialize options back into the host's JSON shape
pub fn options_to_json(options: &[ConfigOption]) -> DomainResult<String> {
    Ok(serde_json::to_string(options)?)
}

/// Find an option and its storage index by id
pub fn find_option<'a>(
    options: &'a [ConfigOption],
    id: &OptionId,
) -> DomainResult<(usize, &'a ConfigOption)> {
    options
        .iter()
        .enumerate()
        .find(|(_, option)| &option.id == id)
        .ok_or_else(|| DomainError::NotFound(format!("option {}", id)))
}

/// Check whether `id` names a group header in `options`
pub fn is_group_header(options: &[ConfigOption], id: &OptionId) -> bool {
    options
        .iter()
        .any(|option| option.is_group() && &option.id == id)
}
