//! Domain Layer
//!
//! Contains the option entities and core abstractions.
//! Depends only on serde, serde_json (for carried-through host fields) and thiserror.

mod entity;
mod option;
mod option_list;
mod record;

pub use entity::{ensure_unique_ids, DomainError, DomainResult, Entity};
pub use option::{ConfigOption, GroupData, OptionId, OptionKind};
pub use option_list::{
    find_option, is_group_header, options_from_json, options_to_json, parse_records,
};
pub use record::{GroupDataRecord, OptionRecord};
