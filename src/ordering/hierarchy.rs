//! Hierarchy Operations
//!
//! Group membership changes that leave storage order alone.

use log::{debug, trace, warn};

use crate::domain::{find_option, is_group_header, ConfigOption, OptionId};

/// Rewrite one option's group membership
///
/// `None` moves the option to root level. Storage order is unchanged. Unknown
/// ids, group headers, and targets that are not group headers are no-ops.
pub fn move_to_group(
    options: &[ConfigOption],
    option_id: &OptionId,
    target_group_id: Option<&OptionId>,
) -> Vec<ConfigOption> {
    let index = match find_option(options, option_id) {
        Ok((index, option)) if !option.is_group() => index,
        Ok(_) => {
            trace!("{} is a group header and cannot change groups", option_id);
            return options.to_vec();
        }
        Err(err) => {
            trace!("ignoring group move: {}", err);
            return options.to_vec();
        }
    };

    if let Some(group_id) = target_group_id {
        if !is_group_header(options, group_id) {
            trace!("ignoring group move of {}: {} is not a group", option_id, group_id);
            return options.to_vec();
        }
    }

    debug!("moving {} to group {:?}", option_id, target_group_id.map(OptionId::as_str));
    let mut next = options.to_vec();
    next[index].set_group(target_group_id.cloned());
    next
}

/// Remove a group header and release its members to root level
///
/// Members take the header's storage slot, keeping their relative order, so
/// they stay where the group was drawn.
pub fn dissolve_group(options: &[ConfigOption], group_id: &OptionId) -> Vec<ConfigOption> {
    let Some(header) = options
        .iter()
        .position(|option| option.is_group() && &option.id == group_id)
    else {
        return options.to_vec();
    };

    let is_member = |option: &ConfigOption| option.group_id() == Some(group_id);
    let mut result = Vec::with_capacity(options.len().saturating_sub(1));
    for (index, option) in options.iter().enumerate() {
        if index == header {
            for member in options.iter().filter(|option| is_member(*option)) {
                let mut released = member.clone();
                released.set_group(None);
                result.push(released);
            }
        } else if !is_member(option) {
            result.push(option.clone());
        }
    }

    debug!("dissolved group {}", group_id);
    result
}

/// Clear group references that point at no group header
pub fn normalize(options: &[ConfigOption]) -> Vec<ConfigOption> {
    let mut result = options.to_vec();
    for option in result.iter_mut() {
        let dangling = match option.group_id() {
            Some(group_id) => !is_group_header(options, group_id),
            None => false,
        };
        if dangling {
            warn!(
                "option {} references missing group {:?}; moving to root",
                option.id,
                option.group_id().map(OptionId::as_str)
            );
            option.set_group(None);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::visual_order;

    fn sample() -> Vec<ConfigOption> {
        vec![
            ConfigOption::group("g1", "Seats"),
            ConfigOption::choice("o1", "Leather").in_group("g1"),
            ConfigOption::choice("o2", "Fabric").in_group("g1"),
            ConfigOption::choice("o3", "Wheels"),
        ]
    }

    fn visual_ids(options: &[ConfigOption]) -> Vec<String> {
        visual_order(options).iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn test_move_to_group_keeps_storage_order() {
        let options = sample();

        let moved = move_to_group(&options, &OptionId::from("o3"), Some(&OptionId::from("g1")));

        assert_eq!(moved.len(), options.len());
        assert_eq!(moved[3].group_id(), Some(&OptionId::from("g1")));
        for (before, after) in options.iter().zip(&moved) {
            assert_eq!(before.id, after.id);
        }
    }

    #[test]
    fn test_move_to_group_no_ops() {
        let options = sample();
        let g1 = OptionId::from("g1");

        // Unknown option
        assert_eq!(move_to_group(&options, &OptionId::from("o9"), Some(&g1)), options);
        // Group headers never join a group
        assert_eq!(move_to_group(&options, &g1, None), options);
        // Target must be a group header
        assert_eq!(
            move_to_group(&options, &OptionId::from("o1"), Some(&OptionId::from("o3"))),
            options
        );
        assert_eq!(
            move_to_group(&options, &OptionId::from("o1"), Some(&OptionId::from("missing"))),
            options
        );
    }

    #[test]
    fn test_dissolve_group_releases_members_in_place() {
        let options = vec![
            ConfigOption::choice("o0", "Rims"),
            ConfigOption::group("g1", "Seats"),
            ConfigOption::choice("o3", "Wheels"),
            ConfigOption::choice("o1", "Leather").in_group("g1"),
            ConfigOption::choice("o2", "Fabric").in_group("g1"),
        ];

        let dissolved = dissolve_group(&options, &OptionId::from("g1"));

        assert_eq!(dissolved.len(), 4);
        assert!(dissolved.iter().all(|o| o.is_root()));
        assert_eq!(visual_ids(&dissolved), ["o0", "o1", "o2", "o3"]);
    }

    #[test]
    fn test_dissolve_unknown_group() {
        let options = sample();
        assert_eq!(dissolve_group(&options, &OptionId::from("o1")), options);
    }

    #[test]
    fn test_normalize_clears_dangling_groups() {
        let options = vec![
            ConfigOption::group("g1", "Seats"),
            ConfigOption::choice("o1", "Leather").in_group("g1"),
            ConfigOption::choice("o2", "Fabric").in_group("deleted"),
        ];

        let repaired = normalize(&options);

        assert_eq!(repaired[1].group_id(), Some(&OptionId::from("g1")));
        assert!(repaired[2].is_root());
    }
}
