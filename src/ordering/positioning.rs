//! Positioning Operations
//!
//! Moves an option to a new visual position and writes the result back into
//! flat storage order.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::projector::visual_order;
use super::validator::{is_valid_move, same_context, MoveKind};
use crate::domain::{ConfigOption, OptionId};

/// Keyboard nudge direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Move the option at visual index `drag_index` onto `hover_index`
///
/// Invalid moves and out-of-range indices return the input unchanged. A move
/// into or out of a group rewrites the dragged option's membership as part of
/// the same step.
pub fn apply_move(
    options: &[ConfigOption],
    drag_index: usize,
    hover_index: usize,
) -> Vec<ConfigOption> {
    if drag_index == hover_index {
        return options.to_vec();
    }

    let order = visual_order(options);
    let (Some(dragged), Some(target)) = (order.get(drag_index), order.get(hover_index)) else {
        trace!(
            "move {} -> {} out of range for {} options",
            drag_index,
            hover_index,
            options.len()
        );
        return options.to_vec();
    };

    let kind = MoveKind::implied(dragged, target);
    if !is_valid_move(dragged, target, kind) {
        trace!(
            "rejected {:?} move of {} onto {}",
            kind,
            dragged.id(),
            target.id()
        );
        return options.to_vec();
    }

    let membership = match kind {
        MoveKind::Reorder => None,
        MoveKind::Group => Some(Some(target.id().clone())),
        MoveKind::Ungroup => Some(None),
    };
    debug!(
        "{:?} move of {} onto {} (visual {} -> {})",
        kind,
        dragged.id(),
        target.id(),
        drag_index,
        hover_index
    );

    let mut sequence: Vec<usize> = order.iter().map(|position| position.storage_index).collect();
    let moved = sequence.remove(drag_index);
    sequence.insert(hover_index, moved);

    rebuild_storage(options, &sequence, moved, membership)
}

/// Emit options in `sequence` order, each once on first encounter, rewriting
/// the membership of the option at storage index `moved`. Options missing from
/// `sequence` are appended unchanged.
fn rebuild_storage(
    options: &[ConfigOption],
    sequence: &[usize],
    moved: usize,
    membership: Option<Option<OptionId>>,
) -> Vec<ConfigOption> {
    let mut emitted = vec![false; options.len()];
    let mut result = Vec::with_capacity(options.len());
    let mut membership = membership;

    for &index in sequence {
        if emitted[index] {
            continue;
        }
        emitted[index] = true;

        let mut option = options[index].clone();
        if index == moved {
            if let Some(group) = membership.take() {
                option.set_group(group);
            }
        }
        result.push(option);
    }

    for (index, option) in options.iter().enumerate() {
        if !emitted[index] {
            result.push(option.clone());
        }
    }
    result
}

/// Swap an option with its previous or next sibling in the same context
///
/// No-op at the first/last sibling or for unknown ids.
pub fn nudge(
    options: &[ConfigOption],
    option_id: &OptionId,
    direction: Direction,
) -> Vec<ConfigOption> {
    let order = visual_order(options);
    let Some(current) = order.iter().find(|position| position.id() == option_id) else {
        return options.to_vec();
    };

    let mut siblings = order
        .iter()
        .filter(|position| same_context(position, current) && position.id() != current.id());
    let neighbour = match direction {
        Direction::Up => siblings
            .take_while(|position| position.visual_index < current.visual_index)
            .last(),
        Direction::Down => siblings.find(|position| position.visual_index > current.visual_index),
    };

    match neighbour {
        Some(neighbour) => apply_move(options, current.visual_index, neighbour.visual_index),
        None => options.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ConfigOption> {
        vec![
            ConfigOption::group("g1", "Seats"),
            ConfigOption::choice("o1", "Leather").in_group("g1"),
            ConfigOption::choice("o2", "Fabric").in_group("g1"),
            ConfigOption::choice("o3", "Wheels"),
        ]
    }

    fn storage_ids(options: &[ConfigOption]) -> Vec<String> {
        options.iter().map(|o| o.id.to_string()).collect()
    }

    fn visual_ids(options: &[ConfigOption]) -> Vec<String> {
        visual_order(options).iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn test_reorder_group_header_carries_members() {
        let options = sample();

        let moved = apply_move(&options, 0, 3);

        assert_eq!(visual_ids(&moved), ["o3", "g1", "o1", "o2"]);
    }

    #[test]
    fn test_root_item_onto_header_is_plain_reorder() {
        let options = sample();

        let moved = apply_move(&options, 3, 0);

        assert_eq!(storage_ids(&moved), ["o3", "g1", "o1", "o2"]);
        assert!(moved[0].is_root());
    }

    #[test]
    fn test_root_item_past_header_stays_root() {
        let options = vec![
            ConfigOption::choice("o0", "Rims"),
            ConfigOption::group("g1", "Seats"),
            ConfigOption::choice("o1", "Leather").in_group("g1"),
        ];

        let moved = apply_move(&options, 0, 1);

        assert_eq!(storage_ids(&moved), ["g1", "o0", "o1"]);
        assert!(moved[1].is_root());
        assert_eq!(visual_ids(&moved), ["g1", "o1", "o0"]);
    }

    #[test]
    fn test_member_onto_other_group_header() {
        let options = vec![
            ConfigOption::group("g1", "Seats"),
            ConfigOption::choice("o1", "Leather").in_group("g1"),
            ConfigOption::group("g2", "Paint"),
            ConfigOption::choice("o2", "Red").in_group("g2"),
        ];

        let moved = apply_move(&options, 1, 2);

        assert_eq!(
            moved.iter().find(|o| o.id.as_str() == "o1").unwrap().group_id(),
            Some(&OptionId::from("g2"))
        );
        assert_eq!(visual_ids(&moved), ["g1", "g2", "o1", "o2"]);
    }

    #[test]
    fn test_ungroup_onto_root_item() {
        let options = sample();

        let moved = apply_move(&options, 1, 3);

        assert!(moved.iter().find(|o| o.id.as_str() == "o1").unwrap().is_root());
        assert_eq!(visual_ids(&moved), ["g1", "o2", "o3", "o1"]);
    }

    #[test]
    fn test_cross_group_member_drop_is_ignored() {
        let options = vec![
            ConfigOption::group("g1", "Seats"),
            ConfigOption::choice("o1", "Leather").in_group("g1"),
            ConfigOption::group("g2", "Paint"),
            ConfigOption::choice("o2", "Red").in_group("g2"),
        ];

        assert_eq!(apply_move(&options, 1, 3), options);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let options = sample();
        assert_eq!(apply_move(&options, 0, 10), options);
        assert_eq!(apply_move(&options, 10, 0), options);
    }

    #[test]
    fn test_rebuild_appends_missing_options() {
        let options = sample();

        let rebuilt = rebuild_storage(&options, &[3, 0, 3], 0, None);

        assert_eq!(storage_ids(&rebuilt), ["o3", "g1", "o1", "o2"]);
    }

    #[test]
    fn test_nudge_within_group() {
        let options = sample();

        let down = nudge(&options, &OptionId::from("o1"), Direction::Down);
        assert_eq!(visual_ids(&down), ["g1", "o2", "o1", "o3"]);

        let blocked = nudge(&options, &OptionId::from("o2"), Direction::Down);
        assert_eq!(blocked, options);
    }

    #[test]
    fn test_nudge_root_past_group() {
        let options = sample();

        let up = nudge(&options, &OptionId::from("o3"), Direction::Up);
        assert_eq!(visual_ids(&up), ["o3", "g1", "o1", "o2"]);

        let back = nudge(&up, &OptionId::from("o3"), Direction::Down);
        assert_eq!(visual_ids(&back), ["g1", "o1", "o2", "o3"]);
    }

    #[test]
    fn test_nudge_unknown_id() {
        let options = sample();
        assert_eq!(nudge(&options, &OptionId::from("nope"), Direction::Up), options);
    }
}
