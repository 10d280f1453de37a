//! Move Validation
//!
//! Decides which drag-and-drop moves between two visual positions are legal.

use serde::{Deserialize, Serialize};

use super::projector::VisualPosition;

/// Kind of structural move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Change position within the same context
    Reorder,
    /// Move a choice into a group
    Group,
    /// Move a choice out of its group to root level
    Ungroup,
}

impl MoveKind {
    /// The kind of move a positional drop of `dragged` onto `target` implies
    pub fn implied(dragged: &VisualPosition<'_>, target: &VisualPosition<'_>) -> Self {
        if same_context(dragged, target) {
            MoveKind::Reorder
        } else if target.is_group() {
            MoveKind::Group
        } else if dragged.is_in_group() && !target.is_in_group() {
            MoveKind::Ungroup
        } else {
            // Member-to-member across groups, or root onto a member: not a
            // plain reorder, rejected below.
            MoveKind::Reorder
        }
    }
}

/// Both positions are root-level, or both belong to the same group
pub fn same_context(a: &VisualPosition<'_>, b: &VisualPosition<'_>) -> bool {
    a.group_id == b.group_id
}

/// Check whether moving `dragged` onto `target` as `kind` is legal
pub fn is_valid_move(
    dragged: &VisualPosition<'_>,
    target: &VisualPosition<'_>,
    kind: MoveKind,
) -> bool {
    if dragged.id() == target.id() {
        return false;
    }
    match kind {
        MoveKind::Reorder => same_context(dragged, target),
        MoveKind::Group => {
            !dragged.is_group()
                && target.is_group()
                && !target.is_in_group()
                && dragged.group_id != Some(target.id())
        }
        MoveKind::Ungroup => dragged.is_in_group() && !dragged.is_group(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigOption, OptionId};
    use crate::ordering::visual_order;

    fn sample() -> Vec<ConfigOption> {
        vec![
            ConfigOption::group("g1", "Seats"),
            ConfigOption::choice("o1", "Leather").in_group("g1"),
            ConfigOption::choice("o2", "Fabric").in_group("g1"),
            ConfigOption::choice("o3", "Wheels"),
            ConfigOption::group("g2", "Paint"),
            ConfigOption::choice("o4", "Red").in_group("g2"),
        ]
    }

    #[test]
    fn test_reorder_rules() {
        let options = sample();
        let order = visual_order(&options);
        let (g1, o1, o2, o3, g2, o4) = (
            &order[0], &order[1], &order[2], &order[3], &order[4], &order[5],
        );

        assert!(is_valid_move(o1, o2, MoveKind::Reorder));
        assert!(is_valid_move(g1, o3, MoveKind::Reorder));
        assert!(is_valid_move(o3, g2, MoveKind::Reorder));
        assert!(!is_valid_move(o1, o4, MoveKind::Reorder));
        assert!(!is_valid_move(o3, o1, MoveKind::Reorder));
    }

    #[test]
    fn test_group_rules() {
        let options = sample();
        let order = visual_order(&options);
        let (g1, o1, o3, g2) = (&order[0], &order[1], &order[3], &order[4]);

        assert!(is_valid_move(o3, g1, MoveKind::Group));
        assert!(is_valid_move(o1, g2, MoveKind::Group));
        // Already in that group
        assert!(!is_valid_move(o1, g1, MoveKind::Group));
        // Groups never nest
        assert!(!is_valid_move(g2, g1, MoveKind::Group));
        // Target is not a group
        assert!(!is_valid_move(g1, o1, MoveKind::Group));
    }

    #[test]
    fn test_group_rejected_for_target_inside_group() {
        let options = sample();
        let order = visual_order(&options);
        let fake_header = ConfigOption::group("fake", "Nested");
        let target = VisualPosition {
            option: &fake_header,
            visual_index: 2,
            storage_index: 2,
            group_id: Some(order[0].id()),
            index_in_group: Some(1),
        };

        assert!(!is_valid_move(&order[3], &target, MoveKind::Group));
    }

    #[test]
    fn test_ungroup_rules() {
        let options = sample();
        let order = visual_order(&options);

        assert!(is_valid_move(&order[1], &order[3], MoveKind::Ungroup));
        assert!(!is_valid_move(&order[3], &order[0], MoveKind::Ungroup));
        assert!(!is_valid_move(&order[0], &order[3], MoveKind::Ungroup));
    }

    #[test]
    fn test_self_drop_always_rejected() {
        let options = sample();
        let order = visual_order(&options);

        for position in &order {
            for kind in [MoveKind::Reorder, MoveKind::Group, MoveKind::Ungroup] {
                assert!(!is_valid_move(position, position, kind));
            }
        }
    }

    #[test]
    fn test_implied_kind() {
        let options = sample();
        let order = visual_order(&options);

        assert_eq!(MoveKind::implied(&order[1], &order[2]), MoveKind::Reorder);
        assert_eq!(MoveKind::implied(&order[3], &order[0]), MoveKind::Reorder);
        assert_eq!(MoveKind::implied(&order[1], &order[4]), MoveKind::Group);
        assert_eq!(MoveKind::implied(&order[1], &order[3]), MoveKind::Ungroup);
        assert_eq!(MoveKind::implied(&order[1], &order[5]), MoveKind::Reorder);
        assert_eq!(order[0].id(), &OptionId::from("g1"));
    }
}
