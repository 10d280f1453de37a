//! Ordering Module
//!
//! Pure functions over the flat option storage, split into:
//! - projector: visual order (groups followed by their members)
//! - validator: which moves are legal
//! - positioning: positional moves and keyboard nudges
//! - hierarchy: group membership changes

mod hierarchy;
mod positioning;
mod projector;
mod validator;

pub use hierarchy::{dissolve_group, move_to_group, normalize};
pub use positioning::{apply_move, nudge, Direction};
pub use projector::{group_members, root_items, visual_order, VisualPosition};
pub use validator::{is_valid_move, same_context, MoveKind};
