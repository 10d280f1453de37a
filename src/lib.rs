//! Option Ordering Engine
//!
//! Keeps the configurator's flat option list consistent with its two-level
//! visual order (groups followed by their members) and decides which
//! drag-and-drop moves are legal.
//!
//! Layered like the rest of the workspace:
//! - domain: option entities, host records and errors
//! - ordering: pure projection, validation and move functions
//! - session: the drag state machine that drives them

pub mod domain;
pub mod ordering;
pub mod session;

pub use domain::{
    find_option, options_from_json, options_to_json, parse_records, ConfigOption, DomainError,
    DomainResult, GroupData, OptionId, OptionKind, OptionRecord,
};
pub use ordering::{
    apply_move, dissolve_group, group_members, is_valid_move, move_to_group, normalize, nudge,
    root_items, visual_order, Direction, MoveKind, VisualPosition,
};
pub use session::{
    classify, CancelPolicy, DragConfig, DragController, DragOutcome, DragSession, DraggedKind,
    DropZone, Droppable, Point, Rect, SessionState,
};
