//! Drag Session Module
//!
//! Interactive state for one drag gesture:
//! - zone: drop targets and collision classification
//! - controller: the drag state machine
//! - config: session behaviour settings

mod config;
mod controller;
mod zone;

pub use config::{CancelPolicy, DragConfig};
pub use controller::{DragController, DragOutcome, DragSession, DraggedKind, SessionState};
pub use zone::{classify, DropZone, Droppable, Point, Rect};
