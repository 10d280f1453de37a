//! Drag Session Controller
//!
//! Turns drag-start / hover / drop events into ordering operations.
//!
//! A session lives from one drag start to its drop or cancel and only holds
//! the dragged option's id, kind, original group and the last hovered zone.
//! The option list itself always belongs to the host: every call takes the
//! current list and any change comes back as a new list.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::config::{CancelPolicy, DragConfig};
use super::zone::DropZone;
use crate::domain::{find_option, ConfigOption, OptionId};
use crate::ordering::{apply_move, move_to_group, same_context, visual_order};

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraggedKind {
    Option,
    Group,
}

/// Observable controller state
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Dragging { dragged: OptionId, kind: DraggedKind },
    Hovering { dragged: OptionId, kind: DraggedKind, zone: DropZone },
    Ended,
}

/// Result of finishing a session
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Positional move committed on drop
    Reordered(Vec<ConfigOption>),
    /// Group membership changed on drop
    Regrouped(Vec<ConfigOption>),
    /// Cancel restored the original group membership
    RolledBack(Vec<ConfigOption>),
    Unchanged,
}

impl DragOutcome {
    /// The new option list, if the host has to replace its state
    pub fn into_options(self) -> Option<Vec<ConfigOption>> {
        match self {
            DragOutcome::Reordered(options)
            | DragOutcome::Regrouped(options)
            | DragOutcome::RolledBack(options) => Some(options),
            DragOutcome::Unchanged => None,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, DragOutcome::Unchanged)
    }
}

/// State of one drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    dragged: OptionId,
    kind: DraggedKind,
    origin_group: Option<OptionId>,
    zone: Option<DropZone>,
}

impl DragSession {
    pub fn dragged(&self) -> &OptionId {
        &self.dragged
    }

    pub fn kind(&self) -> DraggedKind {
        self.kind
    }

    /// Group the option belonged to when the drag started
    pub fn origin_group(&self) -> Option<&OptionId> {
        self.origin_group.as_ref()
    }

    /// Last hovered zone
    pub fn zone(&self) -> Option<&DropZone> {
        self.zone.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Active(DragSession),
    Ended,
}

/// Drives one drag gesture at a time
#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    config: DragConfig,
    phase: Phase,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        match &self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Ended => SessionState::Ended,
            Phase::Active(session) => match &session.zone {
                None => SessionState::Dragging {
                    dragged: session.dragged.clone(),
                    kind: session.kind,
                },
                Some(zone) => SessionState::Hovering {
                    dragged: session.dragged.clone(),
                    kind: session.kind,
                    zone: zone.clone(),
                },
            },
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            Phase::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    /// Begin dragging `id`. Returns false (and stays idle) for unknown ids.
    pub fn start(&mut self, options: &[ConfigOption], id: &OptionId) -> bool {
        if let Phase::Active(stale) = &self.phase {
            warn!(
                "drag start for {} while {} is still being dragged; discarding stale session",
                id, stale.dragged
            );
            self.phase = Phase::Idle;
        }

        let option = match find_option(options, id) {
            Ok((_, option)) => option,
            Err(err) => {
                trace!("ignoring drag start: {}", err);
                return false;
            }
        };

        let kind = if option.is_group() {
            DraggedKind::Group
        } else {
            DraggedKind::Option
        };
        debug!("drag start: {} ({:?})", id, kind);
        self.phase = Phase::Active(DragSession {
            dragged: id.clone(),
            kind,
            origin_group: option.group_id().cloned(),
            zone: None,
        });
        true
    }

    /// Record the hovered zone
    ///
    /// Hovering a group body or the ungrouped area moves the dragged option
    /// there right away (when `eager_preview` is on). Returns the new list
    /// when membership changed.
    pub fn hover(&mut self, options: &[ConfigOption], zone: DropZone) -> Option<Vec<ConfigOption>> {
        let eager = self.config.eager_preview;
        let Phase::Active(session) = &mut self.phase else {
            trace!("hover outside a drag session ignored");
            return None;
        };

        if session.zone.as_ref() != Some(&zone) {
            trace!("hover {} over {:?}", session.dragged, zone);
        }
        session.zone = Some(zone.clone());

        if !eager {
            return None;
        }
        regroup(options, &session.dragged, session.kind, &zone)
    }

    /// Finish the gesture with a drop
    ///
    /// `over` is the zone under the pointer at drop time; `None` uses the last
    /// hovered zone.
    pub fn drop_at(&mut self, options: &[ConfigOption], over: Option<DropZone>) -> DragOutcome {
        let session = match std::mem::replace(&mut self.phase, Phase::Ended) {
            Phase::Active(session) => session,
            other => {
                self.phase = other;
                trace!("drop outside a drag session ignored");
                return DragOutcome::Unchanged;
            }
        };

        let zone = over
            .or_else(|| session.zone.clone())
            .unwrap_or(DropZone::NoTarget);
        debug!("drop {} over {:?}", session.dragged, zone);

        match &zone {
            DropZone::ReorderTarget(target) => commit_reorder(options, &session, target),
            DropZone::GroupBody(_) | DropZone::UngroupedArea => {
                match regroup(options, &session.dragged, session.kind, &zone) {
                    Some(next) => DragOutcome::Regrouped(next),
                    None => DragOutcome::Unchanged,
                }
            }
            DropZone::NoTarget => DragOutcome::Unchanged,
        }
    }

    /// Abort the gesture (Escape, lost pointer capture)
    pub fn cancel(&mut self, options: &[ConfigOption]) -> DragOutcome {
        let session = match std::mem::replace(&mut self.phase, Phase::Ended) {
            Phase::Active(session) => session,
            other => {
                self.phase = other;
                return DragOutcome::Unchanged;
            }
        };
        debug!("drag cancelled: {}", session.dragged);

        if self.config.cancel_policy == CancelPolicy::KeepPreview
            || session.kind == DraggedKind::Group
        {
            return DragOutcome::Unchanged;
        }

        let current = match find_option(options, &session.dragged) {
            Ok((_, option)) => option.group_id(),
            Err(_) => return DragOutcome::Unchanged,
        };
        if current == session.origin_group.as_ref() {
            return DragOutcome::Unchanged;
        }

        let next = move_to_group(options, &session.dragged, session.origin_group.as_ref());
        if next.as_slice() == options {
            DragOutcome::Unchanged
        } else {
            DragOutcome::RolledBack(next)
        }
    }

    /// Return an ended controller to idle
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

/// Apply the membership a group-body or ungrouped-area zone implies
fn regroup(
    options: &[ConfigOption],
    dragged: &OptionId,
    kind: DraggedKind,
    zone: &DropZone,
) -> Option<Vec<ConfigOption>> {
    if kind == DraggedKind::Group {
        return None;
    }
    let target = match zone {
        DropZone::GroupBody(group_id) => Some(group_id),
        DropZone::UngroupedArea => None,
        DropZone::ReorderTarget(_) | DropZone::NoTarget => return None,
    };

    let next = move_to_group(options, dragged, target);
    if next.as_slice() == options {
        None
    } else {
        Some(next)
    }
}

/// Reorder onto another row, only within one context
fn commit_reorder(
    options: &[ConfigOption],
    session: &DragSession,
    target: &OptionId,
) -> DragOutcome {
    if target == &session.dragged {
        trace!("drop of {} onto itself", target);
        return DragOutcome::Unchanged;
    }

    let order = visual_order(options);
    let dragged = order.iter().find(|position| position.id() == &session.dragged);
    let over = order.iter().find(|position| position.id() == target);
    let (Some(dragged), Some(over)) = (dragged, over) else {
        return DragOutcome::Unchanged;
    };

    // The group change, if any, already happened while hovering.
    if !same_context(dragged, over) {
        trace!("cross-context drop of {} onto {} ignored", dragged.id(), over.id());
        return DragOutcome::Unchanged;
    }

    let next = apply_move(options, dragged.visual_index, over.visual_index);
    if next.as_slice() == options {
        DragOutcome::Unchanged
    } else {
        DragOutcome::Reordered(next)
    }
}
