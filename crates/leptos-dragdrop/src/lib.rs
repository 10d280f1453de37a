//! Leptos DragDrop Utilities
//!
//! Mouse-driven drag-and-drop for the option panel.
//! Uses movement threshold to distinguish click from drag, then feeds hover,
//! drop and cancel events into the ordering engine's `DragController`.

use leptos::prelude::*;
use option_order::{
    classify, ConfigOption, DragConfig, DragController, DragOutcome, DropZone, Droppable, OptionId,
    Point, Rect,
};
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent};

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long clicks are suppressed after a drag ends
const CLICK_SUPPRESS_MS: i32 = 100;

/// A drop zone bound to a DOM element id
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneBinding {
    pub zone: DropZone,
    pub element_id: String,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Host-owned option list; every engine result replaces it whole
    pub options: RwSignal<Vec<ConfigOption>>,
    pub dragging_id: RwSignal<Option<OptionId>>,
    /// Zone from a direct mouseenter hit, if the pointer is over one
    pub drop_target: RwSignal<Option<DropZone>>,
    pub drag_just_ended: RwSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id: RwSignal<Option<OptionId>>,
    /// Start position for movement detection
    pub start_pos: RwSignal<(i32, i32)>,
    controller: StoredValue<DragController>,
    zones: StoredValue<Vec<ZoneBinding>>,
}

pub fn create_dnd_signals(options: RwSignal<Vec<ConfigOption>>, config: DragConfig) -> DndSignals {
    DndSignals {
        options,
        dragging_id: RwSignal::new(None),
        drop_target: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        pending_id: RwSignal::new(None),
        start_pos: RwSignal::new((0, 0)),
        controller: StoredValue::new(DragController::new(config)),
        zones: StoredValue::new(Vec::new()),
    }
}

/// Install console logging and the panic hook for the browser
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}

/// Register the element that renders `zone`, for bounding-box hit tests.
/// Re-registering an element id replaces its zone.
pub fn register_zone(dnd: &DndSignals, zone: DropZone, element_id: impl Into<String>) {
    let element_id = element_id.into();
    dnd.zones.update_value(|zones| {
        zones.retain(|binding| binding.element_id != element_id);
        zones.push(ZoneBinding { zone, element_id });
    });
}

pub fn unregister_zone(dnd: &DndSignals, element_id: &str) {
    dnd.zones
        .update_value(|zones| zones.retain(|binding| binding.element_id != element_id));
}

/// Whether the pointer moved far enough from `start` to begin a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

pub fn dom_rect_to_rect(rect: &web_sys::DomRect) -> Rect {
    Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id.set(None);
    dnd.drop_target.set(None);
    dnd.pending_id.set(None);
    dnd.controller.update_value(|controller| controller.reset());
    dnd.drag_just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            CLICK_SUPPRESS_MS,
        );
        cb.forget();
    }
}

fn replace_options(dnd: &DndSignals, outcome: DragOutcome) {
    if let Some(next) = outcome.into_options() {
        dnd.options.set(next);
    }
}

fn start_drag(dnd: &DndSignals, id: OptionId) {
    let options = dnd.options.get_untracked();
    let started = dnd
        .controller
        .try_update_value(|controller| controller.start(&options, &id))
        .unwrap_or(false);
    if started {
        dnd.dragging_id.set(Some(id));
    } else {
        dnd.pending_id.set(None);
    }
}

fn hover(dnd: &DndSignals, zone: DropZone) {
    let options = dnd.options.get_untracked();
    let preview = dnd
        .controller
        .try_update_value(|controller| controller.hover(&options, zone))
        .flatten();
    if let Some(next) = preview {
        dnd.options.set(next);
    }
}

/// Classify the pointer against the registered zones' current bounds
fn classify_by_bounds(dnd: &DndSignals, pointer: (i32, i32)) -> DropZone {
    let Some(document) = web_sys::window().and_then(|win| win.document()) else {
        return DropZone::NoTarget;
    };

    let droppables: Vec<Droppable> = dnd.zones.with_value(|zones| {
        zones
            .iter()
            .filter_map(|binding| {
                let element = document.get_element_by_id(&binding.element_id)?;
                let rect = dom_rect_to_rect(&element.get_bounding_client_rect());
                Some(Droppable::new(binding.zone.clone(), rect))
            })
            .collect()
    });

    let dragging = dnd.dragging_id.get_untracked();
    let (start_x, start_y) = dnd.start_pos.get_untracked();
    let dragged_rect = dragging.as_ref().and_then(|id| {
        let own = DropZone::ReorderTarget(id.clone());
        droppables
            .iter()
            .find(|droppable| droppable.zone == own)
            .map(|droppable| {
                droppable.rect.translate(
                    f64::from(pointer.0 - start_x),
                    f64::from(pointer.1 - start_y),
                )
            })
    });

    let point = Point::new(f64::from(pointer.0), f64::from(pointer.1));
    classify(Some(point), dragged_rect.as_ref(), &droppables, dragging.as_ref())
}

/// Create mousedown handler for draggable options and group headers
/// Records pending drag with start position
pub fn make_on_mousedown(
    dnd: DndSignals,
    id: OptionId,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                    return;
                }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                    return;
                }
            }
            dnd.pending_id.set(Some(id.clone()));
            dnd.start_pos.set((ev.client_x(), ev.client_y()));
        }
    }
}

/// Create mouseenter handler for a zone (direct hit)
pub fn make_on_zone_mouseenter(
    dnd: DndSignals,
    zone: DropZone,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_id.get_untracked() else {
            return;
        };
        // Don't allow dropping on self
        if zone == DropZone::ReorderTarget(dragging) {
            return;
        }
        dnd.drop_target.set(Some(zone.clone()));
        hover(&dnd, zone.clone());
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.drop_target.set(None);
        }
    }
}

/// Bind global mousemove: starts a drag past the threshold, and while
/// dragging without a direct hit, hit-tests the registered zones' bounds
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        let current = (ev.client_x(), ev.client_y());

        if dnd.dragging_id.get_untracked().is_none() {
            if let Some(pending) = dnd.pending_id.get_untracked() {
                if exceeds_threshold(dnd.start_pos.get_untracked(), current) {
                    start_drag(&dnd, pending);
                }
            }
            return;
        }

        if dnd.drop_target.get_untracked().is_none() {
            let zone = classify_by_bounds(&dnd, current);
            hover(&dnd, zone);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback(
                "mousemove",
                on_mousemove.as_ref().unchecked_ref(),
            );
        }
    }
    on_mousemove.forget();
}

/// Bind global keydown: Escape cancels the drag
pub fn bind_global_keydown(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        if ev.key() != "Escape" || dnd.dragging_id.get_untracked().is_none() {
            return;
        }
        let options = dnd.options.get_untracked();
        let outcome = dnd
            .controller
            .try_update_value(|controller| controller.cancel(&options))
            .unwrap_or(DragOutcome::Unchanged);
        log::debug!("[DND] drag cancelled, rolled back: {}", !outcome.is_unchanged());
        replace_options(&dnd, outcome);
        end_drag(&dnd);
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback(
                "keydown",
                on_keydown.as_ref().unchecked_ref(),
            );
        }
    }
    on_keydown.forget();
}

/// Bind global mouseup handler for drop detection
///
/// `on_drop` sees every drop outcome before it replaces the option list.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(&DragOutcome) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(MouseEvent)>::new(move |_ev: MouseEvent| {
        // Clear pending state first
        dnd.pending_id.set(None);

        // If we were actually dragging (not just clicking)
        if dnd.dragging_id.get_untracked().is_some() {
            let options = dnd.options.get_untracked();
            let over = dnd.drop_target.get_untracked();
            let outcome = dnd
                .controller
                .try_update_value(|controller| controller.drop_at(&options, over))
                .unwrap_or(DragOutcome::Unchanged);
            end_drag(&dnd);
            on_drop(&outcome);
            replace_options(&dnd, outcome);
        } else {
            // Not dragging - click event will fire naturally on the element
            end_drag(&dnd);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback(
                "mouseup",
                on_mouseup.as_ref().unchecked_ref(),
            );
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
    bind_global_keydown(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_movement_is_a_click() {
        assert!(!exceeds_threshold((100, 100), (100, 100)));
        assert!(!exceeds_threshold((100, 100), (105, 95)));
    }

    #[test]
    fn test_movement_past_threshold_starts_drag() {
        assert!(exceeds_threshold((100, 100), (106, 100)));
        assert!(exceeds_threshold((100, 100), (100, 94)));
    }
}
