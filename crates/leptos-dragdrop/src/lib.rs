//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! Keys are generic: `K` identifies a draggable card, `L` identifies a lane
//! (a container such as a board column) that can be hovered when empty.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Debug, PartialEq)]
pub enum DropTarget<K, L> {
    /// Pointer is over another card
    Card(K),
    /// Pointer is over the empty area of a lane
    Lane(L),
}

/// DnD state signals
pub struct DndSignals<K: 'static, L: 'static> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<K, L>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<K, L>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending card id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    /// Movement in pixels required before a press becomes a drag
    pub threshold_px: i32,
}

impl<K: 'static, L: 'static> Clone for DndSignals<K, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: 'static, L: 'static> Copy for DndSignals<K, L> {}

/// Default movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Whether a pointer moved far enough from the press point to start a drag
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32), threshold_px: i32) -> bool {
    let dx = (now.0 - start.0).abs();
    let dy = (now.1 - start.1).abs();
    dx > threshold_px || dy > threshold_px
}

pub fn create_dnd_signals<K, L>(threshold_px: i32) -> DndSignals<K, L>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    L: Clone + PartialEq + Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<K, L>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        threshold_px,
    }
}

/// Callbacks for the drag lifecycle
pub struct DragCallbacks<K: 'static, L: 'static> {
    /// Drag crossed the threshold for this card
    pub on_start: Callback<K>,
    /// Pointer entered a new target while dragging (active card, target)
    pub on_over: Callback<(K, DropTarget<K, L>)>,
    /// Mouse released while dragging (active card, last target if any)
    pub on_end: Callback<(K, Option<DropTarget<K, L>>)>,
}

impl<K: 'static, L: 'static> Clone for DragCallbacks<K, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: 'static, L: 'static> Copy for DragCallbacks<K, L> {}

/// End drag operation
pub fn end_drag<K, L>(dnd: &DndSignals<K, L>)
where
    K: Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            let _ = clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable cards
/// Records pending drag with start position
pub fn make_on_mousedown<K, L>(dnd: DndSignals<K, L>, card_id: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(card_id.clone()));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mouseenter handler for cards
pub fn make_on_card_mouseenter<K, L>(
    dnd: DndSignals<K, L>,
    card_id: K,
    on_over: Callback<(K, DropTarget<K, L>)>,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != card_id {
                let target = DropTarget::Card(card_id.clone());
                dnd.drop_target_write.set(Some(target.clone()));
                on_over.run((dragging, target));
            }
        }
    }
}

/// Create mouseover handler for a lane. Only fires the target when the
/// pointer is on the lane itself, not on one of its cards.
pub fn make_on_lane_mouseover<K, L>(
    dnd: DndSignals<K, L>,
    lane: L,
    on_over: Callback<(K, DropTarget<K, L>)>,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    L: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_id_read.get_untracked() else { return };
        let on_lane_itself = match (ev.target(), ev.current_target()) {
            (Some(t), Some(c)) => t == c,
            _ => false,
        };
        if !on_lane_itself {
            return;
        }
        let target = DropTarget::Lane(lane.clone());
        if dnd.drop_target_read.get_untracked().as_ref() == Some(&target) {
            return;
        }
        dnd.drop_target_write.set(Some(target.clone()));
        on_over.run((dragging, target));
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K, L>(dnd: DndSignals<K, L>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(|d| d.is_some()) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Global listeners installed by [`bind_global_handlers`]
pub struct GlobalHandlers {
    mouseup: WindowListenerHandle,
    mousemove: WindowListenerHandle,
}

impl GlobalHandlers {
    /// Detach both listeners
    pub fn remove(self) {
        self.mouseup.remove();
        self.mousemove.remove();
    }
}

/// Bind global mousemove handler - starts drag if moved enough
fn bind_global_mousemove<K, L>(dnd: DndSignals<K, L>, on_start: Callback<K>) -> WindowListenerHandle
where
    K: Clone + Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    window_event_listener(leptos::ev::mousemove, move |ev: web_sys::MouseEvent| {
        // Signals are gone once the owning view unmounts
        let Some(pending) = dnd.pending_id_read.try_get_untracked() else { return };
        let Some(dragging) = dnd.dragging_id_read.try_get_untracked() else { return };

        if let (Some(pending), None) = (pending, dragging) {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start, (ev.client_x(), ev.client_y()), dnd.threshold_px) {
                dnd.dragging_id_write.set(Some(pending.clone()));
                on_start.run(pending);
            }
        }
    })
}

/// Bind global mouseup (drop detection) and mousemove (drag start) handlers.
/// Call [`GlobalHandlers::remove`] when the owning view unmounts.
pub fn bind_global_handlers<K, L>(dnd: DndSignals<K, L>, callbacks: DragCallbacks<K, L>) -> GlobalHandlers
where
    K: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let mouseup = window_event_listener(leptos::ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let Some(dragging_id) = dnd.dragging_id_read.try_get_untracked() else { return };
        let drop_target = dnd.drop_target_read.get_untracked();

        // Clear pending state first
        dnd.pending_id_write.set(None);

        // Not dragging: the click event fires naturally on the element
        if let Some(dragged) = dragging_id {
            end_drag(&dnd);
            callbacks.on_end.run((dragged, drop_target));
        }
    });

    GlobalHandlers { mouseup, mousemove: bind_global_mousemove(dnd, callbacks.on_start) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!exceeds_threshold((10, 10), (15, 10), DRAG_THRESHOLD_PX));
        assert!(exceeds_threshold((10, 10), (16, 10), DRAG_THRESHOLD_PX));
        assert!(exceeds_threshold((10, 10), (10, 4), DRAG_THRESHOLD_PX));
    }

    #[test]
    fn test_drop_target_equality() {
        let a: DropTarget<String, u8> = DropTarget::Card("t1".to_string());
        assert_eq!(a, DropTarget::Card("t1".to_string()));
        assert_ne!(a, DropTarget::Lane(0));
    }
}
