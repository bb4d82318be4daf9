//! Pointer-event values and the cursors-moved handler registry.
//!
//! The cursor stack does not subscribe to any concrete GUI host. Instead the
//! host (or the [`pump_pointer_events`](crate::plot_pane::pump_pointer_events)
//! driver for egui) translates its native input into [`PointerEvent`] values
//! and feeds them to
//! [`SnapCursorStack::handle_pointer_event`](crate::SnapCursorStack::handle_pointer_event)
//! in delivery order.

use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// Pointer events
// ─────────────────────────────────────────────────────────────────────────────

/// Which pointer button a press refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left / primary button. Only this one starts a drag.
    Primary,
    Secondary,
    Middle,
}

/// A structured pointer event, independent of the GUI host that produced it.
///
/// Screen coordinates are in the host's point space; the stack maps them into
/// pane data space through
/// [`PaneSurface::data_at`](crate::surface::PaneSurface::data_at).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved. `screen: None` means the pointer left the drawing
    /// surface entirely; while dragging this terminates the drag gracefully.
    Moved { screen: Option<[f32; 2]> },
    /// A button was pressed. The stack consumes the accumulated pick list on
    /// a primary press.
    Pressed {
        button: PointerButton,
        screen: [f32; 2],
    },
    /// The (primary) button was released.
    Released { screen: [f32; 2] },
}

// ─────────────────────────────────────────────────────────────────────────────
// Moved-handler registry
// ─────────────────────────────────────────────────────────────────────────────

/// A callback invoked after a drag ends with the cursor layout changed.
///
/// Handlers take no arguments; query the stack for the new positions.
pub type MovedHandler = Arc<dyn Fn() + Send + Sync>;

/// Registry of cursors-moved handlers.
///
/// Registration is idempotent and keyed by identity (`Arc::ptr_eq`): adding
/// the same handler twice is a no-op, removing an unregistered handler is a
/// no-op.
#[derive(Default)]
pub(crate) struct MovedHandlers {
    handlers: Vec<MovedHandler>,
}

impl MovedHandlers {
    pub(crate) fn add(&mut self, handler: MovedHandler) {
        if !self.handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            self.handlers.push(handler);
        }
    }

    pub(crate) fn remove(&mut self, handler: &MovedHandler) {
        self.handlers.retain(|h| !Arc::ptr_eq(h, handler));
    }

    /// Invoke every registered handler once, in registration order.
    ///
    /// Iterates over a snapshot so that handlers may trigger registration
    /// changes (via channels back to the owner) without affecting this pass.
    pub(crate) fn notify(&self) {
        let snapshot: Vec<MovedHandler> = self.handlers.clone();
        for handler in snapshot {
            handler();
        }
    }
}
