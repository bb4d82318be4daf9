//! snapcursor crate root: re-exports and module wiring.
//!
//! Draggable, order-preserving snap cursors for egui_plot: vertical marker
//! cursors overlaid on a shared x-axis across multiple linked plot panes.
//! Cursors are added at discrete indices of a fixed, strictly increasing
//! x-data sequence; dragging one snaps it to the nearest sample while never
//! letting it cross its immediate neighbors.
//!
//! Modules:
//! - `stack`: the sorted cursor collection and the pick/drag/snap state machine
//! - `cursor`: a single cursor entity (one marker per pane, ordered by index)
//! - `surface`: the render-target trait a GUI host implements per pane
//! - `events`: host-independent pointer events and moved-handler registry
//! - `plot_pane`: the egui_plot pane adapter and per-frame pointer driver
//! - `look`: cursor styling
//! - `error`: construction/validation error taxonomy

pub mod cursor;
pub mod error;
pub mod events;
pub mod look;
pub mod plot_pane;
pub mod stack;
pub mod surface;

// Public re-exports for a compact external API
pub use cursor::Cursor;
pub use error::SnapCursorError;
pub use events::{MovedHandler, PointerButton, PointerEvent};
pub use look::CursorLook;
pub use plot_pane::{pump_pointer_events, PlotPane};
pub use stack::SnapCursorStack;
pub use surface::{MarkerId, PaneSurface, PointerAffordance, SurfaceId};
