//! The render-target collaborator: one pane of a shared drawing surface.
//!
//! The cursor stack never draws anything itself. It issues marker commands
//! against [`PaneSurface`] trait objects and leaves the actual drawing to the
//! host adapter ([`PlotPane`](crate::plot_pane::PlotPane) for egui_plot, or a
//! mock in tests). Marker handles are opaque ids; a pane retains the marker
//! until it is removed.

use downcast_rs::{impl_downcast, Downcast};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::look::CursorLook;

/// Identifies the drawing surface a pane belongs to. All panes of one stack
/// must report the same surface id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

impl SurfaceId {
    /// Allocate a fresh, process-unique surface id.
    pub fn next() -> Self {
        SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Opaque handle to a marker retained by a pane.
///
/// Ids are process-unique, so a handle also identifies the owning pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u32);

static NEXT_MARKER_ID: AtomicU32 = AtomicU32::new(1);

impl MarkerId {
    /// Allocate a fresh, process-unique marker id.
    pub fn next() -> Self {
        MarkerId(NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The pointer shape the surface should present.
///
/// The stack only ever requests one of these two; it never touches global
/// pointer state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerAffordance {
    /// The host's default pointer.
    #[default]
    Default,
    /// A horizontal-resize style pointer, shown while hovering a draggable
    /// cursor marker.
    DragHorizontal,
}

/// One pane (plot/axes view) of a shared drawing surface.
///
/// Implementations retain markers keyed by [`MarkerId`] and draw them on
/// their own schedule; the stack only issues position/z updates and removal.
/// Annotation labels are pinned by contract to the pane's current y-axis
/// upper limit, so they track axis-range changes without a callback.
pub trait PaneSurface: Downcast {
    /// The surface this pane draws to.
    fn surface_id(&self) -> SurfaceId;

    /// Draw a vertical marker line at data-space `x`.
    fn add_vline(&mut self, x: f64, look: &CursorLook) -> MarkerId;

    /// Draw a data point at `(x, y)`.
    fn add_point(&mut self, x: f64, y: f64, look: &CursorLook) -> MarkerId;

    /// Draw a text label at data-space `x`, pinned to the pane's y-axis top.
    fn add_label(&mut self, text: &str, x: f64, look: &CursorLook) -> MarkerId;

    /// Move a vline or label marker to a new data-space `x`.
    fn set_marker_x(&mut self, id: MarkerId, x: f64);

    /// Move a point marker to a new data-space position.
    fn set_point_pos(&mut self, id: MarkerId, x: f64, y: f64);

    /// Release a marker. Unknown ids are ignored.
    fn remove_marker(&mut self, id: MarkerId);

    /// Current draw order of a marker (higher draws on top).
    fn marker_z(&self, id: MarkerId) -> f32;

    /// Change the draw order of a marker.
    fn set_marker_z(&mut self, id: MarkerId, z: f32);

    /// Whether the screen position lies within hit-test tolerance of the
    /// marker. Side-effect-free.
    fn hit_test(&self, id: MarkerId, screen: [f32; 2]) -> bool;

    /// Map a screen position into this pane's data space, or `None` if the
    /// position is outside the pane.
    fn data_at(&self, screen: [f32; 2]) -> Option<[f64; 2]>;

    /// Ask the surface to redraw when convenient.
    fn request_redraw(&mut self);

    /// Set the pointer shape presented over the surface.
    fn set_pointer_affordance(&mut self, affordance: PointerAffordance);
}

impl_downcast!(PaneSurface);
