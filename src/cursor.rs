//! A single snap cursor: one vertical marker per pane, tied to a data index.

use std::cmp::Ordering;

use crate::look::CursorLook;
use crate::surface::{MarkerId, PaneSurface};

/// Draw order for cursor vlines at rest.
pub(crate) const BASE_Z: f32 = 10.0;
/// Draw order while a cursor is being dragged; keeps it above its siblings.
pub(crate) const FOCUS_Z: f32 = 1000.0;

/// Markers a cursor owns on one pane.
#[derive(Debug, Clone, Copy)]
struct PaneMarkers {
    pane: usize,
    vline: MarkerId,
    point: Option<MarkerId>,
    label: Option<MarkerId>,
}

/// A draggable marker cursor tied to one index of the shared x-data sequence.
///
/// The data index is the cursor's sole identity and ordering key; two cursors
/// compare equal exactly when their indices are equal. A cursor owns its
/// marker handles exclusively and releases them when removed from the stack.
pub struct Cursor {
    index: usize,
    look: CursorLook,
    markers: Vec<PaneMarkers>,
    label_text: Option<String>,
}

impl Cursor {
    /// Draw one vline (and, where y-data is available, one data point) per
    /// pane at `xdata[index]`.
    ///
    /// The caller must have validated `index < xdata.len()`; `ydata` must
    /// hold one column per pane (empty column = no point for that pane).
    pub(crate) fn new(
        xdata: &[f64],
        ydata: &[Vec<f64>],
        panes: &mut [Box<dyn PaneSurface>],
        index: usize,
        look: CursorLook,
    ) -> Self {
        let x = xdata[index];
        let mut markers = Vec::with_capacity(panes.len());
        for (pane, surface) in panes.iter_mut().enumerate() {
            let vline = surface.add_vline(x, &look);
            surface.set_marker_z(vline, BASE_Z);
            let point = if look.show_points {
                ydata[pane].get(index).map(|&y| {
                    let id = surface.add_point(x, y, &look);
                    surface.set_marker_z(id, BASE_Z);
                    id
                })
            } else {
                None
            };
            markers.push(PaneMarkers {
                pane,
                vline,
                point,
                label: None,
            });
        }
        Self {
            index,
            look,
            markers,
            label_text: None,
        }
    }

    /// The cursor's data index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The x-data sample the cursor sits on.
    pub fn x_value(&self, xdata: &[f64]) -> f64 {
        xdata[self.index]
    }

    /// The cursor's annotation text, if any.
    pub fn label(&self) -> Option<&str> {
        self.label_text.as_deref()
    }

    /// True if the screen position is within hit-test tolerance of any of
    /// this cursor's vlines. Side-effect-free.
    pub(crate) fn contains_point(&self, panes: &[Box<dyn PaneSurface>], screen: [f32; 2]) -> bool {
        self.markers
            .iter()
            .any(|m| panes[m.pane].hit_test(m.vline, screen))
    }

    /// True if this cursor owns the marker handle.
    pub(crate) fn owns_marker(&self, id: MarkerId) -> bool {
        self.markers.iter().any(|m| m.vline == id)
    }

    /// Append the handles of this cursor's vlines that are within hit-test
    /// tolerance of the screen position.
    pub(crate) fn picked_vlines(
        &self,
        panes: &[Box<dyn PaneSurface>],
        screen: [f32; 2],
        out: &mut Vec<MarkerId>,
    ) {
        for m in &self.markers {
            if panes[m.pane].hit_test(m.vline, screen) {
                out.push(m.vline);
            }
        }
    }

    /// Draw order of this cursor's vline markers.
    pub(crate) fn vline_z(&self, panes: &[Box<dyn PaneSurface>]) -> f32 {
        self.markers
            .first()
            .map(|m| panes[m.pane].marker_z(m.vline))
            .unwrap_or(BASE_Z)
    }

    /// Move the cursor to a new data index, updating every marker's visual
    /// position. No-op when `index` equals the current index. Does not
    /// request a redraw; that is the caller's responsibility.
    pub(crate) fn move_to(
        &mut self,
        panes: &mut [Box<dyn PaneSurface>],
        xdata: &[f64],
        ydata: &[Vec<f64>],
        index: usize,
    ) {
        if index == self.index {
            return;
        }
        let x = xdata[index];
        for m in &self.markers {
            let surface = &mut panes[m.pane];
            surface.set_marker_x(m.vline, x);
            if let Some(point) = m.point {
                if let Some(&y) = ydata[m.pane].get(index) {
                    surface.set_point_pos(point, x, y);
                }
            }
            if let Some(label) = m.label {
                surface.set_marker_x(label, x);
            }
        }
        self.index = index;
    }

    /// Raise this cursor's vlines and label above all others while dragged.
    pub(crate) fn enable_focus(&mut self, panes: &mut [Box<dyn PaneSurface>]) {
        self.set_z(panes, FOCUS_Z);
    }

    /// Restore the resting draw order after a drag.
    pub(crate) fn disable_focus(&mut self, panes: &mut [Box<dyn PaneSurface>]) {
        self.set_z(panes, BASE_Z);
    }

    fn set_z(&mut self, panes: &mut [Box<dyn PaneSurface>], z: f32) {
        for m in &self.markers {
            let surface = &mut panes[m.pane];
            surface.set_marker_z(m.vline, z);
            if let Some(label) = m.label {
                surface.set_marker_z(label, z);
            }
        }
    }

    /// Attach a label above the cursor on every pane, replacing any previous
    /// label. `None` removes the label.
    pub(crate) fn annotate(
        &mut self,
        panes: &mut [Box<dyn PaneSurface>],
        xdata: &[f64],
        text: Option<&str>,
    ) {
        for m in &mut self.markers {
            if let Some(label) = m.label.take() {
                panes[m.pane].remove_marker(label);
            }
        }
        self.label_text = text.map(str::to_owned);
        let Some(text) = text else { return };
        let x = xdata[self.index];
        for m in &mut self.markers {
            let surface = &mut panes[m.pane];
            let label = surface.add_label(text, x, &self.look);
            surface.set_marker_z(label, BASE_Z);
            m.label = Some(label);
        }
    }

    /// Release every marker this cursor owns.
    pub(crate) fn release(&mut self, panes: &mut [Box<dyn PaneSurface>]) {
        for m in self.markers.drain(..) {
            let surface = &mut panes[m.pane];
            surface.remove_marker(m.vline);
            if let Some(point) = m.point {
                surface.remove_marker(point);
            }
            if let Some(label) = m.label {
                surface.remove_marker(label);
            }
        }
    }
}

// Total order by data index; marker handles and styling do not participate.
impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Cursor {}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}
