//! The cursor stack: a sorted collection of snap cursors plus the
//! pick/drag/snap state machine.
//!
//! All state transitions happen synchronously inside
//! [`SnapCursorStack::handle_pointer_event`], driven by the host's event
//! delivery. At most one cursor is dragged at a time; its legal movement
//! interval is fixed at pick time by its immediate sorted neighbors, so a
//! drag can never cross or collide with another cursor.

use crate::cursor::Cursor;
use crate::error::SnapCursorError;
use crate::events::{MovedHandler, MovedHandlers, PointerButton, PointerEvent};
use crate::look::CursorLook;
use crate::surface::{MarkerId, PaneSurface, PointerAffordance};

// ─────────────────────────────────────────────────────────────────────────────
// Drag state
// ─────────────────────────────────────────────────────────────────────────────

enum DragState {
    Idle,
    Dragging {
        /// Position of the picked cursor in the sorted collection. Stable
        /// for the whole drag: the bounds prevent any reordering.
        pos: usize,
        /// Inclusive legal index interval, fixed at pick time.
        bounds: (usize, usize),
        /// Cursor indices recorded at pick time, for the did-anything-change
        /// comparison on release.
        start_indices: Vec<usize>,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// SnapCursorStack
// ─────────────────────────────────────────────────────────────────────────────

/// An ordered collection of snap cursors over a set of panes sharing one
/// drawing surface and one x-data sequence.
///
/// The stack owns its cursors and its panes. Cursors are kept sorted
/// ascending by data index and no two cursors may share an index.
pub struct SnapCursorStack {
    xdata: Vec<f64>,
    /// One y column per pane; an empty column means no data point riding on
    /// cursors for that pane.
    ydata: Vec<Vec<f64>>,
    panes: Vec<Box<dyn PaneSurface>>,
    cursors: Vec<Cursor>,
    /// Marker handles reported under the pointer since the last press,
    /// consumed and cleared by the next primary press.
    pick_list: Vec<MarkerId>,
    drag: DragState,
    /// Cursor currently presenting the drag affordance while idle.
    hovered: Option<usize>,
    moved_handlers: MovedHandlers,
}

impl SnapCursorStack {
    /// Create a stack over `panes`, all of which must draw to the same
    /// surface.
    ///
    /// `xdata` is the shared sample sequence and must be strictly increasing
    /// (caller's contract). `ydata` holds one column per pane, used only for
    /// the optional data points riding on each cursor; a missing or empty
    /// column disables points for that pane, a non-empty column must match
    /// the x-data length.
    pub fn new(
        xdata: Vec<f64>,
        mut ydata: Vec<Vec<f64>>,
        panes: Vec<Box<dyn PaneSurface>>,
    ) -> Result<Self, SnapCursorError> {
        if panes.is_empty() {
            return Err(SnapCursorError::NoPanes);
        }
        let surface = panes[0].surface_id();
        if panes.iter().any(|p| p.surface_id() != surface) {
            return Err(SnapCursorError::MixedSurfaces);
        }
        if xdata.is_empty() {
            return Err(SnapCursorError::EmptyXData);
        }
        for (pane, col) in ydata.iter().enumerate() {
            if !col.is_empty() && col.len() != xdata.len() {
                return Err(SnapCursorError::YDataLengthMismatch {
                    pane,
                    got: col.len(),
                    expected: xdata.len(),
                });
            }
        }
        ydata.resize_with(panes.len(), Vec::new);
        Ok(Self {
            xdata,
            ydata,
            panes,
            cursors: Vec::new(),
            pick_list: Vec::new(),
            drag: DragState::Idle,
            hovered: None,
            moved_handlers: MovedHandlers::default(),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// The shared x-data sequence.
    pub fn xdata(&self) -> &[f64] {
        &self.xdata
    }

    /// Number of panes in the stack.
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Borrow a pane. Downcast to the concrete adapter type to drive its
    /// rendering.
    pub fn pane(&self, pane: usize) -> &dyn PaneSurface {
        &*self.panes[pane]
    }

    /// Mutably borrow a pane.
    pub fn pane_mut(&mut self, pane: usize) -> &mut dyn PaneSurface {
        &mut *self.panes[pane]
    }

    /// Snapshot of the cursors' x values, ascending.
    pub fn cursor_x_values(&self) -> Vec<f64> {
        self.cursors.iter().map(|c| c.x_value(&self.xdata)).collect()
    }

    /// Snapshot of the cursors' data indices, ascending.
    pub fn cursor_indices(&self) -> Vec<usize> {
        self.cursors.iter().map(Cursor::index).collect()
    }

    /// Borrow the sorted cursors.
    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    /// True while a cursor is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// The legal index interval of the current drag, if one is in progress.
    pub fn drag_bounds(&self) -> Option<(usize, usize)> {
        match self.drag {
            DragState::Dragging { bounds, .. } => Some(bounds),
            DragState::Idle => None,
        }
    }

    // ── Mutating API ─────────────────────────────────────────────────────

    /// Insert a cursor at a data index, preserving ascending sort order.
    ///
    /// Fails when the index is outside the x-data sequence or already
    /// occupied; the collection is left unchanged on failure.
    pub fn add_cursor(&mut self, index: usize, look: CursorLook) -> Result<(), SnapCursorError> {
        if index >= self.xdata.len() {
            return Err(SnapCursorError::IndexOutOfRange {
                index,
                len: self.xdata.len(),
            });
        }
        match self.cursors.binary_search_by_key(&index, Cursor::index) {
            Ok(_) => Err(SnapCursorError::DuplicateIndex { index }),
            Err(pos) => {
                let cursor = Cursor::new(&self.xdata, &self.ydata, &mut self.panes, index, look);
                self.cursors.insert(pos, cursor);
                self.hovered = None;
                Ok(())
            }
        }
    }

    /// Apply one label per cursor, in ascending cursor order.
    ///
    /// Fails without changing any label when the number of texts does not
    /// match the number of cursors.
    pub fn annotate<S: AsRef<str>>(&mut self, texts: &[S]) -> Result<(), SnapCursorError> {
        if texts.len() != self.cursors.len() {
            return Err(SnapCursorError::AnnotationCountMismatch {
                expected: self.cursors.len(),
                got: texts.len(),
            });
        }
        for (cursor, text) in self.cursors.iter_mut().zip(texts) {
            cursor.annotate(&mut self.panes, &self.xdata, Some(text.as_ref()));
        }
        Ok(())
    }

    /// Remove all cursor labels.
    pub fn clear_annotations(&mut self) {
        for cursor in &mut self.cursors {
            cursor.annotate(&mut self.panes, &self.xdata, None);
        }
    }

    /// Register a cursors-moved handler. Adding the same handler (by
    /// identity) twice is a no-op.
    pub fn add_moved_handler(&mut self, handler: MovedHandler) {
        self.moved_handlers.add(handler);
    }

    /// Unregister a cursors-moved handler. Removing an unregistered handler
    /// is a no-op.
    pub fn remove_moved_handler(&mut self, handler: &MovedHandler) {
        self.moved_handlers.remove(handler);
    }

    /// Remove all cursors and release their markers.
    pub fn clear(&mut self) {
        for cursor in &mut self.cursors {
            cursor.release(&mut self.panes);
        }
        self.cursors.clear();
        self.pick_list.clear();
        self.drag = DragState::Idle;
        self.hovered = None;
    }

    // ── Event intake ─────────────────────────────────────────────────────

    /// Report a marker handle under the pointer. Picks accumulate until the
    /// next primary press consumes them.
    pub fn push_pick(&mut self, marker: MarkerId) {
        self.pick_list.push(marker);
    }

    /// Vline marker handles within hit-test tolerance of a screen position,
    /// for hosts that synthesize pick events at press time.
    pub fn hit_markers_at(&self, screen: [f32; 2]) -> Vec<MarkerId> {
        let mut out = Vec::new();
        for cursor in &self.cursors {
            cursor.picked_vlines(&self.panes, screen, &mut out);
        }
        out
    }

    /// Feed one pointer event through the state machine.
    ///
    /// Events must be delivered in order; every transition happens
    /// synchronously inside this call.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved { screen } => {
                if self.is_dragging() {
                    match screen.and_then(|s| self.locate(s)) {
                        Some((_, data)) => self.drag_to(data[0]),
                        // Leaving all panes ends the drag gracefully.
                        None => self.end_drag(screen),
                    }
                } else {
                    self.hover_feedback(screen);
                }
            }
            PointerEvent::Pressed { button, .. } => {
                if button == PointerButton::Primary && !self.is_dragging() {
                    self.begin_drag();
                }
            }
            PointerEvent::Released { screen } => {
                if self.is_dragging() {
                    self.end_drag(Some(screen));
                }
            }
        }
    }

    // ── Drag state machine ───────────────────────────────────────────────

    /// Idle → Dragging: consume the pick list, resolve the topmost picked
    /// marker's cursor, fix the drag bounds from its sorted neighbors.
    fn begin_drag(&mut self) {
        if self.pick_list.is_empty() {
            return;
        }
        // Topmost wins: highest draw order, earliest pick on a tie.
        let mut picked: Option<(usize, f32)> = None;
        for &marker in &self.pick_list {
            let Some(pos) = self.cursors.iter().position(|c| c.owns_marker(marker)) else {
                continue;
            };
            let z = self.cursors[pos].vline_z(&self.panes);
            match picked {
                Some((_, best_z)) if best_z >= z => {}
                _ => picked = Some((pos, z)),
            }
        }
        self.pick_list.clear();
        let Some((pos, _)) = picked else { return };

        let bounds = self.move_bounds(pos);
        let start_indices = self.cursor_indices();
        self.cursors[pos].enable_focus(&mut self.panes);
        self.drag = DragState::Dragging {
            pos,
            bounds,
            start_indices,
        };
        self.hovered = None;
        self.request_redraw();
    }

    /// Inclusive index interval the cursor at sorted position `pos` may
    /// occupy: bounded by its immediate neighbors, or the ends of the x-data
    /// sequence where there is no neighbor.
    fn move_bounds(&self, pos: usize) -> (usize, usize) {
        let left = if pos == 0 {
            0
        } else {
            self.cursors[pos - 1].index() + 1
        };
        let right = if pos + 1 == self.cursors.len() {
            self.xdata.len() - 1
        } else {
            self.cursors[pos + 1].index() - 1
        };
        (left, right)
    }

    /// Dragging → Dragging: snap the pointer's data-x to the nearest legal
    /// index and move the picked cursor there.
    fn drag_to(&mut self, x: f64) {
        let DragState::Dragging { pos, bounds, .. } = &self.drag else {
            return;
        };
        let (pos, bounds) = (*pos, *bounds);
        let snapped = self.snap_index(x, bounds);
        self.cursors[pos].move_to(&mut self.panes, &self.xdata, &self.ydata, snapped);
        self.request_redraw();
    }

    /// Dragging → Idle: notify observers if the layout changed, drop focus,
    /// and re-arm hover feedback at the release position.
    fn end_drag(&mut self, screen: Option<[f32; 2]>) {
        let DragState::Dragging {
            pos, start_indices, ..
        } = std::mem::replace(&mut self.drag, DragState::Idle)
        else {
            return;
        };
        if start_indices != self.cursor_indices() {
            self.moved_handlers.notify();
        }
        self.cursors[pos].disable_focus(&mut self.panes);
        self.request_redraw();
        // One synthesized hover recompute so the pointer affordance matches
        // the new layout immediately.
        self.hover_feedback(screen);
    }

    // ── Snapping ─────────────────────────────────────────────────────────

    /// Resolve a data-space x to the nearest index within `bounds`.
    ///
    /// Coordinates outside `[xdata[left], xdata[right]]` clamp to the bound;
    /// inside, the nearest sample of the whole sequence is taken and clamped
    /// into the interval.
    fn snap_index(&self, x: f64, (left, right): (usize, usize)) -> usize {
        if x < self.xdata[left] {
            return left;
        }
        if x > self.xdata[right] {
            return right;
        }
        nearest_index(&self.xdata, x).clamp(left, right)
    }

    // ── Hover feedback ───────────────────────────────────────────────────

    fn hover_feedback(&mut self, screen: Option<[f32; 2]>) {
        let Some(screen) = screen else {
            self.clear_hover();
            return;
        };
        if self.locate(screen).is_none() {
            self.clear_hover();
            return;
        }
        if let Some(i) = self.hovered {
            if i < self.cursors.len() && self.cursors[i].contains_point(&self.panes, screen) {
                return;
            }
        }
        match (0..self.cursors.len())
            .find(|&i| self.cursors[i].contains_point(&self.panes, screen))
        {
            Some(i) => {
                self.hovered = Some(i);
                self.set_affordance(PointerAffordance::DragHorizontal);
            }
            // Unconditional: `hovered` may already be None with the drag
            // affordance still showing (a drag nulls it without resetting).
            None => self.clear_hover(),
        }
    }

    fn clear_hover(&mut self) {
        self.hovered = None;
        self.set_affordance(PointerAffordance::Default);
    }

    // ── Host plumbing ────────────────────────────────────────────────────

    /// Map a screen position to the pane under it and its data coordinates.
    fn locate(&self, screen: [f32; 2]) -> Option<(usize, [f64; 2])> {
        self.panes
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.data_at(screen).map(|d| (i, d)))
    }

    fn request_redraw(&mut self) {
        // All panes share one surface; asking the first suffices.
        self.panes[0].request_redraw();
    }

    fn set_affordance(&mut self, affordance: PointerAffordance) {
        for pane in &mut self.panes {
            pane.set_pointer_affordance(affordance);
        }
    }
}

// Panes are trait objects with no Debug bound; summarize them.
impl std::fmt::Debug for SnapCursorStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapCursorStack")
            .field("samples", &self.xdata.len())
            .field("panes", &self.panes.len())
            .field("cursor_indices", &self.cursor_indices())
            .field("dragging", &self.is_dragging())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Nearest-sample search
// ─────────────────────────────────────────────────────────────────────────────

/// Index of the sample closest to `x` in a strictly increasing sequence
/// (absolute-difference minimization; the left sample wins an exact tie).
pub(crate) fn nearest_index(xdata: &[f64], x: f64) -> usize {
    let pos = xdata.partition_point(|&v| v < x);
    if pos == 0 {
        return 0;
    }
    if pos == xdata.len() {
        return xdata.len() - 1;
    }
    if (xdata[pos] - x) < (x - xdata[pos - 1]) {
        pos
    } else {
        pos - 1
    }
}
