//! egui_plot implementation of [`PaneSurface`] plus the per-frame pointer
//! driver.
//!
//! A [`PlotPane`] retains the markers the stack has added and re-draws them
//! into its `egui_plot::Plot` every frame. Per frame, the embedding app:
//!
//! 1. calls [`PlotPane::show`] inside the plot's build closure (after its own
//!    traces), then
//! 2. hands the returned `PlotResponse` to [`PlotPane::record_frame`] so the
//!    pane knows its screen geometry, then
//! 3. calls [`pump_pointer_events`] once after all panes are shown.
//!
//! The hosting plot should disable its own primary-button pan
//! (`Plot::allow_drag(false)`), otherwise plot panning competes with cursor
//! dragging.

use std::collections::HashMap;

use eframe::egui;
use egui::{Align2, CursorIcon};
use egui_plot::{PlotPoint, PlotResponse, PlotTransform, PlotUi, Points, Text, VLine};

use crate::events::{PointerButton, PointerEvent};
use crate::look::CursorLook;
use crate::stack::SnapCursorStack;
use crate::surface::{MarkerId, PaneSurface, PointerAffordance, SurfaceId};

// ─────────────────────────────────────────────────────────────────────────────
// PlotPane
// ─────────────────────────────────────────────────────────────────────────────

enum Marker {
    VLine { x: f64, look: CursorLook, z: f32 },
    Point { x: f64, y: f64, look: CursorLook, z: f32 },
    Label { text: String, x: f64, look: CursorLook, z: f32 },
}

impl Marker {
    fn z(&self) -> f32 {
        match self {
            Marker::VLine { z, .. } | Marker::Point { z, .. } | Marker::Label { z, .. } => *z,
        }
    }

    fn z_mut(&mut self) -> &mut f32 {
        match self {
            Marker::VLine { z, .. } | Marker::Point { z, .. } | Marker::Label { z, .. } => z,
        }
    }
}

/// Screen geometry of the pane, captured from the last `PlotResponse`.
#[derive(Clone, Copy)]
struct PaneFrame {
    rect: egui::Rect,
    transform: PlotTransform,
}

/// One egui_plot pane of a cursor stack.
///
/// All panes created from the same [`egui::Context`] report the same
/// [`SurfaceId`], so a stack accepts them together.
pub struct PlotPane {
    ctx: egui::Context,
    surface: SurfaceId,
    markers: HashMap<MarkerId, Marker>,
    affordance: PointerAffordance,
    frame: Option<PaneFrame>,
    pick_radius: f32,
}

impl PlotPane {
    /// Create a pane drawing to the surface of `ctx`.
    pub fn new(ctx: &egui::Context) -> Self {
        let surface = ctx.data_mut(|d| {
            *d.get_temp_mut_or_insert_with(egui::Id::new("snapcursor_surface"), SurfaceId::next)
        });
        Self {
            ctx: ctx.clone(),
            surface,
            markers: HashMap::new(),
            affordance: PointerAffordance::Default,
            frame: None,
            pick_radius: 2.0,
        }
    }

    /// Hit-test tolerance around a vline, in screen points.
    pub fn set_pick_radius(&mut self, radius: f32) {
        self.pick_radius = radius;
    }

    /// Draw the retained markers into the plot. Call inside the plot's build
    /// closure, after the app's own traces.
    pub fn show(&mut self, plot_ui: &mut PlotUi) {
        let y_top = *plot_ui.plot_bounds().range_y().end();

        // Low z first so high z draws on top; ids break ties stably.
        let mut order: Vec<(&MarkerId, &Marker)> = self.markers.iter().collect();
        order.sort_by(|(ida, a), (idb, b)| {
            a.z()
                .partial_cmp(&b.z())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(ida.cmp(idb))
        });

        for (_, marker) in order {
            match marker {
                Marker::VLine { x, look, .. } => {
                    plot_ui.vline(
                        VLine::new("", *x)
                            .color(look.color)
                            .width(look.width)
                            .style(look.style),
                    );
                }
                Marker::Point { x, y, look, .. } => {
                    plot_ui.points(
                        Points::new("", vec![[*x, *y]])
                            .radius(look.point_size)
                            .shape(look.marker)
                            .color(look.color),
                    );
                }
                Marker::Label { text, x, look, .. } => {
                    let style = egui::Style::default();
                    let mut job = egui::text::LayoutJob::default();
                    egui::RichText::new(text.clone())
                        .size(look.label_size)
                        .color(look.color)
                        .append_to(
                            &mut job,
                            &style,
                            egui::FontSelection::Default,
                            egui::Align::LEFT,
                        );
                    plot_ui.text(
                        Text::new("", PlotPoint::new(*x, y_top), job).anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        }

        if self.affordance == PointerAffordance::DragHorizontal {
            self.ctx.set_cursor_icon(CursorIcon::ResizeHorizontal);
        }
    }

    /// Record the pane's screen geometry from this frame's `PlotResponse`.
    /// Required for hit-testing and screen→data mapping.
    pub fn record_frame<R>(&mut self, response: &PlotResponse<R>) {
        self.frame = Some(PaneFrame {
            rect: *response.transform.frame(),
            transform: response.transform,
        });
    }
}

impl PaneSurface for PlotPane {
    fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    fn add_vline(&mut self, x: f64, look: &CursorLook) -> MarkerId {
        let id = MarkerId::next();
        self.markers.insert(
            id,
            Marker::VLine {
                x,
                look: look.clone(),
                z: 0.0,
            },
        );
        id
    }

    fn add_point(&mut self, x: f64, y: f64, look: &CursorLook) -> MarkerId {
        let id = MarkerId::next();
        self.markers.insert(
            id,
            Marker::Point {
                x,
                y,
                look: look.clone(),
                z: 0.0,
            },
        );
        id
    }

    fn add_label(&mut self, text: &str, x: f64, look: &CursorLook) -> MarkerId {
        let id = MarkerId::next();
        self.markers.insert(
            id,
            Marker::Label {
                text: text.to_owned(),
                x,
                look: look.clone(),
                z: 0.0,
            },
        );
        id
    }

    fn set_marker_x(&mut self, id: MarkerId, x: f64) {
        match self.markers.get_mut(&id) {
            Some(Marker::VLine { x: mx, .. }) | Some(Marker::Label { x: mx, .. }) => *mx = x,
            Some(Marker::Point { x: mx, .. }) => *mx = x,
            None => {}
        }
    }

    fn set_point_pos(&mut self, id: MarkerId, x: f64, y: f64) {
        if let Some(Marker::Point { x: mx, y: my, .. }) = self.markers.get_mut(&id) {
            *mx = x;
            *my = y;
        }
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn marker_z(&self, id: MarkerId) -> f32 {
        self.markers.get(&id).map(Marker::z).unwrap_or(0.0)
    }

    fn set_marker_z(&mut self, id: MarkerId, z: f32) {
        if let Some(marker) = self.markers.get_mut(&id) {
            *marker.z_mut() = z;
        }
    }

    fn hit_test(&self, id: MarkerId, screen: [f32; 2]) -> bool {
        let (Some(frame), Some(Marker::VLine { x, .. })) = (self.frame, self.markers.get(&id))
        else {
            return false;
        };
        let pos = egui::pos2(screen[0], screen[1]);
        if !frame.rect.contains(pos) {
            return false;
        }
        let marker_screen_x = frame.transform.position_from_point(&PlotPoint::new(*x, 0.0)).x;
        (marker_screen_x - pos.x).abs() <= self.pick_radius
    }

    fn data_at(&self, screen: [f32; 2]) -> Option<[f64; 2]> {
        let frame = self.frame?;
        let pos = egui::pos2(screen[0], screen[1]);
        if !frame.rect.contains(pos) {
            return None;
        }
        let value = frame.transform.value_from_position(pos);
        Some([value.x, value.y])
    }

    fn request_redraw(&mut self) {
        self.ctx.request_repaint();
    }

    fn set_pointer_affordance(&mut self, affordance: PointerAffordance) {
        self.affordance = affordance;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pointer driver
// ─────────────────────────────────────────────────────────────────────────────

/// Translate this frame's egui pointer input into [`PointerEvent`]s for the
/// stack, synthesizing press-time pick events from the stack's hit tests.
///
/// Call once per frame, after every pane's [`PlotPane::record_frame`].
pub fn pump_pointer_events(stack: &mut SnapCursorStack, ctx: &egui::Context) {
    let (pos, pressed, released, moved) = ctx.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.delta() != egui::Vec2::ZERO,
        )
    });
    match pos {
        Some(p) => {
            let screen = [p.x, p.y];
            if moved {
                stack.handle_pointer_event(PointerEvent::Moved {
                    screen: Some(screen),
                });
            }
            if pressed {
                for marker in stack.hit_markers_at(screen) {
                    stack.push_pick(marker);
                }
                stack.handle_pointer_event(PointerEvent::Pressed {
                    button: PointerButton::Primary,
                    screen,
                });
            }
            if released {
                stack.handle_pointer_event(PointerEvent::Released { screen });
            }
        }
        None => {
            // Pointer gone (left the window): ends a drag in progress and
            // clears any lingering hover affordance.
            stack.handle_pointer_event(PointerEvent::Moved { screen: None });
        }
    }
}
