//! Demo: snap cursors linked across two plot panes
//!
//! What it demonstrates
//! - Building a `SnapCursorStack` over two `PlotPane`s sharing one window.
//! - Adding cursors at data indices, dragging them with the mouse, and
//!   watching them snap to samples without crossing each other.
//! - Annotation labels and the cursors-moved notification.
//!
//! How to run
//! ```bash
//! cargo run --example linked_panes
//! ```
//! Drag the yellow or blue vertical line in either pane; both panes stay in
//! sync because one cursor owns a marker per pane.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use eframe::{egui, NativeOptions};
use egui_plot::{Line, Plot};
use snapcursor::{pump_pointer_events, CursorLook, PaneSurface, PlotPane, SnapCursorStack};

struct DemoApp {
    stack: SnapCursorStack,
    sine_pts: Vec<[f64; 2]>,
    cosine_pts: Vec<[f64; 2]>,
    moves: Arc<AtomicUsize>,
}

impl DemoApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let xdata: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
        let y_sine: Vec<f64> = xdata.iter().map(|x| x.sin()).collect();
        let y_cosine: Vec<f64> = xdata.iter().map(|x| x.cos()).collect();

        let panes: Vec<Box<dyn PaneSurface>> = vec![
            Box::new(PlotPane::new(&cc.egui_ctx)),
            Box::new(PlotPane::new(&cc.egui_ctx)),
        ];
        let mut stack = SnapCursorStack::new(
            xdata.clone(),
            vec![y_sine.clone(), y_cosine.clone()],
            panes,
        )
        .expect("panes share one window surface");

        stack
            .add_cursor(40, CursorLook::default())
            .expect("index 40 is in range and free");
        stack
            .add_cursor(
                140,
                CursorLook {
                    color: egui::Color32::LIGHT_BLUE,
                    ..Default::default()
                },
            )
            .expect("index 140 is in range and free");
        stack.annotate(&["A", "B"]).expect("one label per cursor");

        let moves = Arc::new(AtomicUsize::new(0));
        let m = moves.clone();
        stack.add_moved_handler(Arc::new(move || {
            m.fetch_add(1, Ordering::SeqCst);
        }));

        let sine_pts = xdata.iter().zip(&y_sine).map(|(&x, &y)| [x, y]).collect();
        let cosine_pts = xdata.iter().zip(&y_cosine).map(|(&x, &y)| [x, y]).collect();
        Self {
            stack,
            sine_pts,
            cosine_pts,
            moves,
        }
    }

    fn show_pane(&mut self, ui: &mut egui::Ui, pane: usize, id: &str, pts: Vec<[f64; 2]>) {
        // allow_drag(false): the primary button drags cursors, not the view.
        let resp = Plot::new(id)
            .height(ui.available_height() / (2 - pane) as f32)
            .allow_drag(false)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(id, pts));
                if let Some(p) = self.stack.pane_mut(pane).downcast_mut::<PlotPane>() {
                    p.show(plot_ui);
                }
            });
        if let Some(p) = self.stack.pane_mut(pane).downcast_mut::<PlotPane>() {
            p.record_frame(&resp);
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "cursor indices: {:?}  x values: {:?}",
                    self.stack.cursor_indices(),
                    self.stack
                        .cursor_x_values()
                        .iter()
                        .map(|x| format!("{x:.2}"))
                        .collect::<Vec<_>>()
                ));
                ui.separator();
                ui.label(format!(
                    "moved notifications: {}",
                    self.moves.load(Ordering::SeqCst)
                ));
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            let sine = self.sine_pts.clone();
            let cosine = self.cosine_pts.clone();
            self.show_pane(ui, 0, "sine", sine);
            self.show_pane(ui, 1, "cosine", cosine);
        });
        pump_pointer_events(&mut self.stack, ctx);
    }
}

fn main() -> eframe::Result<()> {
    let options = NativeOptions::default();
    eframe::run_native(
        "snapcursor: linked panes",
        options,
        Box::new(|cc| Ok(Box::new(DemoApp::new(cc)))),
    )
}
