//! Visual styling for a cursor: vline look, data-point look, label size.

use eframe::egui;
use egui_plot::{LineStyle, MarkerShape};
use serde::{Deserialize, Serialize};

/// Visual style of one cursor: the vertical marker line, the optional data
/// point riding on each trace, and the annotation label.
///
/// Serializable so that embedding applications can persist cursor styling in
/// their own layout/state files. Cursor *positions* are deliberately not
/// serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorLook {
    /// Color shared by the vline, the data point and the label text.
    pub color: egui::Color32,
    /// Vline stroke width.
    pub width: f32,
    /// Vline style.
    pub style: LineStyle,

    /// Whether to draw a data point per pane (requires y-data for the pane).
    pub show_points: bool,
    /// Data-point radius.
    pub point_size: f32,
    /// Data-point shape.
    #[serde(with = "ser_marker_shape")]
    pub marker: MarkerShape,

    /// Annotation label font size.
    pub label_size: f32,
}

impl Default for CursorLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::YELLOW,
            width: 1.5,
            style: LineStyle::Solid,
            show_points: true,
            point_size: 4.0,
            marker: MarkerShape::Circle,
            label_size: 12.0,
        }
    }
}

impl CursorLook {
    /// Render an inline editor for this look.
    pub fn render_editor(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Color");
            let mut c = self.color;
            if ui.color_edit_button_srgba(&mut c).changed() {
                self.color = c;
            }
            ui.label("Width");
            ui.add(
                egui::DragValue::new(&mut self.width)
                    .range(0.1..=10.0)
                    .speed(0.1),
            );
        });
        egui::ComboBox::from_label("Line style")
            .selected_text(match self.style {
                LineStyle::Solid => "Solid",
                LineStyle::Dashed { .. } => "Dashed",
                LineStyle::Dotted { .. } => "Dotted",
            })
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(matches!(self.style, LineStyle::Solid), "Solid")
                    .clicked()
                {
                    self.style = LineStyle::Solid;
                }
                if ui
                    .selectable_label(matches!(self.style, LineStyle::Dashed { .. }), "Dashed")
                    .clicked()
                {
                    self.style = LineStyle::Dashed { length: 6.0 };
                }
                if ui
                    .selectable_label(matches!(self.style, LineStyle::Dotted { .. }), "Dotted")
                    .clicked()
                {
                    self.style = LineStyle::Dotted { spacing: 4.0 };
                }
            });
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_points, "Points");
            if self.show_points {
                ui.label("Size");
                ui.add(
                    egui::DragValue::new(&mut self.point_size)
                        .range(0.5..=20.0)
                        .speed(0.1),
                );
            }
        });
    }
}

/// Serializable mirror of `egui_plot::MarkerShape`, which ships no serde
/// impls. Bridged onto the field via `#[serde(with = "ser_marker_shape")]`.
mod ser_marker_shape {
    use egui_plot::MarkerShape;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    enum SerMarkerShape {
        Circle,
        Square,
        Diamond,
        Cross,
        Plus,
        Asterisk,
        Up,
        Down,
        Left,
        Right,
    }

    impl From<MarkerShape> for SerMarkerShape {
        fn from(m: MarkerShape) -> Self {
            match m {
                MarkerShape::Circle => SerMarkerShape::Circle,
                MarkerShape::Square => SerMarkerShape::Square,
                MarkerShape::Diamond => SerMarkerShape::Diamond,
                MarkerShape::Cross => SerMarkerShape::Cross,
                MarkerShape::Plus => SerMarkerShape::Plus,
                MarkerShape::Asterisk => SerMarkerShape::Asterisk,
                MarkerShape::Up => SerMarkerShape::Up,
                MarkerShape::Down => SerMarkerShape::Down,
                MarkerShape::Left => SerMarkerShape::Left,
                MarkerShape::Right => SerMarkerShape::Right,
            }
        }
    }

    impl From<SerMarkerShape> for MarkerShape {
        fn from(m: SerMarkerShape) -> Self {
            match m {
                SerMarkerShape::Circle => MarkerShape::Circle,
                SerMarkerShape::Square => MarkerShape::Square,
                SerMarkerShape::Diamond => MarkerShape::Diamond,
                SerMarkerShape::Cross => MarkerShape::Cross,
                SerMarkerShape::Plus => MarkerShape::Plus,
                SerMarkerShape::Asterisk => MarkerShape::Asterisk,
                SerMarkerShape::Up => MarkerShape::Up,
                SerMarkerShape::Down => MarkerShape::Down,
                SerMarkerShape::Left => MarkerShape::Left,
                SerMarkerShape::Right => MarkerShape::Right,
            }
        }
    }

    pub fn serialize<S: Serializer>(marker: &MarkerShape, s: S) -> Result<S::Ok, S::Error> {
        SerMarkerShape::from(*marker).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<MarkerShape, D::Error> {
        Ok(SerMarkerShape::deserialize(d)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_round_trips_through_json() {
        let look = CursorLook {
            width: 2.5,
            show_points: false,
            marker: MarkerShape::Diamond,
            ..Default::default()
        };
        let json = serde_json::to_string(&look).unwrap();
        let back: CursorLook = serde_json::from_str(&json).unwrap();
        assert_eq!(back.width, 2.5);
        assert!(!back.show_points);
        assert_eq!(back.marker, MarkerShape::Diamond);
        assert_eq!(back.color, look.color);
    }
}
