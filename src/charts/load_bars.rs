//! Load Bars Module
//! Doctor caseload table with proportional progress bars.

use crate::stats::DoctorLoad;
use egui::{Color32, RichText};

/// Bar colour for doctor load.
pub const LOAD_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Label for rows that carry no doctor.
pub const UNASSIGNED_LABEL: &str = "Sin asignar";

const BAR_WIDTH: f32 = 120.0;

/// Draws caseload distribution widgets.
pub struct LoadBars;

impl LoadBars {
    /// Fraction of the bar filled for `count` on a `scale` axis.
    pub fn bar_fraction(count: usize, scale: usize) -> f32 {
        if scale == 0 {
            return 0.0;
        }
        (count as f32 / scale as f32).clamp(0.0, 1.0)
    }

    pub fn doctor_label(doctor: &str) -> &str {
        if doctor.is_empty() {
            UNASSIGNED_LABEL
        } else {
            doctor
        }
    }

    /// Doctor / total / bar table, busiest first.
    pub fn draw_doctor_table(ui: &mut egui::Ui, load: &DoctorLoad, headroom: usize) {
        let scale = load.display_scale(headroom);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("doctor_load_table")
                    .striped(true)
                    .min_col_width(40.0)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Médico").strong().size(12.0));
                        ui.label(RichText::new("Total").strong().size(12.0));
                        ui.label(RichText::new("Carga").strong().size(12.0));
                        ui.end_row();

                        for entry in &load.entries {
                            ui.label(RichText::new(Self::doctor_label(&entry.doctor)).size(12.0));
                            ui.label(RichText::new(entry.count.to_string()).size(12.0));
                            ui.add(
                                egui::ProgressBar::new(Self::bar_fraction(entry.count, scale))
                                    .desired_width(BAR_WIDTH)
                                    .fill(LOAD_COLOR)
                                    .text(entry.count.to_string()),
                            );
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fraction() {
        assert_eq!(LoadBars::bar_fraction(0, 0), 0.0);
        assert_eq!(LoadBars::bar_fraction(2, 4), 0.5);
        assert_eq!(LoadBars::bar_fraction(9, 4), 1.0);
    }

    #[test]
    fn test_blank_doctor_label() {
        assert_eq!(LoadBars::doctor_label(""), UNASSIGNED_LABEL);
        assert_eq!(LoadBars::doctor_label("Dr Gil"), "Dr Gil");
    }
}
