//! Summary Panel Widget
//! Top panel with the title, KPI counters, the free-bed banner and actions.

use crate::stats::{BedRange, BedStatus, BoardSummary};
use egui::{Color32, RichText};

const FREE_FILL: Color32 = Color32::from_rgb(0xe8, 0xf5, 0xe9);
const FREE_BORDER: Color32 = Color32::from_rgb(0xc8, 0xe6, 0xc9);
const FREE_TEXT: Color32 = Color32::from_rgb(0x2e, 0x7d, 0x32);
const FULL_FILL: Color32 = Color32::from_rgb(0xfd, 0xec, 0xea);
const FULL_TEXT: Color32 = Color32::from_rgb(220, 53, 69);

/// Banner text for the free-bed state.
pub fn bed_banner(status: BedStatus<'_>, range: BedRange) -> String {
    match status {
        BedStatus::Available(free) => {
            let beds: Vec<String> = free.iter().map(|b| b.to_string()).collect();
            format!("✨ Camas Disponibles: {}", beds.join(", "))
        }
        BedStatus::Full => format!(
            "🚨 SIN CAMAS: El servicio está lleno ({}-{} ocupadas).",
            range.low, range.high
        ),
    }
}

/// Header with counters and board actions.
pub struct SummaryPanel {
    pub status: String,
}

impl Default for SummaryPanel {
    fn default() -> Self {
        Self {
            status: "Cargando datos...".to_string(),
        }
    }
}

impl SummaryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the header
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        summary: Option<&BoardSummary>,
        range: BedRange,
        is_loading: bool,
    ) -> SummaryAction {
        let mut action = SummaryAction::None;

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("🏥 Gestión de Camas")
                    .size(24.0)
                    .strong()
                    .color(Color32::from_rgb(100, 149, 237)),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_enabled_ui(summary.is_some(), |ui| {
                    if ui.button("💾 Exportar CSV").clicked() {
                        action = SummaryAction::ExportCsv;
                    }
                });
                if ui.button("🔗 Abrir hoja").clicked() {
                    action = SummaryAction::OpenSource;
                }
                ui.add_enabled_ui(!is_loading, |ui| {
                    if ui.button("🔄 Actualizar").clicked() {
                        action = SummaryAction::Refresh;
                    }
                });
                if is_loading {
                    ui.spinner();
                }
            });
        });
        ui.add_space(8.0);

        if let Some(summary) = summary {
            Self::show_counters(ui, summary);
            ui.add_space(8.0);
            Self::show_bed_banner(ui, summary, range);
        }

        ui.add_space(4.0);
        let status_color = if self.status.contains("Error") {
            FULL_TEXT
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        ui.add_space(4.0);

        action
    }

    fn show_counters(ui: &mut egui::Ui, summary: &BoardSummary) {
        let count = summary.categories.len() + 2;

        ui.columns(count, |cols| {
            Self::metric(
                &mut cols[0],
                "Total Pacientes",
                summary.total_patients,
                None,
            );
            for (i, category) in summary.categories.iter().enumerate() {
                Self::metric(&mut cols[i + 1], &category.label, category.count, None);
            }
            Self::metric(
                &mut cols[count - 1],
                "Camas Disponibles",
                summary.beds.free.len(),
                Some(format!("De {} totales", summary.beds.total_capacity)),
            );
        });
    }

    fn metric(ui: &mut egui::Ui, label: &str, value: usize, note: Option<String>) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value.to_string()).size(24.0).strong());
                if let Some(note) = note {
                    ui.label(RichText::new(note).size(11.0).color(FREE_TEXT));
                }
            });
    }

    fn show_bed_banner(ui: &mut egui::Ui, summary: &BoardSummary, range: BedRange) {
        let status = summary.beds.status();
        let (fill, border, text) = match status {
            BedStatus::Available(_) => (FREE_FILL, FREE_BORDER, FREE_TEXT),
            BedStatus::Full => (FULL_FILL, FULL_TEXT, FULL_TEXT),
        };

        egui::Frame::none()
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, border))
            .rounding(8.0)
            .inner_margin(15.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(bed_banner(status, range))
                            .size(15.0)
                            .strong()
                            .color(text),
                    );
                });
            });
    }
}

/// Actions triggered from the header
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryAction {
    None,
    Refresh,
    ExportCsv,
    OpenSource,
}
