//! Bed Board Main Application
//! Header with counters, doctor caseload on the right, patient board in the centre.

use crate::charts::LoadBars;
use crate::config::BoardConfig;
use crate::data::{columns, DataLoader, DataProcessor, DisplayColumn, SnapshotCache, Ward};
use crate::gui::{PatientTable, SummaryAction, SummaryPanel};
use crate::stats::{BoardCalculator, BoardSummary};
use egui::{RichText, SidePanel, TopBottomPanel};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Sheet loading result from background thread
struct LoadResult {
    ward: Ward,
    elapsed: Duration,
}

/// Main application window.
pub struct BedBoardApp {
    config: BoardConfig,
    loader: DataLoader,
    cache: SnapshotCache,
    summary: Option<BoardSummary>,
    summary_panel: SummaryPanel,
    patient_table: PatientTable,

    // Async sheet loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl BedBoardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: BoardConfig) -> Self {
        Self {
            loader: DataLoader::new(config.source_url.clone()),
            cache: SnapshotCache::new(config.cache_ttl()),
            summary: None,
            summary_panel: SummaryPanel::new(),
            patient_table: PatientTable::new(),
            load_rx: None,
            is_loading: false,
            config,
        }
    }

    /// Fetch the sheet in a background thread
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.summary_panel.set_status("Descargando hoja...");

        let loader = self.loader.clone();
        thread::spawn(move || {
            let started = Instant::now();
            let ward = loader.load();
            let _ = tx.send(LoadResult {
                ward,
                elapsed: started.elapsed(),
            });
        });
    }

    /// Check for sheet loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => self.apply_snapshot(result.ward, result.elapsed),
            Err(TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("Sheet loader stopped without a result");
                self.apply_snapshot(Ward::empty(), Duration::ZERO);
            }
        }
    }

    /// Replace the cached snapshot and everything derived from it.
    fn apply_snapshot(&mut self, ward: Ward, elapsed: Duration) {
        self.is_loading = false;

        self.summary = BoardCalculator::summarize(
            &ward,
            self.config.bed_range,
            &self.config.specialties,
        );
        if let Some(summary) = &self.summary {
            tracing::info!(
                patients = summary.total_patients,
                free_beds = summary.beds.free.len(),
                full = summary.beds.is_full(),
                "Board refreshed"
            );
            self.patient_table.set_ward(&ward, &self.config.triage);
            self.summary_panel.set_status(&format!(
                "{} pacientes cargados en {} ms",
                ward.len(),
                elapsed.as_millis()
            ));
        } else {
            self.patient_table.clear();
            self.summary_panel.set_status("Sin datos de la hoja");
        }

        self.cache.store(ward, Instant::now());
    }

    /// Export the patient board as shown, ordered by bed.
    fn handle_export_csv(&mut self) {
        let ward = self.cache.ward();
        if ward.is_empty() {
            self.summary_panel.set_status("No hay pacientes para exportar");
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("pizarra_camas.csv")
            .save_file()
        else {
            return; // User cancelled
        };

        let mut export_columns = ward.display_columns();
        if ward.has_column(columns::ADMISSION) {
            export_columns.push(DisplayColumn::Admission);
        }

        match DataProcessor::write_csv(&ward.sorted_by_bed(), &export_columns, &path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), rows = ward.len(), "Exported patient board");
                self.summary_panel
                    .set_status(&format!("Exportado: {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                self.summary_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_open_source(&mut self) {
        if let Err(e) = open::that(self.loader.source_url()) {
            tracing::warn!(error = %e, "Could not open source sheet");
            self.summary_panel.set_status(&format!("Error: {}", e));
        }
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            let text = if self.is_loading && self.cache.fetched_at().is_none() {
                "Cargando datos..."
            } else {
                "⚠ No hay datos para mostrar."
            };
            ui.label(RichText::new(text).size(20.0));
        });
    }
}

impl eframe::App for BedBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        let now = Instant::now();
        if !self.is_loading && self.cache.is_stale(now) {
            self.start_load();
        }

        // Request repaint while loading, otherwise at the next expiry
        if self.is_loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if let Some(expires_at) = self.cache.expires_at() {
            ctx.request_repaint_after(expires_at.saturating_duration_since(now));
        }

        // Top panel - counters and free beds
        let mut action = SummaryAction::None;
        TopBottomPanel::top("summary_panel").show(ctx, |ui| {
            action = self.summary_panel.show(
                ui,
                self.summary.as_ref(),
                self.config.bed_range,
                self.is_loading,
            );
        });

        match action {
            SummaryAction::Refresh => {
                self.cache.invalidate();
                self.start_load();
            }
            SummaryAction::ExportCsv => self.handle_export_csv(),
            SummaryAction::OpenSource => self.handle_open_source(),
            SummaryAction::None => {}
        }

        let Some(summary) = &self.summary else {
            egui::CentralPanel::default().show(ctx, |ui| self.show_empty_state(ui));
            return;
        };

        // Right panel - doctor caseload
        SidePanel::right("doctor_panel")
            .min_width(300.0)
            .max_width(380.0)
            .show(ctx, |ui| {
                ui.label(RichText::new("👨‍⚕️ Pacientes por Médico").size(18.0).strong());
                ui.add_space(8.0);
                if self.cache.ward().has_column(columns::DOCTOR) {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        LoadBars::draw_doctor_table(
                            ui,
                            &summary.doctors,
                            self.config.doctor_scale_headroom,
                        );
                    });
                } else {
                    ui.label(
                        RichText::new("⚠ No se encontró columna MEDICO")
                            .color(egui::Color32::from_rgb(243, 156, 18)),
                    );
                }
            });

        // Central panel - patient board
        egui::CentralPanel::default().show(ctx, |ui| {
            self.patient_table.show(ui);
        });
    }
}
