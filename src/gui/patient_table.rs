//! Patient Table Widget
//! Central scrollable board of patients, ordered by bed, each row filled
//! with its triage colour.

use crate::data::{DisplayColumn, Ward};
use crate::stats::{BoardCalculator, TriageCategory, TriageRule};
use egui::{Color32, RichText, ScrollArea};

const MIN_COL_WIDTH: f32 = 60.0;

/// Background for a triage category.
pub fn triage_fill(category: TriageCategory) -> Color32 {
    match category {
        TriageCategory::Green => Color32::from_rgb(0xe8, 0xf5, 0xe9),  // Mint
        TriageCategory::Red => Color32::from_rgb(0xfc, 0xe4, 0xec),    // Soft pink
        TriageCategory::Yellow => Color32::from_rgb(0xff, 0xfd, 0xe7), // Cream
        TriageCategory::None => Color32::WHITE,
    }
}

struct PatientRow {
    cells: Vec<String>,
    fill: Color32,
}

/// Precomputed rows for the current snapshot.
#[derive(Default)]
pub struct PatientTable {
    columns: Vec<DisplayColumn>,
    rows: Vec<PatientRow>,
}

impl PatientTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.rows.clear();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rebuild rows from a snapshot.
    pub fn set_ward(&mut self, ward: &Ward, rules: &[TriageRule]) {
        self.columns = ward.display_columns();
        self.rows = ward
            .sorted_by_bed()
            .into_iter()
            .map(|record| PatientRow {
                cells: self.columns.iter().map(|&c| record.field(c)).collect(),
                fill: triage_fill(BoardCalculator::triage_category(record, rules)),
            })
            .collect();
    }

    /// Row fills in display order, header row first.
    fn row_fills(&self) -> Vec<Color32> {
        std::iter::once(Color32::TRANSPARENT)
            .chain(self.rows.iter().map(|r| r.fill))
            .collect()
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("📋 Detalle de Pacientes").size(18.0).strong());
        ui.add_space(8.0);

        let fills = self.row_fills();

        ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("patient_table")
                    .min_col_width(MIN_COL_WIDTH)
                    .spacing([12.0, 6.0])
                    .with_row_color(move |row, _style| fills.get(row).copied())
                    .show(ui, |ui| {
                        for column in &self.columns {
                            ui.label(RichText::new(column.name()).strong().size(13.0));
                        }
                        ui.end_row();

                        for row in &self.rows {
                            for cell in &row.cells {
                                ui.label(RichText::new(cell).size(13.0).color(Color32::BLACK));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{columns, PatientRecord};

    fn rules() -> Vec<TriageRule> {
        vec![
            TriageRule {
                pattern: "VERDE".to_string(),
                category: TriageCategory::Green,
            },
            TriageRule {
                pattern: "ROJO".to_string(),
                category: TriageCategory::Red,
            },
        ]
    }

    #[test]
    fn test_rows_sorted_and_filled() {
        let ward = Ward {
            records: vec![
                PatientRecord {
                    bed: None,
                    patient_name: "Sin cama".to_string(),
                    ..Default::default()
                },
                PatientRecord {
                    bed: Some(625),
                    patient_name: "Luis".to_string(),
                    triage_color: "verde".to_string(),
                    ..Default::default()
                },
                PatientRecord {
                    bed: Some(621),
                    patient_name: "Ana".to_string(),
                    triage_color: "ROJO".to_string(),
                    ..Default::default()
                },
            ],
            columns: vec![columns::PATIENT.to_string(), columns::BED.to_string()],
        };

        let mut table = PatientTable::new();
        table.set_ward(&ward, &rules());

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.columns, vec![DisplayColumn::Bed, DisplayColumn::Patient]);
        assert_eq!(table.rows[0].cells, vec!["621", "Ana"]);
        assert_eq!(table.rows[1].cells, vec!["625", "Luis"]);
        assert_eq!(table.rows[2].cells, vec!["", "Sin cama"]);

        let fills = table.row_fills();
        assert_eq!(fills[1], triage_fill(TriageCategory::Red));
        assert_eq!(fills[2], triage_fill(TriageCategory::Green));
        assert_eq!(fills[3], Color32::WHITE);
    }
}
