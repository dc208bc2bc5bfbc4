//! GUI module - User interface components

mod app;
mod patient_table;
mod summary_panel;

pub use app::BedBoardApp;
pub use patient_table::PatientTable;
pub use summary_panel::{SummaryAction, SummaryPanel};
