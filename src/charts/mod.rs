//! Charts module - caseload visualisation

mod load_bars;

pub use load_bars::LoadBars;
