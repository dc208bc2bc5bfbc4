//! Stats module - ward board computations

mod board;

pub use board::{
    BedRange, BedStatus, BoardCalculator, BoardSummary, DoctorLoad, SpecialtyCategory,
    TriageCategory, TriageRule,
};
