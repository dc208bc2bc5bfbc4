//! Ward Record Module
//! Strongly-typed rows produced by the loader's schema-mapping step.

/// Canonical column names after header normalisation.
pub mod columns {
    pub const BED: &str = "CAMA";
    pub const SPECIALTY: &str = "ESP";
    pub const PATIENT: &str = "PACIENTE";
    pub const TRIAGE: &str = "EVAT";
    pub const REASON: &str = "MOTIVO";
    pub const STAY: &str = "ESTANCIA";
    pub const ADMISSION: &str = "INGRESO";
    pub const DOCTOR: &str = "MEDICO";
}

/// A column of the patient board, bound to a typed record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayColumn {
    Bed,
    Specialty,
    Patient,
    Triage,
    Reason,
    Stay,
    Admission,
    Doctor,
}

impl DisplayColumn {
    /// Columns shown on the patient board, in display order.
    pub const BOARD: [DisplayColumn; 7] = [
        DisplayColumn::Bed,
        DisplayColumn::Specialty,
        DisplayColumn::Patient,
        DisplayColumn::Triage,
        DisplayColumn::Reason,
        DisplayColumn::Stay,
        DisplayColumn::Doctor,
    ];

    /// Canonical sheet header for this column.
    pub fn name(self) -> &'static str {
        match self {
            DisplayColumn::Bed => columns::BED,
            DisplayColumn::Specialty => columns::SPECIALTY,
            DisplayColumn::Patient => columns::PATIENT,
            DisplayColumn::Triage => columns::TRIAGE,
            DisplayColumn::Reason => columns::REASON,
            DisplayColumn::Stay => columns::STAY,
            DisplayColumn::Admission => columns::ADMISSION,
            DisplayColumn::Doctor => columns::DOCTOR,
        }
    }
}

/// One patient row of the ward sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientRecord {
    pub bed: Option<i64>,
    pub specialty: String,
    pub patient_name: String,
    pub triage_color: String,
    pub admission_reason: String,
    pub length_of_stay: String,
    pub admission_date: String,
    pub doctor: String,
}

impl PatientRecord {
    /// Display text for a board column.
    pub fn field(&self, column: DisplayColumn) -> String {
        match column {
            DisplayColumn::Bed => self.bed.map(|b| b.to_string()).unwrap_or_default(),
            DisplayColumn::Specialty => self.specialty.clone(),
            DisplayColumn::Patient => self.patient_name.clone(),
            DisplayColumn::Triage => self.triage_color.clone(),
            DisplayColumn::Reason => self.admission_reason.clone(),
            DisplayColumn::Stay => self.length_of_stay.clone(),
            DisplayColumn::Admission => self.admission_date.clone(),
            DisplayColumn::Doctor => self.doctor.clone(),
        }
    }
}

/// An immutable snapshot of the ward sheet.
///
/// Rebuilt wholesale on every fetch; an empty ward is the canonical
/// "no data" state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ward {
    pub records: Vec<PatientRecord>,
    /// Canonical columns the source sheet carried, in source order.
    pub columns: Vec<String>,
}

impl Ward {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Display columns present in the source, in board order.
    pub fn display_columns(&self) -> Vec<DisplayColumn> {
        DisplayColumn::BOARD
            .into_iter()
            .filter(|c| self.has_column(c.name()))
            .collect()
    }

    /// Records ordered by ascending bed, rows without a bed last.
    /// The sort is stable so equal beds keep sheet order.
    pub fn sorted_by_bed(&self) -> Vec<&PatientRecord> {
        let mut rows: Vec<&PatientRecord> = self.records.iter().collect();
        rows.sort_by_key(|r| (r.bed.is_none(), r.bed));
        rows
    }
}
