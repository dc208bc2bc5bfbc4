//! Data Processor Module
//! Normalises the raw sheet and maps it onto typed ward records.

use super::record::{columns, DisplayColumn, PatientRecord, Ward};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Sheet has no {0} column")]
    MissingColumn(&'static str),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Verbose header variants and their canonical short names.
const SYNONYMS: [(&str, &str); 3] = [
    ("ESTANCIA HOSPITALARIA", columns::STAY),
    ("INGRESO POR", columns::REASON),
    ("FECHA DE INGRESO", columns::ADMISSION),
];

/// Handles sheet cleaning and schema mapping.
pub struct DataProcessor;

impl DataProcessor {
    /// Canonical name for a raw header: trimmed, upper-cased, synonyms resolved.
    pub fn canonical_name(raw: &str) -> String {
        let upper = raw.trim().to_uppercase();
        SYNONYMS
            .iter()
            .find(|(verbose, _)| *verbose == upper)
            .map(|(_, short)| short.to_string())
            .unwrap_or(upper)
    }

    /// Rename every column to its canonical name.
    ///
    /// Two headers collapsing onto the same name is a schema error.
    pub fn normalize_columns(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let renamed: Vec<Column> = df
            .get_columns()
            .iter()
            .map(|col| {
                let name = Self::canonical_name(&col.name().to_string());
                col.clone().with_name(name.into())
            })
            .collect();

        Ok(DataFrame::new(renamed)?)
    }

    /// Normalise headers and drop rows without a patient.
    pub fn clean(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let df = Self::normalize_columns(df)?;

        if df.column(columns::PATIENT).is_err() {
            return Err(ProcessorError::MissingColumn(columns::PATIENT));
        }

        let cleaned = df
            .lazy()
            .filter(col(columns::PATIENT).is_not_null())
            .collect()?;
        Ok(cleaned)
    }

    /// Map a cleaned frame onto typed records.
    ///
    /// Bed values are coerced to integers; anything non-numeric becomes absent.
    /// Patient names that are blank after trimming are dropped here as well.
    pub fn to_ward(df: &DataFrame) -> Result<Ward, ProcessorError> {
        let beds = Self::bed_column(df)?;
        let specialty = Self::text_column(df, columns::SPECIALTY)?;
        let patient = Self::text_column(df, columns::PATIENT)?;
        let triage = Self::text_column(df, columns::TRIAGE)?;
        let reason = Self::text_column(df, columns::REASON)?;
        let stay = Self::text_column(df, columns::STAY)?;
        let admission = Self::text_column(df, columns::ADMISSION)?;
        let doctor = Self::text_column(df, columns::DOCTOR)?;

        let records = (0..df.height())
            .filter(|&i| !patient[i].trim().is_empty())
            .map(|i| PatientRecord {
                bed: beds[i],
                specialty: specialty[i].clone(),
                patient_name: patient[i].clone(),
                triage_color: triage[i].clone(),
                admission_reason: reason[i].clone(),
                length_of_stay: stay[i].clone(),
                admission_date: admission[i].clone(),
                doctor: doctor[i].clone(),
            })
            .collect();

        let columns = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        Ok(Ward { records, columns })
    }

    fn bed_column(df: &DataFrame) -> Result<Vec<Option<i64>>, ProcessorError> {
        let Ok(bed) = df.column(columns::BED) else {
            return Ok(vec![None; df.height()]);
        };

        // The float cast does not skip padding, so " 621" must be trimmed first.
        let bed_text = bed.cast(&DataType::String)?;
        let trimmed: Vec<Option<String>> = bed_text
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect();
        let bed_f64 = Column::new(columns::BED.into(), trimmed).cast(&DataType::Float64)?;
        let bed_ca = bed_f64.f64()?;

        Ok(bed_ca
            .into_iter()
            .map(|v| v.filter(|b| b.is_finite()).map(|b| b as i64))
            .collect())
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, ProcessorError> {
        let Ok(column) = df.column(name) else {
            return Ok(vec![String::new(); df.height()]);
        };

        let text = column.cast(&DataType::String)?;
        let text_ca = text.as_materialized_series().str()?;

        Ok(text_ca
            .into_iter()
            .map(|v| v.map(|s| s.to_string()).unwrap_or_default())
            .collect())
    }

    /// Build a frame of the given display columns from ordered records.
    pub fn to_dataframe(
        records: &[&PatientRecord],
        display_columns: &[DisplayColumn],
    ) -> Result<DataFrame, ProcessorError> {
        let cols: Vec<Column> = display_columns
            .iter()
            .map(|&column| {
                let values: Vec<String> = records.iter().map(|r| r.field(column)).collect();
                Column::new(column.name().into(), values)
            })
            .collect();

        Ok(DataFrame::new(cols)?)
    }

    /// Write ordered records to a CSV file.
    pub fn write_csv(
        records: &[&PatientRecord],
        display_columns: &[DisplayColumn],
        path: &Path,
    ) -> Result<(), ProcessorError> {
        let mut df = Self::to_dataframe(records, display_columns)?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        Ok(())
    }
}
