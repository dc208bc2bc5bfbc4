//! Sheet Data Loader Module
//! Downloads the published ward sheet as CSV and parses it with Polars.

use super::processor::{DataProcessor, ProcessorError};
use super::record::Ward;
use polars::prelude::*;
use std::io::Cursor;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch sheet: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to process sheet: {0}")]
    ProcessorError(#[from] ProcessorError),
}

/// Fetches the ward sheet from its published CSV URL.
#[derive(Debug, Clone)]
pub struct DataLoader {
    source_url: String,
}

impl DataLoader {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Load the ward, collapsing every failure into an empty ward.
    pub fn load(&self) -> Ward {
        let started = Instant::now();
        tracing::info!(url = %self.source_url, "Fetching ward sheet");

        match self.try_load() {
            Ok(ward) => {
                tracing::info!(
                    rows = ward.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Ward sheet loaded"
                );
                ward
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ward data unavailable");
                Ward::empty()
            }
        }
    }

    /// Fetch and parse, surfacing the cause of any failure.
    pub fn try_load(&self) -> Result<Ward, LoaderError> {
        let bytes = self.fetch()?;
        Self::parse_csv(bytes)
    }

    fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
        let client = reqwest::blocking::Client::builder().build()?;
        let body = client
            .get(&self.source_url)
            .send()?
            .error_for_status()?
            .bytes()?;
        Ok(body.to_vec())
    }

    /// Parse raw CSV text into a cleaned, typed ward.
    ///
    /// Every column is read as text; the bed column is coerced afterwards.
    pub fn parse_csv(bytes: Vec<u8>) -> Result<Ward, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        let cleaned = DataProcessor::clean(&df)?;
        Ok(DataProcessor::to_ward(&cleaned)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::columns;

    const SHEET: &str = "Cama , Esp,Paciente,EVAT,Ingreso por,Estancia Hospitalaria,Fecha de ingreso,Medico\n\
621,HEM-A,Ana,rojo leve,Fiebre,3,2024-01-01,Dr Gil\n\
abc,onc,Luis,,Dolor,1,2024-01-02,Dr Paz\n\
623,CARDIO,,VERDE,Disnea,2,2024-01-03,Dr Gil\n";

    #[test]
    fn test_parse_csv_normalises_sheet() {
        let ward = DataLoader::parse_csv(SHEET.as_bytes().to_vec()).expect("Should parse");

        assert_eq!(ward.len(), 2);
        for name in [
            columns::BED,
            columns::SPECIALTY,
            columns::PATIENT,
            columns::REASON,
            columns::STAY,
            columns::ADMISSION,
            columns::DOCTOR,
        ] {
            assert!(ward.has_column(name), "missing {name}");
        }

        let ana = &ward.records[0];
        assert_eq!(ana.bed, Some(621));
        assert_eq!(ana.admission_reason, "Fiebre");
        assert_eq!(ana.length_of_stay, "3");
        assert_eq!(ana.admission_date, "2024-01-01");
        assert_eq!(ana.triage_color, "rojo leve");

        let luis = &ward.records[1];
        assert_eq!(luis.bed, None);
        assert_eq!(luis.triage_color, "");
    }

    #[test]
    fn test_padded_beds_are_not_reported_free() {
        use crate::stats::{BedRange, BoardCalculator};

        let sheet = "CAMA,PACIENTE\n 621,a\n622 ,b\n\" 623\",c\nx,d\n";
        let ward = DataLoader::parse_csv(sheet.as_bytes().to_vec()).expect("Should parse");

        let beds: Vec<Option<i64>> = ward.records.iter().map(|r| r.bed).collect();
        assert_eq!(beds, vec![Some(621), Some(622), Some(623), None]);

        let availability = BoardCalculator::bed_availability(&ward.records, BedRange::new(621, 623));
        assert!(availability.is_full());
    }

    #[test]
    fn test_parse_csv_without_patient_column_fails() {
        let sheet = "Cama,Esp\n621,HEM\n";
        assert!(DataLoader::parse_csv(sheet.as_bytes().to_vec()).is_err());
    }

    #[test]
    fn test_unreachable_source_yields_empty_ward() {
        let loader = DataLoader::new("http://127.0.0.1:9/sheet.csv");
        assert!(loader.try_load().is_err());
        assert!(loader.load().is_empty());
    }
}
