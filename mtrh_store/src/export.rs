//! CSV export of the patient table.
//!
//! Column names and order are fixed; downstream spreadsheets key on them.

use serde::{Deserialize, Serialize};

use crate::patient::Patient;
use crate::{Error, Result};

pub const EXPORT_FILE_NAME: &str = "mtrh_data.csv";

pub const EXPORT_HEADER: [&str; 9] = [
    "ID",
    "Creation Date",
    "Diagnosis Date",
    "Diagnosis",
    "Healthcare Unit",
    "Patient ID",
    "Mobile",
    "Gender",
    "Age",
];

#[derive(Debug, Serialize, Deserialize)]
struct ExportRow {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Creation Date")]
    creation_date: String,
    #[serde(rename = "Diagnosis Date")]
    diagnosis_date: String,
    #[serde(rename = "Diagnosis")]
    diagnosis: String,
    #[serde(rename = "Healthcare Unit")]
    healthcare_unit: String,
    #[serde(rename = "Patient ID")]
    patient_id: String,
    #[serde(rename = "Mobile")]
    mobile: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Age")]
    age: i64,
}

impl From<&Patient> for ExportRow {
    fn from(p: &Patient) -> Self {
        Self {
            id: p.id,
            creation_date: p.creation_date.clone(),
            diagnosis_date: p.diagnosis_date.clone(),
            diagnosis: p.diagnosis.clone(),
            healthcare_unit: p.healthcare_service_unit.clone(),
            patient_id: p.patient_id.clone(),
            mobile: p.mobile_number.clone(),
            gender: p.gender.clone(),
            age: p.age,
        }
    }
}

impl From<ExportRow> for Patient {
    fn from(row: ExportRow) -> Self {
        Self {
            id: row.id,
            creation_date: row.creation_date,
            diagnosis_date: row.diagnosis_date,
            diagnosis: row.diagnosis,
            healthcare_service_unit: row.healthcare_unit,
            patient_id: row.patient_id,
            mobile_number: row.mobile,
            gender: row.gender,
            age: row.age,
        }
    }
}

/// Header row, then one row per patient in the order given.
pub fn export_csv(patients: &[Patient]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER).map_err(Error::CsvWrite)?;
    for patient in patients {
        writer.serialize(ExportRow::from(patient)).map_err(Error::CsvWrite)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::CsvWrite(csv::Error::from(e.into_error())))
}

pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Patient>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let header = reader.headers().map_err(Error::CsvRead)?;
    if header.iter().ne(EXPORT_HEADER) {
        return Err(Error::UnexpectedCsvHeader {
            found: header.iter().map(str::to_string).collect(),
        });
    }

    reader
        .deserialize::<ExportRow>()
        .map(|row| row.map(Patient::from).map_err(Error::CsvRead))
        .collect()
}
