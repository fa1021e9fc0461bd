use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};

pub type Result<T> = core::result::Result<T, Error>;

#[serde_as]
#[derive(Debug, Serialize, strum_macros::AsRefStr)]
#[serde(tag = "type", content = "data")]
pub enum Error {
    // -- Validation
    FieldEmpty { field: &'static str },
    FieldTooLong { field: &'static str, max: usize },
    AgeNotANumber { value: String },
    AgeOutOfRange { age: i64 },
    UnknownHealthcareUnit { value: String },
    UnknownGender { value: String },
    UnexpectedCsvHeader { found: Vec<String> },
    CsvRead(#[serde_as(as = "DisplayFromStr")] csv::Error),

    // -- Lookup
    PatientNotFound { patient_id: String },
    EntityNotFound { entity: &'static str, id: i64 },

    // -- Storage
    StoreOpen { url: String, cause: String },
    Sqlx(#[serde_as(as = "DisplayFromStr")] sqlx::Error),
    CsvWrite(#[serde_as(as = "DisplayFromStr")] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::AsRefStr)]
pub enum ErrorKind {
    Validation,
    NotFound,
    StorageUnavailable,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;

        match self {
            FieldEmpty { .. }
            | FieldTooLong { .. }
            | AgeNotANumber { .. }
            | AgeOutOfRange { .. }
            | UnknownHealthcareUnit { .. }
            | UnknownGender { .. }
            | UnexpectedCsvHeader { .. }
            | CsvRead(..) => ErrorKind::Validation,
            PatientNotFound { .. } | EntityNotFound { .. } => ErrorKind::NotFound,
            StoreOpen { .. } | Sqlx(..) | CsvWrite(..) => ErrorKind::StorageUnavailable,
        }
    }

    /// Message fit for showing to the person at the intake desk.
    pub fn operator_message(&self) -> String {
        use Error::*;

        match self {
            FieldEmpty { field } => format!("All fields must be filled! Missing: {field}"),
            FieldTooLong { field, max } => format!("{field} must be at most {max} characters"),
            AgeNotANumber { value } => format!("Age must be a whole number, got '{value}'"),
            AgeOutOfRange { age } => format!("Age must be between 0 and 120, got {age}"),
            UnknownHealthcareUnit { value } => format!("Unknown healthcare service unit '{value}'"),
            UnknownGender { value } => format!("Unknown gender '{value}'"),
            UnexpectedCsvHeader { .. } | CsvRead(..) => "Not an MTRH patient export".to_string(),
            PatientNotFound { .. } | EntityNotFound { .. } => {
                "No record found for the given Patient ID!".to_string()
            }
            StoreOpen { url, .. } => format!("Patient store at '{url}' cannot be opened"),
            Sqlx(..) | CsvWrite(..) => "Patient store is unavailable".to_string(),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Sqlx(value)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {}
