
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Add,
    View { patient_id: String },
    Delete { patient_id: String },
    DeleteFirst { patient_id: String },
    Export { file: Option<PathBuf> },
    Count,
    Units,
    Help,
    Quit,
}
