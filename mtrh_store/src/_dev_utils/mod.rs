
mod dev_db;

use crate::choices::{Gender, HealthcareUnit};
use crate::patient::PatientForCreate;
use crate::ModelManager;

pub use dev_db::seed_patients;

/// Fresh in-memory store per call, so async tests never share a pool
/// across runtimes.
pub async fn init_test() -> ModelManager {
    ModelManager::new("sqlite::memory:").await.unwrap()
}

pub fn fx_patient(patient_id: &str, diagnosis: &str) -> PatientForCreate {
    PatientForCreate {
        diagnosis: diagnosis.to_string(),
        healthcare_unit: HealthcareUnit::MopcClinic,
        patient_id: patient_id.to_string(),
        mobile_number: "0712345678".to_string(),
        gender: Gender::Female,
        age: 34,
    }
}
