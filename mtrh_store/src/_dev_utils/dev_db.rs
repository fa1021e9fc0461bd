use crate::choices::{Gender, HealthcareUnit};
use crate::patient::{PatientBmc, PatientForCreate};
use crate::{ModelManager, Result};

/// Inserts a small, varied set of intake records and returns their ids.
pub async fn seed_patients(mm: &ModelManager) -> Result<Vec<i64>> {
    let seeds = [
        ("P-1001", "Malaria", HealthcareUnit::MopcClinic, Gender::Female, 34),
        ("P-1002", "Type 2 diabetes, uncontrolled", HealthcareUnit::DiabeticClinicChandaria, Gender::Male, 58),
        ("P-1003", "Otitis \"media\"", HealthcareUnit::EntGeneral, Gender::Other, 7),
        ("P-1001", "Follow-up", HealthcareUnit::AmbulatoryConsultation, Gender::Female, 34),
    ];

    let mut ids = Vec::with_capacity(seeds.len());
    for (patient_id, diagnosis, healthcare_unit, gender, age) in seeds {
        let patient_c = PatientForCreate {
            diagnosis: diagnosis.to_string(),
            healthcare_unit,
            patient_id: patient_id.to_string(),
            mobile_number: "0722000111".to_string(),
            gender,
            age,
        };
        ids.push(PatientBmc::create(mm, patient_c).await?);
    }

    Ok(ids)
}
