//! Closed value sets offered to the operator as dropdowns or numbered lists.
//!
//! Both enums render and parse as the exact strings stored in the
//! `patients` table, so a value read back from storage can be matched
//! against them without translation.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    AsRefStr, Display, EnumString, EnumIter,
    SerializeDisplay, DeserializeFromStr,
)]
pub enum HealthcareUnit {
    #[strum(serialize = "S4A OPD Ambulatory")]
    S4aOpdAmbulatory,
    #[strum(serialize = "PW 2 OPD - Consultant Room - MTRH")]
    Pw2OpdConsultantRoom,
    #[strum(serialize = "Ambulatory Consultation - MTRH")]
    AmbulatoryConsultation,
    #[strum(serialize = "ED - Medical Emergency (Rm 14) - MTRH")]
    EdMedicalEmergency,
    #[strum(serialize = "Diabetic Clinic - Chandaria - MTRH")]
    DiabeticClinicChandaria,
    #[strum(serialize = "ENT - General - MTRH")]
    EntGeneral,
    #[strum(serialize = "Haematology Clinic - Chandaria - MTRH")]
    HaematologyClinicChandaria,
    #[strum(serialize = "MOPC CLINIC - MTRH")]
    MopcClinic,
    #[strum(serialize = "Dental- OMFS- Oral & Maxillofacial Clinic - MTRH")]
    DentalOmfs,
    #[strum(serialize = "General-Oncology Telemedicine - MTRH")]
    GeneralOncologyTelemedicine,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    AsRefStr, Display, EnumString, EnumIter,
    SerializeDisplay, DeserializeFromStr,
)]
pub enum Gender {
    Male,
    Female,
    Other,
}
