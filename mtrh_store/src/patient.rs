
use std::str::FromStr;

use chrono::Local;
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use tracing::debug;

use crate::choices::{Gender, HealthcareUnit};
use crate::{Error, ModelManager, Result};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const PATIENT_ID_MAX_LEN: usize = 50;
pub const AGE_MAX: i64 = 120;

const COLUMNS: &str = "id, creation_date, diagnosis_date, diagnosis, \
    healthcare_service_unit, patient_id, mobile_number, gender, age";

/// One row of the `patients` table, field for column.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub creation_date: String,
    pub diagnosis_date: String,
    pub diagnosis: String,
    pub healthcare_service_unit: String,
    pub patient_id: String,
    pub mobile_number: String,
    pub gender: String,
    pub age: i64,
}

/// Intake fields exactly as typed at a front end, before any checking.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientDraft {
    pub diagnosis: String,
    pub healthcare_unit: String,
    pub patient_id: String,
    pub mobile_number: String,
    pub gender: String,
    #[serde(deserialize_with = "text_or_number")]
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatientForCreate {
    pub diagnosis: String,
    pub healthcare_unit: HealthcareUnit,
    pub patient_id: String,
    pub mobile_number: String,
    pub gender: Gender,
    pub age: i64,
}

impl PatientForCreate {
    pub fn validate(&self) -> Result<()> {
        require("patient_id", &self.patient_id)?;
        require("diagnosis", &self.diagnosis)?;
        require("mobile_number", &self.mobile_number)?;

        if self.patient_id.chars().count() > PATIENT_ID_MAX_LEN {
            return Err(Error::FieldTooLong { field: "patient_id", max: PATIENT_ID_MAX_LEN });
        }
        if !(0..=AGE_MAX).contains(&self.age) {
            return Err(Error::AgeOutOfRange { age: self.age });
        }

        Ok(())
    }
}

impl TryFrom<PatientDraft> for PatientForCreate {
    type Error = Error;

    fn try_from(draft: PatientDraft) -> Result<Self> {
        require("healthcare_unit", &draft.healthcare_unit)?;
        require("gender", &draft.gender)?;
        require("age", &draft.age)?;

        let healthcare_unit = HealthcareUnit::from_str(&draft.healthcare_unit)
            .map_err(|_| Error::UnknownHealthcareUnit { value: draft.healthcare_unit.clone() })?;
        let gender = Gender::from_str(&draft.gender)
            .map_err(|_| Error::UnknownGender { value: draft.gender.clone() })?;
        let age = draft.age.trim().parse::<i64>()
            .map_err(|_| Error::AgeNotANumber { value: draft.age.clone() })?;

        let patient_c = PatientForCreate {
            diagnosis: draft.diagnosis,
            healthcare_unit,
            patient_id: draft.patient_id,
            mobile_number: draft.mobile_number,
            gender,
            age,
        };
        patient_c.validate()?;

        Ok(patient_c)
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::FieldEmpty { field });
    }
    Ok(())
}

// Form posts carry the age as text, JSON bodies usually as a number.
fn text_or_number<'de, D>(deserializer: D) -> core::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextOrNumber;

    impl<'de> de::Visitor<'de> for TextOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> core::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(TextOrNumber)
}

pub struct PatientBmc;

impl PatientBmc {
    pub async fn create(mm: &ModelManager, patient_c: PatientForCreate) -> Result<i64> {
        patient_c.validate()?;

        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let mut tx = mm.db().begin().await?;

        let id = sqlx::query(
            "INSERT INTO patients (creation_date, diagnosis_date, diagnosis, \
             healthcare_service_unit, patient_id, mobile_number, gender, age) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(stamp.clone())
        .bind(stamp)
        .bind(patient_c.diagnosis)
        .bind(patient_c.healthcare_unit.to_string())
        .bind(patient_c.patient_id)
        .bind(patient_c.mobile_number)
        .bind(patient_c.gender.to_string())
        .bind(patient_c.age)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;
        debug!("{:<12} - PatientBmc::create - id {id}", "MODEL");

        Ok(id)
    }

    pub async fn get(mm: &ModelManager, id: i64) -> Result<Patient> {
        let sql = format!("SELECT {COLUMNS} FROM patients WHERE id = ?");
        let patient: Patient = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(mm.db())
            .await?
            .ok_or(Error::EntityNotFound { entity: "patient", id })?;

        Ok(patient)
    }

    /// Lowest-id record carrying `patient_id`. Match is exact and case-sensitive.
    pub async fn first_by_patient_id(mm: &ModelManager, patient_id: &str) -> Result<Patient> {
        let sql = format!("SELECT {COLUMNS} FROM patients WHERE patient_id = ? ORDER BY id LIMIT 1");
        let patient: Patient = sqlx::query_as(&sql)
            .bind(patient_id)
            .fetch_optional(mm.db())
            .await?
            .ok_or_else(|| Error::PatientNotFound { patient_id: patient_id.to_string() })?;

        Ok(patient)
    }

    /// Removes every record carrying `patient_id`. Returns how many went.
    pub async fn delete_all_by_patient_id(mm: &ModelManager, patient_id: &str) -> Result<u64> {
        let mut tx = mm.db().begin().await?;
        let count = sqlx::query("DELETE FROM patients WHERE patient_id = ?")
            .bind(patient_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        debug!("{:<12} - PatientBmc::delete_all - {count} row(s)", "MODEL");
        Ok(count)
    }

    /// Removes only the record `first_by_patient_id` would return.
    pub async fn delete_first_by_patient_id(mm: &ModelManager, patient_id: &str) -> Result<u64> {
        let mut tx = mm.db().begin().await?;
        let count = sqlx::query(
            "DELETE FROM patients WHERE id = \
             (SELECT id FROM patients WHERE patient_id = ? ORDER BY id LIMIT 1)",
        )
        .bind(patient_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        tx.commit().await?;

        debug!("{:<12} - PatientBmc::delete_first - {count} row(s)", "MODEL");
        Ok(count)
    }

    pub async fn list(mm: &ModelManager) -> Result<Vec<Patient>> {
        let sql = format!("SELECT {COLUMNS} FROM patients ORDER BY id");
        let patients: Vec<Patient> = sqlx::query_as(&sql)
            .fetch_all(mm.db())
            .await?;

        Ok(patients)
    }

    pub async fn count(mm: &ModelManager) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM patients")
            .fetch_one(mm.db())
            .await?;

        Ok(count)
    }
}
