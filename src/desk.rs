use std::path::Path;

use mtrh_store::export::export_csv;
use mtrh_store::patient::{Patient, PatientBmc, PatientDraft, PatientForCreate};
use mtrh_store::ModelManager;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::shell::{DeleteScope, Host};
use crate::Result;

/// The operator console's handle on the store. Owns the runtime the async
/// store calls are driven on, so every `Host` call blocks until committed.
pub struct Desk {
    rt: Runtime,
    mm: ModelManager,
}

impl Desk {
    pub fn open(db_url: &str) -> Result<Self> {
        let rt = Runtime::new()?;
        let mm = rt.block_on(ModelManager::new(db_url))?;
        info!("{:<12} - opened {db_url}", "DESK");

        Ok(Self { rt, mm })
    }
}

impl Host for Desk {
    fn add_patient(&mut self, draft: PatientDraft) -> Result<i64> {
        let patient_c = PatientForCreate::try_from(draft)?;
        let id = self.rt.block_on(PatientBmc::create(&self.mm, patient_c))?;
        Ok(id)
    }

    fn find_patient(&mut self, patient_id: &str) -> Result<Patient> {
        let patient = self.rt.block_on(PatientBmc::first_by_patient_id(&self.mm, patient_id))?;
        Ok(patient)
    }

    fn delete_patients(&mut self, patient_id: &str, scope: DeleteScope) -> Result<u64> {
        let count = match scope {
            DeleteScope::All => self.rt.block_on(PatientBmc::delete_all_by_patient_id(&self.mm, patient_id))?,
            DeleteScope::First => self.rt.block_on(PatientBmc::delete_first_by_patient_id(&self.mm, patient_id))?,
        };
        debug!("{:<12} - delete {scope:?} {patient_id} - {count}", "DESK");
        Ok(count)
    }

    fn export_patients(&mut self, path: &Path) -> Result<usize> {
        let patients = self.rt.block_on(PatientBmc::list(&self.mm))?;
        if patients.is_empty() {
            return Ok(0);
        }

        std::fs::write(path, export_csv(&patients)?)?;
        debug!("{:<12} - export {} - {}", "DESK", path.display(), patients.len());
        Ok(patients.len())
    }

    fn count_patients(&mut self) -> Result<i64> {
        let count = self.rt.block_on(PatientBmc::count(&self.mm))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use mtrh_store::export::parse_csv;

    use crate::Error;
    use super::*;

    fn fx_draft(patient_id: &str, diagnosis: &str) -> PatientDraft {
        PatientDraft {
            diagnosis: diagnosis.to_string(),
            healthcare_unit: "Haematology Clinic - Chandaria - MTRH".to_string(),
            patient_id: patient_id.to_string(),
            mobile_number: "0733000000".to_string(),
            gender: "Male".to_string(),
            age: "61".to_string(),
        }
    }

    #[test]
    fn test_add_find_delete() -> Result<()> {
        let mut desk = Desk::open("sqlite::memory:")?;

        let id = desk.add_patient(fx_draft("P-1", "Sickle cell crisis"))?;
        desk.add_patient(fx_draft("P-1", "Review"))?;

        assert_eq!(desk.find_patient("P-1")?.id, id);
        assert_eq!(desk.delete_patients("P-1", DeleteScope::First)?, 1);
        assert_eq!(desk.find_patient("P-1")?.diagnosis, "Review");
        assert_eq!(desk.delete_patients("P-1", DeleteScope::All)?, 1);
        assert!(matches!(
            desk.find_patient("P-1"),
            Err(Error::Store(mtrh_store::Error::PatientNotFound { .. }))
        ));
        Ok(())
    }

    #[test]
    fn test_export_to_file() -> core::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("mtrh_data.csv");
        let mut desk = Desk::open("sqlite::memory:")?;

        assert_eq!(desk.export_patients(&path)?, 0);
        assert!(!path.exists());

        desk.add_patient(fx_draft("P-1", "Anaemia, severe"))?;
        desk.add_patient(fx_draft("P-2", "Leukaemia"))?;
        assert_eq!(desk.export_patients(&path)?, 2);

        let patients = parse_csv(&std::fs::read(&path)?)?;
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].diagnosis, "Anaemia, severe");
        assert_eq!(patients[1].patient_id, "P-2");
        Ok(())
    }

    #[test]
    fn test_open_bad_url() {
        let res = Desk::open("sqlite:///nonexistent-mtrh-dir/deeper/mtrh.db");

        assert!(matches!(res, Err(Error::Store(mtrh_store::Error::StoreOpen { .. }))));
    }
}
