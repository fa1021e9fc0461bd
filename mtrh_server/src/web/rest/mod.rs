use axum::{routing::{get, post}, Router};
use mtrh_store::ModelManager;

use patient_rest::{create_patient, delete_patient, export_patients, get_patient, list_patients};

mod patient_rest;

pub fn routes(mm: ModelManager) -> Router {
    Router::new()
        .route("/api/patients", post(create_patient).get(list_patients))
        .route("/api/patients/{patient_id}", get(get_patient).delete(delete_patient))
        .route("/api/export", get(export_patients))
        .with_state(mm)
}
