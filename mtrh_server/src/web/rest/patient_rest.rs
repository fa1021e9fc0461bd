
use axum::extract::rejection::JsonRejection;
use axum::{extract::{Path, Query, State}, http::StatusCode, response::Response, Json};
use mtrh_store::export::export_csv;
use mtrh_store::patient::{Patient, PatientBmc, PatientDraft, PatientForCreate};
use mtrh_store::ModelManager;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::web::routes_patients::csv_attachment;
use crate::web::{Error, Result};

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteScope {
    #[default]
    All,
    First,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteParams {
    pub scope: DeleteScope,
}

#[axum::debug_handler]
pub async fn create_patient(
    State(mm): State<ModelManager>,
    payload: core::result::Result<Json<PatientDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>)> {
    debug!("{:<12} - create_patient", "HANDLER");

    let Json(draft) = payload?;
    let patient_c = PatientForCreate::try_from(draft)?;
    let id = PatientBmc::create(&mm, patient_c).await?;
    let patient = PatientBmc::get(&mm, id).await?;

    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn list_patients(State(mm): State<ModelManager>) -> Result<Json<Vec<Patient>>> {
    debug!("{:<12} - list_patients", "HANDLER");

    let patients = PatientBmc::list(&mm).await?;
    Ok(Json(patients))
}

pub async fn get_patient(
    State(mm): State<ModelManager>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>> {
    debug!("{:<12} - get_patient", "HANDLER");

    let patient = PatientBmc::first_by_patient_id(&mm, &patient_id).await?;
    Ok(Json(patient))
}

pub async fn delete_patient(
    State(mm): State<ModelManager>,
    Path(patient_id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Value>> {
    debug!("{:<12} - delete_patient - {:?}", "HANDLER", params.scope);

    if patient_id.trim().is_empty() {
        return Err(Error::MissingPatientId);
    }

    let deleted = match params.scope {
        DeleteScope::All => PatientBmc::delete_all_by_patient_id(&mm, &patient_id).await?,
        DeleteScope::First => PatientBmc::delete_first_by_patient_id(&mm, &patient_id).await?,
    };

    Ok(Json(json!({ "deleted": deleted })))
}

pub async fn export_patients(State(mm): State<ModelManager>) -> Result<Response> {
    debug!("{:<12} - export_patients", "HANDLER");

    let patients = PatientBmc::list(&mm).await?;
    Ok(csv_attachment(export_csv(&patients)?))
}
