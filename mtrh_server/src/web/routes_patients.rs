//! Form-driven intake UI.
//!
//! Validation and lookup misses are shown on the page itself; only storage
//! failures escape as `web::Error` and get mapped to a JSON error body.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use mtrh_store::export::{export_csv, EXPORT_FILE_NAME};
use mtrh_store::patient::{PatientBmc, PatientDraft, PatientForCreate};
use mtrh_store::{ErrorKind, ModelManager};
use serde::Deserialize;
use tracing::debug;

use super::pages::{Flash, IntakePage};
use super::Result;

pub fn routes(mm: ModelManager) -> Router {
    Router::new()
        .route("/", get(intake))
        .route("/patients", post(submit_patient))
        .route("/patients/view", get(view_patient))
        .route("/patients/delete", post(delete_patient))
        .route("/patients/export", get(export_patients))
        .with_state(mm)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PatientIdParams {
    pub patient_id: String,
}

type PageResponse = (StatusCode, Html<String>);

fn page(status: StatusCode, page: IntakePage) -> PageResponse {
    (status, Html(page.render()))
}

/// Renders a recoverable store error on the page; storage failures propagate.
fn settle(err: mtrh_store::Error, mut intake: IntakePage) -> Result<PageResponse> {
    let message = err.operator_message();
    match err.kind() {
        ErrorKind::Validation => {
            intake.flash = Some(Flash::Warning(message));
            Ok(page(StatusCode::BAD_REQUEST, intake))
        }
        ErrorKind::NotFound => {
            intake.flash = Some(Flash::Error(message));
            Ok(page(StatusCode::NOT_FOUND, intake))
        }
        ErrorKind::StorageUnavailable => Err(err.into()),
    }
}

async fn intake() -> Html<String> {
    Html(IntakePage::default().render())
}

async fn submit_patient(
    State(mm): State<ModelManager>,
    Form(draft): Form<PatientDraft>,
) -> Result<PageResponse> {
    debug!("{:<12} - submit_patient", "HANDLER");

    let intake = IntakePage { draft: Some(&draft), ..Default::default() };
    let patient_c = match PatientForCreate::try_from(draft.clone()) {
        Ok(patient_c) => patient_c,
        Err(err) => return settle(err, intake),
    };

    match PatientBmc::create(&mm, patient_c).await {
        Ok(_) => Ok(page(
            StatusCode::OK,
            IntakePage {
                flash: Some(Flash::Success("Patient data saved successfully!".to_string())),
                patient_id: Some(draft.patient_id.as_str()),
                ..Default::default()
            },
        )),
        Err(err) => settle(err, intake),
    }
}

async fn view_patient(
    State(mm): State<ModelManager>,
    Query(params): Query<PatientIdParams>,
) -> Result<PageResponse> {
    debug!("{:<12} - view_patient", "HANDLER");

    let patient_id = params.patient_id.as_str();
    let mut intake = IntakePage { patient_id: Some(patient_id), ..Default::default() };
    if patient_id.trim().is_empty() {
        intake.flash = Some(Flash::Warning("Please enter a Patient ID!".to_string()));
        return Ok(page(StatusCode::BAD_REQUEST, intake));
    }

    match PatientBmc::first_by_patient_id(&mm, patient_id).await {
        Ok(record) => {
            intake.record = Some(&record);
            intake.flash = Some(Flash::Info(format!("Record {} for patient {patient_id}", record.id)));
            Ok(page(StatusCode::OK, intake))
        }
        Err(err) => settle(err, intake),
    }
}

async fn delete_patient(
    State(mm): State<ModelManager>,
    Form(params): Form<PatientIdParams>,
) -> Result<PageResponse> {
    debug!("{:<12} - delete_patient", "HANDLER");

    let patient_id = params.patient_id.as_str();
    let mut intake = IntakePage { patient_id: Some(patient_id), ..Default::default() };
    if patient_id.trim().is_empty() {
        intake.flash = Some(Flash::Warning("Please enter a Patient ID!".to_string()));
        return Ok(page(StatusCode::BAD_REQUEST, intake));
    }

    let count = PatientBmc::delete_all_by_patient_id(&mm, patient_id).await?;
    intake.flash = Some(match count {
        0 => Flash::Warning("No record found for the given Patient ID!".to_string()),
        n => Flash::Success(format!("Deleted {n} record(s) for patient {patient_id}")),
    });

    Ok(page(StatusCode::OK, intake))
}

async fn export_patients(State(mm): State<ModelManager>) -> Result<Response> {
    debug!("{:<12} - export_patients", "HANDLER");

    let patients = PatientBmc::list(&mm).await?;
    if patients.is_empty() {
        let intake = IntakePage {
            flash: Some(Flash::Warning("No records found to download.".to_string())),
            ..Default::default()
        };
        return Ok(page(StatusCode::OK, intake).into_response());
    }

    let csv = export_csv(&patients)?;
    Ok(csv_attachment(csv))
}

pub(super) fn csv_attachment(csv: Vec<u8>) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        ),
    ];
    (headers, csv).into_response()
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use mtrh_store::_dev_utils;
    use tower::ServiceExt;

    use crate::web::routes_all;
    use super::*;

    const FORM: &str = "application/x-www-form-urlencoded";

    async fn body_text(res: Response) -> Result<String> {
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    fn post_form(uri: &str, body: &str) -> Result<Request<Body>> {
        Ok(Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM)
            .body(Body::from(body.to_string()))?)
    }

    fn get(uri: &str) -> Result<Request<Body>> {
        Ok(Request::builder().uri(uri).body(Body::empty())?)
    }

    #[tokio::test]
    async fn test_submit_then_view() -> Result<()> {
        let mm = _dev_utils::init_test().await;
        let app = routes_all(mm.clone(), "web-folder");

        let body = "patient_id=P-1001&diagnosis=Malaria&healthcare_unit=MOPC+CLINIC+-+MTRH\
                    &mobile_number=0712345678&gender=Female&age=34";
        let res = app.clone().oneshot(post_form("/patients", body)?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await?.contains("Patient data saved successfully!"));

        let res = app.oneshot(get("/patients/view?patient_id=P-1001")?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await?;
        assert!(html.contains("<dt>Diagnosis</dt><dd>Malaria</dd>"));
        assert!(html.contains("<dt>Mobile Number</dt><dd>0712345678</dd>"));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_missing_field_warns() -> Result<()> {
        let mm = _dev_utils::init_test().await;
        let app = routes_all(mm.clone(), "web-folder");

        let body = "patient_id=P-1&diagnosis=&healthcare_unit=ENT+-+General+-+MTRH\
                    &mobile_number=0700&gender=Male&age=5";
        let res = app.oneshot(post_form("/patients", body)?).await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await?.contains("All fields must be filled!"));
        assert_eq!(PatientBmc::count(&mm).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_unknown_unit_rejected() -> Result<()> {
        let mm = _dev_utils::init_test().await;
        let app = routes_all(mm.clone(), "web-folder");

        let body = "patient_id=P-1&diagnosis=Flu&healthcare_unit=Pharmacy\
                    &mobile_number=0700&gender=Male&age=5";
        let res = app.oneshot(post_form("/patients", body)?).await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await?.contains("Unknown healthcare service unit"));
        assert_eq!(PatientBmc::count(&mm).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_view_unknown_and_empty() -> Result<()> {
        let mm = _dev_utils::init_test().await;
        let app = routes_all(mm, "web-folder");

        let res = app.clone().oneshot(get("/patients/view?patient_id=ghost")?).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(body_text(res).await?.contains("No record found for the given Patient ID!"));

        let res = app.oneshot(get("/patients/view?patient_id=")?).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await?.contains("Please enter a Patient ID!"));
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_patient_id_asks_for_one() -> Result<()> {
        let mm = _dev_utils::init_test().await;
        let app = routes_all(mm, "web-folder");

        let res = app.clone().oneshot(get("/patients/view?patient_id=+++")?).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await?.contains("Please enter a Patient ID!"));

        let res = app.oneshot(post_form("/patients/delete", "patient_id=%20%09")?).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await?.contains("Please enter a Patient ID!"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_reports_count() -> Result<()> {
        let mm = _dev_utils::init_test().await;
        _dev_utils::seed_patients(&mm).await?;
        let app = routes_all(mm.clone(), "web-folder");

        let res = app.clone().oneshot(post_form("/patients/delete", "patient_id=P-1001")?).await?;
        assert!(body_text(res).await?.contains("Deleted 2 record(s) for patient P-1001"));

        let res = app.oneshot(post_form("/patients/delete", "patient_id=P-1001")?).await?;
        assert!(body_text(res).await?.contains("No record found for the given Patient ID!"));
        assert_eq!(PatientBmc::count(&mm).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_export_download() -> Result<()> {
        let mm = _dev_utils::init_test().await;
        _dev_utils::seed_patients(&mm).await?;
        let app = routes_all(mm, "web-folder");

        let res = app.oneshot(get("/patients/export")?).await?;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()),
            Some("attachment; filename=\"mtrh_data.csv\"")
        );
        let csv = body_text(res).await?;
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Creation Date,Diagnosis Date,Diagnosis,Healthcare Unit,Patient ID,Mobile,Gender,Age")
        );
        assert_eq!(lines.count(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_export_empty_warns() -> Result<()> {
        let mm = _dev_utils::init_test().await;
        let app = routes_all(mm, "web-folder");

        let res = app.oneshot(get("/patients/export")?).await?;

        assert!(res.headers().get(header::CONTENT_DISPOSITION).is_none());
        assert!(body_text(res).await?.contains("No records found to download."));
        Ok(())
    }
}
