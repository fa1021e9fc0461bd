
use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode
};
use mtrh_store::ErrorKind;
use serde::Serialize;
use tracing::debug;

use crate::web;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Serialize, strum_macros::AsRefStr)]
#[serde(tag = "type", content = "data")]
pub enum Error {
    MissingPatientId,
    BodyRejected { status: u16, reason: String },

    Model(mtrh_store::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        debug!("{:<12} - web::Error {self:?}", "INTO_RES");

        // Placeholder; mw_response_map turns the extension into the client body.
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {}

impl From<mtrh_store::Error> for Error {
    fn from(value: mtrh_store::Error) -> Self {
        Self::Model(value)
    }
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Self::BodyRejected {
            status: value.status().as_u16(),
            reason: value.body_text(),
        }
    }
}

impl Error {
    pub fn client_status_and_error(&self) -> (StatusCode, ClientError) {
        use web::Error::*;

        match self {
            MissingPatientId => (StatusCode::BAD_REQUEST, ClientError::INVALID_PARAMS),
            BodyRejected { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST),
                ClientError::INVALID_PARAMS,
            ),
            Model(model_err) => match model_err.kind() {
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, ClientError::INVALID_PARAMS),
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, ClientError::ENTITY_NOT_FOUND),
                ErrorKind::StorageUnavailable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ClientError::SERVICE_ERROR,
                ),
            },
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            Error::MissingPatientId => "Please enter a Patient ID!".to_string(),
            Error::BodyRejected { reason, .. } => reason.clone(),
            Error::Model(model_err) => model_err.operator_message(),
        }
    }
}

#[derive(Debug, Clone, strum_macros::AsRefStr)]
#[allow(non_camel_case_types)]
pub enum ClientError {
    INVALID_PARAMS,
    ENTITY_NOT_FOUND,
    SERVICE_ERROR
}
