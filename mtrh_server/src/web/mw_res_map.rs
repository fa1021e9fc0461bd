
use std::sync::Arc;

use crate::web;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

pub async fn mw_response_map(
    uri: Uri,
    req_method: Method,
    res: Response,
) -> Response {
    debug!("{:<12} - mw_response_map", "RES_MAPPER");

    let uuid = Uuid::new_v4();
    let web_error = res.extensions().get::<Arc<web::Error>>().map(Arc::as_ref);
    let client_status_error = web_error.map(|se| (se.client_status_and_error(), se.client_message()));

    let error_response =
        client_status_error
        .as_ref()
        .map(|((status_code, client_error), message)| {
            let client_error_body = json!({
                "error": {
                    "type": client_error.as_ref(),
                    "message": message,
                    "req_uuid": uuid.to_string(),
                }
            });
            debug!("CLIENT ERROR BODY:\n{client_error_body}");
            (*status_code, Json(client_error_body)).into_response()
        });

    let status = error_response.as_ref().map_or(res.status(), |r| r.status());
    match web_error {
        Some(err) => info!("{:<12} - {req_method} {uri} - {status} - {uuid} - {err:?}", "REQUEST"),
        None => info!("{:<12} - {req_method} {uri} - {status}", "REQUEST"),
    }

    error_response.unwrap_or(res)
}
