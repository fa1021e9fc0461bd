
mod error;
mod mw_res_map;
mod pages;
pub mod rest;
pub mod routes_patients;
pub mod routes_static;

pub use self::error::{Error, Result};

use axum::{middleware, Router};
use mtrh_store::ModelManager;

use mw_res_map::mw_response_map;

pub fn routes_all(mm: ModelManager, web_folder: &str) -> Router {
    Router::new()
        .merge(routes_patients::routes(mm.clone()))
        .merge(rest::routes(mm))
        .layer(middleware::map_response(mw_response_map))
        .fallback_service(routes_static::serve_dir(web_folder))
}
