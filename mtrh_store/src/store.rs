
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::{Error, Result};

pub type Db = Pool<Sqlite>;

const CREATE_PATIENTS: &str = "
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    creation_date TEXT,
    diagnosis_date TEXT,
    diagnosis TEXT,
    healthcare_service_unit TEXT,
    patient_id TEXT,
    mobile_number TEXT,
    gender TEXT,
    age INTEGER
)";

pub async fn new_db_pool(db_url: &str) -> Result<Db> {
    let open_err = |cause: sqlx::Error| Error::StoreOpen {
        url: db_url.to_string(),
        cause: cause.to_string(),
    };

    let options = SqliteConnectOptions::from_str(db_url)
        .map_err(open_err)?
        .create_if_missing(true);

    // One connection: writes never interleave, and an in-memory database
    // lives exactly as long as the pool.
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(open_err)?;

    sqlx::query(CREATE_PATIENTS)
        .execute(&db)
        .await
        .map_err(open_err)?;

    Ok(db)
}
