
mod error;
mod store;
pub mod choices;
pub mod export;
pub mod patient;

pub mod _dev_utils;

pub use self::error::{Error, ErrorKind, Result};
use store::{new_db_pool, Db};
use tracing::debug;

/// Owned handle on the patient table. Cheap to clone; every clone shares
/// the same single-connection pool, so operations are serialized.
#[derive(Clone)]
pub struct ModelManager {
    db: Db,
}

impl ModelManager {
    pub async fn new(db_url: &str) -> Result<Self> {
        debug!("{:<12} - ModelManager::new - {db_url}", "MODEL");
        let db = new_db_pool(db_url).await?;
        Ok(ModelManager {
            db
        })
    }

    pub(crate) fn db(&self) -> &Db {
        &self.db
    }

    pub async fn close(&self) {
        self.db.close().await
    }
}
