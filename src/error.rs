
use mtrh_store::ErrorKind;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Store(mtrh_store::Error),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Error {
    /// Storage failures end the operation; everything else is the operator's to fix.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Store(e) => e.kind() != ErrorKind::StorageUnavailable,
            Error::Io(_) | Error::Json(_) => false,
        }
    }

    pub fn operator_message(&self) -> String {
        match self {
            Error::Store(e) => e.operator_message(),
            Error::Io(e) => format!("I/O failure: {e}"),
            Error::Json(e) => format!("Cannot render record: {e}"),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<mtrh_store::Error> for Error {
    fn from(value: mtrh_store::Error) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl std::error::Error for Error {}
