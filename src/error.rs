use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseInvalidSelector(String),
    #[error("Row is missing a required cell. Header: {0}")]
    ParseMissingCell(&'static str),
    #[error("Couldn't parse date {value:?} with format {format}: {source}")]
    ParseDate {
        value: String,
        format: &'static str,
        source: chrono::ParseError,
    },

    #[error("Invalid base url {base}: {source}")]
    UrlBase {
        base: String,
        source: url::ParseError,
    },
    #[error("Couldn't join {href:?} onto {base}: {source}")]
    UrlJoin {
        base: String,
        href: String,
        source: url::ParseError,
    },

    #[error("Request to {url} failed with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
    #[error("Worker pool was closed before all records were resolved.")]
    RuntimePoolClosed,

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<tokio::sync::AcquireError> for Error {
    fn from(_value: tokio::sync::AcquireError) -> Self {
        Error::RuntimePoolClosed
    }
}
