use thiserror::Error;

/// Everything that can go wrong while producing substitution entries.
/// None of these are retried, the current request just fails.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Login failed: portal answered with status {status} at {url}")]
    AuthenticationFailed { status: u16, url: String },
    #[error("Plan tile matching '{label}' not found")]
    TileNotFound { label: String },
    #[error("Plan document could not be fetched, status {status}")]
    PlanFetchFailed { status: u16 },
    #[error("Plan row {row} has {cells} cells, expected {expected}")]
    MalformedRow {
        row: usize,
        cells: usize,
        expected: usize,
    },
    #[error("Plan document has no date in its title")]
    MissingPlanDate,
    #[error("DSB fetch failed: {0}")]
    UpstreamFailure(String),
    #[error("Request to the timetable portal failed: {0}")]
    Http(reqwest::Error),
    #[error("{0}")]
    Unexpected(String),
}

/// Request URLs carry the login credentials in their query, so they never
/// make it into the error.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.without_url())
    }
}
