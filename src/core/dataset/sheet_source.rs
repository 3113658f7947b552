use async_trait::async_trait;

/// Everything that can go wrong while fetching the sheet.
/// The command layer turns these into user-visible replies; none of them
/// terminate the process.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("the sheet provider rejected our credentials: {0}")]
    Unauthorized(String),
    #[error("sheet not found: {0}")]
    NotFound(String),
    #[error("the sheet returned no data")]
    EmptySheet,
    #[error("the sheet header row is unusable: {0}")]
    MalformedHeader(String),
    #[error("network error talking to the sheet provider: {0}")]
    Network(String),
    #[error("sheet provider error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Port for the external sheet provider.
///
/// The core defines WHAT it needs (a raw value grid, first row = headers)
/// but not HOW it is fetched; the infra layer supplies the Google Sheets
/// implementation, and tests supply stubs.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_values(&self) -> Result<Vec<Vec<String>>, FetchError>;
}
