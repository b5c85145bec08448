use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("roster fetch failed: {0}")]
    RosterFetch(String),
    #[error("malformed record: {0}")]
    RecordValidation(String),
    #[error("generation error: {0}")]
    Generation(String),
    #[error("delivery error: {0}")]
    Delivery(String),
}
