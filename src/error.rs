use crate::gazetteer::error::GazetteerError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AfrigridError {
    #[error(transparent)]
    Gazetteer(#[from] GazetteerError),

    #[error("Fetch period ends ({end}) before it starts ({start})")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}
