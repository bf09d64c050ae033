use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("Calendar error: '{0}' is not a recognised date")]
    InvalidDate(String),
    #[error("Calendar error: '{0}' is not a recognised time of day")]
    InvalidTime(String),
    #[error("Calendar error: '{0}' is not a recognised date filter")]
    UnknownFilter(String)
}
