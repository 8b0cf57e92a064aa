use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("price history is empty")]
    EmptyHistory,

    #[error("forecast horizon must be at least one day (got {got})")]
    InvalidForecastDays { got: u32 },
}
