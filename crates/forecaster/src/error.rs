use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Invalid sale record: {0}")]
    InvalidRecord(#[from] core_types::CoreError),

    #[error("Calculation error: {0}")]
    Calculation(String),
}
