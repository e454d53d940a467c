use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] core_types::CoreError),
}
