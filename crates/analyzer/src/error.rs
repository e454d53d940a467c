use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] core_types::CoreError),
}
