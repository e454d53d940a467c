use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A record failed validation: the record kind, then what was wrong.
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}
