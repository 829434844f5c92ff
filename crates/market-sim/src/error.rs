use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}
