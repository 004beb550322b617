use thiserror::Error;

#[derive(Error, Debug)]
pub enum KudirError {
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cannot parse amount from {0:?}")]
    BadAmount(String),

    #[error("missing required columns: {0}")]
    MissingColumns(String),
}

pub type Result<T> = std::result::Result<T, KudirError>;
