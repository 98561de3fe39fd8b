use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Destination not found: {0}")]
    DestinationNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid row in {table}: {source}")]
    InvalidRow {
        table: &'static str,
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
