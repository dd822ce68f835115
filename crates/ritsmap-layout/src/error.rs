#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid gear: {message}")]
    InvalidGear { message: String },
    #[error("invalid spacing table: {message}")]
    InvalidSpacingTable { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
