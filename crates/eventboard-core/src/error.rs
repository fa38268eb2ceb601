use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("A board named '{0}' already exists")]
    DuplicateTitle(String),

    #[error("A column named '{0}' already exists")]
    DuplicateColumn(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Malformed stored data: {0}")]
    MalformedData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BoardError {
    /// Errors the caller should show to the user. Everything else is absorbed
    /// where it happens and never interrupts the session.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTitle(_) | Self::DuplicateColumn(_) | Self::Validation(_)
        )
    }
}
