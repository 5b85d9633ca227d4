use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A confirm-link attempt hit a row that already holds a link, on either
    /// side. The caller recovers by re-listing candidates.
    AlreadyLinked(String),
    /// An operation referenced an id that does not exist.
    NotFound { entidad: &'static str, id: String },
    /// Deleting a record that other records still reference.
    ReferentialConflict(String),
    /// Malformed input, rejected before any store access.
    Validation(String),
    /// Underlying storage failure.
    Storage(String),
}

impl Error {
    pub fn not_found(entidad: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { entidad, id: id.into() }
    }

    pub fn storage(e: impl fmt::Display) -> Self {
        Self::Storage(e.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyLinked(msg) => write!(f, "already linked: {msg}"),
            Self::NotFound { entidad, id } => write!(f, "{entidad} '{id}' not found"),
            Self::ReferentialConflict(msg) => write!(f, "referential conflict: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::Storage(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
