use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A line from the server could not be parsed.
    #[error("malformed irc line: {line:?}")]
    Parse { line: String },

    /// The connection writer has shut down.
    #[error("irc connection closed")]
    Closed,
}

impl Error {
    #[must_use]
    pub fn parse(line: impl Into<String>) -> Self {
        Self::Parse { line: line.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
