use thiserror::Error;

/// Result type for mesh import and export
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing mesh files
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Face {face} has {count} vertices, at least 3 are required")]
    TooFewVertices { face: usize, count: usize },

    #[error("Face {face} refers to vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
