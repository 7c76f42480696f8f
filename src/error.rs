use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the aka toolkit
#[derive(Error, Debug)]
pub enum AkaError {
    #[error("no such alias: {category}/{name}")]
    Lookup { category: String, name: String },

    #[error("failed to generate '{}': {source}", path.display())]
    Generation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown control argument: {0}")]
    UnknownControlFlag(String),

    #[error("missing required argument ${index}")]
    MissingArgument { index: usize },

    #[error("command failed with exit code {code}")]
    Execution { code: i32 },

    #[error("failed to run command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("unexpected branch prefix symbol: '{0}'")]
    UnrecognizedMarker(char),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for the aka toolkit
pub type Result<T> = std::result::Result<T, AkaError>;

impl AkaError {
    /// Create a lookup error
    pub fn lookup<S: Into<String>>(category: S, name: S) -> Self {
        AkaError::Lookup {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Create a generation error for a given path
    pub fn generation(path: &std::path::Path, source: io::Error) -> Self {
        AkaError::Generation {
            path: path.to_path_buf(),
            source,
        }
    }
}
