use crate::{encoding, rw, stream};

/// Pipeline stage at which a write failed.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Stage {
    Import,
    Configure,
    Write,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Import => "import",
            Self::Configure => "configure",
            Self::Write => "write",
        };
        write!(f, "{}", name)
    }
}

/// Coarse classification of failures.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    /// Malformed or invalid input stream.
    Import,
    /// Invalid writer configuration or encoding request.
    Config,
    /// File system failure opening, writing or persisting the target.
    Io,
    /// A value could not be serialized with the chosen encoding.
    Encoding,
    /// The schema cannot be represented in parquet.
    Schema,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("import error :: {0}")]
    Import(#[from] stream::Error),
    #[error("encoding policy error :: {0}")]
    Policy(#[from] encoding::Error),
    #[error("configuration error :: {0}")]
    Config(#[from] rw::ConfigError),
    #[error("write error :: {0}")]
    Write(#[from] rw::Error),
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Import(_) => Stage::Import,
            Self::Policy(_) | Self::Config(_) => Stage::Configure,
            Self::Write(_) => Stage::Write,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Import(_) => ErrorKind::Import,
            Self::Policy(encoding::Error::Schema(_)) => ErrorKind::Schema,
            Self::Policy(_) | Self::Config(_) => ErrorKind::Config,
            Self::Write(rw::Error::Schema(_)) => ErrorKind::Schema,
            Self::Write(rw::Error::Encoding(_)) => ErrorKind::Encoding,
            Self::Write(_) => ErrorKind::Io,
        }
    }
}
