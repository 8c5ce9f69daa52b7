use std::path::PathBuf;

use parquet::errors::ParquetError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unable to create temporary file for `{path}` :: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to persist `{path}` :: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("`{0}` is read-only")]
    ReadOnly(PathBuf),
    #[error("io error :: {0}")]
    Io(#[from] std::io::Error),
    #[error("schema cannot be represented in parquet :: {0}")]
    Schema(#[source] ParquetError),
    #[error("data serialization error :: {0}")]
    Encoding(#[source] ParquetError),
}

impl Error {
    /// Classifies a failure raised by the parquet writer while writing or
    /// closing, separating I/O failures of the sink from encoding failures.
    pub(super) fn from_write(err: ParquetError) -> Self {
        if let ParquetError::External(inner) = &err {
            if let Some(io) = inner.downcast_ref::<std::io::Error>() {
                return Self::Io(std::io::Error::new(io.kind(), io.to_string()));
            }
        }
        Self::Encoding(err)
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Create { .. } | Self::Persist { .. } | Self::ReadOnly(_) | Self::Io(_))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unknown codec `{0}`")]
    UnknownCodec(String),
    #[error("unknown format version `{0}`")]
    UnknownVersion(String),
    #[error("unknown statistics level `{0}`")]
    UnknownStatistics(String),
    #[error("unknown data page version `{0}`")]
    UnknownDataPageVersion(String),
    #[error("parquet {version} does not support data page {pages}")]
    UnsupportedDataPage {
        version: super::FormatVersion,
        pages: super::DataPageVersion,
    },
    #[error("codec `{codec}` does not accept compression level {level}")]
    InvalidCompressionLevel { codec: String, level: i32 },
    #[error("row group size must be positive")]
    EmptyRowGroup,
}
