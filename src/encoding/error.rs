use parquet::basic::Type as PhysicalType;
use parquet::errors::ParquetError;

use super::ColumnEncoding;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown encoding code `{0}`")]
    UnknownEncodingCode(i32),
    #[error("encoding code `{0}` is deprecated and cannot be written")]
    DeprecatedEncoding(i32),
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),
    #[error("column `{0}` not found in schema")]
    UnknownColumn(String),
    #[error("encoding `{encoding}` does not support column `{column}` of physical type {physical_type}")]
    UnsupportedEncoding {
        column: String,
        encoding: ColumnEncoding,
        physical_type: PhysicalType,
    },
    #[error("schema cannot be represented in parquet :: {0}")]
    Schema(#[source] ParquetError),
}
