use arrow_schema::ArrowError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("null stream handle")]
    NullHandle,
    #[error("stream already released or consumed")]
    Released,
    #[error("malformed stream schema :: {0}")]
    Schema(#[source] ArrowError),
    #[error("unable to read batch {index} :: {source}")]
    Batch { index: usize, source: ArrowError },
    #[error("batch {index} does not match the stream schema (expected {expected}, found {found})")]
    SchemaMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("unable to concatenate batches :: {0}")]
    Concat(#[source] ArrowError),
}
