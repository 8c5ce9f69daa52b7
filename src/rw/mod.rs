//! # Columnar File Writer
//!
//! Serializes a [`Table`](crate::stream::Table) into a Parquet file.
//!
//! [`WriterConfig`] collects every knob of a write (format version, data page
//! layout, codec and level, row group size, statistics, schema embedding and the resolved
//! [`EncodingPolicy`](crate::encoding::EncodingPolicy)); [`Writer`] turns it
//! into Parquet writer properties and drives the `ArrowWriter`.

mod error;
pub use error::*;

mod format;
pub use format::*;

mod config;
pub use config::*;

mod report;
pub use report::*;

mod writer;
pub use writer::*;
