//! # Stream Importer
//!
//! Adapts an Arrow C stream (`ArrowArrayStream`) into a fully materialized
//! [`Table`]. The caller keeps ownership of the stream struct, the importer
//! only borrows it through a [`StreamHandle`] for the duration of the import.

mod error;
pub use error::*;

mod handle;
pub use handle::*;

mod table;
pub use table::*;
