#![deny(clippy::semicolon_if_nothing_returned)]
#![deny(clippy::unnecessary_semicolon)]
#![deny(clippy::explicit_iter_loop)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::unwrap_or_default)]

//! Writes Arrow C streams to Parquet files with configurable compression and
//! per-column encoding.
//!
//! ```text
//! ArrowArrayStream ─▶ stream::StreamHandle::import ─▶ stream::Table
//!                                                        │
//!            encoding::EncodingPolicy::resolve ◀─────────┤
//!                         │                              │
//!                         ▼                              ▼
//!                  rw::WriterConfig ─────────▶ rw::Writer::write_to_path ─▶ file
//! ```

pub mod encoding;
pub mod params;
pub mod rw;
pub mod stream;

mod error;
pub use error::*;

mod sink;
pub use sink::*;
