//! Crate-wide parameters.
//!
//! Constants used across modules live here, together with the
//! [`Configurables`], the subset of parameters that can be tuned at runtime
//! through environment variables (or a `.env` file).
use std::sync::OnceLock;

use log::{debug, warn};

use crate::rw::{Codec, DataPageVersion, Statistics};

pub mod ext {
    pub const PARQUET: &str = "parquet";
    pub const TMP: &str = "tmp";
}

/// Value written in the `created_by` field of the file footer.
pub const CREATED_BY: &str = concat!("pqsink version ", env!("CARGO_PKG_VERSION"));

/// Maximum number of rows per row group (1 MiB of rows).
pub const DEFAULT_ROW_GROUP_SIZE: usize = 1024 * 1024;

/// ZSTD level used when nothing else is requested.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 10;

pub const ENV_CODEC: &str = "PQSINK_CODEC";
pub const ENV_COMPRESSION_LEVEL: &str = "PQSINK_COMPRESSION_LEVEL";
pub const ENV_ROW_GROUP_SIZE: &str = "PQSINK_ROW_GROUP_SIZE";
pub const ENV_STATISTICS: &str = "PQSINK_STATISTICS";
pub const ENV_STORE_SCHEMA: &str = "PQSINK_STORE_SCHEMA";
pub const ENV_DATA_PAGE_VERSION: &str = "PQSINK_DATA_PAGE_VERSION";

/// Mode requested for new output files, narrowed by the process umask.
pub const OUTPUT_FILE_MODE: u32 = 0o666;

#[derive(Debug, Clone, PartialEq)]
pub struct Configurables {
    pub codec: Codec,
    /// Compression level, `None` lets the codec pick its own default.
    pub compression_level: Option<i32>,
    pub row_group_size: usize,
    pub statistics: Statistics,
    /// Embed the Arrow schema in the footer for lossless round-trips.
    pub store_schema: bool,
    pub data_page_version: DataPageVersion,
}

impl Default for Configurables {
    fn default() -> Self {
        Self {
            codec: Codec::Zstd,
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            statistics: Statistics::Page,
            store_schema: true,
            data_page_version: DataPageVersion::V1,
        }
    }
}

impl Configurables {
    /// Builds configurables from process environment variables.
    pub fn from_env() -> Self {
        // a missing .env file is not an error
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configurables using `lookup` to resolve variable names.
    ///
    /// Values that cannot be parsed are reported and replaced with defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut conf = Self::default();

        if let Some(codec) = parse_var(&lookup, ENV_CODEC) {
            conf.codec = codec;
            // the default level is tied to zstd
            if codec != Codec::Zstd {
                conf.compression_level = None;
            }
        }
        if let Some(level) = parse_var(&lookup, ENV_COMPRESSION_LEVEL) {
            conf.compression_level = Some(level);
        }
        if let Some(size) = parse_var::<usize, _>(&lookup, ENV_ROW_GROUP_SIZE) {
            if size == 0 {
                warn!("ignoring `{}`: row group size must be positive", ENV_ROW_GROUP_SIZE);
            } else {
                conf.row_group_size = size;
            }
        }
        if let Some(statistics) = parse_var(&lookup, ENV_STATISTICS) {
            conf.statistics = statistics;
        }
        if let Some(store_schema) = parse_var(&lookup, ENV_STORE_SCHEMA) {
            conf.store_schema = store_schema;
        }
        if let Some(pages) = parse_var(&lookup, ENV_DATA_PAGE_VERSION) {
            conf.data_page_version = pages;
        }

        debug!("configurables: {:?}", conf);

        conf
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("ignoring `{}={}`: {}", key, raw, e);
            None
        }
    }
}

/// Returns the process-wide configurables, loading them on first access.
pub fn configurables() -> &'static Configurables {
    static CONFIGURABLES: OnceLock<Configurables> = OnceLock::new();
    CONFIGURABLES.get_or_init(Configurables::from_env)
}
