//! Format-level definitions: compression codecs, Parquet format versions,
//! data page layouts and statistics levels, each mapped onto the
//! corresponding `parquet` setting.

use std::ops::RangeInclusive;

use parquet::{
    basic::{BrotliLevel, Compression, GzipLevel, ZstdLevel},
    file::properties::{EnabledStatistics, WriterVersion},
};
use serde::{Deserialize, Serialize};

use super::ConfigError;

// ============================================================================
// Codec
// ============================================================================

/// Compression codec applied to every page of every column chunk.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Codec {
    Uncompressed,
    Snappy,
    Gzip,
    Lz4,
    /// High-ratio general purpose compressor, the default.
    Zstd,
    Brotli,
}

impl Codec {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uncompressed => "uncompressed",
            Self::Snappy => "snappy",
            Self::Gzip => "gzip",
            Self::Lz4 => "lz4",
            Self::Zstd => "zstd",
            Self::Brotli => "brotli",
        }
    }

    /// Accepted compression levels, `None` for codecs without levels.
    pub fn level_range(&self) -> Option<RangeInclusive<i32>> {
        match self {
            Self::Gzip => Some(0..=10),
            Self::Zstd => Some(1..=22),
            Self::Brotli => Some(0..=11),
            Self::Uncompressed | Self::Snappy | Self::Lz4 => None,
        }
    }

    /// Builds the parquet compression setting, validating `level`.
    ///
    /// With `level == None` the codec's own default level is used.
    pub fn compression(&self, level: Option<i32>) -> Result<Compression, ConfigError> {
        let invalid = |level: i32| ConfigError::InvalidCompressionLevel {
            codec: self.name().to_owned(),
            level,
        };

        if let Some(level) = level {
            match self.level_range() {
                Some(range) if range.contains(&level) => {}
                _ => return Err(invalid(level)),
            }
        }

        let compression = match (self, level) {
            (Self::Uncompressed, _) => Compression::UNCOMPRESSED,
            (Self::Snappy, _) => Compression::SNAPPY,
            (Self::Lz4, _) => Compression::LZ4_RAW,
            (Self::Gzip, None) => Compression::GZIP(GzipLevel::default()),
            (Self::Gzip, Some(l)) => {
                Compression::GZIP(GzipLevel::try_new(l as u32).map_err(|_| invalid(l))?)
            }
            (Self::Zstd, None) => Compression::ZSTD(ZstdLevel::default()),
            (Self::Zstd, Some(l)) => {
                Compression::ZSTD(ZstdLevel::try_new(l).map_err(|_| invalid(l))?)
            }
            (Self::Brotli, None) => Compression::BROTLI(BrotliLevel::default()),
            (Self::Brotli, Some(l)) => {
                Compression::BROTLI(BrotliLevel::try_new(l as u32).map_err(|_| invalid(l))?)
            }
        };

        Ok(compression)
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Codec {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "uncompressed" | "none" => Ok(Self::Uncompressed),
            "snappy" => Ok(Self::Snappy),
            "gzip" => Ok(Self::Gzip),
            "lz4" => Ok(Self::Lz4),
            "zstd" => Ok(Self::Zstd),
            "brotli" => Ok(Self::Brotli),
            _ => Err(ConfigError::UnknownCodec(value.to_owned())),
        }
    }
}

// ============================================================================
// FormatVersion
// ============================================================================

/// Parquet format revision targeted by the writer.
///
/// The parquet crate writes the extended logical types for both revisions.
/// `V1_0` only restricts the data page layout to [`DataPageVersion::V1`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Default)]
pub enum FormatVersion {
    #[serde(rename = "1.0")]
    V1_0,
    #[default]
    #[serde(rename = "2.6")]
    V2_6,
}

impl FormatVersion {
    pub fn supports(&self, pages: DataPageVersion) -> bool {
        !matches!((self, pages), (Self::V1_0, DataPageVersion::V2))
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1_0 => write!(f, "1.0"),
            Self::V2_6 => write!(f, "2.6"),
        }
    }
}

impl std::str::FromStr for FormatVersion {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "1.0" => Ok(Self::V1_0),
            "2.6" | "2.0" | "2" => Ok(Self::V2_6),
            _ => Err(ConfigError::UnknownVersion(value.to_owned())),
        }
    }
}

// ============================================================================
// DataPageVersion
// ============================================================================

/// Layout of data pages.
///
/// `V1` pages fall back to `PLAIN` when a dictionary outgrows its page limit.
/// `V2` pages use the delta encodings as fallback, which older readers may
/// not decode.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataPageVersion {
    #[default]
    V1,
    V2,
}

impl DataPageVersion {
    pub fn writer_version(&self) -> WriterVersion {
        match self {
            Self::V1 => WriterVersion::PARQUET_1_0,
            Self::V2 => WriterVersion::PARQUET_2_0,
        }
    }
}

impl std::fmt::Display for DataPageVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

impl std::str::FromStr for DataPageVersion {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            _ => Err(ConfigError::UnknownDataPageVersion(value.to_owned())),
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Granularity of min/max/null-count statistics written to the footer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum Statistics {
    None,
    /// Column chunk level only.
    Chunk,
    /// Column chunk and page level.
    #[default]
    Page,
}

impl From<Statistics> for EnabledStatistics {
    fn from(value: Statistics) -> Self {
        match value {
            Statistics::None => EnabledStatistics::None,
            Statistics::Chunk => EnabledStatistics::Chunk,
            Statistics::Page => EnabledStatistics::Page,
        }
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Chunk => "chunk",
            Self::Page => "page",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Statistics {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::None),
            "chunk" => Ok(Self::Chunk),
            "page" => Ok(Self::Page),
            _ => Err(ConfigError::UnknownStatistics(value.to_owned())),
        }
    }
}
