use parquet::basic::{Compression, Encoding};
use parquet::file::properties::WriterProperties;

use super::{Codec, ConfigError, DataPageVersion, FormatVersion, Statistics};
use crate::{encoding::EncodingPolicy, params};

/// Immutable description of a single write.
///
/// Built through [`WriterConfig::builder`], which validates every setting.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    version: FormatVersion,
    data_page_version: DataPageVersion,
    codec: Codec,
    compression: Compression,
    row_group_size: usize,
    statistics: Statistics,
    store_schema: bool,
    policy: EncodingPolicy,
}

impl WriterConfig {
    /// Returns a builder seeded with [`params::configurables`].
    pub fn builder() -> WriterConfigBuilder {
        WriterConfigBuilder::from_configurables(params::configurables())
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn data_page_version(&self) -> DataPageVersion {
        self.data_page_version
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn store_schema(&self) -> bool {
        self.store_schema
    }

    pub fn policy(&self) -> &EncodingPolicy {
        &self.policy
    }

    /// Parquet writer properties for this configuration.
    ///
    /// Dictionary columns fall back to `PLAIN` whatever the page layout;
    /// explicit overrides of the policy take precedence.
    pub fn writer_properties(&self) -> WriterProperties {
        let builder = WriterProperties::builder()
            .set_writer_version(self.data_page_version.writer_version())
            .set_encoding(Encoding::PLAIN)
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .set_statistics_enabled(self.statistics.into())
            .set_created_by(params::CREATED_BY.to_owned());

        self.policy.apply(builder).build()
    }
}

#[derive(Debug, Clone)]
pub struct WriterConfigBuilder {
    version: FormatVersion,
    data_page_version: DataPageVersion,
    codec: Codec,
    compression_level: Option<i32>,
    row_group_size: usize,
    statistics: Statistics,
    store_schema: bool,
    policy: EncodingPolicy,
}

impl Default for WriterConfigBuilder {
    fn default() -> Self {
        Self::from_configurables(&params::Configurables::default())
    }
}

impl WriterConfigBuilder {
    pub fn from_configurables(conf: &params::Configurables) -> Self {
        Self {
            version: FormatVersion::default(),
            data_page_version: conf.data_page_version,
            codec: conf.codec,
            compression_level: conf.compression_level,
            row_group_size: conf.row_group_size,
            statistics: conf.statistics,
            store_schema: conf.store_schema,
            policy: EncodingPolicy::dictionary(),
        }
    }

    pub fn version(mut self, version: FormatVersion) -> Self {
        self.version = version;
        self
    }

    pub fn data_page_version(mut self, pages: DataPageVersion) -> Self {
        self.data_page_version = pages;
        self
    }

    /// Sets the codec and resets the level to the codec's default.
    pub fn codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self.compression_level = None;
        self
    }

    pub fn compression_level(mut self, level: i32) -> Self {
        self.compression_level = Some(level);
        self
    }

    pub fn row_group_size(mut self, rows: usize) -> Self {
        self.row_group_size = rows;
        self
    }

    pub fn statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn store_schema(mut self, enabled: bool) -> Self {
        self.store_schema = enabled;
        self
    }

    pub fn policy(mut self, policy: EncodingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<WriterConfig, ConfigError> {
        if self.row_group_size == 0 {
            return Err(ConfigError::EmptyRowGroup);
        }

        if !self.version.supports(self.data_page_version) {
            return Err(ConfigError::UnsupportedDataPage {
                version: self.version,
                pages: self.data_page_version,
            });
        }

        let compression = self.codec.compression(self.compression_level)?;

        Ok(WriterConfig {
            version: self.version,
            data_page_version: self.data_page_version,
            codec: self.codec,
            compression,
            row_group_size: self.row_group_size,
            statistics: self.statistics,
            store_schema: self.store_schema,
            policy: self.policy,
        })
    }
}
