use std::io::Write;
use std::path::Path;

use log::{debug, info, trace};
use parquet::arrow::{ArrowWriter, arrow_writer::ArrowWriterOptions};

use super::{Error, WriteReport, WriterConfig};
use crate::{params, stream::Table};

/// Parquet serializer for materialized tables.
///
/// Rows are split into row groups of at most
/// [`WriterConfig::row_group_size`] rows; every column chunk is encoded
/// according to the configured policy and compressed with the configured
/// codec. The footer holds the schema (plus the embedded Arrow schema when
/// `store_schema` is set) and per-column statistics.
pub struct Writer {
    config: WriterConfig,
}

impl Writer {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Writes `table` into `sink`.
    ///
    /// The sink is left in an undefined state on failure.
    pub fn write_to<W>(&self, table: &Table, sink: W) -> Result<WriteReport, Error>
    where
        W: Write + Send,
    {
        let props = self.config.writer_properties();

        trace!("writer properties: {:?}", props);

        let options = ArrowWriterOptions::new()
            .with_properties(props)
            .with_skip_arrow_metadata(!self.config.store_schema());

        let mut writer = ArrowWriter::try_new_with_options(sink, table.schema().clone(), options)
            .map_err(Error::Schema)?;

        for batch in table.batches() {
            writer.write(batch).map_err(Error::from_write)?;
            trace!(
                "buffered {} rows, {} bytes written so far",
                writer.in_progress_rows(),
                writer.bytes_written()
            );
        }

        // close the last row group explicitly to collect its metadata
        writer.flush().map_err(Error::from_write)?;

        let row_groups = writer.flushed_row_groups();
        let num_row_groups = row_groups.len();
        let num_rows = row_groups.iter().map(|rg| rg.num_rows() as usize).sum();

        writer.close().map_err(Error::from_write)?;

        debug!(
            "encoded {} rows in {} row groups with {}",
            num_rows,
            num_row_groups,
            self.config.codec()
        );

        Ok(WriteReport {
            num_rows,
            num_row_groups,
            num_columns: table.num_columns(),
            num_overrides: self.config.policy().len(),
            size_bytes: None,
            path: None,
        })
    }

    /// Writes `table` into a new in-memory buffer.
    pub fn write_to_buffer(&self, table: &Table) -> Result<(Vec<u8>, WriteReport), Error> {
        let mut buffer = Vec::new();
        let mut report = self.write_to(table, &mut buffer)?;
        report.size_bytes = Some(buffer.len() as u64);
        Ok((buffer, report))
    }

    /// Writes `table` to `path`.
    ///
    /// Data goes to a temporary file in the destination directory which is
    /// renamed onto `path` only once the footer is written and synced. On
    /// failure the temporary file is removed and `path` is left untouched.
    ///
    /// New files get the usual permissions for the process umask, while a
    /// replaced file keeps its own. A read-only destination is refused.
    pub fn write_to_path(&self, table: &Table, path: impl AsRef<Path>) -> Result<WriteReport, Error> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let existing = std::fs::metadata(path).ok().filter(|meta| meta.is_file());
        if existing
            .as_ref()
            .is_some_and(|meta| meta.permissions().readonly())
        {
            return Err(Error::ReadOnly(path.to_owned()));
        }

        let suffix = format!(".{}.{}", params::ext::PARQUET, params::ext::TMP);
        let mut builder = tempfile::Builder::new();
        builder.prefix(".pqsink-").suffix(&suffix);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(params::OUTPUT_FILE_MODE));
        }

        let create_error = |source: std::io::Error| Error::Create {
            path: path.to_owned(),
            source,
        };

        let mut tmp = builder.tempfile_in(dir).map_err(create_error)?;
        if let Some(meta) = existing {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(create_error)?;
        }

        debug!(
            "writing `{}` through `{}`",
            path.display(),
            tmp.path().display()
        );

        let mut report = self.write_to(table, tmp.as_file_mut())?;

        let file = tmp.as_file();
        file.sync_all()?;
        report.size_bytes = Some(file.metadata()?.len());

        tmp.persist(path).map_err(|e| Error::Persist {
            path: path.to_owned(),
            source: e.error,
        })?;

        report.path = Some(path.to_owned());

        info!("written {}", report);

        Ok(report)
    }
}
