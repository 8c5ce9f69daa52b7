use std::path::Path;

use log::info;

use crate::{
    Error,
    encoding::{EncodingPolicy, EncodingSelector},
    rw::{WriteReport, Writer, WriterConfig, WriterConfigBuilder},
    stream::{StreamHandle, Table},
};

/// Imports `stream` and writes it to `path` with the default configuration.
///
/// `encoding` is a Parquet encoding code: `2` and `8` keep dictionary
/// encoding on every column, any other supported code is applied to each
/// column listed in `columns` with the dictionary disabled.
///
/// The code is validated before the stream is touched.
pub fn write_parquet<I, S>(
    stream: StreamHandle<'_>,
    path: impl AsRef<Path>,
    columns: I,
    encoding: i32,
) -> Result<WriteReport, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let selector = EncodingSelector::try_from(encoding)?;
    write_parquet_with(stream, path, columns, selector, WriterConfig::builder())
}

/// Imports `stream` and writes it to `path` using `config` as the base
/// configuration.
pub fn write_parquet_with<I, S>(
    stream: StreamHandle<'_>,
    path: impl AsRef<Path>,
    columns: I,
    selector: EncodingSelector,
    config: WriterConfigBuilder,
) -> Result<WriteReport, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let table = stream.import()?;
    write_table(&table, path, columns, selector, config)
}

/// Resolves the encoding policy for `table` and writes it to `path`.
pub fn write_table<I, S>(
    table: &Table,
    path: impl AsRef<Path>,
    columns: I,
    selector: EncodingSelector,
    config: WriterConfigBuilder,
) -> Result<WriteReport, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let policy = EncodingPolicy::resolve(table.schema(), selector, columns)?;
    let config = config.policy(policy).build()?;

    info!(
        "writing {} rows to `{}` (parquet {}, pages {}, {}, {} overrides with {})",
        table.num_rows(),
        path.as_ref().display(),
        config.version(),
        config.data_page_version(),
        config.codec(),
        config.policy().len(),
        selector
    );

    Ok(Writer::new(config).write_to_path(table, path)?)
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, RecordBatch, RecordBatchIterator, StringArray};
    use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
    use arrow::ffi_stream::FFI_ArrowArrayStream;
    use parquet::basic::{Compression, Encoding};
    use parquet::file::reader::{FileReader, SerializedFileReader};

    use super::*;
    use crate::{ErrorKind, Stage, encoding::ColumnEncoding, rw::Codec};

    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("country", DataType::Utf8, false),
            Field::new("economy", DataType::Utf8, false),
            Field::new("region", DataType::Utf8, false),
        ]))
    }

    fn countries() -> RecordBatch {
        RecordBatch::try_new(
            schema(),
            vec![
                Arc::new(StringArray::from(vec!["Chile", "Kenya", "Norway"])) as ArrayRef,
                Arc::new(StringArray::from(vec![
                    "Emerging",
                    "Developing",
                    "Advanced",
                ])),
                Arc::new(StringArray::from(vec!["Americas", "Africa", "Europe"])),
            ],
        )
        .unwrap()
    }

    fn export(batches: Vec<RecordBatch>) -> FFI_ArrowArrayStream {
        let reader = RecordBatchIterator::new(batches.into_iter().map(Ok), schema());
        FFI_ArrowArrayStream::new(Box::new(reader))
    }

    /// Returns `(column, encodings, has_dictionary_page)` for the first row group.
    fn chunk_encodings(path: &Path) -> Vec<(String, Vec<Encoding>, bool)> {
        let reader = SerializedFileReader::new(File::open(path).unwrap()).unwrap();
        reader
            .metadata()
            .row_group(0)
            .columns()
            .iter()
            .map(|c| {
                (
                    c.column_path().string(),
                    c.encodings().clone(),
                    c.dictionary_page_offset().is_some(),
                )
            })
            .collect()
    }

    #[test]
    fn plain_economy_keeps_dictionary_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.parquet");
        let mut stream = export(vec![countries()]);

        let report = write_parquet(
            StreamHandle::new(&mut stream),
            &path,
            ["economy"],
            ColumnEncoding::Plain.code(),
        )
        .unwrap();

        assert_eq!(report.num_rows, 3);
        assert_eq!(report.num_overrides, 1);

        for (column, encodings, dictionary) in chunk_encodings(&path) {
            if column == "economy" {
                assert!(encodings.contains(&Encoding::PLAIN));
                assert!(!encodings.contains(&Encoding::RLE_DICTIONARY));
                assert!(!dictionary);
            } else {
                assert!(encodings.contains(&Encoding::RLE_DICTIONARY), "{column}");
                assert!(dictionary, "{column}");
            }
        }
    }

    #[test]
    fn sentinel_codes_keep_dictionary_everywhere() {
        for code in [
            EncodingSelector::PLAIN_DICTIONARY_CODE,
            EncodingSelector::RLE_DICTIONARY_CODE,
        ] {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("dict.parquet");
            let mut stream = export(vec![countries()]);

            let report =
                write_parquet(StreamHandle::new(&mut stream), &path, ["economy"], code).unwrap();
            assert_eq!(report.num_overrides, 0);

            for (column, _, dictionary) in chunk_encodings(&path) {
                assert!(dictionary, "{column} with code {code}");
            }
        }
    }

    #[test]
    fn delta_byte_array_on_several_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delta.parquet");
        let mut stream = export(vec![countries(), countries()]);

        let report = write_parquet(
            StreamHandle::new(&mut stream),
            &path,
            vec!["country".to_owned(), "region".to_owned()],
            7,
        )
        .unwrap();
        assert_eq!(report.num_rows, 6);

        for (column, encodings, dictionary) in chunk_encodings(&path) {
            let delta = encodings.contains(&Encoding::DELTA_BYTE_ARRAY);
            assert_eq!(delta, column != "economy", "{column}");
            assert_eq!(dictionary, column == "economy", "{column}");
        }
    }

    #[test]
    fn empty_stream_writes_zero_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");
        let mut stream = export(Vec::new());

        let report = write_parquet(StreamHandle::new(&mut stream), &path, ["economy"], 0).unwrap();

        assert_eq!(report.num_rows, 0);
        let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(reader.metadata().file_metadata().num_rows(), 0);
        assert_eq!(
            reader.metadata().file_metadata().schema_descr().num_columns(),
            3
        );
    }

    #[test]
    fn invalid_code_fails_before_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.parquet");
        let mut stream = export(vec![countries()]);

        let err = write_parquet(StreamHandle::new(&mut stream), &path, ["economy"], 4).unwrap_err();

        assert_eq!(err.stage(), Stage::Configure);
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!StreamHandle::new(&mut stream).is_released());
        assert!(!path.exists());
    }

    #[test]
    fn unknown_column_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.parquet");
        let mut stream = export(vec![countries()]);

        let err = write_parquet(StreamHandle::new(&mut stream), &path, ["gdp"], 0).unwrap_err();

        assert_eq!(err.stage(), Stage::Configure);
        assert!(matches!(
            err,
            Error::Policy(crate::encoding::Error::UnknownColumn(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn released_stream_is_an_import_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.parquet");
        let mut stream = FFI_ArrowArrayStream::empty();

        let err = write_parquet(StreamHandle::new(&mut stream), &path, ["economy"], 8).unwrap_err();

        assert_eq!(err.stage(), Stage::Import);
        assert_eq!(err.kind(), ErrorKind::Import);
    }

    #[test]
    fn unwritable_target_reports_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.parquet");
        let mut stream = export(vec![countries()]);

        let err = write_parquet(StreamHandle::new(&mut stream), &path, ["economy"], 0).unwrap_err();

        assert_eq!(err.stage(), Stage::Write);
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!path.exists());
        // the stream has been consumed by the import stage
        assert!(StreamHandle::new(&mut stream).is_released());
    }

    #[test]
    fn read_only_target_reports_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.parquet");
        std::fs::write(&path, b"previous").unwrap();
        let mut permissions = std::fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        std::fs::set_permissions(&path, permissions).unwrap();
        let mut stream = export(vec![countries()]);

        let err = write_parquet(StreamHandle::new(&mut stream), &path, ["economy"], 0).unwrap_err();

        assert_eq!(err.stage(), Stage::Write);
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(std::fs::read(&path).unwrap(), b"previous");
    }

    #[test]
    fn custom_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.parquet");
        let mut stream = export(vec![countries()]);

        write_parquet_with(
            StreamHandle::new(&mut stream),
            &path,
            ["economy"],
            EncodingSelector::Explicit(ColumnEncoding::DeltaLengthByteArray),
            WriterConfigBuilder::default()
                .codec(Codec::Gzip)
                .compression_level(9),
        )
        .unwrap();

        let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
        let economy = reader.metadata().row_group(0).column(1);
        assert!(matches!(economy.compression(), Compression::GZIP(_)));
        assert!(
            economy
                .encodings()
                .contains(&Encoding::DELTA_LENGTH_BYTE_ARRAY)
        );
    }
}
