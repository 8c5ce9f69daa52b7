use arrow::array::{RecordBatch, RecordBatchReader};
use arrow::compute::concat_batches;
use arrow::datatypes::{Fields, SchemaRef};
use log::trace;

use super::Error;

/// In-memory, immutable materialization of every batch read from a stream.
///
/// All batches share the table schema (field names, types and nullability).
/// Schema-level metadata is allowed to differ between batches.
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    num_rows: usize,
}

impl Table {
    pub fn try_new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self, Error> {
        for (index, batch) in batches.iter().enumerate() {
            check_fields(index, schema.fields(), batch)?;
        }

        let num_rows = batches.iter().map(RecordBatch::num_rows).sum();

        Ok(Self {
            schema,
            batches,
            num_rows,
        })
    }

    /// Table with no batches.
    pub fn empty(schema: SchemaRef) -> Self {
        Self {
            schema,
            batches: Vec::new(),
            num_rows: 0,
        }
    }

    /// Drains `reader` to exhaustion, validating every batch against the
    /// reader's declared schema.
    pub fn from_reader<R>(reader: R) -> Result<Self, Error>
    where
        R: RecordBatchReader,
    {
        let schema = reader.schema();
        let mut batches = Vec::new();
        let mut num_rows = 0;

        for (index, batch) in reader.enumerate() {
            let batch = batch.map_err(|source| Error::Batch { index, source })?;
            check_fields(index, schema.fields(), &batch)?;

            trace!("imported batch {} with {} rows", index, batch.num_rows());

            num_rows += batch.num_rows();
            batches.push(batch);
        }

        Ok(Self {
            schema,
            batches,
            num_rows,
        })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Returns the logical concatenation of all batches as a single batch.
    pub fn concat(&self) -> Result<RecordBatch, Error> {
        concat_batches(&self.schema, &self.batches).map_err(Error::Concat)
    }
}

fn check_fields(index: usize, expected: &Fields, batch: &RecordBatch) -> Result<(), Error> {
    let found = batch.schema();
    if found.fields() != expected {
        return Err(Error::SchemaMismatch {
            index,
            expected: fields_to_string(expected),
            found: fields_to_string(found.fields()),
        });
    }
    Ok(())
}

fn fields_to_string(fields: &Fields) -> String {
    let fields: Vec<String> = fields
        .iter()
        .map(|f| format!("{}: {}", f.name(), f.data_type()))
        .collect();
    format!("[{}]", fields.join(", "))
}
