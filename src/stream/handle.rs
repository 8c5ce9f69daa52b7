use arrow::array::RecordBatchReader;
use arrow::ffi_stream::{ArrowArrayStreamReader, FFI_ArrowArrayStream};
use log::{debug, info};

use super::{Error, Table};

/// Typed borrow of a caller-owned `ArrowArrayStream`.
///
/// Importing moves the stream out of the caller's slot and leaves an empty
/// (released) stream in its place: the caller still owns and drops the
/// struct, while a second import through the same slot fails with
/// [`Error::Released`] instead of reading freed memory.
pub struct StreamHandle<'a> {
    stream: &'a mut FFI_ArrowArrayStream,
}

impl<'a> StreamHandle<'a> {
    pub fn new(stream: &'a mut FFI_ArrowArrayStream) -> Self {
        Self { stream }
    }

    /// Wraps a raw pointer coming from a foreign caller.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a valid, properly aligned
    /// `ArrowArrayStream` that is not accessed by anyone else for `'a`.
    pub unsafe fn from_raw(ptr: *mut FFI_ArrowArrayStream) -> Result<Self, Error> {
        // SAFETY: validity and exclusivity are guaranteed by the caller.
        let stream = unsafe { ptr.as_mut() }.ok_or(Error::NullHandle)?;
        Ok(Self { stream })
    }

    pub fn is_released(&self) -> bool {
        self.stream.release.is_none()
    }

    /// Consumes the stream to exhaustion and materializes it.
    pub fn import(self) -> Result<Table, Error> {
        if self.is_released() {
            return Err(Error::Released);
        }

        let stream = std::mem::replace(self.stream, FFI_ArrowArrayStream::empty());
        let reader = ArrowArrayStreamReader::try_new(stream).map_err(Error::Schema)?;

        debug!("importing stream with schema {:?}", reader.schema());

        let table = Table::from_reader(reader)?;

        info!(
            "imported {} rows in {} batches ({} columns)",
            table.num_rows(),
            table.batches().len(),
            table.num_columns()
        );

        Ok(table)
    }
}
