use std::path::PathBuf;

/// Summary of a completed write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteReport {
    pub num_rows: usize,
    pub num_row_groups: usize,
    pub num_columns: usize,
    /// Number of leaf columns written with an explicit encoding.
    pub num_overrides: usize,
    /// Final file size, when the sink is a file or a buffer.
    pub size_bytes: Option<u64>,
    /// Destination path, when the sink is a file.
    pub path: Option<PathBuf>,
}

impl std::fmt::Display for WriteReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows, {} row groups, {} columns ({} overridden)",
            self.num_rows, self.num_row_groups, self.num_columns, self.num_overrides
        )?;
        if let Some(size) = self.size_bytes {
            write!(f, ", {} bytes", size)?;
        }
        if let Some(path) = &self.path {
            write!(f, " -> {}", path.display())?;
        }
        Ok(())
    }
}
