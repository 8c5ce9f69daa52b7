use std::collections::BTreeMap;

use arrow::datatypes::Schema;
use log::{debug, trace};
use parquet::arrow::ArrowSchemaConverter;
use parquet::basic::Type as PhysicalType;
use parquet::file::properties::WriterPropertiesBuilder;
use parquet::schema::types::{ColumnDescriptor, ColumnPath};

use super::{ColumnEncoding, EncodingSelector, Error};

/// Explicit encoding applied to a single Parquet leaf column.
///
/// Dictionary encoding is always disabled for overridden columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOverride {
    pub path: ColumnPath,
    pub encoding: ColumnEncoding,
    pub physical_type: PhysicalType,
}

/// Resolved per-column encoding decisions.
///
/// An empty policy leaves every column with the format default
/// (dictionary encoding, falling back when the dictionary grows too large).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodingPolicy {
    overrides: BTreeMap<String, ColumnOverride>,
}

impl EncodingPolicy {
    /// Policy keeping the default dictionary encoding on every column.
    pub fn dictionary() -> Self {
        Self::default()
    }

    /// Resolves `selector` against the target `columns` of `schema`.
    ///
    /// A name selects every leaf of the top-level field with that name; a
    /// dotted path (`"point.x"`) selects the matching nested leaf or subtree.
    /// Unknown names and encodings that cannot represent a leaf's physical
    /// type are rejected here rather than at write time.
    pub fn resolve<I, S>(schema: &Schema, selector: EncodingSelector, columns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(encoding) = selector.explicit() else {
            debug!("dictionary encoding requested, no column overrides");
            return Ok(Self::dictionary());
        };

        let descr = ArrowSchemaConverter::new()
            .convert(schema)
            .map_err(Error::Schema)?;

        let mut overrides = BTreeMap::new();

        for name in columns {
            let name = name.as_ref();

            let leaves: Vec<&ColumnDescriptor> = descr
                .columns()
                .iter()
                .map(|c| c.as_ref())
                .filter(|c| selects(c.path(), name))
                .collect();

            if leaves.is_empty() {
                return Err(Error::UnknownColumn(name.to_owned()));
            }

            for leaf in leaves {
                let column = leaf.path().string();
                if !encoding.supports(leaf.physical_type()) {
                    return Err(Error::UnsupportedEncoding {
                        column,
                        encoding,
                        physical_type: leaf.physical_type(),
                    });
                }

                trace!("column `{}` -> {} (dictionary disabled)", column, encoding);

                overrides.insert(
                    column,
                    ColumnOverride {
                        path: leaf.path().clone(),
                        encoding,
                        physical_type: leaf.physical_type(),
                    },
                );
            }
        }

        debug!("resolved {} column overrides with {}", overrides.len(), encoding);

        Ok(Self { overrides })
    }

    pub fn overrides(&self) -> impl Iterator<Item = &ColumnOverride> {
        self.overrides.values()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Returns the explicit encoding of the leaf at `path` (dotted form).
    pub fn encoding_for(&self, path: &str) -> Option<ColumnEncoding> {
        self.overrides.get(path).map(|o| o.encoding)
    }

    pub(crate) fn apply(&self, mut builder: WriterPropertiesBuilder) -> WriterPropertiesBuilder {
        for column in self.overrides.values() {
            builder = builder
                .set_column_dictionary_enabled(column.path.clone(), false)
                .set_column_encoding(column.path.clone(), column.encoding.into());
        }
        builder
    }
}

fn selects(path: &ColumnPath, name: &str) -> bool {
    let parts = path.parts();
    if parts.first().is_some_and(|first| first == name) {
        return true;
    }

    let full = path.string();
    full == name || full.starts_with(&format!("{name}."))
}
