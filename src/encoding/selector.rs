use parquet::basic::{Encoding, Type as PhysicalType};
use serde::{Deserialize, Serialize};

use super::Error;

/// Encodings a column can be explicitly switched to.
///
/// Discriminants follow the numbering of the Parquet `Encoding` enum.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColumnEncoding {
    Plain = 0,
    Rle = 3,
    DeltaBinaryPacked = 5,
    DeltaLengthByteArray = 6,
    DeltaByteArray = 7,
    ByteStreamSplit = 9,
}

impl ColumnEncoding {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Rle => "rle",
            Self::DeltaBinaryPacked => "delta_binary_packed",
            Self::DeltaLengthByteArray => "delta_length_byte_array",
            Self::DeltaByteArray => "delta_byte_array",
            Self::ByteStreamSplit => "byte_stream_split",
        }
    }

    /// Returns `true` if values of `physical_type` can be written with this
    /// encoding.
    pub fn supports(&self, physical_type: PhysicalType) -> bool {
        use PhysicalType as T;
        match self {
            Self::Plain => true,
            Self::Rle => matches!(physical_type, T::BOOLEAN),
            Self::DeltaBinaryPacked => matches!(physical_type, T::INT32 | T::INT64),
            Self::DeltaLengthByteArray => matches!(physical_type, T::BYTE_ARRAY),
            Self::DeltaByteArray => {
                matches!(physical_type, T::BYTE_ARRAY | T::FIXED_LEN_BYTE_ARRAY)
            }
            Self::ByteStreamSplit => matches!(
                physical_type,
                T::FLOAT | T::DOUBLE | T::INT32 | T::INT64 | T::FIXED_LEN_BYTE_ARRAY
            ),
        }
    }
}

impl From<ColumnEncoding> for Encoding {
    fn from(value: ColumnEncoding) -> Self {
        match value {
            ColumnEncoding::Plain => Encoding::PLAIN,
            ColumnEncoding::Rle => Encoding::RLE,
            ColumnEncoding::DeltaBinaryPacked => Encoding::DELTA_BINARY_PACKED,
            ColumnEncoding::DeltaLengthByteArray => Encoding::DELTA_LENGTH_BYTE_ARRAY,
            ColumnEncoding::DeltaByteArray => Encoding::DELTA_BYTE_ARRAY,
            ColumnEncoding::ByteStreamSplit => Encoding::BYTE_STREAM_SPLIT,
        }
    }
}

impl std::fmt::Display for ColumnEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ColumnEncoding {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "plain" => Ok(Self::Plain),
            "rle" => Ok(Self::Rle),
            "delta_binary_packed" => Ok(Self::DeltaBinaryPacked),
            "delta_length_byte_array" => Ok(Self::DeltaLengthByteArray),
            "delta_byte_array" => Ok(Self::DeltaByteArray),
            "byte_stream_split" => Ok(Self::ByteStreamSplit),
            _ => Err(Error::UnknownEncoding(value.to_owned())),
        }
    }
}

/// Encoding requested by the caller for the target columns.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum EncodingSelector {
    /// Keep the format default: dictionary encoding with fallback.
    #[default]
    Dictionary,
    /// Disable the dictionary and use the given encoding.
    Explicit(ColumnEncoding),
}

impl EncodingSelector {
    /// `PLAIN_DICTIONARY`
    pub const PLAIN_DICTIONARY_CODE: i32 = 2;
    /// `RLE_DICTIONARY`
    pub const RLE_DICTIONARY_CODE: i32 = 8;

    const GROUP_VAR_INT_CODE: i32 = 1;
    const BIT_PACKED_CODE: i32 = 4;

    pub fn is_dictionary(&self) -> bool {
        matches!(self, Self::Dictionary)
    }

    pub fn explicit(&self) -> Option<ColumnEncoding> {
        match self {
            Self::Dictionary => None,
            Self::Explicit(encoding) => Some(*encoding),
        }
    }
}

impl TryFrom<i32> for EncodingSelector {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        if code == Self::PLAIN_DICTIONARY_CODE || code == Self::RLE_DICTIONARY_CODE {
            return Ok(Self::Dictionary);
        }

        let encoding = match code {
            0 => ColumnEncoding::Plain,
            3 => ColumnEncoding::Rle,
            5 => ColumnEncoding::DeltaBinaryPacked,
            6 => ColumnEncoding::DeltaLengthByteArray,
            7 => ColumnEncoding::DeltaByteArray,
            9 => ColumnEncoding::ByteStreamSplit,
            Self::GROUP_VAR_INT_CODE | Self::BIT_PACKED_CODE => {
                return Err(Error::DeprecatedEncoding(code));
            }
            _ => return Err(Error::UnknownEncodingCode(code)),
        };

        Ok(Self::Explicit(encoding))
    }
}

impl From<ColumnEncoding> for EncodingSelector {
    fn from(value: ColumnEncoding) -> Self {
        Self::Explicit(value)
    }
}

impl std::fmt::Display for EncodingSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dictionary => write!(f, "dictionary"),
            Self::Explicit(encoding) => write!(f, "{}", encoding),
        }
    }
}

impl std::str::FromStr for EncodingSelector {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dictionary" | "plain_dictionary" | "rle_dictionary" => Ok(Self::Dictionary),
            _ => Ok(Self::Explicit(value.parse()?)),
        }
    }
}
