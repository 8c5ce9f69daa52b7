//! # Encoding Policy Resolver
//!
//! Decides, per Parquet leaf column, whether the writer keeps the default
//! dictionary encoding (with its adaptive fallback) or switches to an
//! explicitly requested encoding with the dictionary disabled.
//!
//! -   [`ColumnEncoding`]: an explicit encoding and the physical types it can
//!     represent.
//! -   [`EncodingSelector`]: the caller's request, usually decoded from the
//!     numeric Parquet encoding code.
//! -   [`EncodingPolicy`]: the resolved, validated set of column overrides.

mod error;
pub use error::*;

mod selector;
pub use selector::*;

mod policy;
pub use policy::*;
