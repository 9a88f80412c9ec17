//! # Livery Parser
//!
//! Lenient decoding of raw Livery configuration records into
//! [`livery_core`] types.
//!
//! Raw records are JSON values, or TOML values converted to JSON. The
//! decoder accepts a friendlier shape than the wire format: bare leaves and
//! state containers, `"none"` for explicit null colors, and textual
//! relative expressions such as `"*1.5"`. Keys outside the declared set are
//! reported as warnings rather than rejected.
//!
//! ## Usage
//!
//! ```
//! # use livery_parser::{decode_table, ParseError};
//! use serde_json::json;
//!
//! fn main() -> Result<(), ParseError> {
//!     let raw = json!({
//!         "__all": {"base": {"fill": "#eee"}, "select": {"fill": "#39f"}},
//!         "coast": {"hover": {"stroke_width": "*1.5"}},
//!     });
//!
//!     let decoded = decode_table(&raw)?;
//!     assert!(decoded.warnings.is_empty());
//!     assert_eq!(decoded.value.len(), 2);
//!     Ok(())
//! }
//! ```

mod decode;
pub mod error;
mod relative;

pub use decode::{decode_entry, decode_leaf, decode_table, decode_wash};
pub use error::{Decoded, ParseError};
pub use relative::parse_relative;
