//! # stanza
//!
//! A typed, human-editable hierarchical document format.
//!
//! A stanza document is an ordered tree of named nodes. Each node carries an
//! optional typed [`Value`], a case-insensitively sorted property map, and an
//! ordered list of child nodes. The text form is line-oriented:
//!
//! ```text
//! server 8080 host=localhost {
//!     tls True
//!     timeout (duration)"30s"
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Typed values**: ~20 scalar kinds (fixed-width integers, three float
//!   widths, 128-bit decimal, date/time/duration, IP addresses, URIs, UUIDs,
//!   text, bytes) with a full range-checked conversion matrix
//! - **Path access**: `find`/`assign`/`consume` address nodes by `/`-separated
//!   paths, case-insensitively, creating intermediates on assignment
//! - **Round-trip text form**: rendering is the canonical inverse of parsing,
//!   with deterministic quoting and `(kind)` annotations
//! - **Structural matching**: documents validate against pattern documents
//!   with order-insensitive siblings and regex value operators
//!
//! ## Quick Start
//!
//! ```rust
//! use stanza::{from_str, Value};
//!
//! let mut doc = from_str("server 8080 host=localhost { tls True }").unwrap();
//!
//! assert_eq!(doc.find("server").and_then(|v| v.as_u16()), Some(8080));
//! assert_eq!(doc.find("server/tls"), Some(&Value::Bool(true)));
//!
//! doc.assign("server/limits/rps", 100).unwrap();
//! assert_eq!(
//!     doc.to_text(),
//!     "server 8080 host=localhost {\n    tls True\n    limits {\n        rps 100\n    }\n}\n"
//! );
//! ```
//!
//! ## Typed literals
//!
//! Un-annotated literals infer their kind by shape (`true`/`false`, integer
//! as `i32`, decimal point or exponent as `f64`, anything else as text); a
//! `(tag)` annotation selects any other kind:
//!
//! ```rust
//! use stanza::{from_str, Kind};
//!
//! let doc = from_str("job (uuid)f81d4fae-7dec-11d0-a765-00a0c91e6bf6; retries (u8)3").unwrap();
//! assert_eq!(doc.find("job").unwrap().kind(), Kind::Uuid);
//! ```
//!
//! ## Pattern matching
//!
//! ```rust
//! use stanza::from_str;
//!
//! let actual = from_str("host web-01; host web-02; port 443").unwrap();
//! let pattern = from_str(r#"port 443; host "/op=regex web-\\d+""#).unwrap();
//! assert!(actual.matches(&pattern));
//! ```

pub mod duration;
pub mod error;
pub mod map;
pub mod node;
pub mod options;
pub mod size;
pub mod value;

mod matcher;
mod parse;
mod render;

pub use error::{Error, Result};
pub use map::PropertyMap;
pub use node::{Document, Node};
pub use options::{ParseOptions, WriteOptions};
pub use size::Size;
pub use value::{Kind, Value};

/// Parses a document in permissive mode.
///
/// Permissive mode keeps the last of duplicate values and property keys and
/// preserves ambiguous numeric-looking barewords as quoted text.
///
/// # Examples
///
/// ```rust
/// let doc = stanza::from_str("name example\nversion \"1.0.0\"").unwrap();
/// assert_eq!(doc.find("name").unwrap().as_string_or(""), "example");
/// ```
///
/// # Errors
///
/// Returns an error on grammar violations (unterminated blocks or strings,
/// invalid escapes, unknown tags, annotated tokens that do not parse as the
/// annotated kind). No partial document is ever returned.
pub fn from_str(input: &str) -> Result<Document> {
    from_str_with_options(input, &ParseOptions::new())
}

/// Parses a document in strict mode.
///
/// In addition to the errors of [`from_str`], strict mode rejects ambiguous
/// numeric-looking barewords and duplicate values or property keys on a
/// single statement.
///
/// # Errors
///
/// Returns an error on any grammar violation or ambiguity.
pub fn from_str_strict(input: &str) -> Result<Document> {
    from_str_with_options(input, &ParseOptions::strict())
}

/// Parses a document under explicit options.
///
/// # Errors
///
/// Returns an error on grammar violations; see [`from_str`] and
/// [`from_str_strict`].
pub fn from_str_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    parse::parse_document(input, options)
}

/// Renders a document under default formatting options.
///
/// Equivalent to [`Document::to_text`].
#[must_use]
pub fn to_string(document: &Document) -> String {
    document.to_text()
}

/// Renders a document under explicit formatting options.
#[must_use]
pub fn to_string_with_options(document: &Document, options: &WriteOptions) -> String {
    document.to_text_with_options(options)
}
