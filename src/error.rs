//! Error types for Stanza parsing and construction.
//!
//! Stanza distinguishes three failure families:
//!
//! - **Parse errors**: grammar violations raised while turning text into a
//!   [`Document`](crate::Document). These abort the whole parse — no partial
//!   document is ever returned. All of them carry line/column information.
//! - **Construction errors**: invalid node or property names, or host values
//!   that cannot be represented. These are hard failures reported immediately.
//! - **Conversion and match failures**: these are *not* errors. Value
//!   projections return `Option` and pattern matching returns `bool`, because
//!   both are expected outcomes in normal control flow.
//!
//! ## Examples
//!
//! ```rust
//! use stanza::{from_str_strict, Error};
//!
//! // "1.0.0" is numeric-looking but not a number; strict mode rejects it.
//! let result = from_str_strict("test1 1.0.0");
//! assert!(matches!(result, Err(Error::AmbiguousLiteral { .. })));
//! ```

use thiserror::Error;

/// All errors raised by Stanza parsing and node/value construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// General grammar violation with positional context.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Input ended inside an unfinished construct.
    #[error("unexpected end of input at line {line}, column {column}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        column: usize,
        expected: String,
    },

    /// A `{` block was never closed.
    #[error("unterminated block opened at line {line}, column {column}")]
    UnterminatedBlock { line: usize, column: usize },

    /// A double-quoted string ran to the end of its line.
    #[error("unterminated string at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    /// A backslash escape the grammar does not define.
    #[error("invalid escape sequence '\\{escape}' at line {line}, column {column}")]
    InvalidEscape {
        line: usize,
        column: usize,
        escape: char,
    },

    /// A numeric-looking bareword that parses as no numeric kind
    /// (strict mode only; permissive mode keeps it as quoted text).
    #[error("ambiguous literal '{token}' at line {line}, column {column}")]
    AmbiguousLiteral {
        line: usize,
        column: usize,
        token: String,
    },

    /// Two scalar value tokens on one statement (strict mode only).
    #[error("duplicate value on statement at line {line}, column {column}")]
    DuplicateValue { line: usize, column: usize },

    /// The same property key twice on one statement (strict mode only).
    #[error("duplicate property '{key}' at line {line}, column {column}")]
    DuplicateProperty {
        line: usize,
        column: usize,
        key: String,
    },

    /// A `(tag)` annotation outside the fixed vocabulary.
    #[error("unknown type tag '{tag}' at line {line}, column {column}")]
    UnknownTag {
        line: usize,
        column: usize,
        tag: String,
    },

    /// An annotated token that does not parse as the annotated kind.
    #[error("cannot read '{token}' as {tag} at line {line}, column {column}")]
    InvalidTypedLiteral {
        line: usize,
        column: usize,
        tag: String,
        token: String,
    },

    /// A node or property name violating the identifier rules.
    #[error("invalid name '{0}': names must be non-empty and free of whitespace, control characters and {{ }} ( ) \\ / \" = ; #")]
    InvalidName(String),

    /// A host value outside the domain of any value kind.
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

impl Error {
    /// Creates a general syntax error with positional context.
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates an unexpected-end-of-input error.
    pub fn unexpected_eof(line: usize, column: usize, expected: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            line,
            column,
            expected: expected.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
