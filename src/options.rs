//! Configuration for parsing and rendering.
//!
//! - [`ParseOptions`]: strict vs. permissive handling of ambiguous input.
//! - [`WriteOptions`]: formatting knobs for the serializer.
//!
//! Both follow the builder pattern:
//!
//! ```rust
//! use stanza::{ParseOptions, WriteOptions};
//!
//! let strict = ParseOptions::strict();
//! assert!(strict.strict);
//!
//! let options = WriteOptions::new()
//!     .with_header_executable("stanza")
//!     .with_extra_empty_root_node_lines()
//!     .with_skip_last_new_line();
//! ```

/// Parser configuration.
///
/// Permissive mode (the default) resolves ambiguities best-effort: a
/// numeric-looking-but-unparseable bareword is kept as text (and re-quoted on
/// output), and duplicate values/properties keep the last occurrence. Strict
/// mode turns each of those into a hard parse error.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    pub strict: bool,
}

impl ParseOptions {
    /// Permissive parsing (the default).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict parsing: ambiguous literals and duplicates are errors.
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions { strict: true }
    }
}

/// Serializer configuration.
///
/// Output under any fixed set of options is deterministic and is the
/// canonical inverse of the parser for documents the parser produced.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Line terminator, `"\n"` by default.
    pub new_line: String,
    /// When set, emits `#!/usr/bin/env <name>` as the first line.
    pub header_executable: Option<String>,
    /// Inserts a blank line between top-level statements — never inside a
    /// block, never before the first statement or right after the header.
    pub extra_empty_root_node_lines: bool,
    /// Suppresses `(kind)` annotations, forcing values to their
    /// default-inferred text shape (durations fall back to their quoted
    /// compact string).
    pub no_type_annotation: bool,
    /// Omits the terminator after the last line.
    pub skip_last_new_line: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            new_line: "\n".to_string(),
            header_executable: None,
            extra_empty_root_node_lines: false,
            no_type_annotation: false,
            skip_last_new_line: false,
        }
    }
}

impl WriteOptions {
    /// Default formatting: `\n` terminators, annotations on, no header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the line terminator string.
    #[must_use]
    pub fn with_new_line(mut self, new_line: impl Into<String>) -> Self {
        self.new_line = new_line.into();
        self
    }

    /// Emits a shebang-style header naming the given interpreter.
    #[must_use]
    pub fn with_header_executable(mut self, name: impl Into<String>) -> Self {
        self.header_executable = Some(name.into());
        self
    }

    /// Separates top-level statements with a blank line.
    #[must_use]
    pub fn with_extra_empty_root_node_lines(mut self) -> Self {
        self.extra_empty_root_node_lines = true;
        self
    }

    /// Suppresses `(kind)` type annotations.
    #[must_use]
    pub fn with_no_type_annotation(mut self) -> Self {
        self.no_type_annotation = true;
        self
    }

    /// Omits the final line terminator.
    #[must_use]
    pub fn with_skip_last_new_line(mut self) -> Self {
        self.skip_last_new_line = true;
        self
    }
}
