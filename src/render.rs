//! Document-to-text rendering, the inverse of [`crate::parse`].
//!
//! Output is deterministic: one statement per line, four-space indentation,
//! properties in their stored (case-insensitively sorted) order, and every
//! token spelled canonically. Rendering a document and parsing the result
//! reproduces an equal document, and rendering that reparse reproduces the
//! byte-identical text.
//!
//! Kinds whose literal shape the parser infers on its own (`bool`, `i32`,
//! `f64`, text) render untagged; every other kind renders as `(tag)token`.
//! Whole `f64` values are written with a forced `.0` so they reparse as
//! floats rather than integers, and text that could be mistaken for another
//! kind is double-quoted.

use std::fmt;

use crate::node::{Document, Node};
use crate::options::WriteOptions;
use crate::value::Value;

const INDENT: &str = "    ";

pub(crate) fn render_document(document: &Document, options: &WriteOptions) -> String {
    let mut lines = Vec::new();
    if let Some(name) = &options.header_executable {
        lines.push(format!("#!/usr/bin/env {name}"));
    }
    for (index, node) in document.nodes.iter().enumerate() {
        // between top-level statements only, never after the header
        if options.extra_empty_root_node_lines && index > 0 {
            lines.push(String::new());
        }
        write_node(node, 0, options, &mut lines);
    }
    join_lines(lines, options)
}

pub(crate) fn render_node(node: &Node, options: &WriteOptions) -> String {
    let mut lines = Vec::new();
    write_node(node, 0, options, &mut lines);
    join_lines(lines, options)
}

fn join_lines(lines: Vec<String>, options: &WriteOptions) -> String {
    let mut text = lines.join(&options.new_line);
    if !text.is_empty() && !options.skip_last_new_line {
        text.push_str(&options.new_line);
    }
    text
}

fn write_node(node: &Node, depth: usize, options: &WriteOptions, lines: &mut Vec<String>) {
    let mut line = INDENT.repeat(depth);
    line.push_str(node.name());
    if let Some(value) = &node.value {
        if !matches!(value, Value::None) {
            line.push(' ');
            line.push_str(&render_value(value, options));
        }
    }
    for (key, value) in node.properties.iter() {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(&render_value(value, options));
    }
    if node.nodes.is_empty() {
        lines.push(line);
    } else {
        line.push_str(" {");
        lines.push(line);
        for child in &node.nodes {
            write_node(child, depth + 1, options, lines);
        }
        lines.push(format!("{}}}", INDENT.repeat(depth)));
    }
}

fn render_value(value: &Value, options: &WriteOptions) -> String {
    let token = match value {
        Value::None => return String::new(),
        Value::Bool(_) | Value::I32(_) => return value.as_string_or(""),
        Value::F64(f) => return float_token(*f),
        Value::Text(text) => return quote_if_needed(text),
        // the compact unit spelling reads better than the dotted clock form
        Value::Duration(d) => crate::duration::to_unit_string(d),
        other => other.as_string_or(""),
    };
    match value.kind().tag() {
        Some(tag) if !options.no_type_annotation => {
            // the tag fixes interpretation, so only structurally
            // unrepresentable tokens need quotes here
            let token = if requires_quotes(&token) {
                quote(&token)
            } else {
                token
            };
            format!("({tag}){token}")
        }
        _ => quote_if_needed(&token),
    }
}

/// `f64` tokens keep a decimal point (or exponent / non-finite spelling) so
/// they reparse as floats.
fn float_token(f: f64) -> String {
    let mut token = f.to_string();
    if f.is_finite() && !token.contains(['.', 'e', 'E']) {
        token.push_str(".0");
    }
    token
}

/// Whether `text` cannot appear as a bareword at all.
fn requires_quotes(text: &str) -> bool {
    text.is_empty()
        || text.chars().any(|ch| {
            ch.is_whitespace() || ch.is_control() || crate::node::STRUCTURAL_CHARS.contains(&ch)
        })
}

/// Whether a bare spelling of `text` would reparse as something other than
/// this exact text.
fn needs_quoting(text: &str) -> bool {
    requires_quotes(text)
        || text.eq_ignore_ascii_case("true")
        || text.eq_ignore_ascii_case("false")
        || matches!(text, "NaN" | "inf" | "-inf")
        || crate::parse::numeric_looking(text)
}

fn quote_if_needed(text: &str) -> String {
    if !needs_quoting(text) {
        return text.to_string();
    }
    quote(text)
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\0' => quoted.push_str("\\0"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
