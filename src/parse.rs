//! Text-to-document parsing.
//!
//! The grammar is line-oriented with free-form whitespace otherwise. A
//! document is zero or more statements separated by newlines or `;`. Each
//! statement is a node:
//!
//! ```text
//! name [(kind)] [value] [key=value ...] [{ statement* }]
//! ```
//!
//! Names and unquoted tokens are barewords excluding the structural
//! characters `{ } ( ) \ / " = ; #`; any token may instead be a
//! double-quoted string with backslash escapes. A `(kind)` annotation forces
//! interpretation of the following token; un-annotated literals infer their
//! kind by shape (`true`/`false`, integer → i32, decimal point or exponent →
//! f64, otherwise text). `#` starts a line comment and an optional `#!`
//! header line before the document is skipped.
//!
//! Parsing consumes the whole input and either returns a fully materialized
//! [`Document`] or a single terminal error — never a partial tree.

use crate::error::{Error, Result};
use crate::node::{Document, Node, STRUCTURAL_CHARS};
use crate::options::ParseOptions;
use crate::value::{Kind, Value};

pub(crate) fn parse_document(input: &str, options: &ParseOptions) -> Result<Document> {
    let mut parser = Parser::new(input, options.strict);
    parser.skip_header();
    let nodes = parser.parse_statements(None)?;
    Ok(Document { nodes })
}

/// A scanned token: the decoded text plus whether it was quoted.
/// Quoting suppresses kind inference — a quoted numeric stays text.
struct Token {
    text: String,
    quoted: bool,
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    strict: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, strict: bool) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
            strict,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Spaces, tabs and carriage returns — everything inline that does not
    /// terminate a statement.
    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(' ' | '\t' | '\r')) {
            self.next_char();
        }
    }

    fn skip_comment(&mut self) {
        while !matches!(self.peek_char(), None | Some('\n')) {
            self.next_char();
        }
    }

    /// Skips everything between statements: whitespace, statement
    /// terminators, and comments.
    fn skip_blank(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n' | ';') => {
                    self.next_char();
                }
                Some('#') => self.skip_comment(),
                _ => return,
            }
        }
    }

    /// An optional `#!...` first line (e.g. `#!/usr/bin/env stanza`).
    fn skip_header(&mut self) {
        if self.input.starts_with("#!") {
            self.skip_comment();
        }
    }

    /// Parses statements until end of input, or until the `}` closing the
    /// block opened at `open` (line, column).
    fn parse_statements(&mut self, open: Option<(usize, usize)>) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            self.skip_blank();
            if self.at_end() {
                return match open {
                    Some((line, column)) => Err(Error::UnterminatedBlock { line, column }),
                    None => Ok(nodes),
                };
            }
            if self.peek_char() == Some('}') {
                if open.is_some() {
                    self.next_char();
                    return Ok(nodes);
                }
                return Err(Error::syntax(self.line, self.column, "unexpected '}'"));
            }
            nodes.push(self.parse_statement()?);
        }
    }

    fn parse_statement(&mut self) -> Result<Node> {
        let name = self.read_token()?;
        let mut node = Node::new(name.text)?;

        loop {
            self.skip_inline_whitespace();
            match self.peek_char() {
                None | Some('\n' | ';' | '#' | '}') => break,
                Some('{') => {
                    let open = (self.line, self.column);
                    self.next_char();
                    node.nodes = self.parse_statements(Some(open))?;
                    break;
                }
                Some('(') => {
                    let value = self.parse_annotated_value()?;
                    self.push_statement_value(&mut node, value)?;
                }
                _ => {
                    let (line, column) = (self.line, self.column);
                    let token = self.read_token()?;
                    if !token.quoted && self.peek_char() == Some('=') {
                        self.next_char();
                        self.parse_property(&mut node, token.text)?;
                    } else {
                        let value = self.infer_value(token, line, column)?;
                        self.push_statement_value(&mut node, value)?;
                    }
                }
            }
        }
        Ok(node)
    }

    fn parse_property(&mut self, node: &mut Node, key: String) -> Result<()> {
        let value = if self.peek_char() == Some('(') {
            self.parse_annotated_value()?
        } else {
            let (line, column) = (self.line, self.column);
            let token = self.read_token()?;
            self.infer_value(token, line, column)?
        };
        if node.properties.contains_key(&key) && self.strict {
            return Err(Error::DuplicateProperty {
                line: self.line,
                column: self.column,
                key,
            });
        }
        // permissive mode keeps the last occurrence
        node.properties.insert(key, value)?;
        Ok(())
    }

    fn push_statement_value(&mut self, node: &mut Node, value: Value) -> Result<()> {
        if node.value.is_some() && self.strict {
            return Err(Error::DuplicateValue {
                line: self.line,
                column: self.column,
            });
        }
        node.value = Some(value);
        Ok(())
    }

    /// `(tag)token` — the tag forces interpretation of the token as that
    /// kind, overriding literal-shape inference.
    fn parse_annotated_value(&mut self) -> Result<Value> {
        let (line, column) = (self.line, self.column);
        self.next_char(); // consume '('
        let mut tag = String::new();
        loop {
            match self.next_char() {
                Some(')') => break,
                Some(c) if c.is_ascii_alphanumeric() => tag.push(c),
                Some(_) => {
                    return Err(Error::UnknownTag { line, column, tag });
                }
                None => return Err(Error::unexpected_eof(self.line, self.column, "')'")),
            }
        }
        let kind = Kind::from_tag(&tag).ok_or_else(|| Error::UnknownTag {
            line,
            column,
            tag: tag.clone(),
        })?;

        self.skip_inline_whitespace();
        let token = self.read_token()?;
        Value::parse_typed(kind, &token.text).ok_or(Error::InvalidTypedLiteral {
            line,
            column,
            tag,
            token: token.text,
        })
    }

    fn read_token(&mut self) -> Result<Token> {
        if self.peek_char() == Some('"') {
            return self.read_quoted();
        }
        let mut text = String::new();
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || ch.is_control() || STRUCTURAL_CHARS.contains(&ch) {
                break;
            }
            text.push(ch);
            self.next_char();
        }
        if text.is_empty() {
            return Err(Error::syntax(
                self.line,
                self.column,
                match self.peek_char() {
                    Some(c) => format!("unexpected character '{c}'"),
                    None => "unexpected end of input".to_string(),
                },
            ));
        }
        Ok(Token {
            text,
            quoted: false,
        })
    }

    fn read_quoted(&mut self) -> Result<Token> {
        let (line, column) = (self.line, self.column);
        self.next_char(); // consume opening '"'
        let mut text = String::new();
        loop {
            match self.next_char() {
                None | Some('\n') => return Err(Error::UnterminatedString { line, column }),
                Some('"') => break,
                Some('\\') => {
                    let escape = self
                        .next_char()
                        .ok_or(Error::UnterminatedString { line, column })?;
                    text.push(match escape {
                        '"' => '"',
                        '\\' => '\\',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        '0' => '\0',
                        other => {
                            return Err(Error::InvalidEscape {
                                line: self.line,
                                column: self.column,
                                escape: other,
                            })
                        }
                    });
                }
                Some(ch) => text.push(ch),
            }
        }
        Ok(Token { text, quoted: true })
    }

    /// Shape-based kind inference for un-annotated literals.
    fn infer_value(&self, token: Token, line: usize, column: usize) -> Result<Value> {
        if token.quoted {
            return Ok(Value::Text(token.text));
        }
        if token.text.eq_ignore_ascii_case("true") {
            return Ok(Value::Bool(true));
        }
        if token.text.eq_ignore_ascii_case("false") {
            return Ok(Value::Bool(false));
        }
        match token.text.as_str() {
            // non-finite floats have no tag, so their spellings infer as f64
            "NaN" => return Ok(Value::F64(f64::NAN)),
            "inf" => return Ok(Value::F64(f64::INFINITY)),
            "-inf" => return Ok(Value::F64(f64::NEG_INFINITY)),
            _ => {}
        }
        if !numeric_looking(&token.text) {
            return Ok(Value::Text(token.text));
        }

        let parsed = if integer_shaped(&token.text) {
            token.text.parse::<i32>().ok().map(Value::I32)
        } else {
            token.text.parse::<f64>().ok().map(Value::F64)
        };
        match parsed {
            Some(value) => Ok(value),
            // numeric-looking but unparseable, e.g. `1.0.0`
            None if self.strict => Err(Error::AmbiguousLiteral {
                line,
                column,
                token: token.text,
            }),
            None => Ok(Value::Text(token.text)),
        }
    }
}

/// A token that would confuse a reader if silently treated as text:
/// starts with a digit, or a sign/dot followed by a digit or dot.
pub(crate) fn numeric_looking(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-' | '.') => matches!(chars.next(), Some(c) if c.is_ascii_digit() || c == '.'),
        _ => false,
    }
}

fn integer_shaped(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_str, from_str_strict};

    #[test]
    fn test_statement_shapes() {
        let doc = from_str("server 8080 host=localhost { tls true }").unwrap();
        assert_eq!(doc.nodes.len(), 1);
        let server = &doc.nodes[0];
        assert_eq!(server.name(), "server");
        assert_eq!(server.value, Some(Value::I32(8080)));
        assert_eq!(server.properties.get("host"), Some(&Value::from("localhost")));
        assert_eq!(server.find("tls"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_semicolon_and_newline_terminators() {
        let doc = from_str("a 1; b 2\nc 3").unwrap();
        let names: Vec<_> = doc.nodes.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_shape_inference() {
        let doc = from_str("n true false 0").unwrap();
        // permissive: last value token wins
        assert_eq!(doc.nodes[0].value, Some(Value::I32(0)));

        let doc = from_str("a 42\nb 4.5\nc 1e3\nd word\ne \"42\"\nf -7").unwrap();
        assert_eq!(doc.find("a"), Some(&Value::I32(42)));
        assert_eq!(doc.find("b"), Some(&Value::F64(4.5)));
        assert_eq!(doc.find("c"), Some(&Value::F64(1000.0)));
        assert_eq!(doc.find("d"), Some(&Value::from("word")));
        assert_eq!(doc.find("e"), Some(&Value::from("42")));
        assert_eq!(doc.find("f"), Some(&Value::I32(-7)));
    }

    #[test]
    fn test_type_annotations() {
        let doc = from_str(
            "widths (i8)5; big (u64)18446744073709551615; h (f16)1.5\n\
             when (datetime)2023-04-05T06:07:08+02:00\n\
             span (duration)\"6d 2h 11m 23.548s\"\n\
             addr (ipv4)10.0.0.1; blob (binary)dead01",
        )
        .unwrap();
        assert_eq!(doc.find("widths"), Some(&Value::I8(5)));
        assert_eq!(doc.find("big"), Some(&Value::U64(u64::MAX)));
        assert_eq!(doc.find("h").unwrap().kind(), crate::Kind::F16);
        assert_eq!(doc.find("when").unwrap().kind(), crate::Kind::DateTime);
        assert_eq!(
            doc.find("span"),
            Some(&Value::Duration(crate::duration::parse("6.02:11:23.548").unwrap()))
        );
        assert_eq!(doc.find("blob"), Some(&Value::Bytes(vec![0xDE, 0xAD, 0x01])));
    }

    #[test]
    fn test_annotation_errors() {
        assert!(matches!(
            from_str("a (i99)5"),
            Err(Error::UnknownTag { .. })
        ));
        assert!(matches!(
            from_str("a (i8)300"),
            Err(Error::InvalidTypedLiteral { .. })
        ));
    }

    #[test]
    fn test_strict_vs_permissive_ambiguous_literal() {
        let doc = from_str("test1 1.0.0").unwrap();
        assert_eq!(doc.find("test1"), Some(&Value::from("1.0.0")));
        assert!(matches!(
            from_str_strict("test1 1.0.0"),
            Err(Error::AmbiguousLiteral { .. })
        ));
    }

    #[test]
    fn test_strict_duplicate_policies() {
        assert!(matches!(
            from_str_strict("n 1 2"),
            Err(Error::DuplicateValue { .. })
        ));
        assert!(matches!(
            from_str_strict("n a=1 A=2"),
            Err(Error::DuplicateProperty { .. })
        ));
        // permissive keeps the last occurrence of each
        let doc = from_str("n 1 2 a=1 A=2").unwrap();
        assert_eq!(doc.nodes[0].value, Some(Value::I32(2)));
        assert_eq!(doc.nodes[0].properties.get("a"), Some(&Value::I32(2)));
        assert_eq!(doc.nodes[0].properties.len(), 1);
    }

    #[test]
    fn test_nested_blocks() {
        let doc = from_str("a { b { c 1 }\n d 2 }").unwrap();
        assert_eq!(doc.find("a/b/c"), Some(&Value::I32(1)));
        assert_eq!(doc.find("a/d"), Some(&Value::I32(2)));
    }

    #[test]
    fn test_unterminated_constructs() {
        assert!(matches!(
            from_str("a {\n b"),
            Err(Error::UnterminatedBlock { line: 1, .. })
        ));
        assert!(matches!(
            from_str("a \"oops"),
            Err(Error::UnterminatedString { .. })
        ));
        assert!(matches!(from_str("}"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_escapes() {
        let doc = from_str(r#"msg "line\nbreak \"quoted\" tab\there""#).unwrap();
        assert_eq!(
            doc.find("msg"),
            Some(&Value::from("line\nbreak \"quoted\" tab\there"))
        );
        assert!(matches!(
            from_str(r#"msg "\q""#),
            Err(Error::InvalidEscape { escape: 'q', .. })
        ));
    }

    #[test]
    fn test_comments_and_header() {
        let doc = from_str("#!/usr/bin/env stanza\n# comment line\na 1 # trailing\nb 2").unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.find("a"), Some(&Value::I32(1)));
    }

    #[test]
    fn test_crlf_input() {
        let doc = from_str("a 1\r\nb 2\r\n").unwrap();
        assert_eq!(doc.find("a"), Some(&Value::I32(1)));
        assert_eq!(doc.find("b"), Some(&Value::I32(2)));
    }

    #[test]
    fn test_non_finite_float_spellings() {
        let doc = from_str("a NaN\nb inf\nc -inf\nd Infinity").unwrap();
        assert!(matches!(doc.find("a"), Some(Value::F64(f)) if f.is_nan()));
        assert_eq!(doc.find("b"), Some(&Value::F64(f64::INFINITY)));
        assert_eq!(doc.find("c"), Some(&Value::F64(f64::NEG_INFINITY)));
        assert_eq!(doc.find("d"), Some(&Value::from("Infinity")));
    }

    #[test]
    fn test_integer_overflow_is_ambiguous() {
        let doc = from_str("n 2147483648").unwrap();
        assert_eq!(doc.find("n"), Some(&Value::from("2147483648")));
        assert!(matches!(
            from_str_strict("n 2147483648"),
            Err(Error::AmbiguousLiteral { .. })
        ));
    }

    #[test]
    fn test_empty_documents() {
        assert!(from_str("").unwrap().nodes.is_empty());
        assert!(from_str("\n\n;;\n# only a comment\n").unwrap().nodes.is_empty());
    }
}
