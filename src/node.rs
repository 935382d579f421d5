//! The document tree: named nodes carrying values, properties and children.
//!
//! A [`Node`] has a validated name, an optional [`Value`], a sorted
//! [`PropertyMap`], and an ordered list of child nodes (duplicate names
//! allowed). A [`Document`] is an ordered sequence of root nodes.
//!
//! Path-based operations use `/`-separated segments with case-insensitive
//! name matching; when several siblings share a name, the **last** match
//! wins at every level. Assignment creates missing intermediate nodes;
//! "consume" operations return-and-delete in one step.
//!
//! ```rust
//! use stanza::{Document, Value};
//!
//! let mut doc = Document::default();
//! doc.assign("server/port", 8080).unwrap();
//! assert_eq!(doc.find("SERVER/PORT"), Some(&Value::from(8080)));
//!
//! let server = doc.consume_node("server").unwrap();
//! assert_eq!(server.name(), "server");
//! assert!(doc.nodes.is_empty());
//! ```

use crate::error::{Error, Result};
use crate::map::PropertyMap;
use crate::options::WriteOptions;
use crate::Value;
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

/// Characters that carry structure in the document grammar and are therefore
/// forbidden in names and barewords.
pub(crate) const STRUCTURAL_CHARS: [char; 10] = ['{', '}', '(', ')', '\\', '/', '"', '=', ';', '#'];

/// Checks the identifier rules shared by node names and property keys:
/// non-empty, no whitespace, no control characters, no structural characters.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || STRUCTURAL_CHARS.contains(&c));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}

/// Case-insensitive name comparison used by path lookup and the matcher.
pub(crate) fn name_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A named tree element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    /// The scalar carried by this node, if any.
    pub value: Option<Value>,
    /// Named properties, unique per node, iterated in ascending key order.
    pub properties: PropertyMap,
    /// Ordered children; duplicate names are permitted.
    pub nodes: Vec<Node>,
}

impl Node {
    /// Creates a node with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if the name violates the identifier
    /// rules. The name is immutable afterwards.
    pub fn new(name: impl Into<String>) -> Result<Node> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Node {
            name,
            value: None,
            properties: PropertyMap::new(),
            nodes: Vec::new(),
        })
    }

    /// Builder-style value attachment.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Node {
        self.value = Some(value.into());
        self
    }

    /// The node's name, with its original case.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up the value at `path` below this node (last match wins).
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Value> {
        find_in(&self.nodes, path)?.value.as_ref()
    }

    /// Looks up the node at `path` below this node.
    #[must_use]
    pub fn find_node(&self, path: &str) -> Option<&Node> {
        find_in(&self.nodes, path)
    }

    /// Mutable variant of [`Self::find_node`].
    pub fn find_node_mut(&mut self, path: &str) -> Option<&mut Node> {
        find_in_mut(&mut self.nodes, path)
    }

    /// Sets the value at `path` below this node, creating intermediate nodes
    /// as needed.
    pub fn assign(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        assign_in(&mut self.nodes, path, value.into())
    }

    /// Removes and returns the node at `path` below this node.
    pub fn consume_node(&mut self, path: &str) -> Option<Node> {
        consume_in(&mut self.nodes, path)
    }

    /// Removes and returns a property value, case-insensitively.
    pub fn consume_property(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    /// Inserts or replaces a property, validating the key.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.properties.insert(key.into(), value.into())?;
        Ok(())
    }

    /// Renders this node (and its subtree) as document text.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_text_with_options(&WriteOptions::default())
    }

    /// Renders this node under explicit formatting options.
    #[must_use]
    pub fn to_text_with_options(&self, options: &WriteOptions) -> String {
        crate::render::render_node(self, options)
    }
}

/// An ordered sequence of root nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Root statements, in document order.
    pub nodes: Vec<Node>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Document {
        Document::default()
    }

    /// Looks up the value at `path` (last match wins, case-insensitive).
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Value> {
        find_in(&self.nodes, path)?.value.as_ref()
    }

    /// Looks up the node at `path`.
    #[must_use]
    pub fn find_node(&self, path: &str) -> Option<&Node> {
        find_in(&self.nodes, path)
    }

    /// Mutable variant of [`Self::find_node`].
    pub fn find_node_mut(&mut self, path: &str) -> Option<&mut Node> {
        find_in_mut(&mut self.nodes, path)
    }

    /// Sets the value at `path`, creating intermediate nodes as needed.
    ///
    /// Existing nodes matching a non-terminal segment are descended into,
    /// never overwritten; the terminal node's value is always written.
    pub fn assign(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        assign_in(&mut self.nodes, path, value.into())
    }

    /// Removes and returns the node at `path`.
    ///
    /// Consuming a root statement removes it from the document entirely.
    pub fn consume_node(&mut self, path: &str) -> Option<Node> {
        consume_in(&mut self.nodes, path)
    }

    /// Renders the document with default formatting options.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_text_with_options(&WriteOptions::default())
    }

    /// Renders the document under explicit formatting options.
    #[must_use]
    pub fn to_text_with_options(&self, options: &WriteOptions) -> String {
        crate::render::render_document(self, options)
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn last_match(nodes: &[Node], name: &str) -> Option<usize> {
    nodes.iter().rposition(|n| name_eq(&n.name, name))
}

fn find_in<'a>(mut nodes: &'a [Node], path: &str) -> Option<&'a Node> {
    let segments = segments(path);
    let (last, init) = segments.split_last()?;
    for segment in init {
        nodes = &nodes[last_match(nodes, segment)?].nodes;
    }
    Some(&nodes[last_match(nodes, last)?])
}

fn find_in_mut<'a>(mut nodes: &'a mut Vec<Node>, path: &str) -> Option<&'a mut Node> {
    let segments = segments(path);
    let (last, init) = segments.split_last()?;
    for segment in init {
        let idx = last_match(nodes, segment)?;
        let current = nodes;
        nodes = &mut current[idx].nodes;
    }
    let idx = last_match(nodes, last)?;
    Some(&mut nodes[idx])
}

fn assign_in(mut nodes: &mut Vec<Node>, path: &str, value: Value) -> Result<()> {
    let segments = segments(path);
    let (last, init) = segments
        .split_last()
        .ok_or_else(|| Error::InvalidName(path.to_string()))?;
    for segment in init {
        let idx = match last_match(nodes, segment) {
            Some(idx) => idx,
            None => {
                nodes.push(Node::new(*segment)?);
                nodes.len() - 1
            }
        };
        let current = nodes;
        nodes = &mut current[idx].nodes;
    }
    let idx = match last_match(nodes, last) {
        Some(idx) => idx,
        None => {
            nodes.push(Node::new(*last)?);
            nodes.len() - 1
        }
    };
    nodes[idx].value = Some(value);
    Ok(())
}

fn consume_in(mut nodes: &mut Vec<Node>, path: &str) -> Option<Node> {
    let segments = segments(path);
    let (last, init) = segments.split_last()?;
    for segment in init {
        let idx = last_match(nodes, segment)?;
        let current = nodes;
        nodes = &mut current[idx].nodes;
    }
    let idx = last_match(nodes, last)?;
    Some(nodes.remove(idx))
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("properties", &self.properties)?;
        state.serialize_field("nodes", &self.nodes)?;
        state.end()
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.nodes.len()))?;
        for node in &self.nodes {
            seq.serialize_element(node)?;
        }
        seq.end()
    }
}
