//! YAML parsing and structural export.
//!
//! A document is first checked by `serde-saphyr`, which rejects duplicate
//! keys and runaway alias expansion, then built from `saphyr-parser` events.
//! Building from events keeps every scalar exactly as written: `1.10`, `007`
//! and `0x1F` are stored as those strings, never as numbers. The one
//! exception is a plain `~`, which the parser also uses for an empty value;
//! both become a blank scalar.

use std::collections::HashMap;

use saphyr_parser::{Event, Marker, Parser, ScalarStyle, Tag};
use serde::de::{Error as _, IgnoredAny};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};

use crate::ConfResult;
use crate::error::parse_error;

use super::{NodeData, NodeId, Tree};

const INLINE_ORIGIN: &str = "inline YAML";

type BuildResult<T> = Result<T, serde_saphyr::Error>;

fn located(mark: Marker, message: &str) -> serde_saphyr::Error {
    serde_saphyr::Error::custom(format!(
        "{message} at line {} column {}",
        mark.line(),
        mark.col() + 1
    ))
}

/// Whether a root scalar stands for "no document": an explicit `!!null`
/// tag, or a plain `~`, `null` or empty scalar.
fn is_null_scalar(text: &str, style: ScalarStyle, tag: Option<&Tag>) -> bool {
    match tag {
        Some(tag) => tag.is_yaml_core_schema() && tag.suffix == "null",
        None => {
            matches!(style, ScalarStyle::Plain)
                && matches!(text, "" | "~" | "null" | "Null" | "NULL")
        }
    }
}

/// A plain, untagged `~`: stored as a blank scalar.
fn is_blank_marker(text: &str, style: ScalarStyle, tag: Option<&Tag>) -> bool {
    tag.is_none() && matches!(style, ScalarStyle::Plain) && text == "~"
}

/// Collection still receiving children.
enum Frame {
    Seq(NodeId),
    Map { id: NodeId, key: Option<String> },
}

/// Assembles a tree from one document's parser events.
struct Builder {
    tree: Tree,
    stack: Vec<Frame>,
    anchors: HashMap<usize, NodeId>,
    root: Option<NodeId>,
    null_root: bool,
}

impl Builder {
    fn new() -> Self {
        Self {
            tree: Tree {
                nodes: Vec::new(),
                root: NodeId(0),
            },
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
            null_root: false,
        }
    }

    /// Feed one event. Returns `false` once the document is complete.
    fn accept(&mut self, event: Event<'_>, mark: Marker) -> BuildResult<bool> {
        match event {
            Event::DocumentEnd | Event::StreamEnd => return Ok(false),
            Event::Nothing | Event::StreamStart | Event::DocumentStart(_) => {}
            Event::Scalar(text, style, anchor, tag) => {
                if self.stack.is_empty() {
                    self.null_root = is_null_scalar(&text, style, tag.as_deref());
                }
                // The parser reports an empty value as a plain `~`.
                let value = if is_blank_marker(&text, style, tag.as_deref()) {
                    String::new()
                } else {
                    text.into_owned()
                };
                self.scalar(value, anchor, mark)?;
            }
            Event::Alias(anchor) => self.alias(anchor, mark)?,
            Event::SequenceStart(anchor, _) => self.open(NodeData::Seq(Vec::new()), anchor, mark)?,
            Event::MappingStart(anchor, _) => self.open(NodeData::Map(Vec::new()), anchor, mark)?,
            Event::SequenceEnd | Event::MappingEnd => {
                self.stack.pop();
            }
        }
        Ok(true)
    }

    fn scalar(&mut self, text: String, anchor: usize, mark: Marker) -> BuildResult<()> {
        if let Some(Frame::Map { key, .. }) = self.stack.last_mut()
            && key.is_none()
        {
            if anchor > 0 {
                let id = self.tree.alloc(NodeData::Val(text.clone()));
                self.anchors.insert(anchor, id);
            }
            *key = Some(text);
            return Ok(());
        }
        let id = self.tree.alloc(NodeData::Val(text));
        self.register(anchor, id);
        self.attach(id, mark)
    }

    fn alias(&mut self, anchor: usize, mark: Marker) -> BuildResult<()> {
        let source = *self
            .anchors
            .get(&anchor)
            .ok_or_else(|| located(mark, "unknown alias"))?;
        if let Some(Frame::Map { key, .. }) = self.stack.last_mut()
            && key.is_none()
        {
            let text = self
                .tree
                .val(source)
                .ok_or_else(|| located(mark, "mapping keys must be scalars"))?;
            *key = Some(text.to_owned());
            return Ok(());
        }
        let copy = self.tree.duplicate(source);
        self.attach(copy, mark)
    }

    fn open(&mut self, data: NodeData, anchor: usize, mark: Marker) -> BuildResult<()> {
        let is_map = matches!(data, NodeData::Map(_));
        let id = self.tree.alloc(data);
        self.register(anchor, id);
        self.attach(id, mark)?;
        self.stack.push(if is_map {
            Frame::Map { id, key: None }
        } else {
            Frame::Seq(id)
        });
        Ok(())
    }

    fn register(&mut self, anchor: usize, id: NodeId) {
        if anchor > 0 {
            self.anchors.insert(anchor, id);
        }
    }

    /// Hang a finished node under the innermost open collection.
    fn attach(&mut self, id: NodeId, mark: Marker) -> BuildResult<()> {
        match self.stack.last_mut() {
            None => self.root = Some(id),
            Some(Frame::Seq(seq)) => {
                if let Some(NodeData::Seq(items)) = self.tree.data_mut(*seq) {
                    items.push(id);
                }
            }
            Some(Frame::Map { id: map, key }) => {
                let Some(name) = key.take() else {
                    return Err(located(mark, "mapping keys must be scalars"));
                };
                if let Some(NodeData::Map(entries)) = self.tree.data_mut(*map) {
                    entries.retain(|(existing, _)| *existing != name);
                    entries.push((name, id));
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Option<(Tree, bool)> {
        let Self {
            mut tree,
            root,
            null_root,
            ..
        } = self;
        root.map(|id| {
            tree.root = id;
            (tree, null_root)
        })
    }
}

/// Parse one document, returning its tree and whether the root is a null
/// scalar. `None` means the input holds no document at all.
fn read(origin: &str, contents: &str) -> ConfResult<Option<(Tree, bool)>> {
    let body = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    serde_saphyr::from_str::<IgnoredAny>(body).map_err(|err| parse_error(origin, err))?;
    let mut builder = Builder::new();
    for item in Parser::new_from_str(body) {
        let (event, span) =
            item.map_err(|err| parse_error(origin, serde_saphyr::Error::custom(err)))?;
        let more = builder
            .accept(event, span.start)
            .map_err(|err| parse_error(origin, err))?;
        if !more {
            break;
        }
    }
    Ok(builder.finish())
}

impl Tree {
    /// Parse a YAML document into a tree.
    ///
    /// An empty or null document yields a tree with an empty map root.
    /// Scalars keep their source text; tags and quoting styles are not
    /// interpreted.
    ///
    /// ```rust
    /// use conftree::Tree;
    ///
    /// let tree = Tree::parse("{version: 1.10, mode: 0755, port: 0x1F}")?;
    /// let version = tree.lookup("version")?.and_then(|id| tree.val(id));
    /// assert_eq!(version, Some("1.10"));
    /// # Ok::<_, std::sync::Arc<conftree::ConfError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfError::Parse`] when `contents` is not valid YAML,
    /// repeats a mapping key, or uses a collection as a mapping key.
    pub fn parse(contents: &str) -> ConfResult<Self> {
        Ok(Self::parse_document(contents)?.unwrap_or_default())
    }

    /// Parse a YAML document, returning `None` when it holds no content:
    /// blank, comments only, or a lone null.
    ///
    /// # Errors
    ///
    /// See [`Tree::parse`].
    pub fn parse_document(contents: &str) -> ConfResult<Option<Self>> {
        Self::parse_named(INLINE_ORIGIN, contents)
    }

    pub(crate) fn parse_named(origin: &str, contents: &str) -> ConfResult<Option<Self>> {
        Ok(read(origin, contents)?.and_then(|(tree, null_root)| (!null_root).then_some(tree)))
    }

    /// Parse a flag payload. Unlike a document, a lone null such as `null`
    /// is kept as a scalar, and an empty payload is a blank scalar.
    pub(crate) fn parse_fragment(payload: &str) -> ConfResult<Self> {
        Ok(read(INLINE_ORIGIN, payload)?.map_or_else(|| Self::scalar(""), |(tree, _)| tree))
    }

    /// Deep-copy the subtree at `id` into fresh nodes of this tree.
    fn duplicate(&mut self, id: NodeId) -> NodeId {
        let Some(data) = self.data(id).cloned() else {
            return id;
        };
        let copy = match data {
            NodeData::Val(value) => NodeData::Val(value),
            NodeData::Seq(items) => {
                NodeData::Seq(items.into_iter().map(|item| self.duplicate(item)).collect())
            }
            NodeData::Map(entries) => NodeData::Map(
                entries
                    .into_iter()
                    .map(|(key, child)| (key, self.duplicate(child)))
                    .collect(),
            ),
        };
        self.alloc(copy)
    }

    /// Export the subtree at `id` as a JSON value with string scalars.
    #[must_use]
    pub fn to_value(&self, id: NodeId) -> Value {
        match self.data(id) {
            Some(NodeData::Val(v)) => Value::String(v.clone()),
            Some(NodeData::Seq(items)) => {
                Value::Array(items.iter().map(|item| self.to_value(*item)).collect())
            }
            Some(NodeData::Map(entries)) => Value::Object(
                entries
                    .iter()
                    .map(|(key, child)| (key.clone(), self.to_value(*child)))
                    .collect::<Map<String, Value>>(),
            ),
            None => Value::Null,
        }
    }
}

/// Structural equality: map key order is ignored, sequence order is not.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.to_value(self.root) == other.to_value(other.root)
    }
}

impl Eq for Tree {}

struct NodeRef<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.tree.data(self.id) {
            Some(NodeData::Val(v)) => serializer.serialize_str(v),
            Some(NodeData::Seq(items)) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&NodeRef {
                        tree: self.tree,
                        id: *item,
                    })?;
                }
                seq.end()
            }
            Some(NodeData::Map(entries)) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, child) in entries {
                    map.serialize_entry(
                        key,
                        &NodeRef {
                            tree: self.tree,
                            id: *child,
                        },
                    )?;
                }
                map.end()
            }
            None => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRef {
            tree: self,
            id: self.root,
        }
        .serialize(serializer)
    }
}
