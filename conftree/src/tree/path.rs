//! Target path grammar and resolution.
//!
//! Paths are dot-separated map keys, each optionally followed by one or more
//! `[N]` sequence indices: `key1.key1val0[1]`, `matrix[0][2]`, `[3].name`.
//! The empty path addresses the root.

use std::sync::Arc;

use crate::{ConfError, ConfResult};

use super::{NodeId, NodeKind, Tree};

/// Most blank elements a single index may append to a sequence.
pub const MAX_SEQ_GROWTH: usize = 1 << 16;

/// One step of a parsed target path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    /// Descend into a map child.
    Key(String),
    /// Descend into a sequence element.
    Index(usize),
}

/// Split a target path into segments.
///
/// # Errors
///
/// Returns [`ConfError::InvalidPath`] for empty keys, unclosed or
/// non-numeric brackets, and text trailing a closing bracket.
///
/// # Examples
///
/// ```rust
/// use conftree::{PathSegment, parse_path};
///
/// let segments = parse_path("key1.key1val0[1]")?;
/// assert_eq!(
///     segments,
///     vec![
///         PathSegment::Key("key1".into()),
///         PathSegment::Key("key1val0".into()),
///         PathSegment::Index(1),
///     ]
/// );
/// assert!(parse_path("")?.is_empty());
/// # Ok::<_, std::sync::Arc<conftree::ConfError>>(())
/// ```
pub fn parse_path(path: &str) -> ConfResult<Vec<PathSegment>> {
    let mut segments = Vec::new();
    if path.is_empty() {
        return Ok(segments);
    }
    for (position, part) in path.split('.').enumerate() {
        parse_part(path, part, position == 0, &mut segments)?;
    }
    Ok(segments)
}

fn parse_part(
    path: &str,
    part: &str,
    first: bool,
    segments: &mut Vec<PathSegment>,
) -> ConfResult<()> {
    let (key, mut rest) = part.find('[').map_or((part, ""), |at| part.split_at(at));
    if key.contains(']') {
        return Err(invalid(path, format!("unexpected ']' in '{part}'")));
    }
    if key.is_empty() {
        // Only the very first segment may start with an index, addressing the root.
        if !(first && !rest.is_empty()) {
            return Err(invalid(path, "empty key"));
        }
    } else {
        segments.push(PathSegment::Key(key.to_owned()));
    }
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return Err(invalid(path, format!("unexpected text '{rest}'")));
        };
        let Some((digits, tail)) = inner.split_once(']') else {
            return Err(invalid(path, "unclosed '['"));
        };
        let index = digits
            .parse::<usize>()
            .map_err(|_| invalid(path, format!("'{digits}' is not a sequence index")))?;
        segments.push(PathSegment::Index(index));
        rest = tail;
    }
    Ok(())
}

fn invalid(path: &str, message: impl Into<String>) -> Arc<ConfError> {
    Arc::new(ConfError::invalid_path(path, message))
}

fn vanished(path: &str) -> Arc<ConfError> {
    invalid(path, "node vanished during resolution")
}

impl Tree {
    /// Resolve `path` without modifying the tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfError::InvalidPath`] when `path` is malformed.
    pub fn lookup(&self, path: &str) -> ConfResult<Option<NodeId>> {
        let segments = parse_path(path)?;
        let mut node = self.root;
        for segment in &segments {
            let next = match segment {
                PathSegment::Key(key) => self.get_key(node, key),
                PathSegment::Index(index) => self.get_index(node, *index),
            };
            let Some(next) = next else {
                return Ok(None);
            };
            node = next;
        }
        Ok(Some(node))
    }

    /// Resolve `path`, creating whatever is missing along the way.
    ///
    /// Missing map keys are inserted, nodes of the wrong kind are converted
    /// (losing their previous contents), and sequences shorter than a
    /// requested index are padded with blank scalars up to and including
    /// that index. A newly created final node is a blank scalar.
    ///
    /// # Errors
    ///
    /// Returns [`ConfError::InvalidPath`] when `path` is malformed or an
    /// index would grow a sequence by more than [`MAX_SEQ_GROWTH`] elements.
    pub fn lookup_or_create(&mut self, path: &str) -> ConfResult<NodeId> {
        let segments = parse_path(path)?;
        self.check_growth(path, &segments)?;
        let mut node = self.root;
        for segment in &segments {
            node = match segment {
                PathSegment::Key(key) => self
                    .key_or_create(node, key)
                    .ok_or_else(|| vanished(path))?,
                PathSegment::Index(index) => self.index_or_create(path, node, *index)?,
            };
        }
        Ok(node)
    }

    /// Resolve or create `path` and make it the scalar `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfError::InvalidPath`] as [`Tree::lookup_or_create`] does.
    pub fn set_path(&mut self, path: &str, value: impl Into<String>) -> ConfResult<NodeId> {
        let node = self.lookup_or_create(path)?;
        self.set_val(node, value);
        Ok(node)
    }

    /// Reject `segments` before anything is created when one of its indices
    /// would append more than [`MAX_SEQ_GROWTH`] elements.
    fn check_growth(&self, path: &str, segments: &[PathSegment]) -> ConfResult<()> {
        let mut node = Some(self.root);
        for segment in segments {
            node = match segment {
                PathSegment::Key(key) => node.and_then(|id| self.get_key(id, key)),
                PathSegment::Index(index) => {
                    let len = node
                        .filter(|id| self.kind(*id) == Some(NodeKind::Seq))
                        .map_or(0, |id| self.len(id));
                    let missing = index.saturating_add(1).saturating_sub(len);
                    if missing > MAX_SEQ_GROWTH {
                        return Err(invalid(
                            path,
                            format!(
                                "index {index} would append {missing} elements, \
                                 more than the limit of {MAX_SEQ_GROWTH}"
                            ),
                        ));
                    }
                    node.and_then(|id| self.get_index(id, *index))
                }
            };
        }
        Ok(())
    }

    fn key_or_create(&mut self, node: NodeId, key: &str) -> Option<NodeId> {
        if self.kind(node)? != NodeKind::Map {
            self.to_map(node);
        }
        self.insert_key(node, key)
    }

    fn index_or_create(&mut self, path: &str, node: NodeId, index: usize) -> ConfResult<NodeId> {
        if self.kind(node).ok_or_else(|| vanished(path))? != NodeKind::Seq {
            self.to_seq(node);
        }
        let missing = index.saturating_add(1).saturating_sub(self.len(node));
        self.nodes
            .try_reserve(missing)
            .map_err(|err| invalid(path, format!("cannot grow sequence to index {index}: {err}")))?;
        for _ in 0..missing {
            self.append_child(node).ok_or_else(|| vanished(path))?;
        }
        self.get_index(node, index).ok_or_else(|| vanished(path))
    }
}
