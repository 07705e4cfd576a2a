//! Deep merge of one tree's subtree into another.

use super::{NodeData, NodeId, Tree};

impl Tree {
    /// Merge the subtree of `src` rooted at `src_node` into `dst`.
    ///
    /// Behaviour:
    /// - A scalar replaces `dst` wholesale, discarding any children.
    /// - A sequence turns `dst` into a sequence (if it is not one already)
    ///   and appends every source element after the existing ones.
    /// - A map turns `dst` into a map (if it is not one already) and merges
    ///   each entry recursively into the child with the same key, creating
    ///   it when absent. Keys missing from the source are preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conftree::Tree;
    ///
    /// let mut tree = Tree::parse("{a: {x: 1, y: [1, 2]}}")?;
    /// let fragment = Tree::parse("{a: {x: 9, y: [3]}, b: new}")?;
    /// let root = tree.root();
    /// tree.merge_with(root, &fragment, fragment.root());
    /// assert_eq!(tree, Tree::parse("{a: {x: 9, y: [1, 2, 3]}, b: new}")?);
    /// # Ok::<_, std::sync::Arc<conftree::ConfError>>(())
    /// ```
    pub fn merge_with(&mut self, dst: NodeId, src: &Self, src_node: NodeId) {
        match src.data(src_node) {
            Some(NodeData::Val(value)) => self.set_val(dst, value.clone()),
            Some(NodeData::Seq(items)) => {
                self.to_seq(dst);
                for item in items {
                    let Some(slot) = self.append_child(dst) else {
                        return;
                    };
                    self.merge_with(slot, src, *item);
                }
            }
            Some(NodeData::Map(entries)) => {
                self.to_map(dst);
                for (key, child) in entries {
                    let Some(slot) = self.insert_key(dst, key) else {
                        return;
                    };
                    self.merge_with(slot, src, *child);
                }
            }
            None => {}
        }
    }
}
