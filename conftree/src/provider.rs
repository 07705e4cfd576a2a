//! Figment provider exposing an assembled tree.
//!
//! Hosts that prefer typed configuration can hand the finished tree to
//! Figment and extract their own structs from it. Scalars go through
//! Figment's own string parsing, the same path environment variables take,
//! so `"8080"` extracts as a number and `"true"` as a boolean.
//!
//! ```rust
//! use conftree::{Tree, TreeProvider};
//! use figment::Figment;
//!
//! let tree = Tree::parse("server: {port: 8080, host: example.org}")?;
//! let figment = Figment::from(TreeProvider::new(&tree));
//! let port: u16 = figment.extract_inner("server.port").expect("port extracts");
//! assert_eq!(port, 8080);
//! # Ok::<_, std::sync::Arc<conftree::ConfError>>(())
//! ```

use std::collections::BTreeMap;
use std::convert::Infallible;

use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Tag, Value as FigmentValue},
};

use crate::tree::{NodeId, NodeKind, Tree};

/// Figment provider backed by a borrowed [`Tree`].
#[derive(Clone, Debug)]
pub struct TreeProvider<'t> {
    tree: &'t Tree,
    profile: Option<Profile>,
}

impl<'t> TreeProvider<'t> {
    /// Provide the contents of `tree`.
    #[must_use]
    pub const fn new(tree: &'t Tree) -> Self {
        Self {
            tree,
            profile: None,
        }
    }

    /// Override the profile this provider emits values into.
    #[must_use]
    pub fn profile<P: Into<Profile>>(mut self, profile: P) -> Self {
        self.profile = Some(profile.into());
        self
    }

    fn convert(&self, id: NodeId) -> FigmentValue {
        match self.tree.kind(id) {
            Some(NodeKind::Map) => {
                let dict: Dict = self
                    .tree
                    .keys(id)
                    .into_iter()
                    .filter_map(|key| {
                        let child = self.tree.get_key(id, key)?;
                        Some((key.to_owned(), self.convert(child)))
                    })
                    .collect();
                FigmentValue::Dict(Tag::Default, dict)
            }
            Some(NodeKind::Seq) => FigmentValue::Array(
                Tag::Default,
                self.tree
                    .children(id)
                    .into_iter()
                    .map(|child| self.convert(child))
                    .collect(),
            ),
            Some(NodeKind::Val) => {
                let text = self.tree.val(id).unwrap_or_default();
                let parsed: Result<FigmentValue, Infallible> = text.parse();
                parsed.unwrap_or_else(|never| match never {})
            }
            None => FigmentValue::from(String::new()),
        }
    }
}

impl Provider for TreeProvider<'_> {
    fn metadata(&self) -> Metadata {
        Metadata::named("conftree tree")
    }

    fn data(&self) -> Result<BTreeMap<Profile, Dict>, figment::Error> {
        let value = self.convert(self.tree.root());
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        let profile = self.profile.clone().unwrap_or(Profile::Default);
        Ok(profile.collect(dict))
    }
}
