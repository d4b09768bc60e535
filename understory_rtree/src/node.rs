// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes.
//!
//! A [`Node`] is either a leaf holding items or an internal node holding child
//! nodes. Every node carries a bbox which, once propagated, is exactly the union
//! of its direct children's rectangles.
//!
//! Nodes are plain values: they are what [`RTree::export`](crate::RTree::export)
//! hands out and what [`RTree::import`](crate::RTree::import) adopts. With the
//! `serde` feature a node travels as the record
//!
//! ```text
//! { "leaf": true,  "bbox": [min_x, min_y, max_x, max_y], "children": [item, ...] }
//! { "leaf": false, "bbox": [min_x, min_y, max_x, max_y], "children": [node, ...] }
//! ```

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::types::{Aabb2D, Scalar};

/// A node of the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<T, I> {
    /// Union of the children's rectangles.
    pub bbox: Aabb2D<T>,
    /// Items (leaf) or child nodes (internal).
    pub children: Children<T, I>,
}

/// Contents of a [`Node`].
#[derive(Clone, Debug, PartialEq)]
pub enum Children<T, I> {
    /// Leaf contents, in the order the items entered the node.
    Items(Vec<I>),
    /// Internal node contents.
    Nodes(Vec<Node<T, I>>),
}

impl<T: Scalar, I> Node<T, I> {
    /// A leaf holding `items`, with the empty accumulator as bbox.
    ///
    /// Call [`Node::propagate_bboxes`] once the structure is complete.
    pub fn leaf(items: Vec<I>) -> Self {
        Self {
            bbox: Aabb2D::empty(),
            children: Children::Items(items),
        }
    }

    /// An internal node over `children`, with the empty accumulator as bbox.
    pub fn internal(children: Vec<Self>) -> Self {
        Self {
            bbox: Aabb2D::empty(),
            children: Children::Nodes(children),
        }
    }

    /// Recompute every bbox in this subtree bottom-up.
    pub fn propagate_bboxes<F>(&mut self, extract: &F)
    where
        F: Fn(&I) -> Aabb2D<T>,
    {
        if let Children::Nodes(nodes) = &mut self.children {
            for n in nodes.iter_mut() {
                n.propagate_bboxes(extract);
            }
        }
        self.bbox = self.children_bbox(extract);
    }

    /// Union of the direct children's rectangles, ignoring the stored bbox.
    pub fn children_bbox<F>(&self, extract: &F) -> Aabb2D<T>
    where
        F: Fn(&I) -> Aabb2D<T>,
    {
        let acc = Aabb2D::empty();
        match &self.children {
            Children::Items(items) => items.iter().fold(acc, |b, i| b.union(&extract(i))),
            Children::Nodes(nodes) => nodes.iter().fold(acc, |b, n| b.union(&n.bbox)),
        }
    }

    /// Verify that every bbox in the subtree equals the union of its children.
    ///
    /// [`RTree::import`](crate::RTree::import) never calls this; run it first
    /// when the node comes from an untrusted source.
    pub fn check<F>(&self, extract: &F) -> Result<()>
    where
        F: Fn(&I) -> Aabb2D<T>,
    {
        self.check_at(extract, 0)
    }

    fn check_at<F>(&self, extract: &F, depth: usize) -> Result<()>
    where
        F: Fn(&I) -> Aabb2D<T>,
    {
        if let Children::Nodes(nodes) = &self.children {
            for n in nodes {
                n.check_at(extract, depth + 1)?;
            }
        }
        if self.children_bbox(extract) != self.bbox {
            return Err(Error::BBoxMismatch { depth });
        }
        Ok(())
    }
}

impl<T, I> Node<T, I> {
    /// Whether this node holds items.
    pub fn is_leaf(&self) -> bool {
        matches!(self.children, Children::Items(_))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        match &self.children {
            Children::Items(items) => items.len(),
            Children::Nodes(nodes) => nodes.len(),
        }
    }

    /// Whether the node has no children at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of items stored in this subtree.
    pub fn item_count(&self) -> usize {
        match &self.children {
            Children::Items(items) => items.len(),
            Children::Nodes(nodes) => nodes.iter().map(Self::item_count).sum(),
        }
    }

    /// Number of levels from this node down to a leaf, following first children.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self;
        while let Children::Nodes(nodes) = &node.children {
            let Some(first) = nodes.first() else {
                break;
            };
            node = first;
            height += 1;
        }
        height
    }

    /// Visit every leaf in pre-order.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        match &self.children {
            Children::Items(_) => f(self),
            Children::Nodes(nodes) => {
                for n in nodes {
                    n.for_each_leaf(f);
                }
            }
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Children, Node};
    use alloc::vec::Vec;
    use core::fmt;
    use core::marker::PhantomData;
    use serde::de::{Error as _, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const FIELDS: &[&str] = &["leaf", "bbox", "children"];

    impl<T: Serialize, I: Serialize> Serialize for Node<T, I> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut s = serializer.serialize_struct("Node", 3)?;
            s.serialize_field("leaf", &self.is_leaf())?;
            s.serialize_field("bbox", &self.bbox)?;
            match &self.children {
                Children::Items(items) => s.serialize_field("children", items)?,
                Children::Nodes(nodes) => s.serialize_field("children", nodes)?,
            }
            s.end()
        }
    }

    #[derive(Deserialize)]
    #[serde(field_identifier, rename_all = "lowercase")]
    enum Field {
        Leaf,
        Bbox,
        Children,
        #[serde(other)]
        Other,
    }

    // Only used when `children` arrives before `leaf`; the shape is then
    // guessed and reconciled with the flag afterwards.
    #[derive(Deserialize)]
    #[serde(untagged)]
    #[serde(bound(deserialize = "T: Deserialize<'de>, I: Deserialize<'de>"))]
    enum Buffered<T, I> {
        Nodes(Vec<Node<T, I>>),
        Items(Vec<I>),
    }

    impl<T, I> Buffered<T, I> {
        fn into_children(self, leaf: bool) -> Result<Children<T, I>, &'static str> {
            match (leaf, self) {
                (true, Self::Items(items)) => Ok(Children::Items(items)),
                (false, Self::Nodes(nodes)) => Ok(Children::Nodes(nodes)),
                (true, Self::Nodes(nodes)) if nodes.is_empty() => Ok(Children::Items(Vec::new())),
                (false, Self::Items(items)) if items.is_empty() => Ok(Children::Nodes(Vec::new())),
                (true, Self::Nodes(_)) => Err("leaf record holds nested node records"),
                (false, Self::Items(_)) => Err("internal record holds items"),
            }
        }
    }

    struct NodeVisitor<T, I>(PhantomData<fn() -> (T, I)>);

    impl<'de, T: Deserialize<'de>, I: Deserialize<'de>> Visitor<'de> for NodeVisitor<T, I> {
        type Value = Node<T, I>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a node record with `leaf`, `bbox` and `children`")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let leaf: bool = seq
                .next_element()?
                .ok_or_else(|| A::Error::invalid_length(0, &self))?;
            let bbox = seq
                .next_element()?
                .ok_or_else(|| A::Error::invalid_length(1, &self))?;
            let children = if leaf {
                seq.next_element()?.map(Children::Items)
            } else {
                seq.next_element()?.map(Children::Nodes)
            };
            let children = children.ok_or_else(|| A::Error::invalid_length(2, &self))?;
            Ok(Node { bbox, children })
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut leaf: Option<bool> = None;
            let mut bbox = None;
            let mut children = None;
            let mut buffered: Option<Buffered<T, I>> = None;
            while let Some(key) = map.next_key()? {
                match key {
                    Field::Leaf => {
                        if leaf.is_some() {
                            return Err(A::Error::duplicate_field("leaf"));
                        }
                        leaf = Some(map.next_value()?);
                    }
                    Field::Bbox => {
                        if bbox.is_some() {
                            return Err(A::Error::duplicate_field("bbox"));
                        }
                        bbox = Some(map.next_value()?);
                    }
                    Field::Children => {
                        if children.is_some() || buffered.is_some() {
                            return Err(A::Error::duplicate_field("children"));
                        }
                        match leaf {
                            Some(true) => children = Some(Children::Items(map.next_value()?)),
                            Some(false) => children = Some(Children::Nodes(map.next_value()?)),
                            None => buffered = Some(map.next_value()?),
                        }
                    }
                    Field::Other => {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
            }
            let leaf = leaf.ok_or_else(|| A::Error::missing_field("leaf"))?;
            let bbox = bbox.ok_or_else(|| A::Error::missing_field("bbox"))?;
            let children = match (children, buffered) {
                (Some(children), _) => children,
                (None, Some(b)) => b.into_children(leaf).map_err(A::Error::custom)?,
                (None, None) => return Err(A::Error::missing_field("children")),
            };
            Ok(Node { bbox, children })
        }
    }

    impl<'de, T: Deserialize<'de>, I: Deserialize<'de>> Deserialize<'de> for Node<T, I> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_struct("Node", FIELDS, NodeVisitor(PhantomData))
        }
    }
}
