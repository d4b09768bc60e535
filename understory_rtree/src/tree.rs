// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`RTree`] handle.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::bulk;
use crate::choose;
use crate::config::RTreeConfig;
use crate::error::Result;
use crate::extract::{DefaultExtract, ToBBox};
use crate::node::{Children, Node};
use crate::split;
use crate::types::{Aabb2D, Scalar};

/// A 2D R-tree over caller-owned items.
///
/// `T` is the coordinate scalar, `I` the item type and `F` the extraction
/// function that maps an item to its rectangle.
///
/// The tree is filled wholesale with [`RTree::load`] or one item at a time with
/// [`RTree::insert`], and queried with [`RTree::search`]. Reads take `&self`
/// and never modify the tree.
pub struct RTree<T: Scalar, I, F = DefaultExtract<T, I>> {
    max_entries: usize,
    min_fill: usize,
    root: Node<T, I>,
    extract: F,
}

impl<T: Scalar, I: ToBBox<T>> RTree<T, I> {
    /// Create an empty tree whose items describe their own rectangles.
    ///
    /// Fails when `max_entries` is zero; smaller fan-outs are raised to four.
    pub fn new(max_entries: usize) -> Result<Self> {
        Self::with_extract(max_entries, <I as ToBBox<T>>::to_bbox as DefaultExtract<T, I>)
    }
}

impl<T, I, F> RTree<T, I, F>
where
    T: Scalar,
    F: Fn(&I) -> Aabb2D<T>,
{
    /// Create an empty tree with a custom extraction function.
    pub fn with_extract(max_entries: usize, extract: F) -> Result<Self> {
        Self::from_config(RTreeConfig::new(max_entries), extract)
    }

    /// Create an empty tree from a config.
    pub fn from_config(config: RTreeConfig, extract: F) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            max_entries: config.max_entries,
            min_fill: config.min_fill(),
            root: Node::leaf(Vec::new()),
            extract,
        })
    }

    /// Replace the whole contents with `items`, bulk-loaded in one pass.
    pub fn load(&mut self, items: impl IntoIterator<Item = I>) -> &mut Self {
        let items: Vec<I> = items.into_iter().collect();
        let count = items.len();
        self.root = bulk::build(items, self.max_entries, &self.extract);
        log::debug!(
            "loaded {count} items, height {}, root fan-out {}",
            self.root.height(),
            self.root.len()
        );
        self
    }

    /// Add a single item, splitting overflowing nodes on the way back up.
    pub fn insert(&mut self, item: I) -> &mut Self {
        let bbox = (self.extract)(&item);
        let split = insert_into(
            &mut self.root,
            item,
            &bbox,
            self.max_entries,
            self.min_fill,
            &self.extract,
        );
        if let Some(sibling) = split {
            let old = core::mem::replace(&mut self.root, Node::leaf(Vec::new()));
            let bbox = old.bbox.union(&sibling.bbox);
            self.root = Node {
                bbox,
                children: Children::Nodes(vec![old, sibling]),
            };
            log::trace!("root split, height now {}", self.root.height());
        }
        self
    }

    /// Items whose rectangle intersects `bbox`, in pre-order.
    pub fn search(&self, bbox: &Aabb2D<T>) -> Vec<&I> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if !node.bbox.intersects(bbox) {
                continue;
            }
            match &node.children {
                Children::Items(items) => {
                    out.extend(items.iter().filter(|i| bbox.intersects(&(self.extract)(*i))));
                }
                // Reversed so that the first child is popped first.
                Children::Nodes(nodes) => stack.extend(nodes.iter().rev()),
            }
        }
        out
    }

    /// Whether any item intersects `bbox`.
    pub fn collides(&self, bbox: &Aabb2D<T>) -> bool {
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if !node.bbox.intersects(bbox) {
                continue;
            }
            match &node.children {
                Children::Items(items) => {
                    if items.iter().any(|i| bbox.intersects(&(self.extract)(i))) {
                        return true;
                    }
                }
                Children::Nodes(nodes) => stack.extend(nodes.iter()),
            }
        }
        false
    }

    /// The leaf that an item with rectangle `bbox` would be placed in.
    pub fn choose_subtree(&self, bbox: &Aabb2D<T>) -> &Node<T, I> {
        choose::choose_leaf(&self.root, bbox)
    }

    /// The extraction function.
    pub fn extract(&self) -> &F {
        &self.extract
    }
}

impl<T: Scalar, I, F> RTree<T, I, F> {
    /// Every item, in pre-order.
    pub fn all(&self) -> Vec<&I> {
        let mut out = Vec::with_capacity(self.len());
        self.root.for_each_leaf(&mut |leaf| {
            if let Children::Items(items) = &leaf.children {
                out.extend(items.iter());
            }
        });
        out
    }

    /// Read-only view of the root node.
    pub fn export(&self) -> &Node<T, I> {
        &self.root
    }

    /// Deep copy of the root node, independent of the tree.
    pub fn export_owned(&self) -> Node<T, I>
    where
        I: Clone,
    {
        self.root.clone()
    }

    /// Adopt `root` as the new contents, as-is.
    ///
    /// Nothing is validated; a node whose bboxes do not cover its children
    /// yields wrong query results. See [`Node::check`].
    pub fn import(&mut self, root: Node<T, I>) -> &mut Self {
        log::debug!("imported {} items", root.item_count());
        self.root = root;
        self
    }

    /// Consume the tree and return its root.
    pub fn into_root(self) -> Node<T, I> {
        self.root
    }

    /// Drop every item.
    pub fn clear(&mut self) -> &mut Self {
        log::debug!("cleared {} items", self.root.item_count());
        self.root = Node::leaf(Vec::new());
        self
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.root.item_count()
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Levels from the root to the leaves; a lone root leaf has height 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Bounding box of everything in the tree (the empty accumulator when empty).
    pub fn bbox(&self) -> Aabb2D<T> {
        self.root.bbox
    }

    /// Effective maximum children per node.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Minimum children per node produced by a split.
    pub fn min_fill(&self) -> usize {
        self.min_fill
    }
}

fn insert_into<T, I, F>(
    node: &mut Node<T, I>,
    item: I,
    bbox: &Aabb2D<T>,
    max_entries: usize,
    min_fill: usize,
    extract: &F,
) -> Option<Node<T, I>>
where
    T: Scalar,
    F: Fn(&I) -> Aabb2D<T>,
{
    node.bbox.extend(bbox);
    if matches!(&node.children, Children::Nodes(nodes) if nodes.is_empty()) {
        node.children = Children::Items(Vec::new());
    }
    match &mut node.children {
        Children::Items(items) => items.push(item),
        Children::Nodes(nodes) => {
            if let Some(idx) = choose::choose_child(nodes, bbox) {
                let split = insert_into(&mut nodes[idx], item, bbox, max_entries, min_fill, extract);
                if let Some(sibling) = split {
                    nodes.insert(idx + 1, sibling);
                }
            }
        }
    }
    if node.len() > max_entries {
        Some(split_node(node, min_fill, extract))
    } else {
        None
    }
}

/// Split an overflowing node in place and return the new right sibling.
fn split_node<T, I, F>(node: &mut Node<T, I>, min_fill: usize, extract: &F) -> Node<T, I>
where
    T: Scalar,
    F: Fn(&I) -> Aabb2D<T>,
{
    let before = node.len();
    let mut right = match &mut node.children {
        Children::Items(items) => {
            let (left, right) = split::split_entries(core::mem::take(items), min_fill, extract);
            *items = left;
            Node::leaf(right)
        }
        Children::Nodes(nodes) => {
            let (left, right) =
                split::split_entries(core::mem::take(nodes), min_fill, |n: &Node<T, I>| n.bbox);
            *nodes = left;
            Node::internal(right)
        }
    };
    node.bbox = node.children_bbox(extract);
    right.bbox = right.children_bbox(extract);
    log::trace!(
        "split {} node of {before} entries into {} + {}",
        if node.is_leaf() { "leaf" } else { "internal" },
        node.len(),
        right.len()
    );
    right
}

impl<T: Scalar, I, F> Debug for RTree<T, I, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_entries", &self.max_entries)
            .field("min_fill", &self.min_fill)
            .field("items", &self.len())
            .field("height", &self.height())
            .field("bbox", &self.root.bbox)
            .finish_non_exhaustive()
    }
}
