//! The materialized role tree.
//!
//! Nodes are stored in an arena ([`RoleTree`]) and refer to each other through
//! [`NodeId`] handles: a node owns its children through the tree, and knows its
//! parent only by handle. [`NodeRef`] is a cheap borrowed view pairing a tree
//! with one of its handles; all traversal and collection operations live there.
//!
//! The tree is built once by [`RoleTree::convert`] and never changes
//! afterwards.

use crate::{action::Action, spec::RoleSpec, util::unique};
use indexmap::IndexMap;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

/// Handle to a node inside a [`RoleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena. The root is always at index 0.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Traversal direction for value collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// From a node through its ancestors to the root.
    #[default]
    Up,
    /// From a node through all of its descendants, pre-order.
    Down,
}

/// A single role in the tree.
#[derive(Debug)]
pub struct RoleNode<C = ()> {
    role: String,
    actions: Vec<Action>,
    children: IndexMap<String, NodeId>,
    custom: Option<Arc<C>>,
    parent: Option<NodeId>,
}

impl<C> Clone for RoleNode<C> {
    fn clone(&self) -> Self {
        Self {
            role: self.role.clone(),
            actions: self.actions.clone(),
            children: self.children.clone(),
            custom: self.custom.clone(),
            parent: self.parent,
        }
    }
}

impl<C> RoleNode<C> {
    /// The role name.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Actions declared on this role, without inherited ones.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Caller data shared with the definition.
    pub fn custom(&self) -> Option<&C> {
        self.custom.as_deref()
    }

    /// The shared handle to the caller data.
    pub fn shared_custom(&self) -> Option<&Arc<C>> {
        self.custom.as_ref()
    }

    /// Handle of the parent node; `None` for the root.
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }

    /// Handles of the direct children, in definition order.
    pub fn child_ids(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

/// Arena holding every node of one role tree.
#[derive(Debug)]
pub struct RoleTree<C = ()> {
    nodes: Vec<RoleNode<C>>,
}

impl<C> Clone for RoleTree<C> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<C> RoleTree<C> {
    /// Build a tree from a definition, naming the root `root_name`.
    ///
    /// Actions are copied onto the nodes as they are and custom data is
    /// shared with the definition; children are named after their keys.
    /// Nodes are allocated in pre-order.
    pub fn convert(spec: &RoleSpec<C>, root_name: impl Into<String>) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(spec.count_descendants() + 1),
        };
        tree.insert(root_name.into(), spec, None);
        tree
    }

    fn insert(&mut self, role: String, spec: &RoleSpec<C>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(RoleNode {
            role,
            actions: spec.actions.clone(),
            children: IndexMap::with_capacity(spec.children.len()),
            custom: spec.custom.as_ref().map(Arc::clone),
            parent,
        });

        for (name, child) in &spec.children {
            let child_id = self.insert(name.clone(), child, Some(id));
            self.nodes[id.0].children.insert(name.clone(), child_id);
        }

        id
    }

    /// Handle of the root node.
    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// View of the root node.
    pub fn root(&self) -> NodeRef<'_, C> {
        NodeRef {
            tree: self,
            id: self.root_id(),
        }
    }

    /// View of the node behind `id`, if it belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, C>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A converted tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Search the subtree under `from` for the first node named `role`.
    ///
    /// The search is pre-order and stops at the first hit. Returns `None` when
    /// nothing matches or `from` is not part of this tree.
    pub fn find_by_role(&self, from: NodeId, role: &str) -> Option<NodeId> {
        let mut found = None;
        self.get(from)?.walk_down(
            |node| {
                if node.role() == role {
                    found = Some(node.id());
                    false
                } else {
                    true
                }
            },
            &WalkOptions::new().short_circuit(true),
        );
        found
    }
}

/// What a traversal visitor asks for after visiting a node.
///
/// Visitors returning `()` never halt. Visitors returning `bool` halt the
/// traversal by returning `false`, but only when the walk runs with
/// [`WalkOptions::short_circuit`] enabled.
pub trait VisitOutcome {
    /// Whether the visitor requested a halt.
    fn halts(self) -> bool;
}

impl VisitOutcome for () {
    fn halts(self) -> bool {
        false
    }
}

impl VisitOutcome for bool {
    fn halts(self) -> bool {
        !self
    }
}

type StopFn<'s, C> = Box<dyn Fn(NodeRef<'_, C>) -> bool + 's>;

/// Options controlling [`NodeRef::walk_up`] and [`NodeRef::walk_down`].
///
/// By default a walk has no stop condition and ignores visitor results, so it
/// visits every node on its path.
pub struct WalkOptions<'s, C = ()> {
    stop: Option<StopFn<'s, C>>,
    short_circuit: bool,
}

impl<'s, C> WalkOptions<'s, C> {
    /// Options with no stop condition and no short-circuit.
    pub fn new() -> Self {
        Self {
            stop: None,
            short_circuit: false,
        }
    }

    /// Halt the whole walk, before visiting, at the first node for which
    /// `stop` holds.
    pub fn stop(mut self, stop: impl Fn(NodeRef<'_, C>) -> bool + 's) -> Self {
        self.stop = Some(Box::new(stop));
        self
    }

    /// Halt the whole walk when the visitor returns `false`.
    pub fn short_circuit(mut self, enable: bool) -> Self {
        self.short_circuit = enable;
        self
    }

    fn should_stop(&self, node: NodeRef<'_, C>) -> bool {
        self.stop.as_ref().is_some_and(|stop| stop(node))
    }

    fn should_halt(&self, outcome: impl VisitOutcome) -> bool {
        outcome.halts() && self.short_circuit
    }
}

impl<C> Default for WalkOptions<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for WalkOptions<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkOptions")
            .field("has_stop", &self.stop.is_some())
            .field("short_circuit", &self.short_circuit)
            .finish()
    }
}

/// Borrowed view of one node in a [`RoleTree`].
pub struct NodeRef<'a, C = ()> {
    tree: &'a RoleTree<C>,
    id: NodeId,
}

impl<C> Clone for NodeRef<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for NodeRef<'_, C> {}

impl<C> PartialEq for NodeRef<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<C> Eq for NodeRef<'_, C> {}

impl<C> fmt::Debug for NodeRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("role", &self.role())
            .finish()
    }
}

impl<'a, C> NodeRef<'a, C> {
    /// Handle of this node.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    pub fn tree(self) -> &'a RoleTree<C> {
        self.tree
    }

    /// The underlying node.
    pub fn node(self) -> &'a RoleNode<C> {
        &self.tree.nodes[self.id.0]
    }

    /// The role name.
    pub fn role(self) -> &'a str {
        &self.node().role
    }

    /// Actions declared on this role, without inherited ones.
    pub fn actions(self) -> &'a [Action] {
        &self.node().actions
    }

    /// Caller data shared with the definition.
    pub fn custom(self) -> Option<&'a C> {
        self.node().custom.as_deref()
    }

    /// The parent node; `None` for the root.
    pub fn parent(self) -> Option<Self> {
        let tree = self.tree;
        self.node().parent.map(|id| NodeRef { tree, id })
    }

    /// Direct children, in definition order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a, C>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .values()
            .map(move |&id| NodeRef { tree, id })
    }

    /// The direct child named `role`.
    pub fn child(self, role: &str) -> Option<Self> {
        let tree = self.tree;
        self.node()
            .children
            .get(role)
            .map(|&id| NodeRef { tree, id })
    }

    /// Whether this node has no parent.
    pub fn is_root(self) -> bool {
        self.node().parent.is_none()
    }

    /// Whether this node has no children.
    pub fn is_leaf(self) -> bool {
        self.node().children.is_empty()
    }

    /// Number of direct children.
    pub fn count_children(self) -> usize {
        self.node().children.len()
    }

    /// Number of nodes below this one.
    pub fn count_descendants(self) -> usize {
        let mut count = 0;
        self.walk_down(
            |node| count += node.count_children(),
            &WalkOptions::new(),
        );
        count
    }

    /// Number of nodes above this one. Zero for the root.
    pub fn count_ascendants(self) -> usize {
        let mut count = 0;
        self.walk_up(|_| count += 1, &WalkOptions::new());
        count - 1
    }

    /// Distance from the root.
    pub fn depth(self) -> usize {
        self.count_ascendants()
    }

    /// Visit this node, then each ancestor up to and including the root.
    pub fn walk_up<F, R>(self, mut visit: F, options: &WalkOptions<'_, C>)
    where
        F: FnMut(NodeRef<'a, C>) -> R,
        R: VisitOutcome,
    {
        let mut current = Some(self);
        while let Some(node) = current {
            if options.should_stop(node) || options.should_halt(visit(node)) {
                return;
            }
            current = node.parent();
        }
    }

    /// Visit this node, then every descendant in pre-order.
    pub fn walk_down<F, R>(self, mut visit: F, options: &WalkOptions<'_, C>)
    where
        F: FnMut(NodeRef<'a, C>) -> R,
        R: VisitOutcome,
    {
        let _ = self.walk_down_from(&mut visit, options);
    }

    fn walk_down_from<F, R>(self, visit: &mut F, options: &WalkOptions<'_, C>) -> ControlFlow<()>
    where
        F: FnMut(NodeRef<'a, C>) -> R,
        R: VisitOutcome,
    {
        if options.should_stop(self) || options.should_halt(visit(self)) {
            return ControlFlow::Break(());
        }
        for child in self.children() {
            if child.walk_down_from(visit, options).is_break() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Every action this role holds: its own first, then those of each
    /// ancestor from nearest to root, without duplicates.
    pub fn collect_actions(self) -> Vec<&'a Action> {
        self.collect_values(Direction::Up, |node| node.actions())
    }

    /// Role names along `direction`, starting with this node's own.
    pub fn collect_roles(self, direction: Direction) -> Vec<&'a str> {
        self.collect_values(direction, |node| Some(node.role()))
    }

    /// Read values off every node along `direction` and return them without
    /// duplicates, in visiting order.
    ///
    /// `read` may yield nothing for a node, which skips it.
    pub fn collect_values<T, I, F>(self, direction: Direction, mut read: F) -> Vec<T>
    where
        T: PartialEq,
        I: IntoIterator<Item = T>,
        F: FnMut(NodeRef<'a, C>) -> I,
    {
        let mut values = Vec::new();
        let options = WalkOptions::new();
        match direction {
            Direction::Up => self.walk_up(|node| values.extend(read(node)), &options),
            Direction::Down => self.walk_down(|node| values.extend(read(node)), &options),
        }
        unique(values)
    }
}
