//! Role manager implementation.
//!
//! This module contains [`RoleManager`], which turns a [`RoleSpec`] into a
//! validated [`RoleTree`] and answers permission and ancestry queries on it.
//!
//! # Inheritance
//!
//! A role holds its own actions plus every action of its ancestors, so a role
//! can always do what its parent can do, never what its children can do.
//!
//! # Lifecycle
//!
//! Construction snapshots the definition, converts it into a tree and checks
//! that role names are unique. A manager that exists is always valid; there is
//! no API to change it afterwards, so a built manager can be shared between
//! threads without locking.

#[cfg(feature = "audit")]
use log::{debug, info, warn};

use crate::{
    action::Action,
    config::RoleManagerConfig,
    error::{Error, Result},
    node::{Direction, NodeRef, RoleTree, WalkOptions},
    roles::Roles,
    spec::RoleSpec,
    util::unique,
};
use std::collections::HashSet;

/// How [`RoleManager::is_with`] combines the answers for several roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantifier {
    /// At least one role must be, or descend from, the target.
    #[default]
    Any,
    /// Every role must be, or descend from, the target.
    All,
}

/// Builds, validates and queries a role tree.
///
/// # Example
/// ```rust
/// use role_tree::{RoleManager, RoleSpec};
///
/// let manager = RoleManager::new(
///     RoleSpec::<()>::new()
///         .actions(["user.signup", "user.login"])
///         .child("regular", RoleSpec::new().action("user.logout")),
/// )?;
///
/// assert!(manager.can("regular", "user.signup"));
/// assert!(!manager.can("_public_", "user.logout"));
/// assert!(manager.is("regular", "_public_"));
/// # Ok::<(), role_tree::Error>(())
/// ```
#[derive(Debug)]
pub struct RoleManager<C = ()> {
    raw: RoleSpec<C>,
    tree: RoleTree<C>,
    config: RoleManagerConfig,
    // Every role name, in pre-order
    roles: Vec<String>,
    // Every declared action, flattened in pre-order
    actions: Vec<Action>,
}

impl<C> Clone for RoleManager<C> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            tree: self.tree.clone(),
            config: self.config.clone(),
            roles: self.roles.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<C> RoleManager<C> {
    /// Build a manager with the default configuration.
    pub fn new(spec: RoleSpec<C>) -> Result<Self> {
        Self::with_config(spec, RoleManagerConfig::default())
    }

    /// Build a manager with a custom configuration.
    ///
    /// Fails with [`Error::DuplicateRoleName`] naming the first role, in
    /// pre-order, whose name was already used.
    pub fn with_config(spec: RoleSpec<C>, config: RoleManagerConfig) -> Result<Self> {
        let tree = RoleTree::convert(&spec, config.root_name.clone());
        let mut manager = Self {
            raw: spec,
            tree,
            config,
            roles: Vec::new(),
            actions: Vec::new(),
        };

        if let Err(err) = manager.analyze() {
            #[cfg(feature = "audit")]
            warn!("Role tree rejected: {err}");
            return Err(err);
        }

        #[cfg(feature = "audit")]
        info!(
            "Role tree loaded: {} roles, {} actions, root '{}'",
            manager.roles.len(),
            manager.actions.len(),
            manager.config.root_name
        );

        Ok(manager)
    }

    fn analyze(&mut self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut roles = Vec::with_capacity(self.tree.len());
        let mut actions = Vec::new();
        let mut duplicate = None;

        self.tree.root().walk_down(
            |node| {
                let role = node.role();
                if !seen.insert(role) {
                    duplicate = Some(role.to_string());
                    return false;
                }
                roles.push(role.to_string());
                actions.extend(node.actions().iter().cloned());
                true
            },
            &WalkOptions::new().short_circuit(true),
        );

        if let Some(role) = duplicate {
            return Err(Error::DuplicateRoleName(role));
        }

        self.roles = roles;
        self.actions = actions;
        Ok(())
    }

    /// Check whether any of `roles` may perform `action`.
    ///
    /// An empty role set is evaluated as the root role alone. Unknown roles
    /// contribute no actions and do not fail the query.
    pub fn can<'r>(&self, roles: impl Into<Roles<'r>>, action: impl Into<Action>) -> bool {
        let roles: Roles<'r> = roles.into();
        let action = action.into();

        if self.includes_super(&roles) {
            #[cfg(feature = "audit")]
            debug!("Action '{action}' GRANTED to {roles:?} through super role");
            return true;
        }

        let roles = roles.or_root(&self.config.root_name);
        for role in roles.iter() {
            let Some(node) = self.get_role(role) else {
                #[cfg(feature = "audit")]
                debug!("Skipping undefined role '{role}' while checking '{action}'");
                continue;
            };

            if node
                .collect_actions()
                .into_iter()
                .any(|granted| granted.grants(&action))
            {
                #[cfg(feature = "audit")]
                debug!("Action '{action}' GRANTED to role '{role}'");
                return true;
            }
        }

        #[cfg(feature = "audit")]
        debug!("Action '{action}' DENIED to {roles:?}");
        false
    }

    /// Check whether any of `roles` is `target` or descends from it.
    pub fn is<'r>(&self, roles: impl Into<Roles<'r>>, target: &str) -> bool {
        self.is_with(roles, target, Quantifier::Any)
    }

    /// Check whether every one of `roles` is `target` or descends from it.
    ///
    /// Always false for an empty role set.
    pub fn is_all<'r>(&self, roles: impl Into<Roles<'r>>, target: &str) -> bool {
        self.is_with(roles, target, Quantifier::All)
    }

    /// Ancestry check with an explicit quantifier.
    ///
    /// An empty role set is evaluated as the root role alone, except under
    /// [`Quantifier::All`] where it is rejected outright. An unknown role has
    /// no ancestors, so it never satisfies the check.
    pub fn is_with<'r>(
        &self,
        roles: impl Into<Roles<'r>>,
        target: &str,
        quantifier: Quantifier,
    ) -> bool {
        let roles: Roles<'r> = roles.into();

        if self.includes_super(&roles) {
            return true;
        }
        if quantifier == Quantifier::All && roles.is_empty() {
            return false;
        }

        let roles = roles.or_root(&self.config.root_name);
        let mut chains = roles
            .iter()
            .map(|role| self.ancestor_roles(role).contains(&target));

        let result = match quantifier {
            Quantifier::Any => chains.any(|found| found),
            Quantifier::All => chains.all(|found| found),
        };

        #[cfg(feature = "audit")]
        debug!("Ancestry check {roles:?} is '{target}' ({quantifier:?}): {result}");

        result
    }

    /// Every role name reachable upwards from `roles`, without duplicates.
    pub fn calc_complete_roles<'r>(&self, roles: impl Into<Roles<'r>>) -> Vec<&str> {
        self.calc_complete_values(roles, Direction::Up, |node| Some(node.role()))
    }

    /// Every action held by `roles`, inherited ones included, without
    /// duplicates.
    pub fn calc_complete_actions<'r>(&self, roles: impl Into<Roles<'r>>) -> Vec<&Action> {
        self.calc_complete_values(roles, Direction::Up, |node| node.actions())
    }

    /// Collect values read off the nodes along `direction` from each of
    /// `roles`, concatenated and without duplicates.
    ///
    /// Unknown roles contribute nothing.
    pub fn calc_complete_values<'a, 'r, T, I, F>(
        &'a self,
        roles: impl Into<Roles<'r>>,
        direction: Direction,
        mut read: F,
    ) -> Vec<T>
    where
        T: PartialEq,
        I: IntoIterator<Item = T>,
        F: FnMut(NodeRef<'a, C>) -> I,
    {
        let roles: Roles<'_> = roles.into();
        let roles = roles.or_root(&self.config.root_name);
        let values: Vec<T> = roles
            .iter()
            .filter_map(|role| self.get_role(role))
            .flat_map(|node| node.collect_values(direction, &mut read))
            .collect();
        unique(values)
    }

    /// Look up a role, failing with [`Error::UnknownRole`] if it is not
    /// part of the tree.
    pub fn find_by_role(&self, role: &str) -> Result<NodeRef<'_, C>> {
        self.get_role(role)
            .ok_or_else(|| Error::UnknownRole(role.to_string()))
    }

    /// Look up a role.
    pub fn get_role(&self, role: &str) -> Option<NodeRef<'_, C>> {
        self.tree
            .find_by_role(self.tree.root_id(), role)
            .and_then(|id| self.tree.get(id))
    }

    /// The root role.
    pub fn root(&self) -> NodeRef<'_, C> {
        self.tree.root()
    }

    /// The materialized tree.
    pub fn tree(&self) -> &RoleTree<C> {
        &self.tree
    }

    /// The definition the tree was built from.
    pub fn raw(&self) -> &RoleSpec<C> {
        &self.raw
    }

    /// Every role name, in pre-order.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Every declared action across the tree, in pre-order. Not de-duplicated.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The configuration the manager was built with.
    pub fn config(&self) -> &RoleManagerConfig {
        &self.config
    }

    fn includes_super(&self, roles: &Roles<'_>) -> bool {
        self.config
            .super_role
            .as_deref()
            .is_some_and(|super_role| roles.contains(super_role))
    }

    fn ancestor_roles(&self, role: &str) -> Vec<&str> {
        self.get_role(role)
            .map(|node| node.collect_roles(Direction::Up))
            .unwrap_or_default()
    }
}
