//! Role tree definitions as supplied by the caller.

use crate::action::Action;
use indexmap::IndexMap;
use std::sync::Arc;

/// A recursive role definition.
///
/// The root definition has no name of its own; it is named by the manager's
/// configured root name. Every child is named by its key in the parent's
/// `children` mapping. Children keep their insertion order, which is also the
/// order in which the tree is traversed and validated.
///
/// # Example
/// ```rust
/// use role_tree::RoleSpec;
///
/// let spec: RoleSpec = RoleSpec::new()
///     .actions(["user.signup", "user.login"])
///     .child("regular", RoleSpec::new().action("user.logout"));
///
/// assert_eq!(spec.actions.len(), 2);
/// assert!(spec.children.contains_key("regular"));
/// ```
#[derive(Debug)]
pub struct RoleSpec<C = ()> {
    /// Actions granted to this role and all of its descendants.
    pub actions: Vec<Action>,
    /// Child roles, keyed by role name.
    pub children: IndexMap<String, RoleSpec<C>>,
    /// Caller data. The built node shares this allocation; it is never
    /// cloned.
    pub custom: Option<Arc<C>>,
}

impl<C> Clone for RoleSpec<C> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
            children: self.children.clone(),
            custom: self.custom.clone(),
        }
    }
}

impl<C> RoleSpec<C> {
    /// Create an empty role definition.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            children: IndexMap::new(),
            custom: None,
        }
    }

    /// Add an action.
    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Add multiple actions.
    pub fn actions<A: Into<Action>>(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    /// Add a child role. A later child with the same key replaces the earlier
    /// one in place.
    pub fn child(mut self, name: impl Into<String>, child: RoleSpec<C>) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    /// Attach caller data.
    pub fn custom(self, custom: C) -> Self {
        self.shared_custom(Arc::new(custom))
    }

    /// Attach caller data the caller keeps a handle to.
    pub fn shared_custom(mut self, custom: Arc<C>) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Count every definition below this one.
    pub fn count_descendants(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.count_descendants())
            .sum()
    }
}

impl<C> Default for RoleSpec<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_child_order() {
        let spec: RoleSpec = RoleSpec::new()
            .child("b", RoleSpec::new())
            .child("a", RoleSpec::new().child("a1", RoleSpec::new()))
            .child("c", RoleSpec::new());

        let keys: Vec<&str> = spec.children.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(spec.count_descendants(), 4);
    }

    #[test]
    fn test_builder_actions_and_custom() {
        let spec = RoleSpec::new()
            .action("a")
            .actions(vec!["b", "c"])
            .custom(42u32);

        assert_eq!(spec.actions, vec![Action::from("a"), "b".into(), "c".into()]);
        assert_eq!(spec.custom.as_deref(), Some(&42));
    }

    #[test]
    fn test_clone_shares_custom_data() {
        let data = Arc::new(String::from("payload"));
        let spec: RoleSpec<String> = RoleSpec::new().shared_custom(Arc::clone(&data));
        let copy = spec.clone();

        assert!(Arc::ptr_eq(copy.custom.as_ref().unwrap(), &data));
        assert_eq!(Arc::strong_count(&data), 3);
    }

    #[test]
    fn test_payload_need_not_be_clone() {
        struct Handle(u8);

        let spec = RoleSpec::new().child("a", RoleSpec::new().custom(Handle(7)));
        let copy = spec.clone();
        assert_eq!(copy.children["a"].custom.as_ref().map(|handle| handle.0), Some(7));
    }
}
