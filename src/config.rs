//! Manager configuration.

/// Name given to the root role when no other name is configured.
pub const DEFAULT_ROOT: &str = "_public_";

/// Configuration for a [`RoleManager`](crate::RoleManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleManagerConfig {
    /// Name of the root role. The root definition has no key in any parent
    /// mapping, so it takes this name instead.
    pub root_name: String,
    /// Role that passes every `can` and `is` check when present in the
    /// queried role set. It does not have to exist in the tree.
    pub super_role: Option<String>,
}

impl Default for RoleManagerConfig {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT.to_string(),
            super_role: None,
        }
    }
}

/// Builder for creating manager configurations.
///
/// # Example
/// ```rust
/// use role_tree::RoleManagerConfigBuilder;
///
/// let config = RoleManagerConfigBuilder::new()
///     .root_name("guest")
///     .super_role("root")
///     .build();
///
/// assert_eq!(config.root_name, "guest");
/// assert_eq!(config.super_role.as_deref(), Some("root"));
/// ```
pub struct RoleManagerConfigBuilder {
    config: RoleManagerConfig,
}

impl RoleManagerConfigBuilder {
    /// Create a new builder starting from the default configuration.
    pub fn new() -> Self {
        Self {
            config: RoleManagerConfig::default(),
        }
    }

    /// Set the root role name.
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.config.root_name = name.into();
        self
    }

    /// Set the super role.
    pub fn super_role(mut self, role: impl Into<String>) -> Self {
        self.config.super_role = Some(role.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> RoleManagerConfig {
        self.config
    }
}

impl Default for RoleManagerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
