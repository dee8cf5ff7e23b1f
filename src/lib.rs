//! # Role Tree
//!
//! This crate models a hierarchical role tree: a root role whose descendants
//! inherit all of its actions, plus their own. It answers two questions:
//!
//! - can role R perform action A?
//! - is role set S an instance of role R, through inheritance?
//!
//! ## Features
//!
//! - Role trees defined with a builder or the [`role_spec!`] macro
//! - Upward-only inheritance of actions
//! - Literal, regular expression and identity-compared predicate actions
//! - Duplicate role names rejected at construction time
//! - Optional super role that passes every check
//! - Immutable once built, shareable between threads
//!
//! ## Quick Start
//!
//! ```rust
//! use role_tree::{RoleManager, RoleSpec, Pattern};
//!
//! // _public_ (root)
//! //   └─regular
//! //        ├─salesman
//! //        └─premium
//! let manager = RoleManager::new(
//!     RoleSpec::<()>::new()
//!         .actions(["user.signup", "user.login"])
//!         .child(
//!             "regular",
//!             RoleSpec::new()
//!                 .actions(["user.logout", "user.upgrade"])
//!                 .child("salesman", RoleSpec::new().action(Pattern::new(r"^salesman\.").unwrap()))
//!                 .child("premium", RoleSpec::new().action("premium.action1")),
//!         ),
//! )?;
//!
//! assert!(manager.can("premium", "user.signup"));
//! assert!(!manager.can("regular", "premium.action1"));
//! assert!(manager.can("salesman", "salesman.anything"));
//! assert!(manager.is(["salesman"], "regular"));
//! # Ok::<(), role_tree::Error>(())
//! ```
//!
//! ## Audit Logging
//!
//! When the `audit` feature is enabled, Role Tree logs tree construction and
//! every query decision using the standard Rust logging framework. To enable
//! logging:
//!
//! ```rust
//! use role_tree::init_audit_logger;
//!
//! // Initialize logging (must be called early in program execution)
//! init_audit_logger();
//!
//! // Configure log level through RUST_LOG environment variable:
//! // RUST_LOG=info,role_tree=debug
//! ```
//!
//! The following events are logged:
//! - Tree construction (info) and rejection (warn)
//! - `can` and `is` decisions (debug)
//! - Unknown roles skipped during `can` (debug)

#[cfg(feature = "audit")]
pub fn init_audit_logger() {
    env_logger::init();
}

pub mod action;
pub mod config;
pub mod error;
pub mod macros;
pub mod manager;
pub mod node;
pub mod roles;
pub mod spec;
pub mod util;

// Re-export main types for convenience
pub use crate::{
    action::{Action, Pattern, Predicate},
    config::{RoleManagerConfig, RoleManagerConfigBuilder, DEFAULT_ROOT},
    error::{Error, Result},
    manager::{Quantifier, RoleManager},
    node::{Direction, NodeId, NodeRef, RoleNode, RoleTree, VisitOutcome, WalkOptions},
    roles::Roles,
    spec::RoleSpec,
};
