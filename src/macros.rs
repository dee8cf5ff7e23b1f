//! Convenience macros for defining role trees.

/// Macro for creating a list of actions with a clean syntax.
///
/// Every element goes through `Action::from`, so literals, patterns and
/// predicates can be mixed.
///
/// # Examples
///
/// ```rust
/// use role_tree::{actions, Predicate};
///
/// let refund = Predicate::new("order.refund");
/// let list = actions!["user.login", refund.clone(), regex::Regex::new("^user\\.").unwrap()];
///
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! actions {
    ($($action:expr),* $(,)?) => {
        vec![$(
            $crate::action::Action::from($action)
        ),*]
    };
}

/// Macro for defining a whole role tree in a single expression.
///
/// Sections are optional but must appear in the order `actions`, `children`,
/// `custom`.
///
/// # Examples
///
/// ```rust
/// use role_tree::{role_spec, RoleManager, RoleSpec};
///
/// let spec: RoleSpec = role_spec! {
///     actions: ["user.signup", "user.login"],
///     children: {
///         "regular" => {
///             actions: ["user.logout"],
///             children: {
///                 "premium" => { actions: ["premium.action1"] },
///             },
///         },
///     },
/// };
///
/// let manager = RoleManager::new(spec)?;
/// assert!(manager.can("premium", "user.login"));
/// # Ok::<(), role_tree::Error>(())
/// ```
#[macro_export]
macro_rules! role_spec {
    (
        $(actions: [$($action:expr),* $(,)?] $(,)?)?
        $(children: { $($name:expr => { $($child:tt)* }),* $(,)? } $(,)?)?
        $(custom: $custom:expr $(,)?)?
    ) => {
        {
            let spec = $crate::spec::RoleSpec::new();
            $(
                let spec = spec $(.action($action))*;
            )?
            $(
                let spec = spec $(.child($name, $crate::role_spec!($($child)*)))*;
            )?
            $(
                let spec = spec.custom($custom);
            )?
            spec
        }
    };
}
