//! Small collection helpers.

/// Remove duplicates, keeping the first occurrence of each value.
///
/// Only `PartialEq` is required, so this works for actions whose identity is
/// not hashable. Lists here are role chains and action sets, so the quadratic
/// scan stays small.
pub fn unique<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut result: Vec<T> = Vec::new();
    for item in items {
        if !result.contains(&item) {
            result.push(item);
        }
    }
    result
}
