//! Role sets passed to manager queries.

/// The set of role names a query is evaluated for.
///
/// Queries accept anything convertible into `Roles`: a single name, an array,
/// slice or vector of names, or `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roles<'a>(Vec<&'a str>);

impl<'a> Roles<'a> {
    /// An empty role set.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Whether the set holds no roles.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of roles in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if `role` is part of the set.
    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|it| *it == role)
    }

    /// Iterate over the names in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.0.iter().copied()
    }

    /// Replace an empty set with the single role `root`.
    pub(crate) fn or_root(mut self, root: &'a str) -> Self {
        if self.0.is_empty() {
            self.0.push(root);
        }
        self
    }
}

impl<'a> From<&'a str> for Roles<'a> {
    fn from(role: &'a str) -> Self {
        Self(vec![role])
    }
}

impl<'a> From<&'a String> for Roles<'a> {
    fn from(role: &'a String) -> Self {
        Self(vec![role.as_str()])
    }
}

impl<'a> From<Option<&'a str>> for Roles<'a> {
    fn from(role: Option<&'a str>) -> Self {
        Self(role.into_iter().collect())
    }
}

impl<'a> From<Vec<&'a str>> for Roles<'a> {
    fn from(roles: Vec<&'a str>) -> Self {
        Self(roles)
    }
}

impl<'a, 'b> From<&'b Vec<&'a str>> for Roles<'a> {
    fn from(roles: &'b Vec<&'a str>) -> Self {
        Self(roles.clone())
    }
}

impl<'a, 'b> From<&'b [&'a str]> for Roles<'a> {
    fn from(roles: &'b [&'a str]) -> Self {
        Self(roles.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Roles<'a> {
    fn from(roles: [&'a str; N]) -> Self {
        Self(roles.to_vec())
    }
}

impl<'a> From<&'a [String]> for Roles<'a> {
    fn from(roles: &'a [String]) -> Self {
        Self(roles.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Roles<'a> {
    fn from(roles: &'a Vec<String>) -> Self {
        Self::from(roles.as_slice())
    }
}

impl<'a> FromIterator<&'a str> for Roles<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
