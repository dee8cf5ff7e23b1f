//! Action definitions and matching.
//!
//! An action is one of three things:
//!
//! - a **literal**, compared by string equality;
//! - a **pattern**, a compiled regular expression tested against literal queries;
//! - a **predicate**, an opaque capability token compared by identity.
//!
//! Patterns and predicates are never compared structurally. Two patterns built
//! from the same source are different actions; a pattern only equals its own
//! clones. Predicates behave the same way and are never invoked.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// A grantable capability attached to a role.
#[derive(Clone)]
pub enum Action {
    /// Matches a query carrying the same string.
    Literal(String),
    /// Matches literal queries the expression tests true against.
    Pattern(Pattern),
    /// Matches only a query carrying the same predicate token.
    Predicate(Predicate),
}

impl Action {
    /// Create a literal action.
    pub fn literal(value: impl Into<String>) -> Self {
        Action::Literal(value.into())
    }

    /// Compile `source` into a pattern action.
    pub fn pattern(source: &str) -> std::result::Result<Self, regex::Error> {
        Pattern::new(source).map(Action::Pattern)
    }

    /// Get the literal value, if this is a literal action.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Action::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Check if this is a literal action.
    pub fn is_literal(&self) -> bool {
        matches!(self, Action::Literal(_))
    }

    /// Check if this is a pattern action.
    pub fn is_pattern(&self) -> bool {
        matches!(self, Action::Pattern(_))
    }

    /// Check if this is a predicate action.
    pub fn is_predicate(&self) -> bool {
        matches!(self, Action::Predicate(_))
    }

    /// Check whether this action, held by a role, grants the queried action.
    ///
    /// A pattern grants any literal query it matches. Every other combination
    /// falls back to equality, so a pattern query is only granted by the very
    /// same pattern and a predicate query only by the same predicate token.
    pub fn grants(&self, query: &Action) -> bool {
        match (self, query) {
            (Action::Pattern(pattern), Action::Literal(value)) => pattern.is_match(value),
            _ => self == query,
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Literal(a), Action::Literal(b)) => a == b,
            (Action::Pattern(a), Action::Pattern(b)) => a == b,
            (Action::Predicate(a), Action::Predicate(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Action {}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Action::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Action::Predicate(predicate) => f.debug_tuple("Predicate").field(predicate).finish(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Literal(value) => f.write_str(value),
            Action::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
            Action::Predicate(predicate) => write!(f, "<{}>", predicate.label()),
        }
    }
}

impl From<&str> for Action {
    fn from(value: &str) -> Self {
        Action::Literal(value.to_string())
    }
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        Action::Literal(value)
    }
}

impl From<&String> for Action {
    fn from(value: &String) -> Self {
        Action::Literal(value.clone())
    }
}

impl From<Regex> for Action {
    fn from(regex: Regex) -> Self {
        Action::Pattern(Pattern::from(regex))
    }
}

impl From<Pattern> for Action {
    fn from(pattern: Pattern) -> Self {
        Action::Pattern(pattern)
    }
}

impl From<&Pattern> for Action {
    fn from(pattern: &Pattern) -> Self {
        Action::Pattern(pattern.clone())
    }
}

impl From<Predicate> for Action {
    fn from(predicate: Predicate) -> Self {
        Action::Predicate(predicate)
    }
}

impl From<&Predicate> for Action {
    fn from(predicate: &Predicate) -> Self {
        Action::Predicate(predicate.clone())
    }
}

impl From<&Action> for Action {
    fn from(action: &Action) -> Self {
        action.clone()
    }
}

/// A compiled regular expression used as an action.
///
/// Clones share the compiled expression and compare equal to each other.
#[derive(Clone)]
pub struct Pattern(Arc<Regex>);

impl Pattern {
    /// Compile a new pattern.
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        Regex::new(source).map(Self::from)
    }

    /// Test a literal candidate against the pattern.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.0.is_match(candidate)
    }

    /// Get the source of the expression.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self(Arc::new(regex))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.0.as_str()).finish()
    }
}

/// An opaque capability token used as an action.
///
/// Every call to [`Predicate::new`] mints a distinct identity, even for equal
/// labels. Clones share the identity of the token they came from. The label is
/// only used for diagnostics.
#[derive(Clone)]
pub struct Predicate(Arc<str>);

impl Predicate {
    /// Mint a new predicate token.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the diagnostic label.
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Predicate {}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("label", &self.label())
            .field("id", &Arc::as_ptr(&self.0).cast::<u8>())
            .finish()
    }
}
