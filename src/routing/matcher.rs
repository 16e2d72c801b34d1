//! Route matching logic.
//!
//! # Responsibilities
//! - Match an exact request path
//! - Match a path prefix on segment boundaries
//! - Report the pattern so the router can prefer the most specific match
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex and no placeholders: handlers parse their own sub-paths
//! - A prefix without a trailing `/` only matches whole segments,
//!   so `/snippet` never matches `/snippets`

/// Trait for matching request paths against a rule.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this rule.
    fn matches(&self, path: &str) -> bool;

    /// The pattern this matcher was built from.
    fn pattern(&self) -> &str;
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    path: String,
}

impl ExactMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }

    fn pattern(&self) -> &str {
        &self.path
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => self.prefix.ends_with('/') || rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    fn pattern(&self) -> &str {
        &self.prefix
    }
}

/// How a route selects its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    Exact(String),
    Prefix(String),
}

impl MatchRule {
    /// Compile the rule into a matcher.
    pub fn into_matcher(self) -> Box<dyn Matcher> {
        match self {
            MatchRule::Exact(path) => Box::new(ExactMatcher::new(path)),
            MatchRule::Prefix(prefix) => Box::new(PathPrefixMatcher::new(prefix)),
        }
    }
}
