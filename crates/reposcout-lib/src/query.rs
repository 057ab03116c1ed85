//! Search query model and query-string construction.
//!
//! A [`Query`] captures the user's intent for a single search: keywords,
//! result bounds, optional sort/order, and the qualifier filters. It is
//! built once per invocation and never mutated afterwards; the search
//! collaborator serializes it into the hosted service's search syntax.

use std::fmt;

/// Upper bound on fetchable results, imposed by the search service.
///
/// See: https://docs.github.com/en/rest/reference/search
pub const SEARCH_MAX_RESULTS: usize = 1000;

/// The kind of entity a query searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    /// Search repositories.
    #[default]
    Repositories,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Repositories => write!(f, "repositories"),
        }
    }
}

/// A single search request, immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub kind: SearchKind,
    /// Raw keywords, passed through to the service verbatim.
    pub keywords: Vec<String>,
    /// Maximum number of results the caller wants.
    pub limit: usize,
    /// Sort field; `None` means the service's best-match ranking.
    pub sort: Option<String>,
    /// Sort direction; only meaningful together with `sort`.
    pub order: Option<String>,
    pub qualifiers: Qualifiers,
}

impl Query {
    /// Serialize the query into the hosted search syntax.
    ///
    /// Keywords come first, quoted when they contain whitespace, followed
    /// by one `key:value` term per qualifier value in stable key order.
    /// Repeated calls yield identical output.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut terms: Vec<String> = self.keywords.iter().map(|k| quote(k)).collect();
        for (key, value) in self.qualifiers.terms() {
            terms.push(format!("{}:{}", key, quote(&value)));
        }
        terms.join(" ")
    }
}

/// Optional filters narrowing a search.
///
/// Empty fields are omitted from the query string entirely. Multi-valued
/// qualifiers emit one term per value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers {
    /// Filter on archive state.
    pub archived: Option<bool>,
    /// Filter on creation date.
    pub created: Option<String>,
    /// Filter on owner follower count.
    pub followers: Option<String>,
    /// Fork inclusion: `true`, `false`, or `only`.
    pub fork: Option<String>,
    /// Filter on fork count.
    pub forks: Option<String>,
    /// Filter on count of issues labeled "good first issue".
    pub good_first_issues: Option<String>,
    /// Filter on count of issues labeled "help wanted".
    pub help_wanted_issues: Option<String>,
    /// Restrict keyword matching to specific fields (`name`,
    /// `description`, `readme`). Serializes under the `in` key.
    pub match_fields: Vec<String>,
    /// Filter on the coding language.
    pub language: Option<String>,
    /// Filter on license type.
    pub license: Vec<String>,
    /// Filter on owning user or organization.
    pub org: Option<String>,
    /// Filter on last-push date. Serializes under the `pushed` key.
    pub pushed: Option<String>,
    /// Filter on repository size in kilobytes.
    pub size: Option<String>,
    /// Filter on star count.
    pub stars: Option<String>,
    /// Filter on topics.
    pub topic: Vec<String>,
    /// Filter on topic count.
    pub topics: Option<String>,
    /// Filter on visibility (`public`, `private`, `internal`).
    /// Serializes under the `is` key.
    pub visibility: Option<String>,
}

impl Qualifiers {
    /// Flatten the set qualifiers into `(key, value)` pairs in stable
    /// (alphabetical) key order.
    fn terms(&self) -> Vec<(&'static str, String)> {
        let mut terms: Vec<(&'static str, String)> = Vec::new();
        if let Some(archived) = self.archived {
            terms.push(("archived", archived.to_string()));
        }
        push_opt(&mut terms, "created", &self.created);
        push_opt(&mut terms, "followers", &self.followers);
        push_opt(&mut terms, "fork", &self.fork);
        push_opt(&mut terms, "forks", &self.forks);
        push_opt(&mut terms, "good-first-issues", &self.good_first_issues);
        push_opt(&mut terms, "help-wanted-issues", &self.help_wanted_issues);
        push_all(&mut terms, "in", &self.match_fields);
        push_opt(&mut terms, "is", &self.visibility);
        push_opt(&mut terms, "language", &self.language);
        push_all(&mut terms, "license", &self.license);
        push_opt(&mut terms, "org", &self.org);
        push_opt(&mut terms, "pushed", &self.pushed);
        push_opt(&mut terms, "size", &self.size);
        push_opt(&mut terms, "stars", &self.stars);
        push_all(&mut terms, "topic", &self.topic);
        push_opt(&mut terms, "topics", &self.topics);
        terms
    }

    /// Whether any qualifier is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms().is_empty()
    }
}

fn push_opt(terms: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            terms.push((key, value.clone()));
        }
    }
}

fn push_all(terms: &mut Vec<(&'static str, String)>, key: &'static str, values: &[String]) {
    for value in values {
        if !value.is_empty() {
            terms.push((key, value.clone()));
        }
    }
}

fn quote(term: &str) -> String {
    if term.chars().any(char::is_whitespace) {
        format!("\"{}\"", term)
    } else {
        term.to_string()
    }
}
