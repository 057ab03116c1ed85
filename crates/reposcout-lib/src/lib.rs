//! reposcout library entry points.
//!
//! This crate exposes the repository search query model, the search client
//! that executes queries against the hosted search API, and the result
//! types returned to consumers. Higher-level consumers (the CLI) should
//! only depend on the items exported here instead of reimplementing
//! behavior.

#![deny(warnings)]

pub mod error;
pub mod query;
pub mod repository;
pub mod searcher;

pub use error::{Error, Result};
pub use query::{Qualifiers, Query, SearchKind, SEARCH_MAX_RESULTS};
pub use repository::{License, Owner, RepositoriesResult, Repository};
pub use searcher::{HttpSearcher, Searcher};
