//! Result models for repository searches.
//!
//! These mirror the subset of the search API's response shape the CLI
//! renders or exports. Field names follow the wire format so no renames
//! are needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of matched repositories plus the service's total count.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoriesResult {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<Repository>,
}

/// A matched repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub license: Option<License>,
    /// `public`, `private`, or `internal`.
    #[serde(default = "default_visibility")]
    pub visibility: String,
    pub private: bool,
    pub fork: bool,
    pub archived: bool,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    /// Size in kilobytes.
    pub size: u64,
    pub default_branch: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

/// The account owning a matched repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    pub r#type: Option<String>,
}

/// License metadata attached to a matched repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub key: String,
    pub name: String,
}

fn default_visibility() -> String {
    "public".to_string()
}
