//! Search execution against the hosted search API.
//!
//! [`HttpSearcher`] issues a single capped request per query; pagination
//! beyond that is deliberately out of scope. The [`Searcher`] trait is the
//! seam consumers program against, so tests can substitute a fake without
//! touching the network.

use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::query::Query;
use crate::repository::RepositoriesResult;

const DEFAULT_HOST: &str = "github.com";
const HOST_ENV: &str = "REPOSCOUT_HOST";
const TOKEN_ENVS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Results per page accepted by the search API.
const MAX_PER_PAGE: usize = 100;

/// Executes search queries and builds browser URLs for them.
pub trait Searcher {
    /// Run the query and return matched repositories plus the total count.
    fn repositories(&self, query: &Query) -> Result<RepositoriesResult>;

    /// Build the URL a browser would use to show the same search.
    fn url(&self, query: &Query) -> String;
}

/// Blocking HTTP implementation of [`Searcher`].
pub struct HttpSearcher {
    client: Client,
    host: String,
    token: Option<String>,
}

impl HttpSearcher {
    /// Create a searcher for `host`, authenticating with `token` if given.
    pub fn new<H: Into<String>>(host: H, token: Option<String>) -> Result<Self> {
        let host = host.into();
        if host.is_empty() || Url::parse(&format!("https://{}/search", host)).is_err() {
            return Err(Error::InvalidHost { host });
        }
        Ok(Self {
            client: build_client()?,
            host,
            token,
        })
    }

    /// Create a searcher from the environment.
    ///
    /// The host comes from `REPOSCOUT_HOST` (default `github.com`); the
    /// token from `GITHUB_TOKEN` then `GH_TOKEN`. Unauthenticated searches
    /// work but are subject to a much lower rate limit.
    pub fn from_env() -> Result<Self> {
        let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let token = TOKEN_ENVS
            .iter()
            .find_map(|name| env::var(name).ok().filter(|token| !token.is_empty()));
        Self::new(host, token)
    }

    fn api_base(&self) -> String {
        if self.host == DEFAULT_HOST {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }
}

impl Searcher for HttpSearcher {
    fn repositories(&self, query: &Query) -> Result<RepositoriesResult> {
        let endpoint = format!("{}/search/{}", self.api_base(), query.kind);
        let per_page = query.limit.clamp(1, MAX_PER_PAGE);
        debug!(
            endpoint = %endpoint,
            q = %query.to_query_string(),
            per_page,
            "executing search request"
        );

        let mut request = self
            .client
            .get(&endpoint)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[("q", query.to_query_string())])
            .query(&[("per_page", per_page.to_string())]);
        if let Some(sort) = &query.sort {
            request = request.query(&[("sort", sort)]);
        }
        if let Some(order) = &query.order {
            request = request.query(&[("order", order)]);
        }
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let rate_limited = (status == StatusCode::FORBIDDEN
                || status == StatusCode::TOO_MANY_REQUESTS)
                && response
                .headers()
                .get(RATE_LIMIT_REMAINING_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(|remaining| remaining == "0")
                .unwrap_or(false);
            if rate_limited {
                return Err(Error::RateLimited);
            }
            let body = response.text().unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_error_message(status, &body),
            });
        }

        let mut result = response.json::<RepositoriesResult>()?;
        result.items.truncate(query.limit);
        Ok(result)
    }

    fn url(&self, query: &Query) -> String {
        let base = format!("https://{}/search", self.host);
        // Host was validated at construction time.
        let Ok(mut url) = Url::parse(&base) else {
            return base;
        };
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("type", &query.kind.to_string());
            pairs.append_pair("q", &query.to_query_string());
            if let Some(sort) = &query.sort {
                pairs.append_pair("s", sort);
            }
            if let Some(order) = &query.order {
                pairs.append_pair("o", order);
            }
        }
        url.into()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        })
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!("reposcout/{version}", version = env!("CARGO_PKG_VERSION"))
}
