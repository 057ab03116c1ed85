//! Repos command handler for searching repositories.

use std::io::{self, IsTerminal};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, ValueEnum};
use tracing::debug;

use reposcout_lib::{HttpSearcher, Qualifiers, Query, SearchKind, Searcher, SEARCH_MAX_RESULTS};

use crate::browser::{Browser, SystemBrowser};
use crate::output;
use crate::pager::Pager;
use crate::terminal::{display_url, ColorPalette};

/// Arguments for the repos command.
///
/// The command supports the hosted search syntax in the keyword
/// arguments, the qualifier flags, or a combination of the two.
#[derive(Args, Debug, Clone)]
#[command(after_help = "\
Examples:
  # search repositories matching set of keywords \"cli\" and \"shell\"
  reposcout repos cli shell

  # search repositories matching phrase \"vim plugin\"
  reposcout repos \"vim plugin\"

  # search public repositories in the microsoft organization
  reposcout repos --owner=microsoft --visibility=public

  # search repositories with a set of topics
  reposcout repos --topic=unix,terminal

  # search repositories by coding language and number of good first issues
  reposcout repos --language=go --good-first-issues=\">=10\"
")]
pub struct ReposArgs {
    /// Search keywords, passed through to the search service verbatim.
    #[arg(value_name = "QUERY")]
    pub keywords: Vec<String>,

    /// Maximum number of repositories to fetch.
    #[arg(short = 'L', long, default_value_t = 30, value_name = "N")]
    pub limit: usize,

    /// Sort fetched repositories (default: best match).
    #[arg(long, value_enum)]
    pub sort: Option<ReposSort>,

    /// Order of repositories returned, ignored unless --sort is set.
    #[arg(long, value_enum)]
    pub order: Option<SortOrder>,

    /// Open the search query in the web browser.
    #[arg(short = 'w', long)]
    pub web: bool,

    /// Output the matched repositories as JSON.
    #[arg(long)]
    pub json: bool,

    /// Filter based on archive state.
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        require_equals = true,
        value_name = "BOOL"
    )]
    pub archived: Option<bool>,

    /// Filter based on created at date.
    #[arg(long, value_name = "DATE")]
    pub created: Option<String>,

    /// Filter based on number of followers.
    #[arg(long, value_name = "NUMBER")]
    pub followers: Option<String>,

    /// Include forks in fetched repositories.
    #[arg(long, value_enum, value_name = "STATE")]
    pub include_forks: Option<ForkInclusion>,

    /// Filter on number of forks.
    #[arg(long, value_name = "NUMBER")]
    pub forks: Option<String>,

    /// Filter on number of issues with the "good first issue" label.
    #[arg(long, value_name = "NUMBER")]
    pub good_first_issues: Option<String>,

    /// Filter on number of issues with the "help wanted" label.
    #[arg(long, value_name = "NUMBER")]
    pub help_wanted_issues: Option<String>,

    /// Restrict search to specific fields of the repository.
    #[arg(long = "match", value_enum, value_delimiter = ',', value_name = "FIELD")]
    pub match_fields: Vec<MatchField>,

    /// Filter based on the coding language.
    #[arg(long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Filter based on license type.
    #[arg(long, value_delimiter = ',', value_name = "LICENSE")]
    pub license: Vec<String>,

    /// Filter on owner.
    #[arg(long, value_name = "OWNER")]
    pub owner: Option<String>,

    /// Filter on last updated at date.
    #[arg(long, value_name = "DATE")]
    pub updated: Option<String>,

    /// Filter on a size range, in kilobytes.
    #[arg(long, value_name = "RANGE")]
    pub size: Option<String>,

    /// Filter on number of stars.
    #[arg(long, value_name = "NUMBER")]
    pub stars: Option<String>,

    /// Filter on topic.
    #[arg(long, value_delimiter = ',', value_name = "TOPIC")]
    pub topic: Vec<String>,

    /// Filter on number of topics.
    #[arg(long, value_name = "NUMBER")]
    pub number_topics: Option<String>,

    /// Filter based on visibility.
    #[arg(long, value_enum, value_name = "VISIBILITY")]
    pub visibility: Option<Visibility>,
}

/// Sort field for fetched repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReposSort {
    Forks,
    HelpWantedIssues,
    Stars,
    Updated,
}

impl ReposSort {
    fn as_str(self) -> &'static str {
        match self {
            ReposSort::Forks => "forks",
            ReposSort::HelpWantedIssues => "help-wanted-issues",
            ReposSort::Stars => "stars",
            ReposSort::Updated => "updated",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Fork inclusion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ForkInclusion {
    False,
    True,
    Only,
}

impl ForkInclusion {
    fn as_str(self) -> &'static str {
        match self {
            ForkInclusion::False => "false",
            ForkInclusion::True => "true",
            ForkInclusion::Only => "only",
        }
    }
}

/// Repository field a keyword match may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchField {
    Name,
    Description,
    Readme,
}

impl MatchField {
    fn as_str(self) -> &'static str {
        match self {
            MatchField::Name => "name",
            MatchField::Description => "description",
            MatchField::Readme => "readme",
        }
    }
}

/// Repository visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Visibility {
    Public,
    Private,
    Internal,
}

impl Visibility {
    fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
        }
    }
}

impl ReposArgs {
    /// Convert CLI args to a library query.
    ///
    /// Sort and order are carried over only when the caller set them, so
    /// the service's best-match default stays in effect otherwise.
    pub fn to_query(&self) -> Query {
        Query {
            kind: SearchKind::Repositories,
            keywords: self.keywords.clone(),
            limit: self.limit,
            sort: self.sort.map(|sort| sort.as_str().to_string()),
            order: self.order.map(|order| order.as_str().to_string()),
            qualifiers: Qualifiers {
                archived: self.archived,
                created: self.created.clone(),
                followers: self.followers.clone(),
                fork: self.include_forks.map(|fork| fork.as_str().to_string()),
                forks: self.forks.clone(),
                good_first_issues: self.good_first_issues.clone(),
                help_wanted_issues: self.help_wanted_issues.clone(),
                match_fields: self
                    .match_fields
                    .iter()
                    .map(|field| field.as_str().to_string())
                    .collect(),
                language: self.language.clone(),
                license: self.license.clone(),
                org: self.owner.clone(),
                pushed: self.updated.clone(),
                size: self.size.clone(),
                stars: self.stars.clone(),
                topic: self.topic.clone(),
                topics: self.number_topics.clone(),
                visibility: self.visibility.map(|vis| vis.as_str().to_string()),
            },
        }
    }

    /// Check if the user provided any flag beyond the defaults.
    fn user_provided_flags(&self) -> bool {
        self.limit != 30
            || self.sort.is_some()
            || self.order.is_some()
            || self.web
            || self.json
            || !self.to_query().qualifiers.is_empty()
    }
}

/// Handle the repos subcommand.
pub fn handle_repos(args: &ReposArgs) -> Result<()> {
    validate(args)?;
    let query = args.to_query();
    let searcher = HttpSearcher::from_env().context("failed to initialize the search client")?;

    if args.web {
        return open_in_browser(&searcher, &query, &SystemBrowser);
    }

    debug!(q = %query.to_query_string(), limit = query.limit, "searching repositories");
    let result = searcher
        .repositories(&query)
        .context("search request failed")?;
    render_results(args, &result)
}

fn validate(args: &ReposArgs) -> Result<()> {
    if args.keywords.is_empty() && !args.user_provided_flags() {
        bail!("specify search keywords or flags");
    }
    if args.limit < 1 || args.limit > SEARCH_MAX_RESULTS {
        bail!("--limit must be between 1 and {}", SEARCH_MAX_RESULTS);
    }
    Ok(())
}

fn open_in_browser(searcher: &dyn Searcher, query: &Query, browser: &dyn Browser) -> Result<()> {
    let url = searcher.url(query);
    if io::stdout().is_terminal() {
        eprintln!("Opening {} in your browser.", display_url(&url));
    }
    browser
        .browse(&url)
        .context("failed to open the search in your browser")
}

fn render_results(args: &ReposArgs, result: &reposcout_lib::RepositoriesResult) -> Result<()> {
    let is_tty = io::stdout().is_terminal();
    let mut pager = Pager::start(is_tty);

    let outcome = if args.json {
        output::write_json(pager.writer(), &result.items)
    } else {
        let palette = if is_tty {
            ColorPalette::detect()
        } else {
            ColorPalette::plain()
        };
        output::render_table(pager.writer(), result, is_tty, palette, Utc::now())
    };
    pager.finish();

    match outcome {
        // The user quitting the pager mid-stream is not an error.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write search results"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> ReposArgs {
        ReposArgs {
            keywords: Vec::new(),
            limit: 30,
            sort: None,
            order: None,
            web: false,
            json: false,
            archived: None,
            created: None,
            followers: None,
            include_forks: None,
            forks: None,
            good_first_issues: None,
            help_wanted_issues: None,
            match_fields: Vec::new(),
            language: None,
            license: Vec::new(),
            owner: None,
            updated: None,
            size: None,
            stars: None,
            topic: Vec::new(),
            number_topics: None,
            visibility: None,
        }
    }

    #[test]
    fn rejects_empty_invocation() {
        let args = base_args();
        let err = validate(&args).expect_err("empty invocation must be rejected");
        assert!(err.to_string().contains("keywords or flags"));
    }

    #[test]
    fn accepts_qualifier_only_invocation() {
        let args = ReposArgs {
            owner: Some("microsoft".into()),
            ..base_args()
        };
        validate(&args).expect("qualifier-only invocation is valid");
    }

    #[test]
    fn enforces_limit_bounds() {
        for limit in [0usize, 1001] {
            let args = ReposArgs {
                keywords: vec!["cli".into()],
                limit,
                ..base_args()
            };
            let err = validate(&args).expect_err("out-of-bounds limit must be rejected");
            assert!(err.to_string().contains("between 1 and 1000"));
        }
        for limit in [1usize, 30, 1000] {
            let args = ReposArgs {
                keywords: vec!["cli".into()],
                limit,
                ..base_args()
            };
            validate(&args).expect("in-bounds limit is valid");
        }
    }

    #[test]
    fn sort_and_order_only_applied_when_set() {
        let args = ReposArgs {
            keywords: vec!["cli".into()],
            ..base_args()
        };
        let query = args.to_query();
        assert!(query.sort.is_none());
        assert!(query.order.is_none());

        let args = ReposArgs {
            keywords: vec!["cli".into()],
            sort: Some(ReposSort::HelpWantedIssues),
            order: Some(SortOrder::Asc),
            ..base_args()
        };
        let query = args.to_query();
        assert_eq!(query.sort.as_deref(), Some("help-wanted-issues"));
        assert_eq!(query.order.as_deref(), Some("asc"));
    }

    #[test]
    fn flags_map_to_qualifiers() {
        let args = ReposArgs {
            archived: Some(true),
            include_forks: Some(ForkInclusion::Only),
            match_fields: vec![MatchField::Name, MatchField::Readme],
            owner: Some("rust-lang".into()),
            updated: Some(">2024-01-01".into()),
            visibility: Some(Visibility::Public),
            topic: vec!["cli".into()],
            ..base_args()
        };
        let query = args.to_query();
        assert_eq!(
            query.to_query_string(),
            "archived:true fork:only in:name in:readme is:public org:rust-lang pushed:>2024-01-01 topic:cli"
        );
    }

    #[test]
    fn keywords_pass_through_verbatim() {
        let args = ReposArgs {
            keywords: vec!["vim plugin".into(), "stars:>100".into()],
            ..base_args()
        };
        let query = args.to_query();
        assert_eq!(query.to_query_string(), "\"vim plugin\" stars:>100");
    }
}
