//! Output formatting for repository search results.
//!
//! Interactive terminals get an aligned, truncated table with a summary
//! header; everything else gets untruncated tab-separated rows that
//! scripts can cut apart. `--json` bypasses both and writes the full
//! item list.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use reposcout_lib::{RepositoriesResult, Repository};

use crate::terminal::{collapse_whitespace, fuzzy_ago, ColorPalette};

const NAME_COLUMN_WIDTH: usize = 40;
const DESCRIPTION_COLUMN_WIDTH: usize = 56;
const INFO_COLUMN_WIDTH: usize = 22;

/// Render matched repositories as a table.
///
/// On a TTY the rows are preceded by a `Showing X of Y repositories`
/// header (or a no-match notice), columns are aligned and truncated, and
/// the updated-at column uses compact elapsed time. Off a TTY the rows
/// are tab-separated with RFC 3339 timestamps.
pub fn render_table(
    out: &mut dyn Write,
    result: &RepositoriesResult,
    is_tty: bool,
    palette: ColorPalette,
    now: DateTime<Utc>,
) -> io::Result<()> {
    if is_tty {
        if result.items.is_empty() {
            writeln!(out, "\nNo repositories matched your search")?;
            return Ok(());
        }
        writeln!(
            out,
            "\nShowing {} of {} repositories\n",
            result.items.len(),
            result.total_count
        )?;
    }

    for repo in &result.items {
        let description = collapse_whitespace(repo.description.as_deref().unwrap_or(""));
        let info = info_tags(repo);
        if is_tty {
            let info_color = if repo.private {
                palette.yellow
            } else {
                palette.gray
            };
            writeln!(
                out,
                "{bold}{name:<name_w$}{reset}  {desc:<desc_w$}  {info_color}{info:<info_w$}{reset}  {gray}{ago}{reset}",
                bold = palette.bold,
                name = truncate(&repo.full_name, NAME_COLUMN_WIDTH),
                reset = palette.reset,
                desc = truncate(&description, DESCRIPTION_COLUMN_WIDTH),
                info_color = info_color,
                info = truncate(&info, INFO_COLUMN_WIDTH),
                gray = palette.gray,
                ago = fuzzy_ago(now, repo.updated_at),
                name_w = NAME_COLUMN_WIDTH,
                desc_w = DESCRIPTION_COLUMN_WIDTH,
                info_w = INFO_COLUMN_WIDTH,
            )?;
        } else {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                repo.full_name,
                description,
                info,
                repo.updated_at.to_rfc3339()
            )?;
        }
    }

    Ok(())
}

/// Write the matched repositories as pretty-printed JSON.
pub fn write_json(out: &mut dyn Write, items: &[Repository]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, items).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Describe a repository's state as short comma-separated tags.
fn info_tags(repo: &Repository) -> String {
    let mut tags = vec![repo.visibility.as_str()];
    if repo.fork {
        tags.push("fork");
    }
    if repo.archived {
        tags.push("archived");
    }
    tags.join(", ")
}

/// Truncate to `max` characters, ending in `...` when shortened.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
