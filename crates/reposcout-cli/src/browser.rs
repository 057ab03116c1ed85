//! Browser launching for web mode.

use std::env;
use std::io;
use std::process::Command;

use tracing::debug;

const BROWSER_ENV: &str = "BROWSER";

/// Launches a URL in the user's browser.
pub trait Browser {
    fn browse(&self, url: &str) -> io::Result<()>;
}

/// Browser launcher honoring `$BROWSER`, with a platform opener fallback.
pub struct SystemBrowser;

impl SystemBrowser {
    fn launcher() -> (String, Vec<String>) {
        if let Ok(custom) = env::var(BROWSER_ENV) {
            if !custom.is_empty() {
                let mut parts = custom.split_whitespace().map(str::to_string);
                if let Some(program) = parts.next() {
                    return (program, parts.collect());
                }
            }
        }
        platform_opener()
    }
}

impl Browser for SystemBrowser {
    fn browse(&self, url: &str) -> io::Result<()> {
        let (program, args) = Self::launcher();
        debug!(%program, %url, "launching browser");
        let status = Command::new(&program).args(&args).arg(url).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "browser command {} exited with {}",
                program, status
            )))
        }
    }
}

#[cfg(target_os = "macos")]
fn platform_opener() -> (String, Vec<String>) {
    ("open".to_string(), Vec::new())
}

#[cfg(windows)]
fn platform_opener() -> (String, Vec<String>) {
    (
        "cmd".to_string(),
        vec!["/C".to_string(), "start".to_string()],
    )
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_opener() -> (String, Vec<String>) {
    ("xdg-open".to_string(), Vec::new())
}
