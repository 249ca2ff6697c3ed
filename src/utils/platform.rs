//! Platform-specific launching of the finished archive.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};

/// Program (and leading args) that opens a URL with the default handler.
const OPENER: (&str, &[&str]) = {
    #[cfg(target_os = "macos")]
    {
        ("open", &[])
    }

    #[cfg(target_os = "windows")]
    {
        ("cmd", &["/C", "start", ""])
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        ("xdg-open", &[])
    }
};

/// Build a `file://` URL for a local page.
pub fn file_url(page: &Path) -> String {
    let display = page.to_string_lossy().replace('\\', "/");
    if display.starts_with('/') {
        format!("file://{display}")
    } else {
        format!("file:///{display}")
    }
}

/// Open a local page in the default browser.
///
/// The opener is detached; its exit status is not awaited.
pub fn open_in_browser(page: &Path) -> Result<()> {
    let (program, lead_args) = OPENER;
    let program = which::which(program)
        .map_err(|_| anyhow!("no browser opener found (`{program}` is not on PATH)"))?;

    Command::new(&program)
        .args(lead_args)
        .arg(file_url(page))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch {}", program.display()))?;
    Ok(())
}
