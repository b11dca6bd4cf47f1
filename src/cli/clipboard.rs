//! Clipboard access.
//!
//! Copies go through the first clipboard helper found on the PATH.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::error::{CommandError, Result};

/// Helper binaries and the arguments that make them read stdin.
const HELPERS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// Destination for copied fields.
pub trait Clipboard {
    /// Replace the clipboard contents.
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, through an external helper.
#[derive(Default)]
pub struct SystemClipboard {
    helper: Option<(PathBuf, &'static [&'static str])>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn helper(&mut self) -> Result<(PathBuf, &'static [&'static str])> {
        if let Some(found) = &self.helper {
            return Ok(found.clone());
        }

        let found = HELPERS
            .iter()
            .find_map(|(bin, args)| which::which(bin).ok().map(|path| (path, *args)))
            .ok_or_else(|| CommandError::ClipboardUnavailable {
                tried: HELPERS
                    .iter()
                    .map(|(bin, _)| *bin)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        debug!(helper = %found.0.display(), "clipboard helper");
        self.helper = Some(found.clone());
        Ok(found)
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let (path, args) = self.helper()?;
        let helper = path.display().to_string();
        let failed = |reason: String| CommandError::ClipboardFailed {
            helper: helper.clone(),
            reason,
        };

        trace!(len = text.len(), "copying to clipboard");

        let mut child = Command::new(&path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("failed to spawn: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| failed(format!("failed to write: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            return Err(failed(String::from_utf8_lossy(&output.stderr).trim().to_string()).into());
        }

        Ok(())
    }
}
