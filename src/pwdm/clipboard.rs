use crate::error::{PwdmError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Somewhere a retrieved password can be handed off to.
pub trait ClipboardSink {
    fn copy(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard, reached through the platform's copy utility.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses wl-copy under Wayland, otherwise xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to("pbcopy", &[], text)
    }

    #[cfg(target_os = "linux")]
    {
        copy_linux(text)
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to("clip", &[], text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(PwdmError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[cfg(target_os = "linux")]
fn copy_linux(text: &str) -> Result<()> {
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        match pipe_to("wl-copy", &[], text) {
            Ok(()) => return Ok(()),
            Err(e) => tracing::debug!(error = %e, "wl-copy failed, trying X11 tools"),
        }
    }

    // Try xclip first, then xsel
    pipe_to("xclip", &["-selection", "clipboard"], text).or_else(|_| {
        pipe_to("xsel", &["--clipboard", "--input"], text).map_err(|e| {
            PwdmError::Clipboard(format!("{}. Install wl-clipboard, xclip or xsel.", e))
        })
    })
}

/// Runs `program`, writes `text` to its stdin and waits for it to exit.
pub(crate) fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| PwdmError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    // stdin is dropped before waiting so the child sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    if let Err(e) = written {
        let _ = child.kill();
        let _ = child.wait();
        return Err(PwdmError::Clipboard(format!(
            "Failed to write to {}: {}",
            program, e
        )));
    }

    let status = child
        .wait()
        .map_err(|e| PwdmError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(PwdmError::Clipboard(format!("{} exited with {}", program, status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_clipboard_error() {
        let err = pipe_to("pwdm-no-such-clipboard-tool", &[], "x").unwrap_err();
        assert!(matches!(err, PwdmError::Clipboard(msg) if msg.contains("Failed to spawn")));
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_succeeds() {
        pipe_to("cat", &[], "hunter22").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_program_that_ignores_stdin_is_reaped() {
        // `true` exits without reading, so a large write hits a closed pipe
        let text = "x".repeat(1 << 20);
        let err = pipe_to("true", &[], &text).unwrap_err();
        assert!(matches!(err, PwdmError::Clipboard(msg) if msg.starts_with("Failed to write to true")));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_reported() {
        let err = pipe_to("false", &[], "x").unwrap_err();
        assert!(matches!(err, PwdmError::Clipboard(msg) if msg.starts_with("false exited")));
    }
}
