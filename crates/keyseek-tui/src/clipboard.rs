//! System clipboard access via OS utilities, so no native clipboard
//! dependency is needed inside the alternate screen.

use std::io::Write;
use std::process::{Command, Stdio};

const COPY_COMMANDS: &[&[&str]] = &[
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

const PASTE_COMMANDS: &[&[&str]] = &[
    &["pbpaste"],
    &["wl-paste", "--no-newline"],
    &["xclip", "-selection", "clipboard", "-o"],
    &["xsel", "--clipboard", "--output"],
];

/// Write `text` to the system clipboard using the first available utility.
pub fn copy(text: &str) -> std::io::Result<()> {
    copy_via(COPY_COMMANDS, text)
}

fn copy_via(commands: &[&[&str]], text: &str) -> std::io::Result<()> {
    for cmd in commands {
        let spawned = Command::new(cmd[0])
            .args(&cmd[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let Ok(mut child) = spawned else { continue };
        if let Some(ref mut stdin) = child.stdin {
            if stdin.write_all(text.as_bytes()).is_err() {
                // Reap the child before moving on or it lingers as a
                // zombie for the life of the app.
                drop(child.stdin.take());
                let _ = child.wait();
                continue;
            }
        }
        drop(child.stdin.take());
        match child.wait() {
            Ok(status) if status.success() => return Ok(()),
            _ => continue,
        }
    }
    Err(std::io::Error::other(
        "no clipboard utility found (tried pbcopy, wl-copy, xclip, xsel)",
    ))
}

/// Read the system clipboard, if any utility is available.
pub fn paste() -> Option<String> {
    for cmd in PASTE_COMMANDS {
        let output = Command::new(cmd[0]).args(&cmd[1..]).output();
        if let Ok(output) = output {
            if output.status.success() {
                if let Ok(text) = String::from_utf8(output.stdout) {
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_falls_through_failing_utilities() {
        // Large enough that writing into a pipe nobody reads fails, which
        // exercises the reap-and-continue path before the working utility.
        let text = "x".repeat(1 << 20);
        let commands: &[&[&str]] = &[
            &["keyseek-no-such-utility"],
            &["sh", "-c", "exit 1"],
            &["sh", "-c", "cat >/dev/null"],
        ];
        assert!(copy_via(commands, &text).is_ok());
    }

    #[test]
    fn copy_errors_when_no_utility_works() {
        let commands: &[&[&str]] = &[&["keyseek-no-such-utility"], &["sh", "-c", "exit 1"]];
        assert!(copy_via(commands, "x").is_err());
    }
}
