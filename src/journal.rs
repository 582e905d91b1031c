//! Log viewing through journalctl's JSON output.
//!
//! journalctl is asked for one JSON object per line; only the `MESSAGE`
//! field of each record is printed.

use crate::command_args::{CommandArgs, JournalctlArgs};
use crate::process_guard::{ChildRegistry, CommandProcessGroup, is_cancelled};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Extract the `MESSAGE` string from one journal record.
///
/// Returns `Ok(None)` for records without a textual message (journald
/// encodes non-UTF-8 messages as byte arrays).
pub fn parse_message(line: &str) -> std::result::Result<Option<String>, serde_json::Error> {
    let record: Value = serde_json::from_str(line)?;
    Ok(record
        .get("MESSAGE")
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// Copy messages from `lines` to `out`, skipping records that fail to parse.
/// Returns the number of messages written.
pub fn copy_messages<I, W>(lines: I, out: &mut W) -> Result<usize>
where
    I: IntoIterator<Item = std::io::Result<String>>,
    W: Write,
{
    let mut written = 0;
    for line in lines {
        if is_cancelled() {
            break;
        }
        let line = line.context("failed to read journalctl output")?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_message(&line) {
            Ok(Some(message)) => {
                writeln!(out, "{}", message).context("failed to write log message")?;
                written += 1;
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping unparsable journal record: {}", e),
        }
    }
    Ok(written)
}

/// Run journalctl and stream the messages to `out`.
pub fn stream_messages<W: Write>(args: &JournalctlArgs, out: &mut W) -> Result<usize> {
    info!("Reading logs: {}", args.display_command());

    let mut child = Command::new(args.program())
        .args(args.to_cli_args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .in_new_process_group()
        .spawn()
        .with_context(|| format!("command {} not found or not executable", args.program()))?;
    let pid = child.id();

    let cancelled = ChildRegistry::global()
        .lock()
        .map(|mut registry| !registry.register_or_terminate(pid))
        .unwrap_or(false);
    if cancelled {
        let _ = child.wait();
        bail!("log viewing interrupted");
    }

    let copied = match child.stdout.take() {
        Some(stdout) => copy_messages(BufReader::new(stdout).lines(), out),
        None => Ok(0),
    };
    let status = child.wait();

    if let Ok(mut registry) = ChildRegistry::global().lock() {
        registry.unregister(pid);
    }

    let written = copied?;
    let status = status.context("failed to wait for journalctl")?;
    debug!("journalctl exited with {:?}, {} messages", status.code(), written);

    if is_cancelled() {
        bail!("log viewing interrupted");
    }
    if !status.success() {
        bail!("{} exited with {}", args.display_command(), status);
    }
    Ok(written)
}
