//! systemd unit rendering.
//!
//! The document is composed from a fixed template in which every optional
//! line is either present or left as an empty line, then normalized by
//! [`collapse_blank_lines`]. The same config always yields the same bytes.
//!
//! ```text
//! [Unit]
//! Description=<Title Cased Name> Service
//! After=network.target
//!
//! [Service]
//! User=...                 (only if set)
//! WorkingDirectory=...
//! ExecStart=...
//! Restart=always
//! RestartSec=10
//! OOMPolicy=restart
//!
//! StandardOutput=...       (only if set)
//! StandardError=...        (only if set)
//! SyslogIdentifier=...     (only if set)
//!
//! MemoryMax=<n>M           (only if > 0)
//! MemoryHigh=<n>M          (only if > 0)
//!
//! [Install]
//! WantedBy=multi-user.target
//! ```

use crate::error::RenderError;
use crate::types::ServiceConfig;

/// Render the unit file for `config`.
pub fn render(config: &ServiceConfig) -> Result<String, RenderError> {
    if config.service_name.is_empty() {
        return Err(RenderError::MissingServiceName);
    }
    if config.exec_start.trim().is_empty() {
        return Err(RenderError::MissingExecStart);
    }
    for (field, value) in [
        ("ServiceName", &config.service_name),
        ("User", &config.user_name),
        ("WorkingDirectory", &config.working_directory),
        ("ExecStart", &config.exec_start),
        ("StandardOutput", &config.standard_output),
        ("StandardError", &config.standard_error),
        ("SyslogIdentifier", &config.syslog_identifier),
    ] {
        if value.contains(['\n', '\r']) {
            return Err(RenderError::MultilineValue { field });
        }
    }

    let optional = |key: &str, value: &str| -> String {
        if value.is_empty() {
            String::new()
        } else {
            format!("{}={}", key, value)
        }
    };
    let memory = |key: &str, value: u64| -> String {
        if value > 0 {
            format!("{}={}M", key, value)
        } else {
            String::new()
        }
    };

    let lines = [
        "[Unit]".to_string(),
        format!("Description={} Service", title_case(&config.service_name)),
        "After=network.target".to_string(),
        String::new(),
        "[Service]".to_string(),
        optional("User", &config.user_name),
        format!("WorkingDirectory={}", config.working_directory),
        format!("ExecStart={}", config.exec_start),
        "Restart=always".to_string(),
        "RestartSec=10".to_string(),
        "OOMPolicy=restart".to_string(),
        String::new(),
        optional("StandardOutput", &config.standard_output),
        optional("StandardError", &config.standard_error),
        optional("SyslogIdentifier", &config.syslog_identifier),
        String::new(),
        memory("MemoryMax", config.memory_max),
        memory("MemoryHigh", config.memory_high),
        String::new(),
        "[Install]".to_string(),
        "WantedBy=multi-user.target".to_string(),
        String::new(),
    ];

    Ok(collapse_blank_lines(&lines.join("\n")))
}

fn is_section_header(line: &str) -> bool {
    line.trim().starts_with('[')
}

/// Keep at most one blank line between non-blank lines and drop blank lines
/// that directly follow a `[Section]` header. Whitespace-only lines count as
/// blank and are emitted empty. Idempotent.
///
/// Each blank line is judged against the last line already emitted, not the
/// previous input line. Comparing against the raw input would keep the second
/// blank in `"[A]\n\n\nb"` on the first pass and drop it on the second.
pub fn collapse_blank_lines(input: &str) -> String {
    let mut out: Vec<&str> = Vec::new();

    for line in input.split('\n') {
        if line.trim().is_empty() {
            match out.last() {
                Some(prev) if prev.is_empty() || is_section_header(prev) => continue,
                _ => out.push(""),
            }
        } else {
            out.push(line);
        }
    }

    out.join("\n")
}

/// Upper-case the first character of each word and lower-case the rest.
/// Letters, digits, `_`, `.` and `'` belong to a word; anything else splits.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        let in_word = ch.is_alphanumeric() || matches!(ch, '_' | '.' | '\'');
        if !in_word {
            out.push(ch);
            at_word_start = true;
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}
