//! Tests for unit file rendering
//!
//! Exact-byte checks of the rendered document for the interesting
//! combinations of optional fields.

use sdmanager::error::RenderError;
use sdmanager::types::ServiceConfig;
use sdmanager::unit_file::{collapse_blank_lines, render};

fn minimal() -> ServiceConfig {
    ServiceConfig {
        service_name: "app".to_string(),
        working_directory: "/srv/app".to_string(),
        exec_start: "/usr/bin/app".to_string(),
        ..Default::default()
    }
}

// =============================================================================
// Exact output
// =============================================================================

#[test]
fn test_minimal_unit() {
    let expected = "\
[Unit]
Description=App Service
After=network.target

[Service]
WorkingDirectory=/srv/app
ExecStart=/usr/bin/app
Restart=always
RestartSec=10
OOMPolicy=restart

[Install]
WantedBy=multi-user.target
";
    assert_eq!(render(&minimal()).unwrap(), expected);
}

#[test]
fn test_full_unit() {
    let config = ServiceConfig {
        service_name: "log_shipper".to_string(),
        user_name: "shipper".to_string(),
        standard_output: "append:/var/log/shipper.log".to_string(),
        standard_error: "journal".to_string(),
        syslog_identifier: "shipper".to_string(),
        memory_high: 200,
        memory_max: 300,
        ..minimal()
    };

    let expected = "\
[Unit]
Description=Log_shipper Service
After=network.target

[Service]
User=shipper
WorkingDirectory=/srv/app
ExecStart=/usr/bin/app
Restart=always
RestartSec=10
OOMPolicy=restart

StandardOutput=append:/var/log/shipper.log
StandardError=journal
SyslogIdentifier=shipper

MemoryMax=300M
MemoryHigh=200M

[Install]
WantedBy=multi-user.target
";
    assert_eq!(render(&config).unwrap(), expected);
}

#[test]
fn test_only_memory_max() {
    let config = ServiceConfig {
        memory_max: 1024,
        ..minimal()
    };
    let unit = render(&config).unwrap();

    assert!(unit.contains("OOMPolicy=restart\n\nMemoryMax=1024M\n\n[Install]"));
    assert!(!unit.contains("MemoryHigh"));
}

#[test]
fn test_title_case_description() {
    for (name, description) in [
        ("nginx-proxy", "Description=Nginx-Proxy Service"),
        ("WEB", "Description=Web Service"),
        ("api.v2", "Description=Api.v2 Service"),
    ] {
        let config = ServiceConfig {
            service_name: name.to_string(),
            ..minimal()
        };
        assert!(
            render(&config).unwrap().contains(description),
            "{} should render {}",
            name,
            description
        );
    }
}

// =============================================================================
// Render errors
// =============================================================================

#[test]
fn test_missing_exec_start() {
    let config = ServiceConfig {
        exec_start: "  ".to_string(),
        ..minimal()
    };
    assert_eq!(render(&config), Err(RenderError::MissingExecStart));
}

#[test]
fn test_newline_in_value() {
    let config = ServiceConfig {
        syslog_identifier: "a\nExecStartPre=/bin/evil".to_string(),
        ..minimal()
    };
    assert_eq!(
        render(&config),
        Err(RenderError::MultilineValue {
            field: "SyslogIdentifier"
        })
    );
}

// =============================================================================
// Blank-line collapsing
// =============================================================================

#[test]
fn test_collapse_whitespace_only_lines() {
    let input = "[A]\n \t\nx=1\n\n  \n\ny=2\n";
    assert_eq!(collapse_blank_lines(input), "[A]\nx=1\n\ny=2\n");
}
