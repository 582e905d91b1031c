//! Property-Based Tests for sdmanager
//!
//! Uses proptest for the invariants the wizard relies on:
//! - Name validation accepts exactly the strings free of reserved characters
//! - Rendering is deterministic and already collapsed
//! - Blank-line collapsing is idempotent
//! - Memory limits are accepted only in a consistent order

use proptest::prelude::*;
use sdmanager::types::ServiceConfig;
use sdmanager::unit_file::{collapse_blank_lines, render};
use sdmanager::validation::{
    RESERVED_NAME_CHARS, parse_non_negative, validate_memory_limits, validate_service_name,
    validate_user_name,
};

// =============================================================================
// Name Validation
// =============================================================================

proptest! {
    /// A name is accepted iff it is non-empty and has no reserved character
    #[test]
    fn service_name_charset(name in "[a-zA-Z0-9 _.@*/\\\\|:\"<>?;-]{0,16}") {
        let expected = !name.is_empty() && !name.contains(RESERVED_NAME_CHARS);
        prop_assert_eq!(validate_service_name(&name).is_ok(), expected);
    }

    /// User names follow the same charset but may be empty
    #[test]
    fn user_name_charset(name in "[a-z0-9 _;:-]{0,12}") {
        let expected = !name.contains(RESERVED_NAME_CHARS);
        prop_assert_eq!(validate_user_name(&name).is_ok(), expected);
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn config_strategy() -> impl Strategy<Value = ServiceConfig> {
    (
        "[a-z][a-z0-9_.-]{0,12}",
        "[a-z]{0,8}",
        "/[a-z/]{0,16}",
        "/[a-z/]{1,16}( --[a-z]{1,6})?",
        prop_oneof![Just(String::new()), Just("journal".to_string())],
        "[a-z]{0,6}",
        0u64..2048,
        0u64..4096,
    )
        .prop_map(
            |(name, user, dir, exec, output, ident, high, max)| ServiceConfig {
                service_name: name,
                user_name: user,
                working_directory: dir,
                exec_start: exec,
                standard_output: output.clone(),
                standard_error: output,
                syslog_identifier: ident,
                memory_high: high,
                memory_max: max,
                ..Default::default()
            },
        )
}

proptest! {
    /// Same config, same bytes
    #[test]
    fn render_is_deterministic(config in config_strategy()) {
        prop_assert_eq!(render(&config).unwrap(), render(&config.clone()).unwrap());
    }

    /// Rendered units never contain two blank lines in a row or a blank line
    /// directly under a section header
    #[test]
    fn render_is_collapsed(config in config_strategy()) {
        let unit = render(&config).unwrap();
        prop_assert_eq!(collapse_blank_lines(&unit), unit.clone());
        prop_assert!(!unit.contains("\n\n\n"));
        prop_assert!(!unit.contains("]\n\n"));
        prop_assert!(unit.ends_with("WantedBy=multi-user.target\n"));
    }

    /// Optional lines appear exactly when their value is set
    #[test]
    fn render_optional_lines(config in config_strategy()) {
        let unit = render(&config).unwrap();
        prop_assert_eq!(unit.contains("\nUser="), !config.user_name.is_empty());
        prop_assert_eq!(unit.contains("\nMemoryHigh="), config.memory_high > 0);
        prop_assert_eq!(unit.contains("\nMemoryMax="), config.memory_max > 0);
    }
}

// =============================================================================
// Blank-line collapsing
// =============================================================================

proptest! {
    #[test]
    fn collapse_is_idempotent(lines in prop::collection::vec(
        prop_oneof![
            Just(String::new()),
            Just("  ".to_string()),
            Just("[Section]".to_string()),
            "[a-z]{1,5}=[a-z]{0,5}",
        ],
        0..30,
    )) {
        let input = lines.join("\n");
        let once = collapse_blank_lines(&input);
        prop_assert_eq!(collapse_blank_lines(&once), once);
    }
}

// =============================================================================
// Memory limits
// =============================================================================

proptest! {
    /// Accepted iff either limit is unset or the soft limit is strictly lower
    #[test]
    fn memory_order(high in 0u64..10_000, max in 0u64..10_000) {
        let accepted = validate_memory_limits(high, max).is_ok();
        prop_assert_eq!(accepted, high == 0 || max == 0 || high < max);
    }

    /// Non-negative integers parse back to themselves
    #[test]
    fn parse_non_negative_accepts_digits(n in 0u64..1_000_000) {
        prop_assert_eq!(parse_non_negative(&n.to_string(), 0), Ok(n));
    }

    /// Negative integers are always rejected
    #[test]
    fn parse_non_negative_rejects_negatives(n in 1i64..1_000_000) {
        let input = format!("-{}", n);
        prop_assert!(parse_non_negative(&input, 0).is_err());
    }
}
