//! Field validators used by the wizard before every transition.
//!
//! All checks are synchronous. Only [`validate_path`] touches the
//! filesystem, and only to stat the parent directory.

use crate::error::{NameKind, ValidationError};
use std::path::PathBuf;

/// Characters that may not appear in a service or user name.
pub const RESERVED_NAME_CHARS: &[char] = &['*', '/', '\\', '|', ':', '"', '<', '>', '?', ';', ' '];

/// Characters that may not appear in a path.
pub const RESERVED_PATH_CHARS: &[char] = &['*', '?', '<', '>', '|', ';'];

fn check_name_chars(name: &str, kind: NameKind) -> Result<(), ValidationError> {
    match name.chars().find(|c| RESERVED_NAME_CHARS.contains(c)) {
        Some(ch) => Err(ValidationError::InvalidName { kind, ch }),
        None => Ok(()),
    }
}

/// A service name must be non-empty and free of reserved characters.
pub fn validate_service_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName(NameKind::Service));
    }
    check_name_chars(name, NameKind::Service)
}

/// Same charset rule as the service name, but empty is allowed.
pub fn validate_user_name(name: &str) -> Result<(), ValidationError> {
    check_name_chars(name, NameKind::User)
}

/// The start command must contain something other than whitespace.
pub fn validate_exec_start(command: &str) -> Result<(), ValidationError> {
    if command.trim().is_empty() {
        return Err(ValidationError::EmptyCommand);
    }
    Ok(())
}

/// Directory part of `path`, computed the way `dirname` does: strip the last
/// component after the final `/`, keep `/` for root, `.` when there is none.
pub fn parent_dir(path: &str) -> PathBuf {
    match path.rfind('/') {
        Some(0) => PathBuf::from("/"),
        Some(idx) => {
            let head = path[..idx].trim_end_matches('/');
            if head.is_empty() {
                PathBuf::from("/")
            } else {
                PathBuf::from(head)
            }
        }
        None => PathBuf::from("."),
    }
}

/// A path must be non-empty, free of shell-ish metacharacters, and its
/// parent must be an existing directory.
pub fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyPath);
    }

    if let Some(ch) = path.chars().find(|c| RESERVED_PATH_CHARS.contains(c)) {
        return Err(ValidationError::InvalidPathChar(ch));
    }

    let parent = parent_dir(path);
    match std::fs::metadata(&parent) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ValidationError::ParentNotDirectory(parent)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ValidationError::MissingParent(parent))
        }
        Err(e) => Err(ValidationError::Inaccessible {
            path: parent,
            reason: e.to_string(),
        }),
    }
}

/// Parse a non-negative integer, returning `default` for empty input.
pub fn parse_non_negative(text: &str, default: u64) -> Result<u64, ValidationError> {
    if text.is_empty() {
        return Ok(default);
    }

    let value: i64 = text.parse().map_err(|_| ValidationError::NotANumber)?;
    if value < 0 {
        return Err(ValidationError::Negative);
    }
    Ok(value as u64)
}

/// Soft limit must be strictly below the hard limit when both are set.
pub fn validate_memory_limits(high: u64, max: u64) -> Result<(), ValidationError> {
    if high > 0 && max > 0 && high >= max {
        return Err(ValidationError::MemoryOrder { high, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_service_name_accepts_plain_names() {
        assert!(validate_service_name("worker1").is_ok());
        assert!(validate_service_name("my-api_v2.svc").is_ok());
    }

    #[test]
    fn test_service_name_rejects_empty() {
        assert_eq!(
            validate_service_name(""),
            Err(ValidationError::EmptyName(NameKind::Service))
        );
    }

    #[test]
    fn test_service_name_rejects_each_reserved_char() {
        for ch in RESERVED_NAME_CHARS {
            let name = format!("svc{}x", ch);
            let err = validate_service_name(&name).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidName {
                    kind: NameKind::Service,
                    ch: *ch
                },
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_user_name_allows_empty() {
        assert!(validate_user_name("").is_ok());
        assert!(validate_user_name("www-data").is_ok());
        assert!(validate_user_name("bad user").is_err());
    }

    #[test]
    fn test_parent_dir_like_dirname() {
        assert_eq!(parent_dir("/srv/app"), PathBuf::from("/srv"));
        assert_eq!(parent_dir("/srv/app/"), PathBuf::from("/srv/app"));
        assert_eq!(parent_dir("/srv"), PathBuf::from("/"));
        assert_eq!(parent_dir("app"), PathBuf::from("."));
        assert_eq!(parent_dir("//x"), PathBuf::from("/"));
    }

    #[test]
    fn test_exec_start_must_not_be_blank() {
        assert_eq!(validate_exec_start(""), Err(ValidationError::EmptyCommand));
        assert_eq!(validate_exec_start(" \t "), Err(ValidationError::EmptyCommand));
        assert_eq!(validate_exec_start("/usr/bin/env true"), Ok(()));
    }

    #[test]
    fn test_path_rejects_empty_and_metachars() {
        assert_eq!(validate_path(""), Err(ValidationError::EmptyPath));
        assert_eq!(
            validate_path("/tmp/a;b"),
            Err(ValidationError::InvalidPathChar(';'))
        );
        assert_eq!(
            validate_path("/tmp/*"),
            Err(ValidationError::InvalidPathChar('*'))
        );
    }

    #[test]
    fn test_path_requires_existing_parent() {
        let dir = TempDir::new().unwrap();
        let ok = dir.path().join("child");
        assert!(validate_path(ok.to_str().unwrap()).is_ok());

        let missing = dir.path().join("nope").join("child");
        let err = validate_path(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingParent(_)));
    }

    #[test]
    fn test_path_parent_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();

        let under_file = file.join("child");
        let err = validate_path(under_file.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ValidationError::ParentNotDirectory(_)));
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative("", 7), Ok(7));
        assert_eq!(parse_non_negative("512", 0), Ok(512));
        assert_eq!(parse_non_negative("0", 3), Ok(0));
        assert_eq!(parse_non_negative("abc", 0), Err(ValidationError::NotANumber));
        assert_eq!(parse_non_negative("1.5", 0), Err(ValidationError::NotANumber));
        assert_eq!(parse_non_negative("-1", 0), Err(ValidationError::Negative));
    }

    #[test]
    fn test_memory_limits_order() {
        assert!(validate_memory_limits(0, 0).is_ok());
        assert!(validate_memory_limits(256, 0).is_ok());
        assert!(validate_memory_limits(0, 256).is_ok());
        assert!(validate_memory_limits(256, 512).is_ok());
        assert_eq!(
            validate_memory_limits(512, 512),
            Err(ValidationError::MemoryOrder { high: 512, max: 512 })
        );
        assert!(validate_memory_limits(600, 512).is_err());
    }
}
