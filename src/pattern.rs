//! File pattern resolution with brace alternation.
//!
//! `glob` understands `*`, `?`, `**` and `[...]` but not `{a,b}`, so brace
//! groups are expanded into plain patterns first and each one is globbed in
//! turn. Matches are returned in alternation order, and within one
//! alternative in the order `glob` yields them.

use crate::error::{ReaderError, Result};
use log::{debug, warn};
use std::path::PathBuf;

/// Resolves `pattern` into the list of existing paths it matches.
///
/// Zero matches is not an error. Unbalanced braces or an invalid wildcard
/// yield [`ReaderError::InvalidPattern`].
pub fn resolve(pattern: &str) -> Result<Vec<PathBuf>> {
    let invalid = |message: String| ReaderError::InvalidPattern {
        pattern: pattern.to_string(),
        message,
    };

    let alternatives = expand_braces(pattern).map_err(invalid)?;

    let mut paths = Vec::new();
    for alternative in &alternatives {
        let entries = glob::glob(alternative).map_err(|e| invalid(e.to_string()))?;
        for entry in entries {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => warn!("Skipping unreadable path while resolving `{}`: {}", pattern, e),
            }
        }
    }

    debug!(
        "Pattern `{}` expanded to {} alternatives, {} paths",
        pattern,
        alternatives.len(),
        paths.len()
    );

    Ok(paths)
}

/// Expands every `{a,b,...}` group in `pattern`, left to right.
///
/// Groups may nest. A group without commas expands to its single body.
pub fn expand_braces(pattern: &str) -> std::result::Result<Vec<String>, String> {
    let open = match pattern.find('{') {
        Some(open) => open,
        None if pattern.contains('}') => return Err("unmatched `}`".to_string()),
        None => return Ok(vec![pattern.to_string()]),
    };
    if pattern[..open].contains('}') {
        return Err("unmatched `}`".to_string());
    }

    let mut depth = 0usize;
    let mut bounds = vec![open];
    let mut close = None;
    for (offset, c) in pattern[open..].char_indices() {
        let idx = open + offset;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            ',' if depth == 1 => bounds.push(idx),
            _ => {}
        }
    }
    let close = close.ok_or_else(|| "unmatched `{`".to_string())?;
    bounds.push(close);

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let body = &pattern[window[0] + 1..window[1]];
        expanded.extend(expand_braces(&format!("{}{}{}", prefix, body, suffix))?);
    }
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_expand_without_braces() {
        assert_eq!(expand_braces("/tmp/*.gpg").unwrap(), vec!["/tmp/*.gpg"]);
    }

    #[test]
    fn test_expand_single_group() {
        assert_eq!(
            expand_braces("in/{a,b,c}.gpg").unwrap(),
            vec!["in/a.gpg", "in/b.gpg", "in/c.gpg"]
        );
    }

    #[test]
    fn test_expand_multiple_groups_in_order() {
        assert_eq!(
            expand_braces("{x,y}-{1,2}").unwrap(),
            vec!["x-1", "x-2", "y-1", "y-2"]
        );
    }

    #[test]
    fn test_expand_nested_group() {
        assert_eq!(
            expand_braces("{a,b{1,2}}.gpg").unwrap(),
            vec!["a.gpg", "b1.gpg", "b2.gpg"]
        );
    }

    #[test]
    fn test_expand_empty_alternative() {
        assert_eq!(expand_braces("f{,.txt}").unwrap(), vec!["f", "f.txt"]);
    }

    #[test]
    fn test_expand_range_is_literal() {
        assert_eq!(expand_braces("{1..3}.gpg").unwrap(), vec!["1..3.gpg"]);
        assert_eq!(
            expand_braces("file{1..2,9}.gpg").unwrap(),
            vec!["file1..2.gpg", "file9.gpg"]
        );
    }

    #[test]
    fn test_expand_unbalanced() {
        assert!(expand_braces("in/{a,b.gpg").is_err());
        assert!(expand_braces("in/a,b}.gpg").is_err());
        assert!(expand_braces("}{a}").is_err());
    }

    #[test]
    fn test_resolve_matches_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["file1.txt.gpg", "file2.txt.gpg", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let pattern = format!("{}/*.gpg", dir.path().display());
        let paths = resolve(&pattern).unwrap();

        assert_eq!(
            paths,
            vec![
                dir.path().join("file1.txt.gpg"),
                dir.path().join("file2.txt.gpg")
            ]
        );
    }

    #[test]
    fn test_resolve_follows_alternation_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.gpg", "b.gpg"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let pattern = format!("{}/{{b,a}}.gpg", dir.path().display());
        let paths = resolve(&pattern).unwrap();

        assert_eq!(
            paths,
            vec![dir.path().join("b.gpg"), dir.path().join("a.gpg")]
        );
    }

    #[test]
    fn test_resolve_zero_matches_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.gpg", dir.path().display());
        assert!(resolve(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_invalid_patterns() {
        for pattern in ["abc[def", "a/**b", "in/{a,b.gpg"] {
            let err = resolve(pattern).unwrap_err();
            assert!(
                matches!(err, ReaderError::InvalidPattern { .. }),
                "expected InvalidPattern for {}",
                pattern
            );
        }
    }
}
