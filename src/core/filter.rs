//! Include/exclude selection rules
//!
//! A `SelectionRule` holds the raw glob patterns supplied on the command
//! line; `compile` turns them into a `SelectionMatcher` that tests
//! root-relative paths. Exclude always wins over include.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::core::model::AggregateError;

/// Raw include/exclude glob patterns for one invocation.
///
/// An empty include set means every candidate file is considered.
#[derive(Debug, Clone, Default)]
pub struct SelectionRule {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SelectionRule {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Compile both pattern sets. Fails with `GlobSyntax` naming the first
    /// malformed pattern.
    pub fn compile(&self) -> Result<SelectionMatcher, AggregateError> {
        Ok(SelectionMatcher {
            include: build_glob_set(&self.include)?,
            include_empty: self.include.is_empty(),
            exclude: build_glob_set(&self.exclude)?,
        })
    }
}

/// Compiled form of a `SelectionRule`.
#[derive(Debug, Clone)]
pub struct SelectionMatcher {
    include: GlobSet,
    include_empty: bool,
    exclude: GlobSet,
}

impl SelectionMatcher {
    /// Test a normalized root-relative path against the rule.
    ///
    /// Include passes when the include set is empty or any pattern matches;
    /// any exclude match then rejects the path regardless of includes.
    pub fn is_selected(&self, rel_path: &str) -> bool {
        if !self.include_empty && !self.include.is_match(rel_path) {
            return false;
        }
        !self.exclude.is_match(rel_path)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, AggregateError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| AggregateError::GlobSyntax {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| AggregateError::GlobSyntax {
        pattern: patterns.join(", "),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(include: &[&str], exclude: &[&str]) -> SelectionMatcher {
        SelectionRule::new(
            include.iter().map(|s| s.to_string()).collect(),
            exclude.iter().map(|s| s.to_string()).collect(),
        )
        .compile()
        .unwrap()
    }

    #[test]
    fn test_empty_rule_matches_everything() {
        let m = matcher(&[], &[]);
        assert!(m.is_selected("a.txt"));
        assert!(m.is_selected("deep/nested/file.rs"));
    }

    #[test]
    fn test_include_filters_candidates() {
        let m = matcher(&["*.txt"], &[]);
        assert!(m.is_selected("a.txt"));
        assert!(m.is_selected("b/c.txt"));
        assert!(!m.is_selected("main.rs"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let m = matcher(&["*.txt"], &["b/*"]);
        assert!(m.is_selected("a.txt"));
        assert!(!m.is_selected("b/c.txt"));
    }

    #[test]
    fn test_exclude_without_include() {
        let m = matcher(&[], &["target/*"]);
        assert!(m.is_selected("src/main.rs"));
        assert!(!m.is_selected("target/debug"));
    }

    #[test]
    fn test_malformed_pattern_names_the_pattern() {
        let rule = SelectionRule::new(vec!["[".to_string()], vec![]);
        let err = rule.compile().unwrap_err();
        match err {
            AggregateError::GlobSyntax { pattern, .. } => assert_eq!(pattern, "["),
            other => panic!("expected GlobSyntax, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_exclude_pattern() {
        let rule = SelectionRule::new(vec![], vec!["a{".to_string()]);
        assert!(rule.compile().is_err());
    }
}
