//! Namespace retention patterns.
//!
//! A retention list is a comma-separated list of patterns. Patterns are tried
//! in order and the first one that matches decides; a leading `!` turns a
//! match into a rejection. Namespaces no pattern matches are not retained.
//!
//! Within a pattern `?` matches one character and `*` any run of characters,
//! neither crossing a namespace separator, while `**` matches any run of
//! characters including separators (`com.example.**`, `com.ex**`).

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;

use shroud_common::NAMESPACE_SEPARATOR;

/// Answers whether a namespace must keep its original name.
///
/// Namespaces are passed without a trailing separator; the root namespace is
/// the empty string.
pub trait NamespaceMatcher {
    fn matches(&self, namespace: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid namespace pattern `{pattern}`")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

#[derive(Debug, Clone)]
struct NamespacePattern {
    negated: bool,
    matcher: GlobSet,
}

/// Glob-backed [`NamespaceMatcher`] for retention lists.
#[derive(Debug, Clone, Default)]
pub struct PatternNamespaceMatcher {
    patterns: Vec<NamespacePattern>,
}

impl PatternNamespaceMatcher {
    /// Compiles a sequence of retention lists, each of which may hold several
    /// comma-separated patterns.
    pub fn new<I, S>(lists: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        for list in lists {
            for pattern in list.as_ref().split(',').map(str::trim) {
                if pattern.is_empty() {
                    continue;
                }
                patterns.push(compile(pattern)?);
            }
        }
        Ok(Self { patterns })
    }

    /// Compiles a single comma-separated retention list.
    pub fn parse(list: &str) -> Result<Self, PatternError> {
        Self::new([list])
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile(pattern: &str) -> Result<NamespacePattern, PatternError> {
    let (negated, body) = match pattern.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let invalid = |source: globset::Error| PatternError::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    };
    // Namespace levels become path components so `*` stops at a level boundary.
    let mut builder = GlobSetBuilder::new();
    for glob in expand_double_stars(&to_path(body)) {
        builder.add(
            GlobBuilder::new(&glob)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .map_err(invalid)?,
        );
    }
    let matcher = builder.build().map_err(invalid)?;
    Ok(NamespacePattern { negated, matcher })
}

/// Rewrites every `**` that shares a component with other characters into
/// globs globset understands: one staying within the component (`*`) and one
/// crossing into further components (`*/**/*`). A `**` forming a whole
/// component is left as is.
fn expand_double_stars(glob: &str) -> Vec<String> {
    let mut globs = vec![String::new()];
    let mut rest = glob;
    while let Some(index) = rest.find("**") {
        let (head, tail) = (&rest[..index], &rest[index + 2..]);
        let before = &glob[..glob.len() - rest.len() + index];
        let starts_component = before.is_empty() || before.ends_with('/');
        let ends_component = tail.is_empty() || tail.starts_with('/');
        for glob in &mut globs {
            glob.push_str(head);
        }
        if starts_component && ends_component {
            for glob in &mut globs {
                glob.push_str("**");
            }
        } else {
            let mut crossing = String::new();
            if !starts_component {
                crossing.push_str("*/");
            }
            crossing.push_str("**");
            if !ends_component {
                crossing.push_str("/*");
            }
            globs = globs
                .into_iter()
                .flat_map(|glob| [format!("{glob}*"), format!("{glob}{crossing}")])
                .collect();
        }
        rest = tail;
    }
    for glob in &mut globs {
        glob.push_str(rest);
    }
    globs
}

fn to_path(namespace: &str) -> String {
    namespace.replace(NAMESPACE_SEPARATOR, "/")
}

impl NamespaceMatcher for PatternNamespaceMatcher {
    fn matches(&self, namespace: &str) -> bool {
        let path = to_path(namespace);
        self.patterns
            .iter()
            .find(|pattern| pattern.matcher.is_match(&path))
            .is_some_and(|pattern| !pattern.negated)
    }
}

#[cfg(test)]
#[path = "../tests/keep_matcher_tests.rs"]
mod tests;
