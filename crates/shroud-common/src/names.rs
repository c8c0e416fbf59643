//! Fully-qualified type name syntax.
//!
//! A fully-qualified name is a namespace prefix followed by a simple name,
//! e.g. `com.example.Widget`. A namespace prefix always ends with
//! [`NAMESPACE_SEPARATOR`] unless it is the root prefix, which is empty.
//! Nested types append [`NESTED_SEPARATOR`] and a segment to the name of
//! their enclosing type (`com.example.Widget$Builder`, `a.a$1`).

use std::borrow::Cow;

/// Separator between namespace levels, and between a namespace and a type.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Separator between an enclosing type's name and a nested segment.
pub const NESTED_SEPARATOR: char = '$';

/// Returns the namespace prefix of a fully-qualified name, including the
/// trailing separator.
///
/// The name may itself be a namespace prefix, in which case the prefix of
/// its parent namespace is returned:
///
/// ```
/// use shroud_common::namespace_prefix;
///
/// assert_eq!(namespace_prefix("a.b.Widget"), "a.b.");
/// assert_eq!(namespace_prefix("a.b."), "a.");
/// assert_eq!(namespace_prefix("a."), "");
/// assert_eq!(namespace_prefix("Widget"), "");
/// ```
pub fn namespace_prefix(name: &str) -> &str {
    // Skip a trailing separator so prefixes resolve to their parent.
    let searched = name.strip_suffix(NAMESPACE_SEPARATOR).unwrap_or(name);
    match searched.rfind(NAMESPACE_SEPARATOR) {
        Some(index) => &name[..index + NAMESPACE_SEPARATOR.len_utf8()],
        None => "",
    }
}

/// Returns the prefix of the namespace enclosing `prefix`.
///
/// The root prefix is its own parent.
pub fn parent_namespace_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        prefix
    } else {
        namespace_prefix(prefix)
    }
}

/// Returns the simple name of a fully-qualified name (everything after the
/// last namespace separator).
pub fn simple_name(name: &str) -> &str {
    match name.rfind(NAMESPACE_SEPARATOR) {
        Some(index) => &name[index + NAMESPACE_SEPARATOR.len_utf8()..],
        None => name,
    }
}

/// Strips the trailing separator from a namespace prefix, yielding the
/// namespace name that retention patterns are matched against.
pub fn namespace_of_prefix(prefix: &str) -> &str {
    prefix.strip_suffix(NAMESPACE_SEPARATOR).unwrap_or(prefix)
}

/// Turns a namespace name into a prefix by appending the separator.
///
/// The empty namespace stays empty: it denotes the root prefix.
pub fn prefix_for_namespace(namespace: &str) -> String {
    if namespace.is_empty() || namespace.ends_with(NAMESPACE_SEPARATOR) {
        namespace.to_string()
    } else {
        let mut prefix = String::with_capacity(namespace.len() + 1);
        prefix.push_str(namespace);
        prefix.push(NAMESPACE_SEPARATOR);
        prefix
    }
}

/// Folds a name for uniqueness comparison.
///
/// When mixed-case names are allowed, names are compared verbatim. When they
/// are not, two names that differ only in case would clash on
/// case-insensitive file systems, so they are compared lower-cased.
pub fn fold_case(name: &str, mixed_case: bool) -> Cow<'_, str> {
    if mixed_case || !name.chars().any(char::is_uppercase) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(name.to_lowercase())
    }
}

/// Returns whether `inner_name` is `outer_name`, one separator, and a
/// non-empty run of ASCII digits (`Outer$1`, `Outer$12`).
///
/// Only the length of `outer_name` matters: the separator character itself
/// is not checked, matching how anonymous types are laid out by compilers
/// that emit them.
pub fn has_numeric_suffix(inner_name: &str, outer_name: &str) -> bool {
    let suffix_start = outer_name.len() + 1;
    match inner_name.get(suffix_start..) {
        Some(suffix) if !suffix.is_empty() => suffix.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/names_tests.rs"]
mod tests;
