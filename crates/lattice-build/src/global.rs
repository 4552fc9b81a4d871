//! Global-symbol naming for IIFE bundles.
//!
//! Browser-global bundles need one identifier-safe symbol each, and loading
//! several of them on one page must never clash. The derived name is the
//! display name followed by every group-path segment and the logical file
//! name, each token case-normalized and concatenated PascalCase-style.
//!
//! Tokens are normalized independently (first alphanumeric uppercased, the
//! rest lowercased, everything else stripped) so segment boundaries stay
//! visible in the result: `("modules", "foo-bar")` and `("modules-foo",
//! "bar")` derive distinct symbols.

/// Derive the global symbol name for a sub-module IIFE bundle.
///
/// # Examples
///
/// ```
/// use lattice_build::global::derive_global_name;
///
/// assert_eq!(
///     derive_global_name("Foobar", "modules", "widget"),
///     "FoobarModulesWidget"
/// );
/// assert_eq!(derive_global_name("Foobar", "", "widget"), "FoobarWidget");
/// ```
pub fn derive_global_name(display_name: &str, group_path: &str, logical_name: &str) -> String {
    let mut out = String::new();
    let tokens = std::iter::once(display_name)
        .chain(group_path.split('/').filter(|s| !s.is_empty()))
        .chain(std::iter::once(logical_name));
    for token in tokens {
        push_normalized(&mut out, token);
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

fn push_normalized(out: &mut String, token: &str) {
    let mut first = true;
    for ch in token.chars().filter(char::is_ascii_alphanumeric) {
        if first {
            out.push(ch.to_ascii_uppercase());
            first = false;
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
}
