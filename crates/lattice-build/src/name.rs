//! Output artifact naming.
//!
//! Every artifact filename follows the fixed grammar
//! `<name>[.<suffix>][.min].<ext>`. [`format_artifact`] produces names and
//! [`parse_artifact`] inverts them; the post-minify pass uses the parsed
//! `minified` flag to select files for re-minification.

/// A parsed artifact filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    pub name: String,
    pub suffix: Option<String>,
    pub minified: bool,
    pub ext: String,
}

/// Format an artifact filename.
///
/// Concatenates `name`, then `.<suffix>` if the suffix is non-empty, then
/// `.min` if `minify` is set, then `.<ext>`.
///
/// # Examples
///
/// ```
/// use lattice_build::name::format_artifact;
///
/// assert_eq!(format_artifact("index", None, false, "js"), "index.js");
/// assert_eq!(format_artifact("index", None, true, "mjs"), "index.min.mjs");
/// assert_eq!(format_artifact("foo", Some("iife"), false, "js"), "foo.iife.js");
/// ```
pub fn format_artifact(name: &str, suffix: Option<&str>, minify: bool, ext: &str) -> String {
    let mut out = String::from(name);
    if let Some(suffix) = suffix {
        if !suffix.is_empty() {
            out.push('.');
            out.push_str(suffix);
        }
    }
    if minify {
        out.push_str(".min");
    }
    out.push('.');
    out.push_str(ext);
    out
}

/// Parse a filename back into its grammar fields.
///
/// Inverse of [`format_artifact`] for names whose fields are dot-free and
/// whose suffix is not the literal `min`. Returns `None` when the filename
/// has no extension.
pub fn parse_artifact(file_name: &str) -> Option<ArtifactName> {
    let mut parts: Vec<&str> = file_name.split('.').collect();
    if parts.len() < 2 {
        return None;
    }
    let ext = parts.pop()?.to_string();
    let minified = parts.last() == Some(&"min");
    if minified {
        parts.pop();
    }
    let suffix = if parts.len() >= 2 {
        parts.pop().map(str::to_string)
    } else {
        None
    };
    let name = parts.join(".");
    if name.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ArtifactName {
        name,
        suffix,
        minified,
        ext,
    })
}

/// Whether a filename declares itself minified (carries the `.min` marker).
pub fn is_declared_minified(file_name: &str) -> bool {
    parse_artifact(file_name).is_some_and(|a| a.minified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_plain_name() {
        assert_eq!(format_artifact("index", None, false, "js"), "index.js");
    }

    #[test]
    fn formats_minified_name() {
        assert_eq!(format_artifact("index", None, true, "js"), "index.min.js");
    }

    #[test]
    fn formats_custom_extension() {
        assert_eq!(format_artifact("index", None, true, "mjs"), "index.min.mjs");
    }

    #[test]
    fn formats_suffix() {
        assert_eq!(
            format_artifact("foo", Some("iife"), false, "js"),
            "foo.iife.js"
        );
        assert_eq!(
            format_artifact("foo", Some("iife"), true, "js"),
            "foo.iife.min.js"
        );
    }

    #[test]
    fn empty_suffix_is_ignored() {
        assert_eq!(format_artifact("foo", Some(""), false, "js"), "foo.js");
    }

    #[test]
    fn parses_all_shapes() {
        assert_eq!(
            parse_artifact("index.js"),
            Some(ArtifactName {
                name: "index".into(),
                suffix: None,
                minified: false,
                ext: "js".into(),
            })
        );
        assert_eq!(
            parse_artifact("index.iife.min.js"),
            Some(ArtifactName {
                name: "index".into(),
                suffix: Some("iife".into()),
                minified: true,
                ext: "js".into(),
            })
        );
        assert_eq!(parse_artifact("noext"), None);
    }

    #[test]
    fn declared_minified_marker() {
        assert!(is_declared_minified("index.min.js"));
        assert!(is_declared_minified("widget.iife.min.js"));
        assert!(!is_declared_minified("index.js"));
        assert!(!is_declared_minified("widget.iife.js"));
        assert!(!is_declared_minified("README"));
    }

    proptest! {
        // Round-trip over the separator grammar for dot-free fields.
        #[test]
        fn roundtrip(
            name in "[a-z][a-z0-9_-]{0,12}",
            suffix in proptest::option::of("[a-l][a-z]{0,6}"),
            minify in proptest::bool::ANY,
            ext in "[a-z]{1,4}",
        ) {
            let formatted = format_artifact(&name, suffix.as_deref(), minify, &ext);
            let parsed = parse_artifact(&formatted).expect("grammar output must parse");
            prop_assert_eq!(parsed.name, name);
            prop_assert_eq!(parsed.suffix, suffix);
            prop_assert_eq!(parsed.minified, minify);
            prop_assert_eq!(parsed.ext, ext);
        }
    }
}
