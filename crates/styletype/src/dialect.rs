//! Style-sheet dialect detection.

use std::fmt;
use std::path::Path;

/// A supported style-sheet dialect.
///
/// The set is closed: gating, normalization and error reporting all dispatch
/// on this enum, so a dialect is supported exactly when a normalizer arm
/// exists for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain CSS, used as-is.
    Css,
    /// Less, rendered to CSS by an external engine.
    Less,
    /// SCSS, compiled to CSS in-process.
    Scss,
}

impl Dialect {
    /// Map a file extension to its dialect.
    ///
    /// Matching is case-sensitive: `file.CSS` is not treated as CSS.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "css" => Some(Self::Css),
            "less" => Some(Self::Less),
            "scss" => Some(Self::Scss),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Css => "css",
            Self::Less => "less",
            Self::Scss => "scss",
        };
        f.write_str(name)
    }
}

/// Extract the extension from a path.
///
/// The extension is the substring after the last `.` anywhere in the path
/// string, so `a.module.scss` yields `scss` and a path with no dot, or
/// nothing after the final dot, yields `None`.
pub fn path_extension(path: &Path) -> Option<String> {
    let text = path.to_string_lossy();
    let index = text.rfind('.')?;
    let ext = &text[index + 1..];
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_supported_extensions() {
        assert_eq!(Dialect::from_extension("css"), Some(Dialect::Css));
        assert_eq!(Dialect::from_extension("less"), Some(Dialect::Less));
        assert_eq!(Dialect::from_extension("scss"), Some(Dialect::Scss));
        assert_eq!(Dialect::from_extension("sass"), None);
        assert_eq!(Dialect::from_extension("ts"), None);
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert_eq!(Dialect::from_extension("CSS"), None);
        assert_eq!(Dialect::from_extension("Scss"), None);
    }

    #[test]
    fn takes_last_extension() {
        assert_eq!(
            path_extension(Path::new("a.module.scss")).as_deref(),
            Some("scss")
        );
        assert_eq!(
            path_extension(Path::new("src/button.less")).as_deref(),
            Some("less")
        );
    }

    #[test]
    fn missing_or_empty_extension_is_none() {
        assert_eq!(path_extension(Path::new("Makefile")), None);
        assert_eq!(path_extension(Path::new("trailing.")), None);
    }

    #[test]
    fn dot_in_directory_counts() {
        // The extension is taken over the whole path string; a dotted
        // directory with an undotted file name yields the tail after that
        // dot, which then fails the dialect check.
        let ext = path_extension(Path::new("themes.v2/palette")).unwrap();
        assert_eq!(ext, "v2/palette");
        assert_eq!(Dialect::from_extension(&ext), None);
    }
}
