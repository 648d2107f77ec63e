//! The logical path value type.

use crate::error::{Error, Result};
use globset::{Glob, GlobMatcher};
use std::fmt;

/// The path separator. Logical paths use POSIX separators regardless of host.
pub const SEPARATOR: char = '/';

/// Whether a logical path is anchored at the filesystem root or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Path begins with the separator.
    Absolute,
    /// Path is relative to some base directory.
    Relative,
}

/// An immutable, validated in-memory path string.
///
/// A `LogicalPath` is pure data: constructing one never touches the
/// filesystem. It carries an optional *relative trail*, the sequence of
/// segments accumulated since the last root declaration (a walk root or the
/// receiver of the first sub-path join). Every transformation returns a new
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalPath {
    raw: String,
    kind: PathKind,
    rel_trail: Option<Vec<String>>,
}

impl LogicalPath {
    /// Create a logical path from a string.
    ///
    /// Fails with `InvalidPath` if the string contains a NUL byte. Existence
    /// on disk is not checked.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        Self::with_trail(raw.into(), None)
    }

    /// Create a logical path carrying a relative trail.
    pub(crate) fn with_trail(raw: String, rel_trail: Option<Vec<String>>) -> Result<Self> {
        if raw.contains('\0') {
            return Err(Error::invalid_path("NUL byte detected in path"));
        }
        let kind = if raw.starts_with(SEPARATOR) {
            PathKind::Absolute
        } else {
            PathKind::Relative
        };
        Ok(Self {
            raw,
            kind,
            rel_trail,
        })
    }

    /// The path string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this path is absolute or relative.
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    /// True if the path begins with the separator.
    pub fn is_absolute(&self) -> bool {
        self.kind == PathKind::Absolute
    }

    /// Segments accumulated since the last root declaration, if any.
    pub fn rel_trail(&self) -> Option<&[String]> {
        self.rel_trail.as_deref()
    }

    /// The relative trail joined with separators, if any.
    pub fn rel_path(&self) -> Option<String> {
        self.rel_trail.as_ref().map(|t| t.join("/"))
    }

    /// Copy of this path with the trail discarded, so that a new walk can
    /// declare it as a root.
    pub(crate) fn without_trail(&self) -> LogicalPath {
        LogicalPath {
            raw: self.raw.clone(),
            kind: self.kind,
            rel_trail: None,
        }
    }

    /// Sub-path join starting point used by file-typed wrappers: the
    /// parent directory, keeping the trail.
    pub(crate) fn parent_join_base(&self) -> LogicalPath {
        LogicalPath {
            raw: posix_dirname(&self.raw),
            kind: self.kind,
            rel_trail: self.rel_trail.clone(),
        }
    }

    /// The parent logical path, by pure string segment logic.
    ///
    /// POSIX dirname semantics: trailing separators collapse, a path without
    /// a separator yields `"."`.
    pub fn dirname(&self) -> LogicalPath {
        let raw = posix_dirname(&self.raw);
        let kind = if raw.starts_with(SEPARATOR) {
            PathKind::Absolute
        } else {
            PathKind::Relative
        };
        LogicalPath {
            raw,
            kind,
            rel_trail: None,
        }
    }

    /// The last path segment, optionally with a suffix stripped.
    ///
    /// `basename("demo.inc.txt", Some(".txt"))` is `"demo.inc"`. The suffix
    /// is only stripped when it is a proper suffix of the name.
    pub fn basename(&self, suffix: Option<&str>) -> String {
        let name = last_segment(&self.raw);
        if let Some(suffix) = suffix
            && !suffix.is_empty()
            && name != suffix
            && let Some(stripped) = name.strip_suffix(suffix)
        {
            return stripped.to_string();
        }
        name.to_string()
    }

    /// The part of the last segment after its final dot, or `""` when the
    /// segment has no dot. `demo.inc.txt` yields `txt`.
    pub fn extension(&self) -> String {
        let name = last_segment(&self.raw);
        match name.rfind('.') {
            Some(i) => name[i + 1..].to_string(),
            None => String::new(),
        }
    }

    /// The last segment without its extension. `demo.inc.txt` yields
    /// `demo.inc`.
    pub fn file_stem(&self) -> String {
        let name = last_segment(&self.raw);
        match name.rfind('.') {
            Some(i) => name[..i].to_string(),
            None => name.to_string(),
        }
    }

    /// Match the full path string against a pre-compiled glob matcher.
    ///
    /// Compile the glob once and reuse the matcher when testing many paths.
    pub fn matches(&self, matcher: &GlobMatcher) -> bool {
        matcher.is_match(&self.raw)
    }

    /// Match the full path string against one or more shell-glob patterns.
    ///
    /// Returns true if any pattern matches. Convenience for one-off checks;
    /// every pattern is compiled on each call, so repeated tests should
    /// compile once and use [`matches`].
    ///
    /// [`matches`]: LogicalPath::matches
    pub fn matches_glob<I>(&self, patterns: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for pattern in patterns {
            let matcher = Glob::new(pattern.as_ref())?.compile_matcher();
            if self.matches(&matcher) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True if this path's string starts with `other`.
    pub fn is_subpath_of(&self, other: &str) -> bool {
        self.raw.starts_with(other)
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// POSIX dirname on a raw path string.
fn posix_dirname(s: &str) -> String {
    let trimmed = s.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        // All separators, or empty input.
        return if s.starts_with(SEPARATOR) { "/" } else { "." }.to_string();
    }
    match trimmed.rfind(SEPARATOR) {
        None => ".".to_string(),
        Some(i) => {
            let parent = trimmed[..i].trim_end_matches(SEPARATOR);
            if parent.is_empty() {
                "/".to_string()
            } else {
                parent.to_string()
            }
        }
    }
}

/// The last segment of a raw path string, ignoring trailing separators.
fn last_segment(s: &str) -> &str {
    let trimmed = s.trim_end_matches(SEPARATOR);
    match trimmed.rfind(SEPARATOR) {
        None => trimmed,
        Some(i) => &trimmed[i + 1..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_nul_byte() {
        assert!(LogicalPath::new("/some/pa\0th").is_err());
        assert!(LogicalPath::new("/some/path").is_ok());
    }

    #[test]
    fn test_kind() {
        assert!(LogicalPath::new("/a/b").unwrap().is_absolute());
        assert!(!LogicalPath::new("a/b").unwrap().is_absolute());
        assert_eq!(LogicalPath::new("a").unwrap().kind(), PathKind::Relative);
    }

    #[test]
    fn test_dirname() {
        let cases = [
            ("some/path/demo.inc.txt", "some/path"),
            ("/a/b", "/a"),
            ("/a", "/"),
            ("/", "/"),
            ("a", "."),
            ("a/", "."),
            ("/a/b/", "/a"),
            ("//a", "/"),
            ("/a//b", "/a"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                LogicalPath::new(input).unwrap().dirname().as_str(),
                expected,
                "dirname of {input:?}"
            );
        }
    }

    #[test]
    fn test_basename() {
        let p = LogicalPath::new("some/path/demo.inc.txt").unwrap();
        assert_eq!(p.basename(None), "demo.inc.txt");
        assert_eq!(p.basename(Some(".txt")), "demo.inc");
        // Suffix equal to the whole name is not stripped.
        let hidden = LogicalPath::new("/dir/.txt").unwrap();
        assert_eq!(hidden.basename(Some(".txt")), ".txt");
        // Trailing separators collapse.
        let trailing = LogicalPath::new("/a/b/").unwrap();
        assert_eq!(trailing.basename(None), "b");
    }

    #[test]
    fn test_extension_and_stem() {
        let p = LogicalPath::new("some/path/demo.inc.txt").unwrap();
        assert_eq!(p.extension(), "txt");
        assert_eq!(p.file_stem(), "demo.inc");

        let plain = LogicalPath::new("/a/readme").unwrap();
        assert_eq!(plain.extension(), "");
        assert_eq!(plain.file_stem(), "readme");

        let hidden = LogicalPath::new(".txt").unwrap();
        assert_eq!(hidden.extension(), "txt");
        assert_eq!(hidden.file_stem(), "");
    }

    #[test]
    fn test_matches_glob() {
        let p = LogicalPath::new("/srv/app/index.php").unwrap();
        assert!(p.matches_glob(["*.php"]).unwrap());
        assert!(p.matches_glob(["*.js", "*.php"]).unwrap());
        assert!(!p.matches_glob(["*.js"]).unwrap());
        assert!(p.matches_glob(["*.["]).is_err());
    }

    #[test]
    fn test_matches_with_precompiled_matcher() {
        let matcher = Glob::new("*.log").unwrap().compile_matcher();
        let hit = LogicalPath::new("/var/log/app.log").unwrap();
        let miss = LogicalPath::new("/var/log/app.txt").unwrap();
        assert!(hit.matches(&matcher));
        assert!(!miss.matches(&matcher));
    }

    #[test]
    fn test_is_subpath_of() {
        let p = LogicalPath::new("/some/path").unwrap();
        assert!(p.is_subpath_of("/some"));
        assert!(!p.is_subpath_of("/other"));
    }

    #[test]
    fn test_display() {
        let p = LogicalPath::new("/a/b.txt").unwrap();
        assert_eq!(p.to_string(), "/a/b.txt");
    }

    #[test]
    fn test_fresh_path_has_no_trail() {
        let p = LogicalPath::new("/a/b").unwrap();
        assert_eq!(p.rel_trail(), None);
        assert_eq!(p.rel_path(), None);
    }
}
