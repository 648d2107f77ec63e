//! Path arithmetic: joins, bounded sub-paths, and absolute/relative moves.

use crate::error::{Error, Result};
use crate::path::{LogicalPath, SEPARATOR};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left untouched by secure-join encoding, mirroring classic
/// URL form encoding. Everything else, separators included, is escaped.
const SEGMENT_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

impl LogicalPath {
    /// Join path segments literally.
    ///
    /// Separators between segments are normalized to exactly one; no `.` or
    /// `..` interpretation and no bounds checking takes place.
    ///
    /// `join(["sub", "file.txt"])` on `/some/path/` is `/some/path/sub/file.txt`.
    pub fn join<I>(&self, segments: I) -> Result<LogicalPath>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut raw = self.as_str().to_string();
        if raw.ends_with(SEPARATOR) {
            raw.pop();
        }
        for segment in segments {
            let segment = segment.as_ref();
            let segment = segment.strip_prefix(SEPARATOR).unwrap_or(segment);
            raw.push(SEPARATOR);
            raw.push_str(segment);
        }
        LogicalPath::new(raw)
    }

    /// Join path segments, treating each as a single untrusted directory or
    /// file name.
    ///
    /// Fails with `PathSecurityViolation` if a segment is `.`, `..`, or
    /// empty after encoding. Each segment is percent-encoded before
    /// concatenation, so an embedded separator becomes a literal part of one
    /// segment instead of splitting it.
    pub fn join_secure<I>(&self, segments: I) -> Result<LogicalPath>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut path = self.clone();
        for segment in segments {
            let segment = segment.as_ref();
            if segment == "." || segment == ".." {
                return Err(Error::security_violation(
                    "segment must not be '.' or '..'",
                ));
            }
            let encoded = utf8_percent_encode(segment, SEGMENT_ENCODE).to_string();
            if encoded.is_empty() {
                return Err(Error::security_violation("segment must not be empty"));
            }
            path = path.join([encoded.as_str()])?;
        }
        Ok(path)
    }

    /// Descend into a sub-path without escaping this path.
    ///
    /// The sub-path is split on separators; empty and `.` segments are
    /// dropped, `..` pops the last segment accumulated *in this call* and
    /// fails with `PathOutOfBounds` when there is nothing left to pop. The
    /// boundary is the receiver, not the filesystem root.
    ///
    /// The result carries the receiver's relative trail extended by the net
    /// new segments.
    pub fn with_sub_path(&self, subpath: &str) -> Result<LogicalPath> {
        let mut net: Vec<&str> = Vec::new();
        for part in subpath.split(SEPARATOR) {
            match part {
                "" | "." => continue,
                ".." => {
                    if net.pop().is_none() {
                        return Err(Error::out_of_bounds(subpath));
                    }
                }
                part => net.push(part),
            }
        }

        let mut trail: Vec<String> = self.rel_trail().unwrap_or_default().to_vec();
        trail.extend(net.iter().map(|s| s.to_string()));

        let mut raw = self.as_str().to_string();
        if !raw.ends_with(SEPARATOR) {
            raw.push(SEPARATOR);
        }
        raw.push_str(&net.join("/"));
        LogicalPath::with_trail(raw, Some(trail))
    }

    /// Resolve a relative path against this path.
    ///
    /// Applies the same segment collapsing as [`with_sub_path`] to the
    /// concatenation of this path and `relpath`, but with permissive bounds:
    /// `..` may ascend above the starting point, and ascending past the top
    /// clamps at `/` (absolute paths) or `.` (relative paths). The
    /// absolute/relative kind of the original path is preserved.
    ///
    /// [`with_sub_path`]: LogicalPath::with_sub_path
    pub fn with_relative_path(&self, relpath: &str) -> Result<LogicalPath> {
        let absolute = self.is_absolute();
        let combined = format!("{}/{}", self.as_str(), relpath);

        let mut segments: Vec<&str> = Vec::new();
        for part in combined.split(SEPARATOR) {
            match part {
                "" | "." => continue,
                ".." => {
                    segments.pop();
                }
                part => segments.push(part),
            }
        }

        let raw = if absolute {
            format!("/{}", segments.join("/"))
        } else if segments.is_empty() {
            ".".to_string()
        } else {
            segments.join("/")
        };
        let trail = segments.into_iter().map(str::to_string).collect();
        LogicalPath::with_trail(raw, Some(trail))
    }

    /// Transform to an absolute path.
    ///
    /// Identity when already absolute. Otherwise the path is prefixed with
    /// `base`, or the process working directory when no base is given.
    pub fn abs(&self, base: Option<&str>) -> Result<LogicalPath> {
        if self.is_absolute() {
            return LogicalPath::new(self.as_str());
        }
        let base = match base {
            Some(base) => base.to_string(),
            None => std::env::current_dir()?.to_string_lossy().into_owned(),
        };
        let base = base.strip_suffix(SEPARATOR).unwrap_or(&base);
        LogicalPath::new(format!("{}/{}", base, self.as_str()))
    }

    /// Make an absolute path relative to `root`.
    ///
    /// Identity when the path is already relative. Fails with `NotASubpath`
    /// unless `root` is a literal string prefix of the path; otherwise the
    /// prefix and a leading separator are stripped.
    pub fn rel(&self, root: &str) -> Result<LogicalPath> {
        if !self.is_absolute() {
            return LogicalPath::new(self.as_str());
        }
        let Some(rest) = self.as_str().strip_prefix(root) else {
            return Err(Error::not_a_subpath(self.as_str(), root));
        };
        let rest = rest.strip_prefix(SEPARATOR).unwrap_or(rest);
        LogicalPath::new(rest)
    }
}
