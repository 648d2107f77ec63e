//! Lazy, depth-bounded directory traversal.

use crate::entry::{DirRef, Entry};
use crate::error::{Error, Result};
use crate::path::LogicalPath;
use globset::{Glob, GlobMatcher};
use std::fs;

/// Default recursion budget for walks.
///
/// This is a best-effort guard against symlink cycles and pathological
/// depth, not a contract: entries below the budget are silently omitted.
pub const DEFAULT_RECURSION_LIMIT: usize = 999;

/// Builder for a walk over a directory.
///
/// Defaults: non-recursive, unfiltered, recursion limit
/// [`DEFAULT_RECURSION_LIMIT`].
pub struct Walker {
    root: LogicalPath,
    filter: Option<GlobMatcher>,
    recursive: bool,
    limit: usize,
}

impl DirRef {
    /// Start building a walk over this directory.
    ///
    /// The directory becomes the root of a fresh relative trail: every
    /// yielded entry's `rel_path()` is relative to it.
    pub fn walker(&self) -> Walker {
        Walker {
            root: self.path().without_trail(),
            filter: None,
            recursive: false,
            limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Eagerly walk the directory, feeding each entry to `callback`.
    ///
    /// The callback returns `false` to stop the walk; the result is then
    /// `Ok(false)` instead of the `Ok(true)` of a completed walk. An
    /// optional shell-glob `filter` restricts entries by base name.
    pub fn walk<F>(&self, filter: Option<&str>, callback: F) -> Result<bool>
    where
        F: FnMut(Entry) -> bool,
    {
        let mut walker = self.walker();
        if let Some(pattern) = filter {
            walker = walker.filter(pattern)?;
        }
        walker.for_each(callback)
    }
}

impl Walker {
    /// Restrict yielded entries to base names matching a shell-glob pattern.
    ///
    /// The filter selects leaves only: a non-matching directory is excluded
    /// from the yielded sequence but still descended into when the walk is
    /// recursive.
    pub fn filter(mut self, pattern: &str) -> Result<Self> {
        self.filter = Some(Glob::new(pattern)?.compile_matcher());
        Ok(self)
    }

    /// Descend into subdirectories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Bound the recursion depth. A walk with budget 0 yields nothing;
    /// subdirectories are walked with the budget decremented.
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Open the root directory and return the lazy entry sequence.
    ///
    /// Fails with `FileAccess` when the root cannot be opened. Directory
    /// handles are released when the sequence is exhausted, dropped early,
    /// or terminated by an error.
    pub fn build(self) -> Result<Walk> {
        let mut frames = Vec::new();
        if self.limit > 0 {
            frames.push(Frame::open(self.root, self.limit, None)?);
        }
        Ok(Walk {
            frames,
            filter: self.filter,
            recursive: self.recursive,
        })
    }

    /// Eager form of the walk: feed each entry to `callback` until it
    /// returns `false` or the walk completes.
    ///
    /// Returns `Ok(true)` when the walk ran to completion and `Ok(false)`
    /// when the callback stopped it.
    pub fn for_each<F>(self, mut callback: F) -> Result<bool>
    where
        F: FnMut(Entry) -> bool,
    {
        for entry in self.build()? {
            if !callback(entry?) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// One open directory level of an ongoing walk.
struct Frame {
    handle: fs::ReadDir,
    dir: LogicalPath,
    budget: usize,
    /// Directory entry to yield once this frame is exhausted
    /// (descend-then-yield-self ordering).
    pending: Option<Entry>,
}

impl Frame {
    fn open(dir: LogicalPath, budget: usize, pending: Option<Entry>) -> Result<Self> {
        let handle =
            fs::read_dir(dir.as_str()).map_err(|e| Error::file_access(dir.as_str(), e))?;
        Ok(Frame {
            handle,
            dir,
            budget,
            pending,
        })
    }
}

/// Lazy sequence of classified entries produced by [`Walker::build`].
///
/// Entries come in platform enumeration order within a directory; when
/// recursive, a subdirectory's contents are yielded before the subdirectory
/// entry itself. Dropping the iterator releases all directory handles.
pub struct Walk {
    frames: Vec<Frame>,
    filter: Option<GlobMatcher>,
    recursive: bool,
}

impl Walk {
    fn matches(&self, entry: &Entry) -> bool {
        match &self.filter {
            None => true,
            Some(matcher) => matcher.is_match(entry.path().basename(None)),
        }
    }

    fn fail(&mut self, error: Error) -> Option<Result<Entry>> {
        // Release every open handle before surfacing the error.
        self.frames.clear();
        Some(Err(error))
    }
}

impl Iterator for Walk {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (budget, dir) = match self.frames.last() {
                Some(frame) => (frame.budget, frame.dir.clone()),
                None => return None,
            };

            let Some(next) = self.frames.last_mut()?.handle.next() else {
                // Directory exhausted: close it, then yield it (its own
                // subtree has already been yielded).
                let done = self.frames.pop()?;
                if let Some(entry) = done.pending
                    && self.matches(&entry)
                {
                    return Some(Ok(entry));
                }
                continue;
            };

            let dirent = match next {
                Ok(dirent) => dirent,
                Err(e) => return self.fail(e.into()),
            };
            let name = match dirent.file_name().into_string() {
                Ok(name) => name,
                Err(name) => {
                    return self.fail(Error::invalid_path(format!(
                        "non-UTF-8 entry name: {name:?}"
                    )));
                }
            };

            let child = match dir.with_sub_path(&name) {
                Ok(child) => child,
                Err(e) => return self.fail(e),
            };
            let entry = match child.classify() {
                Ok(entry) => entry,
                // The entry vanished between readdir and stat, or is a
                // special file: excluded, not fatal.
                Err(Error::Filesystem { .. }) => continue,
                Err(e) => return self.fail(e),
            };

            if entry.is_dir() && self.recursive && budget > 1 {
                // Descend first; the directory itself is yielded when its
                // frame pops.
                match Frame::open(child, budget - 1, Some(entry)) {
                    Ok(frame) => {
                        self.frames.push(frame);
                        continue;
                    }
                    Err(e) => return self.fail(e),
                }
            }

            if self.matches(&entry) {
                return Some(Ok(entry));
            }
        }
    }
}
