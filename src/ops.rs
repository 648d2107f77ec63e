//! Directory-level convenience operations built on the walker.

use crate::entry::{DirRef, Entry, FileRef};
use crate::error::{Error, Result};
use crate::path::LogicalPath;
use regex::Regex;
use std::fs;

impl DirRef {
    /// Drain a walk into a vector.
    fn collect_entries(&self, filter: Option<&str>, recursive: bool) -> Result<Vec<Entry>> {
        let mut walker = self.walker().recursive(recursive);
        if let Some(pattern) = filter {
            walker = walker.filter(pattern)?;
        }
        walker.build()?.collect()
    }

    /// List entries sorted by plain byte-lexicographic comparison of their
    /// path strings.
    ///
    /// The ordering is not natural sort: `/a/10` comes before `/a/2`.
    pub fn list_sorted(&self, filter: Option<&str>, recursive: bool) -> Result<Vec<Entry>> {
        let mut entries = self.collect_entries(filter, recursive)?;
        entries.sort_by(|a, b| a.path().as_str().as_bytes().cmp(b.path().as_str().as_bytes()));
        Ok(entries)
    }

    /// Like [`list_sorted`], but returns root-relative path strings.
    ///
    /// [`list_sorted`]: DirRef::list_sorted
    pub fn list_sorted_rel(&self, filter: Option<&str>, recursive: bool) -> Result<Vec<String>> {
        let mut paths: Vec<String> = self
            .collect_entries(filter, recursive)?
            .into_iter()
            .filter_map(|entry| entry.path().rel_path())
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// List files, discarding directory entries.
    pub fn list_files(&self, filter: Option<&str>, recursive: bool) -> Result<Vec<FileRef>> {
        Ok(self
            .collect_entries(filter, recursive)?
            .into_iter()
            .filter_map(Entry::into_file)
            .collect())
    }

    /// Find the first file whose full path string matches `pattern`.
    ///
    /// The tree is walked recursively in descend-then-yield-self order and
    /// the walk stops at the first match. Fails with `FileNotFound` when the
    /// walk completes without one.
    pub fn file_by_pattern(&self, pattern: &Regex) -> Result<FileRef> {
        for entry in self.walker().recursive(true).build()? {
            if let Entry::File(file) = entry?
                && pattern.is_match(file.path().as_str())
            {
                return Ok(file);
            }
        }
        Err(Error::file_not_found(pattern.as_str()))
    }

    /// Copy this directory's contents into `target`.
    ///
    /// Each entry's destination is `target` extended by the entry's
    /// root-relative trail. Intervening directories are created on demand
    /// before each file is written; directory entries ensure their own
    /// destination exists, so empty directories survive the copy.
    pub fn copy_to(&self, target: &LogicalPath) -> Result<()> {
        for entry in self.walker().recursive(true).build()? {
            let entry = entry?;
            let dest = self.destination_for(&entry, target)?;
            match entry {
                Entry::File(file) => {
                    fs::create_dir_all(dest.dirname().as_str())?;
                    fs::copy(file.path().as_str(), dest.as_str())?;
                }
                Entry::Dir(_) => {
                    fs::create_dir_all(dest.as_str())?;
                }
            }
        }
        Ok(())
    }

    /// Move this directory's contents into `target`.
    ///
    /// Files are copied then removed from the source; each source directory
    /// is removed right after its subtree (descend-then-yield-self makes
    /// this a single pass), and the emptied source root is removed last.
    pub fn move_to(&self, target: &LogicalPath) -> Result<()> {
        for entry in self.walker().recursive(true).build()? {
            let entry = entry?;
            let dest = self.destination_for(&entry, target)?;
            match entry {
                Entry::File(file) => {
                    fs::create_dir_all(dest.dirname().as_str())?;
                    fs::copy(file.path().as_str(), dest.as_str())?;
                    fs::remove_file(file.path().as_str())?;
                }
                Entry::Dir(dir) => {
                    fs::create_dir_all(dest.as_str())?;
                    fs::remove_dir(dir.path().as_str())?;
                }
            }
        }
        fs::remove_dir(self.path().as_str())?;
        Ok(())
    }

    fn destination_for(&self, entry: &Entry, target: &LogicalPath) -> Result<LogicalPath> {
        let Some(trail) = entry.path().rel_path() else {
            // Walk entries always carry a trail.
            return Err(Error::filesystem(
                entry.path().as_str(),
                "entry has no trail relative to the walk root",
            ));
        };
        target.with_sub_path(&trail)
    }
}
