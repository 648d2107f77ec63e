//! Entry classification and typed path narrowing.

use crate::error::{Error, Result};
use crate::path::LogicalPath;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::ops::Deref;

/// A path classified as either a regular file or a directory.
///
/// Classification stats the path at the moment of the call; it is never
/// cached, so separate classifications can disagree when the filesystem
/// changes underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A regular file.
    File(FileRef),
    /// A directory.
    Dir(DirRef),
}

impl Entry {
    /// The underlying logical path.
    pub fn path(&self) -> &LogicalPath {
        match self {
            Entry::File(file) => file.path(),
            Entry::Dir(dir) => dir.path(),
        }
    }

    /// True if this entry was classified as a file. Tests the tag, does not
    /// re-probe the filesystem.
    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }

    /// True if this entry was classified as a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Dir(_))
    }

    /// Extract the file wrapper, discarding directories.
    pub fn into_file(self) -> Option<FileRef> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Dir(_) => None,
        }
    }

    /// Extract the directory wrapper, discarding files.
    pub fn into_dir(self) -> Option<DirRef> {
        match self {
            Entry::Dir(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().as_str())
    }
}

/// A logical path narrowed to a regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    path: LogicalPath,
}

/// A logical path narrowed to a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirRef {
    path: LogicalPath,
}

impl LogicalPath {
    /// Uncached existence probe.
    pub fn exists(&self) -> bool {
        fs::metadata(self.as_str()).is_ok()
    }

    /// Uncached regular-file probe.
    pub fn is_file(&self) -> bool {
        fs::metadata(self.as_str()).map(|m| m.is_file()).unwrap_or(false)
    }

    /// Uncached directory probe.
    pub fn is_dir(&self) -> bool {
        fs::metadata(self.as_str()).map(|m| m.is_dir()).unwrap_or(false)
    }

    /// Stat the path and tag it as a file or directory.
    ///
    /// Fails with `Filesystem` when the path does not exist or is neither a
    /// regular file nor a directory at probe time; other probe failures
    /// surface as `Io`.
    pub fn classify(&self) -> Result<Entry> {
        let meta = fs::metadata(self.as_str()).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::filesystem(self.as_str(), "path does not exist")
            } else {
                Error::Io { source: e }
            }
        })?;
        if meta.is_file() {
            Ok(Entry::File(self.as_file()))
        } else if meta.is_dir() {
            Ok(Entry::Dir(self.as_dir()))
        } else {
            Err(Error::filesystem(
                self.as_str(),
                "neither a regular file nor a directory",
            ))
        }
    }

    /// Narrow to a file wrapper without probing the filesystem.
    pub fn as_file(&self) -> FileRef {
        FileRef { path: self.clone() }
    }

    /// Narrow to a directory wrapper without probing the filesystem.
    pub fn as_dir(&self) -> DirRef {
        DirRef { path: self.clone() }
    }

    /// Narrow to a file wrapper, failing when the path is not a regular
    /// file on disk.
    pub fn assert_file(&self) -> Result<FileRef> {
        if self.is_file() {
            Ok(self.as_file())
        } else {
            Err(Error::filesystem(self.as_str(), "not a valid file"))
        }
    }

    /// Narrow to a directory wrapper, failing when the path is not a
    /// directory on disk.
    pub fn assert_dir(&self) -> Result<DirRef> {
        if self.is_dir() {
            Ok(self.as_dir())
        } else {
            Err(Error::filesystem(self.as_str(), "not a valid directory"))
        }
    }

    /// Like [`assert_dir`], but creates the directory (and missing parents)
    /// first when it does not exist.
    ///
    /// [`assert_dir`]: LogicalPath::assert_dir
    pub fn assert_dir_created(&self) -> Result<DirRef> {
        if !self.exists() {
            fs::create_dir_all(self.as_str())?;
        }
        self.assert_dir()
    }

    /// Build a file path under this path from a bare name and an optional
    /// extension.
    ///
    /// The extension must be alphanumeric; the name must not contain a
    /// separator.
    pub fn with_file_name(&self, name: &str, extension: &str) -> Result<FileRef> {
        if !extension.is_empty() && !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::invalid_path(format!(
                "file extension '{extension}' must be alphanumeric"
            )));
        }
        if name.contains('/') {
            return Err(Error::invalid_path(format!(
                "file name '{name}' must not contain a separator"
            )));
        }
        let raw = if extension.is_empty() {
            format!("{}/{}", self.as_str(), name)
        } else {
            format!("{}/{}.{}", self.as_str(), name, extension)
        };
        Ok(LogicalPath::new(raw)?.as_file())
    }
}

impl FileRef {
    /// The underlying logical path.
    pub fn path(&self) -> &LogicalPath {
        &self.path
    }

    /// Consume the wrapper, returning the logical path.
    pub fn into_path(self) -> LogicalPath {
        self.path
    }

    /// Strict-bounds sub-path join, starting from the file's containing
    /// directory rather than the file itself.
    pub fn with_sub_path(&self, subpath: &str) -> Result<LogicalPath> {
        self.path.parent_join_base().with_sub_path(subpath)
    }

    /// Permissive relative join, starting from the file's containing
    /// directory rather than the file itself.
    pub fn with_relative_path(&self, relpath: &str) -> Result<LogicalPath> {
        self.path.parent_join_base().with_relative_path(relpath)
    }

    /// Size of the file in bytes, from a fresh stat.
    pub fn size(&self) -> Result<u64> {
        Ok(fs::metadata(self.path.as_str())?.len())
    }

    /// Remove the file from the filesystem.
    pub fn unlink(&self) -> Result<()> {
        fs::remove_file(self.path.as_str())?;
        Ok(())
    }
}

impl DirRef {
    /// The underlying logical path.
    pub fn path(&self) -> &LogicalPath {
        &self.path
    }

    /// Consume the wrapper, returning the logical path.
    pub fn into_path(self) -> LogicalPath {
        self.path
    }

    /// Create this directory and any missing parents.
    pub fn mkdir(&self) -> Result<()> {
        fs::create_dir_all(self.path.as_str())?;
        Ok(())
    }
}

impl Deref for FileRef {
    type Target = LogicalPath;

    fn deref(&self) -> &LogicalPath {
        &self.path
    }
}

impl Deref for DirRef {
    type Target = LogicalPath;

    fn deref(&self) -> &LogicalPath {
        &self.path
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path.as_str())
    }
}

impl fmt::Display for DirRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path(s: impl AsRef<std::path::Path>) -> LogicalPath {
        LogicalPath::new(s.as_ref().to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_probes_are_uncached() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("probe.txt");
        let p = path(&file);

        assert!(!p.exists());
        fs::write(&file, b"data").unwrap();
        assert!(p.exists());
        assert!(p.is_file());
        assert!(!p.is_dir());
        fs::remove_file(&file).unwrap();
        assert!(!p.exists());
    }

    #[test]
    fn test_classify() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("f.txt"), b"x").unwrap();
        fs::create_dir(temp_dir.path().join("d")).unwrap();

        let file = path(temp_dir.path().join("f.txt")).classify().unwrap();
        assert!(file.is_file());
        assert!(!file.is_dir());

        let dir = path(temp_dir.path().join("d")).classify().unwrap();
        assert!(dir.is_dir());

        let missing = path(temp_dir.path().join("gone")).classify();
        assert!(matches!(missing, Err(Error::Filesystem { .. })));
    }

    #[test]
    fn test_assertions() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("f.txt"), b"x").unwrap();

        let p = path(temp_dir.path().join("f.txt"));
        assert!(p.assert_file().is_ok());
        assert!(matches!(p.assert_dir(), Err(Error::Filesystem { .. })));

        let d = path(temp_dir.path());
        assert!(d.assert_dir().is_ok());
        assert!(matches!(d.assert_file(), Err(Error::Filesystem { .. })));

        // Neither assertion holds for a missing path.
        let missing = path(temp_dir.path().join("gone"));
        assert!(missing.assert_file().is_err());
        assert!(missing.assert_dir().is_err());
    }

    #[test]
    fn test_assert_dir_created() {
        let temp_dir = TempDir::new().unwrap();
        let target = path(temp_dir.path().join("a/b/c"));

        assert!(!target.exists());
        let dir = target.assert_dir_created().unwrap();
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_unchecked_narrowing_does_not_probe() {
        // as_file/as_dir never touch the filesystem.
        let p = LogicalPath::new("/definitely/not/there").unwrap();
        assert_eq!(p.as_file().path().as_str(), "/definitely/not/there");
        assert_eq!(p.as_dir().path().as_str(), "/definitely/not/there");
    }

    #[test]
    fn test_file_joins_start_at_parent() {
        let file = LogicalPath::new("/data/set/file.txt").unwrap().as_file();

        let sibling = file.with_sub_path("./other.yml").unwrap();
        assert_eq!(sibling.as_str(), "/data/set/other.yml");

        let up = file.with_relative_path("..").unwrap();
        assert_eq!(up.as_str(), "/data");
    }

    #[test]
    fn test_with_file_name() {
        let dir = LogicalPath::new("/srv/reports").unwrap();
        let f = dir.with_file_name("summary", "txt").unwrap();
        assert_eq!(f.path().as_str(), "/srv/reports/summary.txt");

        let f = dir.with_file_name("LICENSE", "").unwrap();
        assert_eq!(f.path().as_str(), "/srv/reports/LICENSE");

        assert!(dir.with_file_name("x", "t.xt").is_err());
        assert!(dir.with_file_name("a/b", "txt").is_err());
    }

    #[test]
    fn test_file_size_and_unlink() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("f.bin"), b"12345").unwrap();

        let file = path(temp_dir.path().join("f.bin")).assert_file().unwrap();
        assert_eq!(file.size().unwrap(), 5);

        file.unlink().unwrap();
        assert!(!file.path().exists());
        assert!(file.size().is_err());
    }

    #[test]
    fn test_mkdir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = path(temp_dir.path().join("x/y")).as_dir();
        dir.mkdir().unwrap();
        assert!(dir.path().is_dir());
    }
}
