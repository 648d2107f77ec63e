//! # Pathwalk
//!
//! Logical-path arithmetic and bounded, filterable directory traversal.
//!
//! This library wraps filesystem locations in a validated, immutable
//! [`LogicalPath`] value type and builds safe traversal on top of it:
//! sub-path joins that cannot escape their root, secure joins for untrusted
//! segments, and a lazy, depth-bounded recursive walker yielding entries
//! classified as files or directories.
//!
//! ## Features
//!
//! - Immutable logical paths, validated once at construction
//! - Strict-bounds sub-path joins (`..` cannot ascend above the join root)
//! - Permissive relative-path arithmetic for computing display paths
//! - Lazy recursive walks with glob filters and a recursion budget
//! - Sorted listings, regex file search, and subtree copy/move
//!
//! ## Example
//!
//! ```no_run
//! use pathwalk::LogicalPath;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = LogicalPath::new("/var/data")?.assert_dir()?;
//!
//! // Joining cannot escape the root.
//! let config = root.path().with_sub_path("conf/app.toml")?;
//! assert!(root.path().with_sub_path("../escape").is_err());
//!
//! // Walk the tree lazily, files matching *.toml only.
//! let walker = root.walker().recursive(true).filter("*.toml")?;
//! for entry in walker.build()? {
//!     println!("{}", entry?.path());
//! }
//! # let _ = config;
//! # Ok(())
//! # }
//! ```

mod entry;
mod error;
mod join;
mod ops;
mod path;
mod walk;

pub use entry::{DirRef, Entry, FileRef};
pub use error::{Error, Result};
pub use path::{LogicalPath, PathKind, SEPARATOR};
pub use walk::{DEFAULT_RECURSION_LIMIT, Walk, Walker};
