//! Directory-backed file provider.
//!
//! # Responsibilities
//! - Define the `FileSystem` / `OpenFile` seam used by the static asset layer
//! - Resolve request paths under a fixed root directory
//!
//! # Design Decisions
//! - Paths are cleaned lexically: `..` can never climb above the root
//! - Paths that cannot name a file (NUL, backslash) are reported as `NotFound`

use std::fs::Metadata;
use std::future::Future;
use std::io;
use std::path::PathBuf;

/// Something that can open files by slash-separated path.
pub trait FileSystem: Send + Sync {
    type File: OpenFile;

    /// Open the entry at `path`.
    fn open(&self, path: &str) -> impl Future<Output = io::Result<Self::File>> + Send;
}

/// An open file or directory.
pub trait OpenFile: Send + Sync {
    /// Fetch the entry's metadata.
    fn stat(&self) -> impl Future<Output = io::Result<Metadata>> + Send;
}

impl OpenFile for tokio::fs::File {
    async fn stat(&self) -> io::Result<Metadata> {
        self.metadata().await
    }
}

/// A file provider rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct Dir {
    root: PathBuf,
}

impl Dir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a request path onto the filesystem below the root.
    pub fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        if path.contains('\0') || path.contains('\\') {
            return Err(io::Error::new(io::ErrorKind::NotFound, "invalid character in path"));
        }

        let mut resolved = self.root.clone();
        for segment in clean(path) {
            resolved.push(segment);
        }
        Ok(resolved)
    }
}

impl FileSystem for Dir {
    type File = tokio::fs::File;

    async fn open(&self, path: &str) -> io::Result<tokio::fs::File> {
        let full_path = self.resolve(path)?;
        tokio::fs::File::open(&full_path).await.map_err(|e| {
            // "a/file.css/x" fails with ENOTDIR; that is just a missing path
            if e.kind() == io::ErrorKind::NotADirectory {
                io::Error::new(io::ErrorKind::NotFound, e)
            } else {
                e
            }
        })
    }
}

/// Lexically clean a slash-separated path into its segments.
fn clean(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert!(clean("/").is_empty());
        assert!(clean("").is_empty());
        assert_eq!(clean("/css/main.css"), vec!["css", "main.css"]);
        assert_eq!(clean("/a/./b//c/"), vec!["a", "b", "c"]);
        assert_eq!(clean("/a/../b"), vec!["b"]);
        assert_eq!(clean("/../../etc/passwd"), vec!["etc", "passwd"]);
    }

    #[test]
    fn test_resolve_stays_under_root() {
        let dir = Dir::new("/srv/static");
        assert_eq!(dir.resolve("/../../etc/passwd").unwrap(), PathBuf::from("/srv/static/etc/passwd"));
        assert_eq!(dir.resolve("/").unwrap(), PathBuf::from("/srv/static"));
        assert_eq!(
            dir.resolve("/a\\..\\b").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_open_and_stat() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("css")).unwrap();
        std::fs::write(tmp.path().join("css/main.css"), "body {}").unwrap();

        let dir = Dir::new(tmp.path());
        let file = dir.open("/css/main.css").await.unwrap();
        assert!(file.stat().await.unwrap().is_file());

        let folder = dir.open("/css").await.unwrap();
        assert!(folder.stat().await.unwrap().is_dir());

        let err = dir.open("/css/main.css/x").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
