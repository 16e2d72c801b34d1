//! File provider wrapper that hides directories without an index document.
//!
//! A directory only opens when `index.html` exists inside it. Otherwise the
//! caller gets the same `NotFound` a missing path would produce, so nothing
//! about the directory layout leaks.

use std::io;

use crate::static_files::fs::{FileSystem, OpenFile};

/// File name that makes a directory servable.
pub const INDEX_DOCUMENT: &str = "index.html";

#[derive(Debug, Clone)]
pub struct NeuteredFileSystem<F> {
    inner: F,
}

impl<F> NeuteredFileSystem<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

/// Path of the index document inside the directory at `path`.
pub fn index_path(path: &str) -> String {
    let dir = path.strip_suffix('/').unwrap_or(path);
    format!("{dir}/{INDEX_DOCUMENT}")
}

impl<F: FileSystem> FileSystem for NeuteredFileSystem<F> {
    type File = F::File;

    async fn open(&self, path: &str) -> io::Result<F::File> {
        let file = self.inner.open(path).await?;
        let metadata = file.stat().await?;

        if metadata.is_dir() {
            let index = index_path(path);
            if let Err(e) = self.inner.open(&index).await {
                tracing::debug!(path = %path, error = %e, "Directory has no index document");
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_files::fs::Dir;

    fn fixture() -> (tempfile::TempDir, NeuteredFileSystem<Dir>) {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("css")).unwrap();
        std::fs::write(tmp.path().join("css/main.css"), "body {}").unwrap();
        std::fs::create_dir(tmp.path().join("docs")).unwrap();
        std::fs::write(tmp.path().join("docs/index.html"), "<h1>docs</h1>").unwrap();
        let fs = NeuteredFileSystem::new(Dir::new(tmp.path()));
        (tmp, fs)
    }

    #[test]
    fn test_index_path() {
        assert_eq!(index_path("/"), "/index.html");
        assert_eq!(index_path(""), "/index.html");
        assert_eq!(index_path("/docs"), "/docs/index.html");
        assert_eq!(index_path("/docs/"), "/docs/index.html");
    }

    #[tokio::test]
    async fn test_directory_without_index_is_not_found() {
        let (_tmp, fs) = fixture();
        let missing = fs.open("/nope").await.unwrap_err().kind();
        assert_eq!(missing, io::ErrorKind::NotFound);

        for path in ["/", "", "/css", "/css/"] {
            let err = fs.open(path).await.unwrap_err();
            assert_eq!(err.kind(), missing, "{path:?}");
        }
    }

    #[tokio::test]
    async fn test_directory_with_index_opens() {
        let (_tmp, fs) = fixture();
        for path in ["/docs", "/docs/"] {
            let dir = fs.open(path).await.unwrap();
            assert!(dir.stat().await.unwrap().is_dir());
        }
    }

    #[tokio::test]
    async fn test_files_pass_through() {
        let (_tmp, fs) = fixture();
        let file = fs.open("/css/main.css").await.unwrap();
        assert!(file.stat().await.unwrap().is_file());
    }
}
