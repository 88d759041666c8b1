use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::helpers::{TestError, TestErrorKind};
static COUNTER: AtomicU64 = AtomicU64::new(0);

mod tempfile {
    use super::COUNTER;
    use std::env;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Debug)]
    pub struct TempDir {
        path: PathBuf,
    }

    impl TempDir {
        pub fn new() -> std::io::Result<Self> {
            Builder::new().tempdir()
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[derive(Debug, Default)]
    pub struct Builder {
        prefix: Option<String>,
    }

    impl Builder {
        pub fn new() -> Self {
            Self { prefix: None }
        }

        pub fn prefix(mut self, value: &str) -> Self {
            self.prefix = Some(value.to_string());
            self
        }

        pub fn tempdir(self) -> std::io::Result<TempDir> {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis();
            let unique = COUNTER.fetch_add(1, super::Ordering::Relaxed);

            let mut dir = env::temp_dir();
            let prefix = self.prefix.unwrap_or_else(|| "axiomind-cli".to_string());
            dir.push(format!("{}-{}-{}-{}", prefix, process::id(), ts, unique));

            fs::create_dir_all(&dir)?;
            Ok(TempDir { path: dir })
        }
    }
}

use tempfile::Builder;
pub use tempfile::TempDir;

#[derive(Debug)]
#[allow(dead_code)]
pub struct TempFileManager {
    base_dir: TempDir,
}

impl TempFileManager {
    #[allow(dead_code)]
    pub fn new() -> Result<Self, TestError> {
        let base_dir = Builder::new()
            .prefix("axiomind-cli")
            .tempdir()
            .map_err(|err| {
                TestError::with_source(
                    TestErrorKind::FileOperationFailed,
                    "failed to create temporary directory",
                    err,
                )
            })?;

        Ok(Self { base_dir })
    }

    #[allow(dead_code)]
    pub fn create_directory(&self, name: &str) -> Result<PathBuf, TestError> {
        let path = self.base_dir.path().join(name);
        fs::create_dir_all(&path).map_err(|err| {
            TestError::with_source(
                TestErrorKind::FileOperationFailed,
                format!("failed to create directory '{}'", path.display()),
                err,
            )
        })?;
        Ok(path)
    }

    #[allow(dead_code)]
    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf, TestError> {
        let path = self.base_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                TestError::with_source(
                    TestErrorKind::FileOperationFailed,
                    format!("failed to create parent directory '{}'", parent.display()),
                    err,
                )
            })?;
        }
        let mut file = File::create(&path).map_err(|err| {
            TestError::with_source(
                TestErrorKind::FileOperationFailed,
                format!("failed to create file '{}'", path.display()),
                err,
            )
        })?;
        file.write_all(content.as_bytes()).map_err(|err| {
            TestError::with_source(
                TestErrorKind::FileOperationFailed,
                format!("failed to write file '{}'", path.display()),
                err,
            )
        })?;
        Ok(path)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.base_dir.path().join(name)
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        self.base_dir.path()
    }
}

impl Drop for TempFileManager {
    fn drop(&mut self) {
        // TempDir handles cleanup automatically.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_joins_base_directory() {
        let manager = TempFileManager::new().expect("create temp dir");
        let nested = manager.path("nested/output.txt");

        assert!(nested.starts_with(manager.root()));
        assert_eq!(nested.file_name().unwrap().to_string_lossy(), "output.txt");
    }
}
