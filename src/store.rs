//! ファイルベースの永続ストア
//!
//! 1レコード = `<data_dir>/<key>.json`。書き込みは毎回丸ごと上書き。

use crate::error::Result;
use lumiere_common::{Error, KeyValueStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> lumiere_common::Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> lumiere_common::Result<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| Error::Storage(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path()).expect("store");
        assert_eq!(store.get("lumiere_photos").expect("get"), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path()).expect("store");

        store.set("lumiere_profile", "{\"name\":\"A\"}").expect("set");
        assert!(store.path_for("lumiere_profile").exists());
        assert_eq!(
            store.get("lumiere_profile").expect("get").as_deref(),
            Some("{\"name\":\"A\"}")
        );
    }

    #[test]
    fn test_creates_nested_dir() {
        let dir = tempdir().expect("Failed to create temp dir");
        let nested = dir.path().join("a").join("b");
        let store = FileStore::new(&nested).expect("store");
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }
}
