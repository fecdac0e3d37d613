use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::trace;

use crate::{KisanflowError, Result, store::KvStore};

/// Directory-backed medium: key `k` lives in `<dir>/k.json`.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Opens `dir`, creating it when missing.
    pub fn new<T: AsRef<Path>>(dir: T) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(
        &self,
        key: &str,
    ) -> Result<PathBuf> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(KisanflowError::Store(format!("invalid store key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KvStore for FileKv {
    fn get_item(
        &self,
        key: &str,
    ) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let path = self.item_path(key)?;
        trace!("file_kv::set_item({})", path.display());

        // rename is atomic on the same filesystem, readers never see half a write
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(
        &self,
        key: &str,
    ) -> Result<()> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKv::new(dir.path()).unwrap();

        assert_eq!(kv.get_item("workflows").unwrap(), None);
        kv.set_item("workflows", "[]").unwrap();
        assert_eq!(kv.get_item("workflows").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("workflows.json").exists());

        kv.remove_item("workflows").unwrap();
        kv.remove_item("workflows").unwrap();
        assert_eq!(kv.get_item("workflows").unwrap(), None);
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        FileKv::new(dir.path()).unwrap().set_item("preferred-language", "hi").unwrap();

        let reopened = FileKv::new(dir.path()).unwrap();
        assert_eq!(reopened.get_item("preferred-language").unwrap().as_deref(), Some("hi"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKv::new(dir.path()).unwrap();
        assert!(kv.set_item("../escape", "x").is_err());
        assert!(kv.get_item("").is_err());
    }
}
