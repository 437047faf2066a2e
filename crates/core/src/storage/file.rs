use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::CartError;
use super::traits::KeyValueStore;

/// Key-value store keeping one file per key inside a directory (native only).
///
/// Keys are mapped to file names by replacing every character outside
/// `[A-Za-z0-9._-]` with `_`, so `@RocketShoes:cart` lives in
/// `_RocketShoes_cart.json`. Writes go to a temporary file first and are
/// renamed into place, so a crash never leaves a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the backing directory, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CartError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// File a key is stored in.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CartError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CartError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}
