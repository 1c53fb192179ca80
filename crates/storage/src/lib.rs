use anyhow::{Context, Result};
use shared::domain::ItemCollection;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

/// String-valued key-value persistence, scoped to one local profile.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Key-value store backed by a single JSON object file.
///
/// The whole file is read on open and rewritten on every change. A missing
/// file is an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_parent_dir_exists(&path)?;

        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("store file '{}' is not a JSON object", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read store file '{}'", path.display()))
            }
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened file store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `next` to disk and only then adopts it as the cached contents.
    fn commit(&mut self, next: BTreeMap<String, String>) -> Result<()> {
        let serialized =
            serde_json::to_string_pretty(&next).context("failed to encode store file")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized)
            .with_context(|| format!("failed to write '{}'", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "failed to replace store file '{}' with '{}'",
                self.path.display(),
                tmp_path.display()
            )
        })?;
        self.entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next)
    }
}

fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for store file '{}'",
            parent.display(),
            path.display()
        )
    })
}

/// Typed view over a [`KeyValueStore`]: the item collection is kept under one
/// key as a JSON array of strings.
#[derive(Debug, Clone)]
pub struct ItemStore<S> {
    inner: S,
}

impl<S: KeyValueStore> ItemStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn load_items(&self, key: &str) -> Result<Option<ItemCollection>> {
        let Some(raw) = self.inner.get_item(key)? else {
            return Ok(None);
        };
        let items = serde_json::from_str::<ItemCollection>(&raw)
            .with_context(|| format!("record '{key}' is not an array of non-empty strings"))?;
        Ok(Some(items))
    }

    pub fn save_items(&mut self, key: &str, items: &ItemCollection) -> Result<()> {
        let raw = serde_json::to_string(items).context("failed to encode item collection")?;
        self.inner
            .set_item(key, &raw)
            .with_context(|| format!("failed to persist record '{key}'"))
    }

    pub fn delete_items(&mut self, key: &str) -> Result<()> {
        self.inner
            .remove_item(key)
            .with_context(|| format!("failed to delete record '{key}'"))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
