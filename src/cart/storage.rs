use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CartLineItem;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cart storage io error")]
    Io(#[from] io::Error),

    #[error("stored cart is malformed")]
    Malformed(#[from] serde_json::Error),
}

/// Where a cart is kept between page loads.
pub trait CartStorage {
    /// Returns `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<CartLineItem>>, StorageError>;

    fn save(&mut self, items: &[CartLineItem]) -> Result<(), StorageError>;
}

#[derive(Deserialize)]
struct StoredCart {
    items: Vec<CartLineItem>,
}

#[derive(Serialize)]
struct StoredCartRef<'a> {
    items: &'a [CartLineItem],
}

/// JSON document on disk, written through a temp file and renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<CartLineItem>>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredCart = serde_json::from_str(&raw)?;
        Ok(Some(stored.items))
    }

    fn save(&mut self, items: &[CartLineItem]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec(&StoredCartRef { items })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the serialized cart in memory; used for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    raw: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<CartLineItem>>, StorageError> {
        match &self.raw {
            Some(raw) => {
                let stored: StoredCart = serde_json::from_str(raw)?;
                Ok(Some(stored.items))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, items: &[CartLineItem]) -> Result<(), StorageError> {
        self.raw = Some(serde_json::to_string(&StoredCartRef { items })?);
        Ok(())
    }
}
