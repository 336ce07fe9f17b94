//! Record persistence
//!
//! Composes serialization, transport encoding and optional encryption into
//! save/load operations with matching blocking and async surfaces.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::config::StorageConfig;
use crate::crypto;
use crate::encode;
use crate::error::{Result, StoreError};

/// Persists serde values as one transport-encoded text file per record.
///
/// The optional cipher key is shared state behind an internal lock. Each
/// save/load captures the key state once at entry, so flipping the key
/// mid-operation only affects later calls; re-keying between a save and a
/// later load of the same file is the caller's hazard, since the file
/// format carries no marker of which key state produced it.
///
/// Concurrent saves to the same file name race at the final rename and the
/// last writer wins. Callers needing per-file ordering must serialize
/// calls themselves.
pub struct FileStore {
    config: StorageConfig,
    key: RwLock<Option<Zeroizing<String>>>,
}

impl FileStore {
    /// Create a store over `config` with no cipher key configured.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            key: RwLock::new(None),
        }
    }

    /// The configuration this store resolves records against.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Configure the cipher key used by subsequent saves and loads.
    ///
    /// Empty or all-whitespace secrets are rejected: the rejection is
    /// logged and the previous key state is kept.
    pub fn set_key(&self, secret: &str) {
        if secret.trim().is_empty() {
            error!("cipher key cannot be empty");
            return;
        }
        *self.key.write().unwrap() = Some(Zeroizing::new(secret.to_owned()));
    }

    /// Remove the cipher key; subsequent saves and loads use plain
    /// transport encoding.
    pub fn clear_key(&self) {
        *self.key.write().unwrap() = None;
    }

    /// Whether a cipher key is currently configured.
    pub fn has_key(&self) -> bool {
        self.key.read().unwrap().is_some()
    }

    /// Whether a record file exists for `file_name`.
    pub fn exists(&self, file_name: &str) -> bool {
        self.resolve(file_name).exists()
    }

    /// Serialize `value` and write it under `file_name`, overwriting any
    /// existing record. Missing parent directories are created. The write
    /// is staged through a sibling temp file and renamed over the target.
    pub fn save<T: Serialize + ?Sized>(&self, value: &T, file_name: &str) -> Result<()> {
        let key = self.current_key();
        let path = self.resolve(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(value)?;
        let payload = encode_payload(&json, key.as_deref().map(|k| k.as_str()));

        let staging = staging_path(&path);
        fs::write(&staging, &payload)?;
        fs::rename(&staging, &path)?;

        debug!("record saved: {}", path.display());
        Ok(())
    }

    /// Read, decode and deserialize the record stored under `file_name`.
    ///
    /// Fails with [`StoreError::NotFound`] if no record exists; nothing is
    /// created on the load path.
    pub fn load<T: DeserializeOwned>(&self, file_name: &str) -> Result<T> {
        let key = self.current_key();
        let path = self.resolve(file_name);
        if !path.exists() {
            return Err(StoreError::NotFound(path));
        }

        let content = fs::read_to_string(&path)?;
        let json = decode_payload(content.trim(), key.as_deref().map(|k| k.as_str()))?;
        let value = serde_json::from_str(&json)?;

        debug!("record loaded: {}", path.display());
        Ok(value)
    }

    /// Async form of [`save`](Self::save): identical semantics and on-disk
    /// format. Encoding runs on the blocking pool, file I/O on `tokio::fs`.
    pub async fn save_async<T: Serialize + ?Sized>(
        &self,
        value: &T,
        file_name: &str,
    ) -> Result<()> {
        let key = self.current_key();
        let path = self.resolve(file_name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(value)?;
        let payload = tokio::task::spawn_blocking(move || {
            encode_payload(&json, key.as_deref().map(|k| k.as_str()))
        })
        .await?;

        let staging = staging_path(&path);
        tokio::fs::write(&staging, &payload).await?;
        tokio::fs::rename(&staging, &path).await?;

        debug!("record saved: {}", path.display());
        Ok(())
    }

    /// Async form of [`load`](Self::load): identical semantics. Decoding
    /// and deserialization run on the blocking pool.
    pub async fn load_async<T>(&self, file_name: &str) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let key = self.current_key();
        let path = self.resolve(file_name);
        if !tokio::fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(path));
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let value = tokio::task::spawn_blocking(move || -> Result<T> {
            let json = decode_payload(content.trim(), key.as_deref().map(|k| k.as_str()))?;
            Ok(serde_json::from_str(&json)?)
        })
        .await??;

        debug!("record loaded: {}", path.display());
        Ok(value)
    }

    /// Key state captured once per operation.
    fn current_key(&self) -> Option<Zeroizing<String>> {
        self.key.read().unwrap().clone()
    }

    fn resolve(&self, file_name: &str) -> PathBuf {
        self.config.base_dir().join(file_name)
    }
}

/// Shared encode core: cipher codec when a key is set, plain transport
/// encoding otherwise. Both call surfaces go through here, so the on-disk
/// format is identical regardless of which one wrote a file.
fn encode_payload(json: &str, key: Option<&str>) -> String {
    match key {
        Some(secret) => crypto::encrypt(json, secret),
        None => encode::encode(json),
    }
}

/// Inverse of [`encode_payload`]. The file carries no marker of which path
/// produced it; loading with the wrong key state surfaces as a decode,
/// cipher or deserialization failure.
fn decode_payload(content: &str, key: Option<&str>) -> Result<String> {
    match key {
        Some(secret) => crypto::decrypt(content, secret),
        None => encode::decode(content),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips_in_both_key_states() {
        let json = r#"{"slot":1}"#;

        let plain = encode_payload(json, None);
        assert_eq!(decode_payload(&plain, None).unwrap(), json);

        let keyed = encode_payload(json, Some("secret"));
        assert_eq!(decode_payload(&keyed, Some("secret")).unwrap(), json);

        assert_ne!(plain, keyed);
    }

    #[test]
    fn staging_path_is_a_sibling() {
        let path = Path::new("/data/saves/slot1.dat");
        let staging = staging_path(path);
        assert_eq!(staging, Path::new("/data/saves/slot1.dat.tmp"));
    }
}
