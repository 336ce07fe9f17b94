//! Reliquary - Encrypted save-data persistence
//!
//! Stores serde values as one transport-encoded text file per record:
//! - Indented JSON serialization
//! - Optional AES-256-CBC encryption with key material derived from a user
//!   secret (SHA-256 key, MD5 IV)
//! - Base64 transport encoding whether or not a key is set
//! - Matching blocking and async call surfaces over the same on-disk format

pub mod config;
pub mod crypto;
pub mod encode;
pub mod error;
pub mod store;

pub use config::StorageConfig;
pub use error::{Result, StoreError};
pub use store::FileStore;
