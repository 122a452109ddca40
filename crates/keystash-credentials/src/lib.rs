// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret store adapters for keystash.
//!
//! The [`SecretStore`] trait is a flat `(namespace, name) -> secret` map over
//! whatever credential vault the platform offers. It has no way to list
//! names; `keystash-index` layers an index on top.
//!
//! # Backends
//!
//! - **KeyringSecretStore** (feature `keyring`): OS keychain / credential manager
//! - **MemorySecretStore**: in-process map for tests, with write fault injection
//!
//! # Example
//!
//! ```rust
//! use keystash_credentials::{MemorySecretStore, Removal, SecretStore, SecretValue};
//!
//! # tokio_test::block_on(async {
//! let store = MemorySecretStore::new();
//! store.set("APIKeyManager", "openai", &SecretValue::new("sk-123")).await.unwrap();
//!
//! let value = store.get("APIKeyManager", "openai").await.unwrap();
//! assert_eq!(value.unwrap().expose(), "sk-123");
//!
//! assert_eq!(store.delete("APIKeyManager", "openai").await.unwrap(), Removal::Removed);
//! # });
//! ```

mod error;
mod store;
#[cfg(feature = "keyring")]
mod store_keyring;
mod value;

pub use error::StoreError;
pub use store::{MemorySecretStore, Removal, SecretStore};
#[cfg(feature = "keyring")]
pub use store_keyring::KeyringSecretStore;
pub use value::{SecretValue, REDACTED};
