// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Enumerable key storage on top of a flat secret store.
//!
//! Platform credential vaults can look up a secret by name but cannot list
//! the names they hold. [`KeyIndexManager`] keeps that list itself, in a
//! reserved entry of the same namespace, and routes every key lifecycle
//! operation through it so the list and the secrets stay in step.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use keystash_config::StorageConfig;
//! use keystash_credentials::{MemorySecretStore, SecretValue};
//! use keystash_index::{AddOutcome, KeyIndexManager};
//!
//! # tokio_test::block_on(async {
//! let manager = KeyIndexManager::new(Arc::new(MemorySecretStore::new()), &StorageConfig::default());
//! manager.initialize().await.unwrap();
//!
//! let outcome = manager.add_key("openai", &SecretValue::new("sk-123")).await.unwrap();
//! assert_eq!(outcome, AddOutcome::Added);
//! assert_eq!(manager.list_keys().await.unwrap(), ["openai"]);
//! # });
//! ```

mod error;
pub mod index;
mod manager;
mod outcome;

pub use error::IndexError;
pub use index::KeyIndex;
pub use manager::KeyIndexManager;
pub use outcome::{AddOutcome, DeleteOutcome, InitOutcome, KeyState, RenameOutcome, UpdateOutcome};
