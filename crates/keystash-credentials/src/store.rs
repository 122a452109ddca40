// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret store capability and the in-memory backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::error::StoreError;
use crate::value::SecretValue;

/// Result of a delete against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
	Removed,
	NotFound,
}

/// A flat `(namespace, name) -> secret` map backed by some credential vault.
///
/// Implementations perform no caching: every call reflects the current
/// state of the backing store. There is no enumeration primitive.
#[async_trait]
pub trait SecretStore: Send + Sync + std::fmt::Debug {
	/// Look up a secret. Absence is `Ok(None)`, not an error.
	async fn get(&self, namespace: &str, name: &str) -> Result<Option<SecretValue>, StoreError>;

	/// Store a secret, overwriting any existing value.
	async fn set(&self, namespace: &str, name: &str, value: &SecretValue) -> Result<(), StoreError>;

	/// Remove a secret.
	async fn delete(&self, namespace: &str, name: &str) -> Result<Removal, StoreError>;

	async fn contains(&self, namespace: &str, name: &str) -> Result<bool, StoreError> {
		Ok(self.get(namespace, name).await?.is_some())
	}
}

type EntryKey = (String, String);

/// In-memory secret store for tests and ephemeral sessions.
///
/// Supports write fault injection through [`MemorySecretStore::fail_writes_after`]
/// to reproduce a process dying between the two writes of an index mutation.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
	entries: tokio::sync::RwLock<HashMap<EntryKey, SecretValue>>,
	write_budget: Mutex<Option<usize>>,
}

impl MemorySecretStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Allow `n` more successful writes (`set` or `delete`); every write
	/// after that fails with [`StoreError::Unavailable`].
	pub fn fail_writes_after(&self, n: usize) {
		*self.lock_budget() = Some(n);
	}

	/// Lift any write limit installed by [`Self::fail_writes_after`].
	pub fn heal(&self) {
		*self.lock_budget() = None;
	}

	/// Number of entries across all namespaces.
	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}

	/// Insert directly, bypassing fault injection. Used to seed
	/// inconsistent states in tests.
	pub async fn raw_set(&self, namespace: &str, name: &str, value: &str) {
		self
			.entries
			.write()
			.await
			.insert(key(namespace, name), SecretValue::new(value));
	}

	/// Remove directly, bypassing fault injection.
	pub async fn raw_remove(&self, namespace: &str, name: &str) {
		self.entries.write().await.remove(&key(namespace, name));
	}

	fn lock_budget(&self) -> std::sync::MutexGuard<'_, Option<usize>> {
		self
			.write_budget
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	fn charge_write(&self) -> Result<(), StoreError> {
		let mut budget = self.lock_budget();
		match budget.as_mut() {
			None => Ok(()),
			Some(0) => Err(StoreError::Unavailable(
				"injected write failure".to_string(),
			)),
			Some(n) => {
				*n -= 1;
				Ok(())
			}
		}
	}
}

fn key(namespace: &str, name: &str) -> EntryKey {
	(namespace.to_string(), name.to_string())
}

#[async_trait]
impl SecretStore for MemorySecretStore {
	async fn get(&self, namespace: &str, name: &str) -> Result<Option<SecretValue>, StoreError> {
		let entries = self.entries.read().await;
		Ok(entries.get(&key(namespace, name)).cloned())
	}

	async fn set(&self, namespace: &str, name: &str, value: &SecretValue) -> Result<(), StoreError> {
		self.charge_write()?;
		let mut entries = self.entries.write().await;
		entries.insert(key(namespace, name), value.clone());
		debug!(namespace = %namespace, name = %name, "memory store set");
		Ok(())
	}

	async fn delete(&self, namespace: &str, name: &str) -> Result<Removal, StoreError> {
		self.charge_write()?;
		let mut entries = self.entries.write().await;
		let removal = match entries.remove(&key(namespace, name)) {
			Some(_) => Removal::Removed,
			None => Removal::NotFound,
		};
		debug!(namespace = %namespace, name = %name, ?removal, "memory store delete");
		Ok(removal)
	}
}
