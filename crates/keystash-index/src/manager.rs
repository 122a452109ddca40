// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Key index manager.
//!
//! The secret store is a flat map with no way to enumerate names, so the
//! manager keeps an ordered list of names in one reserved entry (the
//! sentinel) next to the secrets it describes.
//!
//! # Write ordering
//!
//! Every mutation touches at most two entries and the store has no
//! transactions, so a crash between the two writes leaves them out of step.
//! The order is chosen so the leftover state is harmless:
//!
//! - `add_key` writes the index first, then the secret. A crash leaves a
//!   listed name with no value ([`KeyState::Dangling`]), never a secret with
//!   no trace. The name still counts as taken: `update_value` completes it
//!   and `delete_key` drops it.
//! - `delete_key` writes the index first, then removes the secret. A crash
//!   leaves an unlisted secret that is never shown again; a later add of the
//!   same name overwrites it.
//! - `rename_key` is a delete followed by an add. A crash between them
//!   loses the renamed key; nothing else is affected.

use std::sync::Arc;

use keystash_config::StorageConfig;
use keystash_credentials::{Removal, SecretStore, SecretValue};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::error::IndexError;
use crate::index::KeyIndex;
use crate::outcome::{
	AddOutcome, DeleteOutcome, InitOutcome, KeyState, RenameOutcome, UpdateOutcome,
};

/// Maps key names to secrets and keeps the enumerable index in step.
///
/// Mutations are serialized by an internal lock held across the whole
/// read-modify-write of the index. Reads take no lock; each store write is
/// atomic, so readers see either the old or the new index.
#[derive(Debug)]
pub struct KeyIndexManager {
	store: Arc<dyn SecretStore>,
	namespace: String,
	sentinel: String,
	write_lock: Mutex<()>,
}

impl KeyIndexManager {
	pub fn new(store: Arc<dyn SecretStore>, config: &StorageConfig) -> Self {
		Self {
			store,
			namespace: config.namespace.clone(),
			sentinel: config.sentinel_index_name.clone(),
			write_lock: Mutex::new(()),
		}
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn sentinel(&self) -> &str {
		&self.sentinel
	}

	/// Write an empty index if none exists. An existing index, even an
	/// unreadable one, is left untouched.
	#[instrument(skip(self), fields(namespace = %self.namespace))]
	pub async fn initialize(&self) -> Result<InitOutcome, IndexError> {
		let _guard = self.write_lock.lock().await;

		if self.store.contains(&self.namespace, &self.sentinel).await? {
			debug!("index already present");
			return Ok(InitOutcome::AlreadyInitialized);
		}

		self.write_index(&KeyIndex::new()).await?;
		debug!("created empty index");
		Ok(InitOutcome::Created)
	}

	/// All stored names in insertion order.
	pub async fn list_keys(&self) -> Result<Vec<String>, IndexError> {
		Ok(self.read_index().await?.into_names())
	}

	/// Whether `name` is listed. Names that can never be stored, the empty
	/// name and the sentinel, are simply not present.
	pub async fn key_exists(&self, name: &str) -> Result<bool, IndexError> {
		if self.validate_name(name).is_err() {
			return Ok(false);
		}
		Ok(self.read_index().await?.contains(name))
	}

	/// Look up a secret without consulting the index.
	pub async fn get_value(&self, name: &str) -> Result<Option<SecretValue>, IndexError> {
		self.validate_name(name)?;
		Ok(self.store.get(&self.namespace, name).await?)
	}

	/// Report whether `name` is listed and whether a secret backs it.
	pub async fn inspect(&self, name: &str) -> Result<KeyState, IndexError> {
		self.validate_name(name)?;
		if !self.read_index().await?.contains(name) {
			return Ok(KeyState::Absent);
		}
		if self.store.contains(&self.namespace, name).await? {
			Ok(KeyState::Present)
		} else {
			Ok(KeyState::Dangling)
		}
	}

	#[instrument(skip(self, value), fields(namespace = %self.namespace))]
	pub async fn add_key(&self, name: &str, value: &SecretValue) -> Result<AddOutcome, IndexError> {
		self.validate_name(name)?;
		let _guard = self.write_lock.lock().await;

		let mut index = self.read_index().await?;
		if index.contains(name) {
			return Ok(AddOutcome::AlreadyExists);
		}

		self.insert_entry(&mut index, name, value).await?;
		Ok(AddOutcome::Added)
	}

	/// Replace the secret of an existing key. The index is not touched.
	#[instrument(skip(self, value), fields(namespace = %self.namespace))]
	pub async fn update_value(
		&self,
		name: &str,
		value: &SecretValue,
	) -> Result<UpdateOutcome, IndexError> {
		self.validate_name(name)?;
		let _guard = self.write_lock.lock().await;

		if !self.read_index().await?.contains(name) {
			return Ok(UpdateOutcome::NotFound);
		}

		self.store.set(&self.namespace, name, value).await?;
		debug!(name = %name, "secret updated");
		Ok(UpdateOutcome::Updated)
	}

	#[instrument(skip(self), fields(namespace = %self.namespace))]
	pub async fn delete_key(&self, name: &str) -> Result<DeleteOutcome, IndexError> {
		self.validate_name(name)?;
		let _guard = self.write_lock.lock().await;

		let mut index = self.read_index().await?;
		if !index.contains(name) {
			return Ok(DeleteOutcome::NotFound);
		}

		self.remove_entry(&mut index, name).await?;
		Ok(DeleteOutcome::Deleted)
	}

	/// Move `old_name`'s entry to `new_name` with `value`.
	///
	/// Renaming a key to itself replaces its value and moves it to the end
	/// of the list.
	#[instrument(skip(self, value), fields(namespace = %self.namespace))]
	pub async fn rename_key(
		&self,
		old_name: &str,
		new_name: &str,
		value: &SecretValue,
	) -> Result<RenameOutcome, IndexError> {
		self.validate_name(old_name)?;
		self.validate_name(new_name)?;
		let _guard = self.write_lock.lock().await;

		let mut index = self.read_index().await?;
		if !index.contains(old_name) {
			return Ok(RenameOutcome::NotFound);
		}
		if new_name != old_name && index.contains(new_name) {
			return Ok(RenameOutcome::AlreadyExists);
		}

		self.remove_entry(&mut index, old_name).await?;
		self.insert_entry(&mut index, new_name, value).await?;
		Ok(RenameOutcome::Renamed)
	}

	/// Index first, then secret.
	async fn insert_entry(
		&self,
		index: &mut KeyIndex,
		name: &str,
		value: &SecretValue,
	) -> Result<(), IndexError> {
		index.push(name);
		self.write_index(index).await?;
		self.store.set(&self.namespace, name, value).await?;
		debug!(name = %name, keys = index.len(), "key added");
		Ok(())
	}

	/// Index first, then secret.
	async fn remove_entry(&self, index: &mut KeyIndex, name: &str) -> Result<(), IndexError> {
		index.remove(name);
		self.write_index(index).await?;
		match self.store.delete(&self.namespace, name).await? {
			Removal::Removed => debug!(name = %name, keys = index.len(), "key deleted"),
			Removal::NotFound => debug!(name = %name, "key had no stored secret"),
		}
		Ok(())
	}

	async fn read_index(&self) -> Result<KeyIndex, IndexError> {
		let Some(blob) = self.store.get(&self.namespace, &self.sentinel).await? else {
			return Ok(KeyIndex::new());
		};

		match KeyIndex::decode(blob.expose()) {
			Ok(index) => Ok(index),
			Err(e) => {
				warn!(error = %e, sentinel = %self.sentinel, "unreadable key index, treating as empty");
				Ok(KeyIndex::new())
			}
		}
	}

	async fn write_index(&self, index: &KeyIndex) -> Result<(), IndexError> {
		let blob = SecretValue::new(index.encode());
		self.store.set(&self.namespace, &self.sentinel, &blob).await?;
		Ok(())
	}

	fn validate_name(&self, name: &str) -> Result<(), IndexError> {
		if name.is_empty() {
			return Err(IndexError::InvalidName {
				name: name.to_string(),
				reason: "name cannot be empty",
			});
		}
		if name == self.sentinel {
			return Err(IndexError::InvalidName {
				name: name.to_string(),
				reason: "name is reserved for the key index",
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use keystash_credentials::{MemorySecretStore, StoreError};
	use proptest::prelude::*;

	const NS: &str = "APIKeyManager";
	const SENTINEL: &str = "__key_index__";

	fn setup() -> (Arc<MemorySecretStore>, KeyIndexManager) {
		let store = Arc::new(MemorySecretStore::new());
		let manager = KeyIndexManager::new(store.clone(), &StorageConfig::default());
		(store, manager)
	}

	fn secret(v: &str) -> SecretValue {
		SecretValue::new(v)
	}

	async fn value_of(manager: &KeyIndexManager, name: &str) -> Option<String> {
		manager
			.get_value(name)
			.await
			.unwrap()
			.map(|v| v.expose().to_string())
	}

	#[tokio::test]
	async fn test_openai_lifecycle() {
		let (_store, manager) = setup();
		manager.initialize().await.unwrap();

		assert_eq!(
			manager.add_key("openai", &secret("sk-123")).await.unwrap(),
			AddOutcome::Added
		);
		assert_eq!(manager.list_keys().await.unwrap(), ["openai"]);
		assert_eq!(value_of(&manager, "openai").await.as_deref(), Some("sk-123"));

		assert_eq!(
			manager.add_key("openai", &secret("sk-999")).await.unwrap(),
			AddOutcome::AlreadyExists
		);
		assert_eq!(
			manager.update_value("openai", &secret("sk-999")).await.unwrap(),
			UpdateOutcome::Updated
		);
		assert_eq!(value_of(&manager, "openai").await.as_deref(), Some("sk-999"));

		assert_eq!(
			manager.delete_key("openai").await.unwrap(),
			DeleteOutcome::Deleted
		);
		assert!(manager.list_keys().await.unwrap().is_empty());
		assert_eq!(value_of(&manager, "openai").await, None);
	}

	#[tokio::test]
	async fn test_initialize_writes_empty_index_once() {
		let (store, manager) = setup();

		assert_eq!(manager.initialize().await.unwrap(), InitOutcome::Created);
		let blob = store.get(NS, SENTINEL).await.unwrap().unwrap();
		assert_eq!(blob.expose(), "[]");

		manager.add_key("a", &secret("1")).await.unwrap();
		manager.add_key("b", &secret("2")).await.unwrap();

		assert_eq!(
			manager.initialize().await.unwrap(),
			InitOutcome::AlreadyInitialized
		);
		assert_eq!(
			manager.initialize().await.unwrap(),
			InitOutcome::AlreadyInitialized
		);
		assert_eq!(manager.list_keys().await.unwrap(), ["a", "b"]);
	}

	#[tokio::test]
	async fn test_initialize_leaves_corrupt_index_in_place() {
		let (store, manager) = setup();
		store.raw_set(NS, SENTINEL, "{not json").await;

		assert_eq!(
			manager.initialize().await.unwrap(),
			InitOutcome::AlreadyInitialized
		);
		assert_eq!(
			store.get(NS, SENTINEL).await.unwrap().unwrap().expose(),
			"{not json"
		);
	}

	#[tokio::test]
	async fn test_operations_work_without_initialize() {
		let (_store, manager) = setup();
		assert!(manager.list_keys().await.unwrap().is_empty());
		assert_eq!(
			manager.add_key("lazy", &secret("v")).await.unwrap(),
			AddOutcome::Added
		);
		assert_eq!(manager.list_keys().await.unwrap(), ["lazy"]);
	}

	#[tokio::test]
	async fn test_add_existing_keeps_original_value() {
		let (_store, manager) = setup();
		manager.add_key("n", &secret("v")).await.unwrap();

		assert_eq!(
			manager.add_key("n", &secret("v2")).await.unwrap(),
			AddOutcome::AlreadyExists
		);
		assert_eq!(value_of(&manager, "n").await.as_deref(), Some("v"));
	}

	#[tokio::test]
	async fn test_key_exists_is_false_for_unstorable_names() {
		let (_store, manager) = setup();
		manager.initialize().await.unwrap();

		assert!(!manager.key_exists("").await.unwrap());
		assert!(!manager.key_exists(SENTINEL).await.unwrap());
		assert!(manager.get_value(SENTINEL).await.is_err());
	}

	#[tokio::test]
	async fn test_names_are_case_sensitive() {
		let (_store, manager) = setup();
		manager.add_key("OpenAI", &secret("upper")).await.unwrap();

		assert!(!manager.key_exists("openai").await.unwrap());
		assert_eq!(
			manager.add_key("openai", &secret("lower")).await.unwrap(),
			AddOutcome::Added
		);
		assert_eq!(manager.list_keys().await.unwrap(), ["OpenAI", "openai"]);
	}

	#[tokio::test]
	async fn test_delete_missing_leaves_index_unchanged() {
		let (store, manager) = setup();
		manager.add_key("a", &secret("1")).await.unwrap();
		let before = store.get(NS, SENTINEL).await.unwrap();

		assert_eq!(
			manager.delete_key("zzz").await.unwrap(),
			DeleteOutcome::NotFound
		);
		assert_eq!(store.get(NS, SENTINEL).await.unwrap(), before);
	}

	#[tokio::test]
	async fn test_delete_checks_index_not_store() {
		let (store, manager) = setup();
		store.raw_set(NS, "orphan", "leftover").await;

		assert_eq!(
			manager.delete_key("orphan").await.unwrap(),
			DeleteOutcome::NotFound
		);
	}

	#[tokio::test]
	async fn test_update_missing_is_not_found() {
		let (store, manager) = setup();
		assert_eq!(
			manager.update_value("ghost", &secret("v")).await.unwrap(),
			UpdateOutcome::NotFound
		);
		assert!(!store.contains(NS, "ghost").await.unwrap());
	}

	#[tokio::test]
	async fn test_update_does_not_touch_index() {
		let (_store, manager) = setup();
		manager.add_key("a", &secret("1")).await.unwrap();
		manager.add_key("b", &secret("2")).await.unwrap();

		manager.update_value("a", &secret("1b")).await.unwrap();

		assert_eq!(manager.list_keys().await.unwrap(), ["a", "b"]);
		assert_eq!(value_of(&manager, "a").await.as_deref(), Some("1b"));
	}

	#[tokio::test]
	async fn test_rename_moves_key() {
		let (store, manager) = setup();
		manager.add_key("a", &secret("old")).await.unwrap();
		manager.add_key("c", &secret("other")).await.unwrap();

		assert_eq!(
			manager.rename_key("a", "b", &secret("new")).await.unwrap(),
			RenameOutcome::Renamed
		);
		assert!(!manager.key_exists("a").await.unwrap());
		assert!(manager.key_exists("b").await.unwrap());
		assert_eq!(value_of(&manager, "b").await.as_deref(), Some("new"));
		assert!(!store.contains(NS, "a").await.unwrap());
		assert_eq!(manager.list_keys().await.unwrap(), ["c", "b"]);
	}

	#[tokio::test]
	async fn test_rename_onto_existing_is_rejected() {
		let (store, manager) = setup();
		manager.add_key("a", &secret("va")).await.unwrap();
		manager.add_key("b", &secret("vb")).await.unwrap();
		let before = store.get(NS, SENTINEL).await.unwrap();

		assert_eq!(
			manager.rename_key("a", "b", &secret("x")).await.unwrap(),
			RenameOutcome::AlreadyExists
		);
		assert_eq!(store.get(NS, SENTINEL).await.unwrap(), before);
		assert_eq!(value_of(&manager, "a").await.as_deref(), Some("va"));
		assert_eq!(value_of(&manager, "b").await.as_deref(), Some("vb"));
	}

	#[tokio::test]
	async fn test_rename_missing_source_is_not_found() {
		let (_store, manager) = setup();
		manager.add_key("b", &secret("vb")).await.unwrap();

		assert_eq!(
			manager.rename_key("a", "b", &secret("x")).await.unwrap(),
			RenameOutcome::NotFound
		);
		assert_eq!(
			manager.rename_key("a", "c", &secret("x")).await.unwrap(),
			RenameOutcome::NotFound
		);
	}

	#[tokio::test]
	async fn test_rename_to_same_name_replaces_value() {
		let (_store, manager) = setup();
		manager.add_key("a", &secret("1")).await.unwrap();
		manager.add_key("b", &secret("2")).await.unwrap();

		assert_eq!(
			manager.rename_key("a", "a", &secret("1b")).await.unwrap(),
			RenameOutcome::Renamed
		);
		assert_eq!(value_of(&manager, "a").await.as_deref(), Some("1b"));
		assert_eq!(manager.list_keys().await.unwrap(), ["b", "a"]);
	}

	#[tokio::test]
	async fn test_invalid_names_are_rejected() {
		let (store, manager) = setup();
		manager.initialize().await.unwrap();

		for name in ["", SENTINEL] {
			assert!(matches!(
				manager.add_key(name, &secret("v")).await,
				Err(IndexError::InvalidName { .. })
			));
			assert!(matches!(
				manager.get_value(name).await,
				Err(IndexError::InvalidName { .. })
			));
			assert!(matches!(
				manager.delete_key(name).await,
				Err(IndexError::InvalidName { .. })
			));
		}
		assert!(matches!(
			manager.rename_key("x", SENTINEL, &secret("v")).await,
			Err(IndexError::InvalidName { .. })
		));

		assert_eq!(
			store.get(NS, SENTINEL).await.unwrap().unwrap().expose(),
			"[]"
		);
	}

	#[tokio::test]
	async fn test_corrupt_index_reads_as_empty() {
		let (store, manager) = setup();
		store.raw_set(NS, SENTINEL, "not json at all").await;

		assert!(manager.list_keys().await.unwrap().is_empty());
		assert!(!manager.key_exists("anything").await.unwrap());

		// The next mutation replaces the unreadable blob.
		manager.add_key("fresh", &secret("v")).await.unwrap();
		assert_eq!(manager.list_keys().await.unwrap(), ["fresh"]);
	}

	#[tokio::test]
	async fn test_namespaces_do_not_share_indices() {
		let store = Arc::new(MemorySecretStore::new());
		let work = KeyIndexManager::new(
			store.clone(),
			&StorageConfig {
				namespace: "work".to_string(),
				..StorageConfig::default()
			},
		);
		let home = KeyIndexManager::new(
			store.clone(),
			&StorageConfig {
				namespace: "home".to_string(),
				..StorageConfig::default()
			},
		);

		work.add_key("openai", &secret("work-key")).await.unwrap();
		assert!(home.list_keys().await.unwrap().is_empty());
		assert_eq!(value_of(&home, "openai").await, None);
		assert_eq!(home.namespace(), "home");
	}

	#[tokio::test]
	async fn test_index_write_failure_changes_nothing() {
		let (store, manager) = setup();
		manager.add_key("a", &secret("1")).await.unwrap();
		store.fail_writes_after(0);

		let err = manager.add_key("b", &secret("2")).await.unwrap_err();
		assert!(matches!(err, IndexError::Store(StoreError::Unavailable(_))));

		store.heal();
		assert_eq!(manager.list_keys().await.unwrap(), ["a"]);
		assert!(!store.contains(NS, "b").await.unwrap());
	}

	#[tokio::test]
	async fn test_interrupted_add_leaves_dangling_key_that_update_repairs() {
		let (store, manager) = setup();
		store.fail_writes_after(1);

		assert!(manager.add_key("openai", &secret("sk-1")).await.is_err());
		store.heal();

		assert_eq!(manager.list_keys().await.unwrap(), ["openai"]);
		assert_eq!(value_of(&manager, "openai").await, None);
		assert_eq!(manager.inspect("openai").await.unwrap(), KeyState::Dangling);

		assert_eq!(
			manager.update_value("openai", &secret("sk-2")).await.unwrap(),
			UpdateOutcome::Updated
		);
		assert_eq!(manager.inspect("openai").await.unwrap(), KeyState::Present);
		assert_eq!(value_of(&manager, "openai").await.as_deref(), Some("sk-2"));
		assert_eq!(manager.list_keys().await.unwrap(), ["openai"]);
	}

	#[tokio::test]
	async fn test_add_on_listed_name_without_secret_is_already_exists() {
		let (store, manager) = setup();
		store.raw_set(NS, SENTINEL, r#"["openai"]"#).await;

		assert_eq!(
			manager.add_key("openai", &secret("sk-x")).await.unwrap(),
			AddOutcome::AlreadyExists
		);
		assert_eq!(value_of(&manager, "openai").await, None);
		assert_eq!(manager.inspect("openai").await.unwrap(), KeyState::Dangling);
		assert_eq!(manager.list_keys().await.unwrap(), ["openai"]);
	}

	#[tokio::test]
	async fn test_dangling_key_is_repaired_by_update() {
		let (store, manager) = setup();
		store.raw_set(NS, SENTINEL, r#"["ghost"]"#).await;

		assert_eq!(
			manager.update_value("ghost", &secret("v")).await.unwrap(),
			UpdateOutcome::Updated
		);
		assert_eq!(manager.inspect("ghost").await.unwrap(), KeyState::Present);
	}

	#[tokio::test]
	async fn test_dangling_key_can_be_deleted() {
		let (store, manager) = setup();
		store.raw_set(NS, SENTINEL, r#"["ghost","real"]"#).await;
		store.raw_set(NS, "real", "v").await;

		assert_eq!(
			manager.delete_key("ghost").await.unwrap(),
			DeleteOutcome::Deleted
		);
		assert_eq!(manager.list_keys().await.unwrap(), ["real"]);
	}

	#[tokio::test]
	async fn test_interrupted_delete_leaves_unlisted_secret() {
		let (store, manager) = setup();
		manager.add_key("a", &secret("old")).await.unwrap();
		store.fail_writes_after(1);

		assert!(manager.delete_key("a").await.is_err());
		store.heal();

		assert!(manager.list_keys().await.unwrap().is_empty());
		assert_eq!(manager.inspect("a").await.unwrap(), KeyState::Absent);
		assert!(store.contains(NS, "a").await.unwrap());

		assert_eq!(
			manager.add_key("a", &secret("new")).await.unwrap(),
			AddOutcome::Added
		);
		assert_eq!(value_of(&manager, "a").await.as_deref(), Some("new"));
	}

	#[tokio::test]
	async fn test_interrupted_rename_loses_only_the_renamed_key() {
		let (store, manager) = setup();
		manager.add_key("keep", &secret("k")).await.unwrap();
		manager.add_key("a", &secret("old")).await.unwrap();
		// Index write and secret delete of the old name succeed, the index
		// write for the new name fails.
		store.fail_writes_after(2);

		assert!(manager.rename_key("a", "b", &secret("new")).await.is_err());
		store.heal();

		assert_eq!(manager.list_keys().await.unwrap(), ["keep"]);
		assert_eq!(value_of(&manager, "a").await, None);
		assert_eq!(value_of(&manager, "b").await, None);
		assert_eq!(value_of(&manager, "keep").await.as_deref(), Some("k"));
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn test_concurrent_adds_are_not_lost() {
		let (_store, manager) = setup();
		let manager = Arc::new(manager);
		manager.initialize().await.unwrap();

		let mut handles = Vec::new();
		for i in 0..32 {
			let manager = manager.clone();
			handles.push(tokio::spawn(async move {
				manager
					.add_key(&format!("key-{i}"), &SecretValue::new(format!("v{i}")))
					.await
			}));
		}
		for handle in handles {
			assert_eq!(handle.await.unwrap().unwrap(), AddOutcome::Added);
		}

		let mut names = manager.list_keys().await.unwrap();
		assert_eq!(names.len(), 32);
		names.sort();
		names.dedup();
		assert_eq!(names.len(), 32);
	}

	#[derive(Debug, Clone)]
	enum Op {
		Add(usize),
		Delete(usize),
	}

	fn op_strategy() -> impl Strategy<Value = Op> {
		prop_oneof![
			(0usize..8).prop_map(Op::Add),
			(0usize..8).prop_map(Op::Delete),
		]
	}

	proptest! {
		/// The listed names always equal those added minus those deleted,
		/// in insertion order, and every listed name has its secret.
		#[test]
		fn index_tracks_adds_and_deletes(ops in proptest::collection::vec(op_strategy(), 0..40)) {
			let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
			rt.block_on(async {
				let (store, manager) = setup();
				manager.initialize().await.unwrap();
				let mut model: Vec<String> = Vec::new();

				for op in ops {
					match op {
						Op::Add(i) => {
							let name = format!("k{i}");
							let outcome = manager.add_key(&name, &secret(&name)).await.unwrap();
							if model.contains(&name) {
								assert_eq!(outcome, AddOutcome::AlreadyExists);
							} else {
								assert_eq!(outcome, AddOutcome::Added);
								model.push(name);
							}
						}
						Op::Delete(i) => {
							let name = format!("k{i}");
							let outcome = manager.delete_key(&name).await.unwrap();
							if let Some(pos) = model.iter().position(|n| *n == name) {
								assert_eq!(outcome, DeleteOutcome::Deleted);
								model.remove(pos);
							} else {
								assert_eq!(outcome, DeleteOutcome::NotFound);
							}
						}
					}
				}

				assert_eq!(manager.list_keys().await.unwrap(), model);
				for name in &model {
					assert_eq!(value_of(&manager, name).await.as_deref(), Some(name.as_str()));
				}
				// One entry per listed key plus the index itself.
				assert_eq!(store.len().await, model.len() + 1);
			});
		}
	}
}
