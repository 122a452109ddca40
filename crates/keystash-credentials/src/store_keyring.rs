// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OS credential vault backend (macOS Keychain, Windows Credential Manager,
//! Secret Service on Linux) via the `keyring` crate.

use async_trait::async_trait;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{Removal, SecretStore};
use crate::value::SecretValue;

/// Secret store backed by the platform keyring.
///
/// Each call opens a fresh entry on a blocking worker thread; nothing is
/// cached in process. Without the `native` feature the `keyring` crate
/// falls back to a per-entry mock, which `set` detects by reading back
/// through a second entry.
#[derive(Debug, Clone, Default)]
pub struct KeyringSecretStore;

impl KeyringSecretStore {
	pub fn new() -> Self {
		Self
	}
}

fn map_keyring_error(err: keyring::Error) -> StoreError {
	match err {
		keyring::Error::NoStorageAccess(e) => StoreError::AccessDenied(e.to_string()),
		keyring::Error::PlatformFailure(e) => StoreError::Unavailable(e.to_string()),
		keyring::Error::BadEncoding(_) => {
			StoreError::Malformed("stored secret is not valid UTF-8".to_string())
		}
		keyring::Error::Ambiguous(found) => StoreError::Malformed(format!(
			"{} credentials match this entry",
			found.len()
		)),
		e @ (keyring::Error::TooLong(..) | keyring::Error::Invalid(..)) => {
			StoreError::Invalid(e.to_string())
		}
		e => StoreError::Backend(e.to_string()),
	}
}

fn open_entry(namespace: &str, name: &str) -> Result<keyring::Entry, StoreError> {
	keyring::Entry::new(namespace, name).map_err(map_keyring_error)
}

#[async_trait]
impl SecretStore for KeyringSecretStore {
	async fn get(&self, namespace: &str, name: &str) -> Result<Option<SecretValue>, StoreError> {
		let namespace = namespace.to_string();
		let name = name.to_string();

		tokio::task::spawn_blocking(move || {
			let entry = open_entry(&namespace, &name)?;
			match entry.get_password() {
				Ok(data) => Ok(Some(SecretValue::new(data))),
				Err(keyring::Error::NoEntry) => Ok(None),
				Err(e) => Err(map_keyring_error(e)),
			}
		})
		.await?
	}

	async fn set(&self, namespace: &str, name: &str, value: &SecretValue) -> Result<(), StoreError> {
		let namespace = namespace.to_string();
		let name = name.to_string();
		let value = value.clone();

		tokio::task::spawn_blocking(move || {
			open_entry(&namespace, &name)?
				.set_password(value.expose())
				.map_err(map_keyring_error)?;

			// Read back through a new entry; the mock backend only keeps the
			// value on the instance that wrote it.
			match open_entry(&namespace, &name)?.get_password() {
				Ok(stored) if stored == value.expose() => {
					debug!(namespace = %namespace, name = %name, "keyring set verified");
					Ok(())
				}
				Ok(_) => Err(StoreError::Backend(
					"keyring verification failed: stored data mismatch".to_string(),
				)),
				Err(keyring::Error::NoEntry) => Err(StoreError::Unavailable(
					"keyring verification failed: secret not persisted (mock backend?)".to_string(),
				)),
				Err(e) => Err(map_keyring_error(e)),
			}
		})
		.await?
	}

	async fn delete(&self, namespace: &str, name: &str) -> Result<Removal, StoreError> {
		let namespace = namespace.to_string();
		let name = name.to_string();

		tokio::task::spawn_blocking(move || {
			let entry = open_entry(&namespace, &name)?;
			match entry.delete_credential() {
				Ok(()) => Ok(Removal::Removed),
				Err(keyring::Error::NoEntry) => Ok(Removal::NotFound),
				Err(e) => Err(map_keyring_error(e)),
			}
		})
		.await?
	}
}
