// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use crate::runtime::KeystashConfig;
use crate::ConfigError;

/// Validate the configuration.
pub fn validate_config(config: &KeystashConfig) -> Result<(), ConfigError> {
	let storage = &config.storage;

	validate_name("storage.namespace", &storage.namespace)?;
	validate_name("storage.sentinel_index_name", &storage.sentinel_index_name)?;

	Ok(())
}

fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
	if value.is_empty() {
		return Err(ConfigError::invalid_value(field, "cannot be empty"));
	}
	if value.trim() != value {
		return Err(ConfigError::invalid_value(
			field,
			"must not have leading or trailing whitespace",
		));
	}
	Ok(())
}
