// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Default configuration file generation.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::ConfigError;

/// Written to ~/.config/keystash/config.toml when no user config exists.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"#
# keystash configuration
# Location: ~/.config/keystash/config.toml
#
# Auto-generated on first run. Environment variables (KEYSTASH_*) and
# command line flags override the values below.
#

[storage]
# Service name under which every secret is stored in the OS credential
# store. Changing it hides keys stored under the previous name.
namespace = "APIKeyManager"

# Reserved entry holding the list of stored key names.
sentinel_index_name = "__key_index__"

[logging]
# error, warn, info, debug, trace
level = "info"

# pretty, compact, json
format = "pretty"
"#;

/// Create the config file with [`DEFAULT_CONFIG_TEMPLATE`] if it is missing.
///
/// Returns `true` if a new file was written.
pub fn ensure_default_config(config_file_path: &Path) -> Result<bool, ConfigError> {
	if config_file_path.exists() {
		debug!(path = %config_file_path.display(), "config file already exists");
		return Ok(false);
	}

	if let Some(parent) = config_file_path.parent() {
		if !parent.exists() {
			debug!(path = %parent.display(), "creating config directory");
			fs::create_dir_all(parent)?;
		}
	}

	info!(path = %config_file_path.display(), "creating default config file");
	fs::write(config_file_path, DEFAULT_CONFIG_TEMPLATE)?;

	Ok(true)
}
