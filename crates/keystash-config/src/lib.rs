// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for keystash.
//!
//! A single typed [`KeystashConfig`] is built once at startup and handed to
//! the components that need it; there is no process-wide config object.
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - `$XDG_CONFIG_HOME/keystash/config.toml` (created on first run)
//! - a file passed with `--config`
//! - `KEYSTASH_*` environment variables
//! - command line flags

pub mod defaults;
pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

pub use defaults::{ensure_default_config, DEFAULT_CONFIG_TEMPLATE};
pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{
	KeystashConfig, LogFormat, LogLevel, LoggingConfig, StorageConfig, DEFAULT_NAMESPACE,
	DEFAULT_SENTINEL_INDEX_NAME,
};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from all sources with default precedence.
pub fn load_config() -> Result<KeystashConfig, ConfigError> {
	load_config_with_cli(CliOverrides::default())
}

/// Load configuration with CLI overrides.
///
/// If no user config file exists, a default one is written first. Failing
/// to write it is not fatal and ends up in [`KeystashConfig::warnings`].
pub fn load_config_with_cli(cli: CliOverrides) -> Result<KeystashConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	let default_file_warning = defaults::ensure_default_config(&paths.user_config_file)
		.err()
		.map(|e| {
			format!(
				"could not write default config file {}: {e}",
				paths.user_config_file.display()
			)
		});

	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::user(&paths)));
	if let Some(ref path) = cli.config_file {
		registry.register(Box::new(sources::FileSource::explicit(path.clone())));
	}
	registry.register(Box::new(sources::EnvSource::new()));
	registry.register(Box::new(sources::CliSource::new(cli)));

	let mut config = registry.load(paths)?;
	if let Some(warning) = default_file_warning {
		config.warnings.insert(0, warning);
	}
	Ok(config)
}
