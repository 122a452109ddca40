// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration registry - manages sources and merges layers.

use tracing::{debug, info};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::KeystashConfig;
use crate::sources::ConfigSource;
use crate::validation::validate_config;
use crate::ConfigError;

/// Registry that manages configuration sources and merges them.
#[derive(Default)]
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a configuration source.
	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		debug!(source = source.name(), precedence = ?source.precedence(), "registering config source");
		self.sources.push(source);
	}

	/// Load configuration from all sources, merge, and validate.
	///
	/// Sources are merged lowest precedence first. A source that fails to
	/// load (unreadable or malformed file) is skipped so that a broken file
	/// falls back to defaults instead of blocking startup; the failure is
	/// recorded in [`KeystashConfig::warnings`].
	pub fn load(&self, paths: PathsConfig) -> Result<KeystashConfig, ConfigError> {
		let mut sorted_sources: Vec<_> = self.sources.iter().collect();
		sorted_sources.sort_by_key(|s| s.precedence());

		let mut merged = ConfigLayer::default();
		let mut skipped = Vec::new();
		for source in &sorted_sources {
			match source.load() {
				Ok(layer) => {
					debug!(source = source.name(), "merging config layer");
					merged.merge(layer);
				}
				Err(e) => {
					debug!(source = source.name(), error = %e, "failed to load config source, skipping");
					skipped.push(format!("skipped config source {}: {e}", source.name()));
				}
			}
		}

		let mut config = KeystashConfig::from_layer(merged, paths);
		validate_config(&config)?;

		skipped.append(&mut config.warnings);
		config.warnings = skipped;

		info!(
			namespace = %config.storage.namespace,
			log_level = ?config.logging.level,
			"configuration loaded"
		);

		Ok(config)
	}

	pub fn source_count(&self) -> usize {
		self.sources.len()
	}
}
