// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use serde::{Deserialize, Serialize};
use crate::layer::*;
use crate::paths::PathsConfig;

/// Namespace used by earlier releases; keeps existing keyring entries reachable.
pub const DEFAULT_NAMESPACE: &str = "APIKeyManager";

/// Reserved entry holding the serialized key index.
pub const DEFAULT_SENTINEL_INDEX_NAME: &str = "__key_index__";

/// The final, validated configuration for keystash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystashConfig {
	pub storage: StorageConfig,
	pub logging: LoggingConfig,

	/// Resolved XDG paths (not serialized)
	#[serde(skip)]
	pub paths: PathsConfig,

	/// Problems met while loading that did not stop it. Loading runs before
	/// logging is set up, so the caller reports these once it is.
	#[serde(skip)]
	pub warnings: Vec<String>,
}

/// Where secrets live inside the platform credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
	/// Service name scoping every entry this application writes.
	pub namespace: String,
	/// Name of the reserved entry holding the key index. Never exposed as a
	/// user key.
	pub sentinel_index_name: String,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			namespace: DEFAULT_NAMESPACE.to_string(),
			sentinel_index_name: DEFAULT_SENTINEL_INDEX_NAME.to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
	Compact,
}

impl KeystashConfig {
	/// Build runtime config from a merged layer and paths.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Self {
		let mut warnings = Vec::new();
		Self {
			storage: build_storage_config(layer.storage),
			logging: build_logging_config(layer.logging, &mut warnings),
			paths,
			warnings,
		}
	}
}

fn build_storage_config(layer: Option<StorageLayer>) -> StorageConfig {
	let layer = layer.unwrap_or_default();
	StorageConfig {
		namespace: layer
			.namespace
			.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
		sentinel_index_name: layer
			.sentinel_index_name
			.unwrap_or_else(|| DEFAULT_SENTINEL_INDEX_NAME.to_string()),
	}
}

fn build_logging_config(
	layer: Option<LoggingLayer>,
	warnings: &mut Vec<String>,
) -> LoggingConfig {
	let layer = layer.unwrap_or_default();
	LoggingConfig {
		level: parse_log_level(layer.level.as_deref()).unwrap_or_else(|other| {
			warnings.push(format!("unknown log level {other:?}, using info"));
			LogLevel::Info
		}),
		format: parse_log_format(layer.format.as_deref()).unwrap_or_else(|other| {
			warnings.push(format!("unknown log format {other:?}, using pretty"));
			LogFormat::Pretty
		}),
	}
}

/// Case-insensitive; an unrecognized value is handed back as the error.
fn parse_log_level(s: Option<&str>) -> Result<LogLevel, String> {
	match s.map(str::to_ascii_lowercase).as_deref() {
		None | Some("info") => Ok(LogLevel::Info),
		Some("error") => Ok(LogLevel::Error),
		Some("warn") => Ok(LogLevel::Warn),
		Some("debug") => Ok(LogLevel::Debug),
		Some("trace") => Ok(LogLevel::Trace),
		Some(other) => Err(other.to_string()),
	}
}

fn parse_log_format(s: Option<&str>) -> Result<LogFormat, String> {
	match s.map(str::to_ascii_lowercase).as_deref() {
		None | Some("pretty") => Ok(LogFormat::Pretty),
		Some("json") => Ok(LogFormat::Json),
		Some("compact") => Ok(LogFormat::Compact),
		Some(other) => Err(other.to_string()),
	}
}
