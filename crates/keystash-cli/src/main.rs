// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! keystash - store API keys in the OS credential store and list them by name.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use keystash_config::{load_config_with_cli, CliOverrides, LogFormat, LoggingConfig};
use keystash_credentials::{KeyringSecretStore, MemorySecretStore, SecretStore};
use keystash_index::KeyIndexManager;

mod commands;
mod status;

use commands::Command;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Backend {
	/// Platform credential store (Keychain, Credential Manager, Secret Service)
	#[default]
	Keyring,
	/// Process memory; nothing survives the command
	Memory,
}

/// Store API keys securely and list them by name
#[derive(Parser, Debug)]
#[command(name = "keystash", version, about, long_about = None)]
struct Args {
	/// Path to an additional configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Service name scoping stored keys (overrides config)
	#[arg(short, long, env = "KEYSTASH_NAMESPACE")]
	namespace: Option<String>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	/// Secret store backend
	#[arg(long, value_enum, default_value_t = Backend::Keyring)]
	backend: Backend,

	#[command(subcommand)]
	command: Command,
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		Self {
			config_file: args.config.clone(),
			namespace: args.namespace.clone(),
			log_level: args.log_level.clone(),
			log_format: args.json_logs.then(|| "json".to_string()),
		}
	}
}

/// Crates whose events are shown when `RUST_LOG` is not set.
const LOG_TARGETS: &[&str] = &[
	"keystash",
	"keystash_config",
	"keystash_credentials",
	"keystash_index",
];

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		let level = logging.level.as_str();
		EnvFilter::new(
			LOG_TARGETS
				.iter()
				.map(|target| format!("{target}={level}"))
				.collect::<Vec<_>>()
				.join(","),
		)
	});

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(io::stderr))
				.init();
		}
	}
}

fn build_store(backend: Backend) -> Arc<dyn SecretStore> {
	match backend {
		Backend::Keyring => Arc::new(KeyringSecretStore::new()),
		Backend::Memory => Arc::new(MemorySecretStore::new()),
	}
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();

	let config =
		load_config_with_cli(CliOverrides::from(&args)).context("failed to load configuration")?;
	init_tracing(&config.logging);
	for warning in &config.warnings {
		warn!("{warning}");
	}

	debug!(
		namespace = %config.storage.namespace,
		backend = ?args.backend,
		"starting keystash"
	);

	let manager = KeyIndexManager::new(build_store(args.backend), &config.storage);
	let init = manager
		.initialize()
		.await
		.context("failed to initialize key index")?;

	let stdin = io::stdin();
	let mut input = stdin.lock();
	let mut out = io::stdout().lock();

	match commands::run(&manager, init, args.command, &mut input, &mut out).await {
		Ok(true) => Ok(ExitCode::SUCCESS),
		Ok(false) => Ok(ExitCode::FAILURE),
		Err(e) => {
			error!(error = %e, "command failed");
			Err(e)
		}
	}
}
