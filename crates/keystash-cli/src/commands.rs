// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subcommands and their execution against a [`KeyIndexManager`].

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Subcommand;
use keystash_credentials::SecretValue;
use keystash_index::{InitOutcome, KeyIndexManager, RenameOutcome};
use tracing::debug;
use zeroize::Zeroize;

use crate::status::{self, Status};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Create the key index if it does not exist yet
	Init,
	/// List stored key names in the order they were added
	List {
		/// Only show names containing this text, ignoring case
		#[arg(long)]
		filter: Option<String>,
	},
	/// Exit successfully if a key with this name exists
	Exists { name: String },
	/// Print a key's value to stdout
	Get { name: String },
	/// Store a new key (value from --value or the first line of stdin)
	Add {
		name: String,
		#[arg(long)]
		value: Option<String>,
	},
	/// Replace the value of an existing key
	Update {
		name: String,
		#[arg(long)]
		value: Option<String>,
	},
	/// Rename a key, optionally replacing its value
	Rename {
		old_name: String,
		new_name: String,
		#[arg(long)]
		value: Option<String>,
	},
	/// Remove a key and its value
	Delete { name: String },
	/// Report whether a key is stored, missing, or listed without a value
	Status { name: String },
}

/// Run `command`, writing data and status lines to `out`.
///
/// `init` is the outcome of the startup `initialize()` call, reported by
/// the `init` subcommand. Returns whether the command succeeded. Expected
/// outcomes such as a missing key are reported through the status line,
/// not as errors.
pub async fn run<R: BufRead, W: Write>(
	manager: &KeyIndexManager,
	init: InitOutcome,
	command: Command,
	input: &mut R,
	out: &mut W,
) -> Result<bool> {
	debug!(?command, "running command");

	let status = match command {
		Command::Init => status::initialized(manager.namespace(), init),
		Command::List { filter } => {
			let names = manager.list_keys().await?;
			for name in filter_names(&names, filter.as_deref()) {
				writeln!(out, "{name}")?;
			}
			return Ok(true);
		}
		Command::Exists { name } => return Ok(manager.key_exists(&name).await?),
		Command::Get { name } => match manager.get_value(&name).await? {
			Some(value) => {
				writeln!(out, "{}", value.expose())?;
				return Ok(true);
			}
			None => status::missing_value(&name),
		},
		Command::Add { name, value } => match resolve_value(value, input)? {
			Some(value) => status::added(&name, manager.add_key(&name, &value).await?),
			None => empty_value(),
		},
		Command::Update { name, value } => match resolve_value(value, input)? {
			Some(value) => status::updated(&name, manager.update_value(&name, &value).await?),
			None => empty_value(),
		},
		Command::Rename {
			old_name,
			new_name,
			value,
		} => {
			let value = match value {
				Some(v) if v.is_empty() => {
					writeln!(out, "{}", empty_value().message)?;
					return Ok(false);
				}
				Some(v) => Some(SecretValue::new(v)),
				None => manager.get_value(&old_name).await?,
			};
			match value {
				Some(value) => status::renamed(
					&old_name,
					&new_name,
					manager.rename_key(&old_name, &new_name, &value).await?,
				),
				None if manager.key_exists(&old_name).await? => status::missing_value(&old_name),
				None => status::renamed(&old_name, &new_name, RenameOutcome::NotFound),
			}
		}
		Command::Delete { name } => status::deleted(&name, manager.delete_key(&name).await?),
		Command::Status { name } => status::inspected(&name, manager.inspect(&name).await?),
	};

	writeln!(out, "{}", status.message)?;
	Ok(status.success)
}

/// Names containing `filter`, compared case-insensitively, in index order.
fn filter_names<'a>(names: &'a [String], filter: Option<&str>) -> Vec<&'a str> {
	let needle = filter.map(str::to_lowercase).unwrap_or_default();
	names
		.iter()
		.filter(|name| name.to_lowercase().contains(&needle))
		.map(String::as_str)
		.collect()
}

fn empty_value() -> Status {
	Status {
		message: "Value cannot be empty".to_string(),
		success: false,
	}
}

fn non_empty(value: String) -> Option<SecretValue> {
	if value.is_empty() {
		None
	} else {
		Some(SecretValue::new(value))
	}
}

/// Take the value from the flag, or else the first line of `input`.
/// Empty submissions are rejected here so they never reach the store.
fn resolve_value<R: BufRead>(flag: Option<String>, input: &mut R) -> Result<Option<SecretValue>> {
	if let Some(value) = flag {
		return Ok(non_empty(value));
	}

	let mut line = String::new();
	input
		.read_line(&mut line)
		.context("failed to read value from stdin")?;
	let value = non_empty(line.trim_end_matches(['\r', '\n']).to_string());
	line.zeroize();
	Ok(value)
}
