// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One-line status messages for every core outcome.

use keystash_index::{
	AddOutcome, DeleteOutcome, InitOutcome, KeyState, RenameOutcome, UpdateOutcome,
};

/// A message for the user and whether the command did what was asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
	pub message: String,
	pub success: bool,
}

impl Status {
	fn ok(message: String) -> Self {
		Self {
			message,
			success: true,
		}
	}

	fn failed(message: String) -> Self {
		Self {
			message,
			success: false,
		}
	}
}

pub fn initialized(namespace: &str, outcome: InitOutcome) -> Status {
	match outcome {
		InitOutcome::Created => Status::ok(format!("Created key index in '{namespace}'")),
		InitOutcome::AlreadyInitialized => {
			Status::ok(format!("Key index in '{namespace}' already exists"))
		}
	}
}

pub fn added(name: &str, outcome: AddOutcome) -> Status {
	match outcome {
		AddOutcome::Added => Status::ok(format!("Added key '{name}'")),
		AddOutcome::AlreadyExists => Status::failed(format!("Key '{name}' already exists")),
	}
}

pub fn updated(name: &str, outcome: UpdateOutcome) -> Status {
	match outcome {
		UpdateOutcome::Updated => Status::ok(format!("Updated key '{name}'")),
		UpdateOutcome::NotFound => Status::failed(format!("Key '{name}' not found")),
	}
}

pub fn deleted(name: &str, outcome: DeleteOutcome) -> Status {
	match outcome {
		DeleteOutcome::Deleted => Status::ok(format!("Deleted key '{name}'")),
		DeleteOutcome::NotFound => Status::failed(format!("Key '{name}' not found")),
	}
}

pub fn renamed(old_name: &str, new_name: &str, outcome: RenameOutcome) -> Status {
	match outcome {
		RenameOutcome::Renamed if old_name == new_name => {
			Status::ok(format!("Updated key '{new_name}'"))
		}
		RenameOutcome::Renamed => Status::ok(format!("Renamed key '{old_name}' to '{new_name}'")),
		RenameOutcome::AlreadyExists => {
			Status::failed(format!("A key named '{new_name}' already exists"))
		}
		RenameOutcome::NotFound => Status::failed(format!("Key '{old_name}' not found")),
	}
}

pub fn inspected(name: &str, state: KeyState) -> Status {
	match state {
		KeyState::Present => Status::ok(format!("Key '{name}' is stored")),
		KeyState::Absent => Status::failed(format!("Key '{name}' not found")),
		KeyState::Dangling => Status::failed(format!(
			"Key '{name}' is listed but has no stored value; update or delete it to repair"
		)),
	}
}

pub fn missing_value(name: &str) -> Status {
	Status::failed(format!("Key '{name}' has no stored value"))
}
