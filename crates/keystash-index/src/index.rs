// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The ordered list of stored key names and its on-store encoding.
//!
//! The blob is a JSON array of strings, e.g. `["openai","anthropic"]`. The
//! format is fixed so indices written by earlier releases stay readable.

/// Why a stored index blob could not be used.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("index blob is not a JSON array of strings: {0}")]
	Json(#[from] serde_json::Error),
}

/// Insertion-ordered set of key names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyIndex {
	names: Vec<String>,
}

impl KeyIndex {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a stored blob. Duplicates and empty names are dropped, keeping
	/// the first occurrence.
	pub fn decode(blob: &str) -> Result<Self, DecodeError> {
		let raw: Vec<String> = serde_json::from_str(blob)?;
		let mut index = Self::new();
		for name in raw {
			if !name.is_empty() && !index.contains(&name) {
				index.names.push(name);
			}
		}
		Ok(index)
	}

	pub fn encode(&self) -> String {
		// Serializing a Vec<String> cannot fail.
		serde_json::to_string(&self.names).unwrap_or_else(|_| "[]".to_string())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.iter().any(|n| n == name)
	}

	/// Append `name`. Returns `false` if it was already present.
	pub fn push(&mut self, name: &str) -> bool {
		if self.contains(name) {
			return false;
		}
		self.names.push(name.to_string());
		true
	}

	/// Remove `name`, preserving the order of the rest. Returns `false` if
	/// it was not present.
	pub fn remove(&mut self, name: &str) -> bool {
		match self.names.iter().position(|n| n == name) {
			Some(pos) => {
				self.names.remove(pos);
				true
			}
			None => false,
		}
	}

	pub fn names(&self) -> &[String] {
		&self.names
	}

	pub fn into_names(self) -> Vec<String> {
		self.names
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}
