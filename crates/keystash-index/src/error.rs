// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Key index error types.

use keystash_credentials::StoreError;

/// Unexpected failures of an index operation.
///
/// Expected conditions (already exists, not found) are outcome variants,
/// not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
	#[error(transparent)]
	Store(#[from] StoreError),

	#[error("invalid key name {name:?}: {reason}")]
	InvalidName { name: String, reason: &'static str },
}
