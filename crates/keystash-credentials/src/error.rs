// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret store error types.

/// Failures of the underlying credential subsystem.
///
/// "Not found" is never an error at this layer: lookups return `None` and
/// deletes return [`Removal::NotFound`](crate::Removal::NotFound).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	/// The platform store could not be reached (locked keychain, no
	/// secret-service daemon, platform failure).
	#[error("credential store unavailable: {0}")]
	Unavailable(String),

	#[error("access to credential store denied: {0}")]
	AccessDenied(String),

	/// The stored data could not be decoded.
	#[error("malformed credential data: {0}")]
	Malformed(String),

	/// The platform rejected an attribute, e.g. a name that is too long.
	#[error("invalid credential attribute: {0}")]
	Invalid(String),

	#[error("backend error: {0}")]
	Backend(String),
}

impl From<tokio::task::JoinError> for StoreError {
	fn from(err: tokio::task::JoinError) -> Self {
		StoreError::Backend(err.to_string())
	}
}
