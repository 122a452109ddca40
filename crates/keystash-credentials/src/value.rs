// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret value wrapper.
//!
//! [`SecretValue`] holds API key material. It never prints its contents
//! through `Debug` or `Display`, so it is safe to pass to `tracing` macros,
//! and the backing buffer is zeroed when the value is dropped.
//!
//! ```
//! use keystash_credentials::SecretValue;
//!
//! let key = SecretValue::new("sk-123");
//! assert_eq!(format!("{key}"), "[REDACTED]");
//! assert_eq!(key.expose(), "sk-123");
//! ```

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder printed in place of a secret.
pub const REDACTED: &str = "[REDACTED]";

/// Opaque secret string. No format validation is applied; empty values are
/// allowed here and rejected (if at all) by the calling layer.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretValue {
	inner: String,
}

impl SecretValue {
	pub fn new(inner: impl Into<String>) -> Self {
		Self {
			inner: inner.into(),
		}
	}

	/// Read the secret. Call sites opt in explicitly so access is greppable.
	pub fn expose(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl From<String> for SecretValue {
	fn from(inner: String) -> Self {
		Self::new(inner)
	}
}

impl From<&str> for SecretValue {
	fn from(inner: &str) -> Self {
		Self::new(inner)
	}
}

impl fmt::Debug for SecretValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretValue").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl PartialEq for SecretValue {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl Eq for SecretValue {}
