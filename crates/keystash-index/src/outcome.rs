// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outcomes of index operations.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
	/// No index entry existed; an empty one was written.
	Created,
	AlreadyInitialized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
	Added,
	AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
	Updated,
	NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
	Deleted,
	NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
	Renamed,
	/// The target name is already taken by a different key.
	AlreadyExists,
	/// The source name is not in the index.
	NotFound,
}

/// Consistency of a single name between the index and the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
	/// Listed and holding a secret.
	Present,
	/// Not listed. A secret left behind by an interrupted delete still
	/// counts as absent.
	Absent,
	/// Listed but with no secret behind it, left by an interrupted add.
	/// `update_value` repairs it and `delete_key` drops it; `add_key` still
	/// reports the name as taken.
	Dangling,
}
