// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use aam_host::HostError;

use crate::resolver::SubjectKind;

/// Per-subject assignment failures. None of these abort the run.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
	/// A user token that is neither a numeric ID nor an email address.
	#[error("Invalid user identifier {token}")]
	InvalidIdentifier { token: String },

	#[error("{kind} {token} does not exist")]
	SubjectNotFound { kind: SubjectKind, token: String },

	/// The directory itself failed while looking a subject up.
	#[error("Failed to look up {kind} {token}: {source}")]
	Lookup {
		kind: SubjectKind,
		token: String,
		#[source]
		source: HostError,
	},

	/// `label` names the subject the way success messages do.
	#[error("Failed to attach policy to {label}")]
	WriteFailure {
		label: String,
		#[source]
		source: HostError,
	},
}
