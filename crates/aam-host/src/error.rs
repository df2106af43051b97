// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host error types.

use std::path::PathBuf;

/// Errors raised by host collaborators.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
	#[error("I/O error at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Malformed host data in {path}: {source}")]
	Serialization {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	/// The store refused a create or update.
	#[error("{0}")]
	WriteFailure(String),

	/// Archive extraction failed. The message is shown to the operator as-is.
	#[error("{0}")]
	Extraction(String),

	#[error("Advanced Access Manager {required} or higher is required.")]
	Incompatible { required: String, found: String },
}

impl HostError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}

	pub(crate) fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
		Self::Serialization {
			path: path.into(),
			source,
		}
	}
}
