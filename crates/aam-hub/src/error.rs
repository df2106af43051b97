// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the hub client.

use thiserror::Error;

/// Errors talking to the hub. All of them end the command.
#[derive(Debug, Error)]
pub enum HubError {
	/// The request never produced a response. Built through
	/// [`HubError::transport`] so the request URL is not carried along.
	#[error("{0}")]
	Transport(#[source] reqwest::Error),

	/// The hub answered with a status other than 200.
	#[error("{reason}")]
	RemoteRejection { status: u16, reason: String },

	#[error("Malformed policy document: {0}")]
	MalformedDocument(String),

	#[error("Invalid hub endpoint {endpoint}: {message}")]
	InvalidEndpoint { endpoint: String, message: String },
}

impl HubError {
	/// Wrap a transport error without its URL, which may hold a license key.
	pub fn transport(err: reqwest::Error) -> Self {
		Self::Transport(err.without_url())
	}
}
