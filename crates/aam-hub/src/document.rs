// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy documents served by the hub.

use aam_host::NewPolicy;
use serde::Deserialize;
use serde_json::Value;

use crate::error::HubError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PolicyMetadata {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
}

/// `{ "metadata": { "title", "description" }, "policy": { ... } }`
///
/// The policy body is opaque and stored as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolicyDocument {
	#[serde(default)]
	pub metadata: PolicyMetadata,
	#[serde(default)]
	pub policy: Value,
}

impl PolicyDocument {
	/// Parse a 200 response body. An empty body or a JSON `null` yields
	/// `None`.
	pub fn parse(body: &[u8]) -> Result<Option<Self>, HubError> {
		if body.iter().all(u8::is_ascii_whitespace) {
			return Ok(None);
		}

		let value: Value =
			serde_json::from_slice(body).map_err(|e| HubError::MalformedDocument(e.to_string()))?;
		if value.is_null() {
			return Ok(None);
		}

		serde_json::from_value(value)
			.map(Some)
			.map_err(|e| HubError::MalformedDocument(e.to_string()))
	}

	/// Normalize into a record for the host. `source` is the hub identifier
	/// the document was fetched under.
	pub fn into_new_policy(self, source: &str) -> Result<NewPolicy, HubError> {
		let title = self
			.metadata
			.title
			.ok_or_else(|| HubError::MalformedDocument("missing metadata.title".to_string()))?;
		let excerpt = self.metadata.description.unwrap_or_default();
		let content = serde_json::to_string_pretty(&self.policy)
			.map_err(|e| HubError::MalformedDocument(e.to_string()))?;

		Ok(NewPolicy {
			source: source.trim().to_string(),
			title: escape_field(&title),
			excerpt: escape_field(&excerpt),
			content,
		})
	}
}

/// Trim and escape a free-text field for storage.
///
/// HTML-significant characters become entities and line breaks become the
/// two-character sequence `\n`.
pub fn escape_field(raw: &str) -> String {
	let raw = raw.trim().replace("\r\n", "\n");
	let mut out = String::with_capacity(raw.len());
	for c in raw.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#039;"),
			'\r' | '\n' => out.push_str("\\n"),
			c => out.push(c),
		}
	}
	out
}
