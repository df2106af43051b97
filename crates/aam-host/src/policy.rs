// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy records and per-subject policy option lists.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Object type under which policy assignments live in a subject's settings.
pub const POLICY_OBJECT_TYPE: &str = "policy";

/// Identifier the host allocates to a stored policy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub u64);

impl fmt::Display for PolicyId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
	#[default]
	Published,
	Draft,
}

/// A policy ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicy {
	/// Hub identifier the document was fetched under.
	pub source: String,
	pub title: String,
	pub excerpt: String,
	/// Policy body as pretty-printed JSON.
	pub content: String,
}

/// A persisted policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
	pub id: PolicyId,
	pub source: String,
	pub title: String,
	pub excerpt: String,
	pub content: String,
	#[serde(default)]
	pub status: PolicyStatus,
}

impl PolicyRecord {
	pub fn from_new(id: PolicyId, policy: NewPolicy) -> Self {
		Self {
			id,
			source: policy.source,
			title: policy.title,
			excerpt: policy.excerpt,
			content: policy.content,
			status: PolicyStatus::Published,
		}
	}
}

/// A subject's policy option list: policy identifier to effect.
///
/// `true` applies the policy to the subject, `false` excludes the subject
/// from it. Setting an identifier that is already present overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyList(BTreeMap<PolicyId, bool>);

impl PolicyList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, id: PolicyId, effect: bool) {
		self.0.insert(id, effect);
	}

	pub fn effect(&self, id: PolicyId) -> Option<bool> {
		self.0.get(&id).copied()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (PolicyId, bool)> + '_ {
		self.0.iter().map(|(id, effect)| (*id, *effect))
	}
}

impl FromIterator<(PolicyId, bool)> for PolicyList {
	fn from_iter<I: IntoIterator<Item = (PolicyId, bool)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_overwrites_existing_entry() {
		let mut list = PolicyList::new();
		list.set(PolicyId(4), true);
		list.set(PolicyId(4), false);

		assert_eq!(list.len(), 1);
		assert_eq!(list.effect(PolicyId(4)), Some(false));
	}

	#[test]
	fn serializes_as_object_keyed_by_id() {
		let list: PolicyList = [(PolicyId(2), true), (PolicyId(10), false)].into_iter().collect();

		let json = serde_json::to_value(&list).unwrap();
		assert_eq!(json, serde_json::json!({"2": true, "10": false}));

		let back: PolicyList = serde_json::from_value(json).unwrap();
		assert_eq!(back, list);
	}
}
