// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subjects a policy can be attached to.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A user account known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub email: String,
	#[serde(default)]
	pub login: String,
}

/// The entity an option list belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
	User(UserId),
	Role(String),
	/// Unauthenticated visitors.
	Visitor,
	/// Everybody, administrators included.
	Default,
}

impl Subject {
	/// Stable key used to name the subject's settings document.
	pub fn storage_key(&self) -> String {
		match self {
			Subject::User(id) => format!("user-{id}"),
			Subject::Role(slug) => format!("role-{slug}"),
			Subject::Visitor => "visitor".to_string(),
			Subject::Default => "default".to_string(),
		}
	}
}

impl fmt::Display for Subject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Subject::User(id) => write!(f, "user {id}"),
			Subject::Role(slug) => write!(f, "role {slug}"),
			Subject::Visitor => f.write_str("visitors"),
			Subject::Default => f.write_str("everybody"),
		}
	}
}
