// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subject resolution: turn a command-line token into a known user or role.

use std::fmt;
use std::sync::LazyLock;

use aam_host::{SubjectDirectory, User, UserId};
use regex::Regex;

use crate::error::AssignmentError;

static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
	User,
	Role,
}

impl fmt::Display for SubjectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SubjectKind::User => f.write_str("User"),
			SubjectKind::Role => f.write_str("Role"),
		}
	}
}

/// How a user token should be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserToken {
	Numeric(u64),
	Email(String),
}

/// Classify a user token as a numeric ID or an email address.
///
/// Anything else, including numbers that overflow `u64`, is an
/// [`AssignmentError::InvalidIdentifier`].
pub fn classify_user_token(token: &str) -> Result<UserToken, AssignmentError> {
	let token = token.trim();

	if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
		if let Ok(id) = token.parse::<u64>() {
			return Ok(UserToken::Numeric(id));
		}
	} else if EMAIL_REGEX.is_match(token) {
		return Ok(UserToken::Email(token.to_string()));
	}

	Err(AssignmentError::InvalidIdentifier {
		token: token.to_string(),
	})
}

/// Read-only lookups against the host's subject directory.
pub struct SubjectResolver<'a> {
	directory: &'a dyn SubjectDirectory,
}

impl<'a> SubjectResolver<'a> {
	pub fn new(directory: &'a dyn SubjectDirectory) -> Self {
		Self { directory }
	}

	pub async fn resolve_user(&self, token: &str) -> Result<User, AssignmentError> {
		let token = token.trim();
		let found = match classify_user_token(token)? {
			UserToken::Numeric(id) => self.directory.user_by_id(UserId(id)).await,
			UserToken::Email(email) => self.directory.user_by_email(&email).await,
		}
		.map_err(|source| AssignmentError::Lookup {
			kind: SubjectKind::User,
			token: token.to_string(),
			source,
		})?;

		found.ok_or_else(|| AssignmentError::SubjectNotFound {
			kind: SubjectKind::User,
			token: token.to_string(),
		})
	}

	/// Returns the slug back when the role exists.
	pub async fn resolve_role(&self, slug: &str) -> Result<String, AssignmentError> {
		let slug = slug.trim();
		let exists = self
			.directory
			.role_exists(slug)
			.await
			.map_err(|source| AssignmentError::Lookup {
				kind: SubjectKind::Role,
				token: slug.to_string(),
				source,
			})?;

		if exists {
			Ok(slug.to_string())
		} else {
			Err(AssignmentError::SubjectNotFound {
				kind: SubjectKind::Role,
				token: slug.to_string(),
			})
		}
	}
}
